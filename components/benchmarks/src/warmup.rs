//! One-off warmup: create a raw context, enter it, let it finish.
//!
//! Pays first-use allocator and cache costs before any window is timed.

use core_types::{elapsed_micros, BenchError, Timestamp};
use engines::{context_body, Handoff, RawContext, RawContextEngine};

/// Scenario name used in reports.
pub const SCENARIO: &str = "warmup";

/// Times one context creation plus two transfers, in microseconds.
pub fn run<E: RawContextEngine>(engine: &E) -> Result<f64, BenchError> {
    let stack = engine.allocate_stack()?;

    let before = Timestamp::now();
    let mut ctx = engine.create(stack, context_body(|back| back()))?;
    let first = ctx.transfer();
    let second = ctx.transfer();
    let after = Timestamp::now();

    if (first, second) != (Handoff::Suspended, Handoff::Finished) {
        return Err(BenchError::Invariant {
            scenario: SCENARIO,
            expected: 1,
            observed: 0,
        });
    }
    engine.destroy(ctx)?;
    Ok(elapsed_micros(before, after))
}
