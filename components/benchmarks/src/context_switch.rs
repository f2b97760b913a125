//! Raw context-switch throughput.
//!
//! The driver transfers into N contexts round-robin; each context increments
//! its counter and transfers straight back. One round trip is two switches.
//! After the window every context is entered once more so it can observe the
//! stop and finish; a context that does not finish is an invariant violation.

use core_types::{
    BenchError, MeasurementWindow, PhaseTracker, RunFlag, ScenarioPhase, ScenarioResult, Timestamp,
    UnitCounters,
};
use engines::{context_body, RawContext, RawContextEngine};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, warn};

/// Scenario name used in reports.
pub const SCENARIO: &str = "context switch";

/// Switches between clock samples, spread over all contexts.
pub const SWITCHES_PER_SAMPLE: usize = 1_000_000;

/// Round-robin rounds between two clock samples for `units` contexts.
pub fn rounds_per_sample(units: usize) -> usize {
    (SWITCHES_PER_SAMPLE / units.max(1)).max(1)
}

/// Runs `units` raw contexts on `engine` for one window.
pub fn run<E: RawContextEngine>(
    engine: &E,
    units: usize,
    target: Duration,
) -> Result<ScenarioResult, BenchError> {
    let mut phase = PhaseTracker::new(SCENARIO);
    let flag = RunFlag::running();
    let counters = UnitCounters::new(units);
    let finished = Arc::new(AtomicU64::new(0));

    phase.advance(ScenarioPhase::Warmup)?;
    let mut contexts = Vec::with_capacity(units);
    for i in 0..units {
        let flag = flag.clone();
        let slot = counters.slot(i);
        let finished = finished.clone();
        let body = context_body(move |back| {
            while flag.is_running() {
                slot.bump();
                back();
            }
            finished.fetch_add(1, Ordering::Relaxed);
        });

        match engine.allocate_stack().and_then(|stack| engine.create(stack, body)) {
            Ok(ctx) => contexts.push(ctx),
            Err(source) => {
                let created = contexts.len();
                warn!(
                    engine = engine.name(),
                    created,
                    requested = units,
                    error = %source,
                    "context creation failed, unwinding"
                );
                for ctx in contexts {
                    engine.destroy(ctx)?;
                }
                return Err(BenchError::Exhausted {
                    scenario: SCENARIO,
                    created,
                    requested: units,
                    source,
                });
            }
        }
    }

    let rounds = rounds_per_sample(units);
    let window = MeasurementWindow::start(target);
    phase.advance(ScenarioPhase::Running)?;
    let end = loop {
        for _ in 0..rounds {
            for ctx in contexts.iter_mut() {
                ctx.transfer();
            }
        }
        let now = Timestamp::now();
        if window.is_due(now) {
            break now;
        }
    };

    flag.stop();
    phase.advance(ScenarioPhase::Draining)?;
    for ctx in contexts.iter_mut() {
        ctx.transfer();
    }

    let observed = finished.load(Ordering::Relaxed);
    if observed != units as u64 {
        error!(
            engine = engine.name(),
            expected = units,
            observed,
            "contexts still suspended after stop"
        );
        return Err(BenchError::Invariant {
            scenario: SCENARIO,
            expected: units as u64,
            observed,
        });
    }
    for ctx in contexts {
        engine.destroy(ctx)?;
    }

    let counts = counters.read_after_join();
    let switches = 2 * counts.iter().sum::<u64>();
    phase.advance(ScenarioPhase::Reported)?;
    debug!(engine = engine.name(), units, switches, "contexts destroyed");

    Ok(ScenarioResult::with_total(
        SCENARIO,
        engine.name(),
        &counts,
        switches,
        window.elapsed_micros(end),
    ))
}
