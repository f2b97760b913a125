//! Panic propagation across a scheduled unit.
//!
//! A unit panics; the panic must surface at join instead of tearing down the
//! scheduler or the driver.

use core_types::{BenchError, EngineError};
use engines::FiberEngine;
use tracing::debug;

/// Scenario name used in reports.
pub const SCENARIO: &str = "panic";

/// Payload the probe unit panics with.
pub const PANIC_MESSAGE: &str = "probe unit failure";

/// Spawns a panicking unit, joins it and returns the captured payload.
pub fn run<E: FiberEngine>(engine: &E) -> Result<String, BenchError> {
    let unit = engine.spawn(|| panic!("{PANIC_MESSAGE}"))?;
    match engine.join(unit) {
        Err(EngineError::UnitPanicked { message, .. }) => {
            debug!(engine = engine.name(), %message, "panic captured");
            Ok(message)
        }
        Err(other) => Err(other.into()),
        Ok(()) => Err(BenchError::Invariant {
            scenario: SCENARIO,
            expected: 1,
            observed: 0,
        }),
    }
}
