//! Yield-loop throughput: increment, yield, repeat.

use crate::gated::run_gated;
use core_types::{BenchError, ScenarioResult};
use engines::FiberEngine;
use std::time::Duration;

/// Scenario name used in reports.
pub const SCENARIO: &str = "yield";

/// Runs `units` yield loops on `engine` for one window.
///
/// Each unit counts one operation per yield.
pub fn run<E: FiberEngine>(
    engine: &E,
    units: usize,
    window: Duration,
) -> Result<ScenarioResult, BenchError> {
    let run = run_gated(engine, SCENARIO, units, window, |slot, flag| {
        let engine = engine.clone();
        move || {
            flag.wait_open(|| engine.yield_now());
            while flag.is_running() {
                slot.bump();
                engine.yield_now();
            }
        }
    })?;

    Ok(ScenarioResult::from_counts(
        SCENARIO,
        engine.name(),
        &run.counts,
        run.elapsed_micros,
    ))
}
