//! Create+yield throughput: spawn a child that increments, join it, yield.

use crate::gated::run_gated;
use core_types::{BenchError, CounterSlot, EngineError, RunFlag, ScenarioResult};
use engines::FiberEngine;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

/// Scenario name used in reports.
pub const SCENARIO: &str = "create+yield";

/// Runs `units` create+yield loops on `engine` for one window.
///
/// A unit whose child cannot be spawned or joined leaves its loop; the first
/// such failure is returned after every unit has been joined.
pub fn run<E: FiberEngine>(
    engine: &E,
    units: usize,
    window: Duration,
) -> Result<ScenarioResult, BenchError> {
    let failure: Arc<Mutex<Option<EngineError>>> = Arc::new(Mutex::new(None));

    let run = run_gated(engine, SCENARIO, units, window, |slot, flag| {
        unit_body(engine.clone(), slot, flag, failure.clone())
    })?;

    if let Some(e) = failure.lock().take() {
        warn!(engine = engine.name(), error = %e, "child unit failed");
        return Err(e.into());
    }

    Ok(ScenarioResult::from_counts(
        SCENARIO,
        engine.name(),
        &run.counts,
        run.elapsed_micros,
    ))
}

/// One unit: once the flag opens, spawn and join a counting child, then yield.
fn unit_body<E: FiberEngine>(
    engine: E,
    slot: CounterSlot,
    flag: RunFlag,
    failure: Arc<Mutex<Option<EngineError>>>,
) -> impl FnOnce() + Send + 'static {
    move || {
        flag.wait_open(|| engine.yield_now());
        while flag.is_running() {
            let child_slot = slot.clone();
            let outcome = engine
                .spawn(move || child_slot.bump())
                .and_then(|child| engine.join(child));
            if let Err(e) = outcome {
                let mut first = failure.lock();
                if first.is_none() {
                    *first = Some(e);
                }
                break;
            }
            engine.yield_now();
        }
    }
}
