//! Shared driver for the gated throughput scenarios.
//!
//! Units are spawned against a pending [`RunFlag`] and park by yielding, so
//! creation cost stays outside the window. The window starts, the flag opens,
//! the driver sleeps, the flag stops and every unit is joined before the
//! counters are read.

use core_types::{
    BenchError, CounterSlot, MeasurementWindow, PhaseTracker, RunFlag, ScenarioPhase, Timestamp,
    UnitCounters,
};
use engines::{join_all, spawn_batch, FiberEngine};
use std::time::Duration;
use tracing::debug;

/// Post-join counters of one gated run.
#[derive(Debug)]
pub(crate) struct GatedRun {
    pub counts: Vec<u64>,
    pub elapsed_micros: f64,
}

/// Runs `units` units built by `make_unit` for one window.
pub(crate) fn run_gated<E, F, M>(
    engine: &E,
    scenario: &'static str,
    units: usize,
    target: Duration,
    make_unit: M,
) -> Result<GatedRun, BenchError>
where
    E: FiberEngine,
    F: FnOnce() + Send + 'static,
    M: FnMut(CounterSlot, RunFlag) -> F,
{
    run_gated_with_flag(engine, scenario, units, target, RunFlag::new(), make_unit)
}

/// [`run_gated`] against a caller-owned flag. Opening a flag that was
/// already stopped leaves it stopped, so units see no running window.
pub(crate) fn run_gated_with_flag<E, F, M>(
    engine: &E,
    scenario: &'static str,
    units: usize,
    target: Duration,
    flag: RunFlag,
    mut make_unit: M,
) -> Result<GatedRun, BenchError>
where
    E: FiberEngine,
    F: FnOnce() + Send + 'static,
    M: FnMut(CounterSlot, RunFlag) -> F,
{
    let mut phase = PhaseTracker::new(scenario);
    let counters = UnitCounters::new(units);

    phase.advance(ScenarioPhase::Warmup)?;
    let spawned = spawn_batch(
        engine,
        scenario,
        units,
        |i| make_unit(counters.slot(i), flag.clone()),
        || flag.stop(),
    )?;

    let window = MeasurementWindow::start(target);
    flag.open();
    phase.advance(ScenarioPhase::Running)?;
    window.sleep_until_due();
    flag.stop();

    phase.advance(ScenarioPhase::Draining)?;
    let joined = join_all(engine, spawned);
    let end = Timestamp::now();
    joined?;

    let counts = counters.read_after_join();
    phase.advance(ScenarioPhase::Reported)?;
    debug!(engine = engine.name(), scenario, units, "level drained");

    Ok(GatedRun {
        counts,
        elapsed_micros: window.elapsed_micros(end),
    })
}
