//! Suspend/resume ring.
//!
//! N units in a cycle, each waiting on its own wake signal. The holder of the
//! token increments its counter and wakes its successor. Once the budget
//! refuses, the token still makes one full lap so that every unit wakes,
//! forwards and exits.

use core_types::{
    BenchError, MeasurementWindow, PhaseTracker, RunFlag, ScenarioPhase, ScenarioResult, Timestamp,
    UnitCounters,
};
use engines::{join_all, spawn_batch, FiberEngine, WakeSignal};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Scenario name used in reports.
pub const SCENARIO: &str = "suspend";

/// Smallest ring that can hand a token around.
pub const MIN_UNITS: usize = 2;

/// When the ring stops passing work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RingStop {
    /// Run for a wall-clock window
    Window(Duration),
    /// Stop after exactly this many increments
    Iterations(u64),
}

struct RingBudget {
    flag: RunFlag,
    remaining: Option<AtomicU64>,
}

impl RingBudget {
    /// Once this returns false it returns false forever.
    fn take(&self) -> bool {
        if !self.flag.is_running() {
            return false;
        }
        match &self.remaining {
            None => true,
            Some(left) => left
                .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |n| n.checked_sub(1))
                .is_ok(),
        }
    }
}

/// Runs a ring of `units` units on `engine`.
///
/// Returns `None` for rings smaller than [`MIN_UNITS`].
pub fn run<E: FiberEngine>(
    engine: &E,
    units: usize,
    stop: RingStop,
) -> Result<Option<ScenarioResult>, BenchError> {
    if units < MIN_UNITS {
        debug!(units, "ring needs at least two units, skipped");
        return Ok(None);
    }

    let mut phase = PhaseTracker::new(SCENARIO);
    let flag = RunFlag::new();
    let counters = UnitCounters::new(units);
    let signals: Arc<[E::Signal]> = (0..units).map(|_| engine.signal()).collect();
    let (target, remaining) = match stop {
        RingStop::Window(target) => (target, None),
        RingStop::Iterations(k) => (Duration::ZERO, Some(AtomicU64::new(k))),
    };
    let budget = Arc::new(RingBudget {
        flag: flag.clone(),
        remaining,
    });

    phase.advance(ScenarioPhase::Warmup)?;
    let spawned = spawn_batch(
        engine,
        SCENARIO,
        units,
        |i| {
            let signals = signals.clone();
            let budget = budget.clone();
            let slot = counters.slot(i);
            let next = (i + 1) % units;
            move || loop {
                signals[i].wait();
                let proceed = budget.take();
                if proceed {
                    slot.bump();
                }
                signals[next].notify();
                if !proceed {
                    break;
                }
            }
        },
        || {
            flag.stop();
            signals[0].notify();
        },
    )?;

    let window = MeasurementWindow::start(target);
    flag.open();
    signals[0].notify();
    phase.advance(ScenarioPhase::Running)?;
    if let RingStop::Window(_) = stop {
        window.sleep_until_due();
        flag.stop();
    }

    phase.advance(ScenarioPhase::Draining)?;
    let joined = join_all(engine, spawned);
    let end = Timestamp::now();
    flag.stop();
    joined?;

    let counts = counters.read_after_join();
    phase.advance(ScenarioPhase::Reported)?;
    Ok(Some(ScenarioResult::from_counts(
        SCENARIO,
        engine.name(),
        &counts,
        window.elapsed_micros(end),
    )))
}
