//! Scenario lifecycle.

use crate::error::BenchError;
use std::fmt;

/// Phase of one scenario run.
///
/// Runs move strictly forward: `Init → Warmup → Running → Draining → Reported`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ScenarioPhase {
    /// Units are being created
    Init,
    /// Units exist but the window is not open yet
    Warmup,
    /// The window is open and units count work
    Running,
    /// The run flag is cleared and units are being joined
    Draining,
    /// Counters have been aggregated
    Reported,
}

impl fmt::Display for ScenarioPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScenarioPhase::Init => "init",
            ScenarioPhase::Warmup => "warmup",
            ScenarioPhase::Running => "running",
            ScenarioPhase::Draining => "draining",
            ScenarioPhase::Reported => "reported",
        };
        f.write_str(name)
    }
}

impl ScenarioPhase {
    fn next(self) -> Option<ScenarioPhase> {
        match self {
            ScenarioPhase::Init => Some(ScenarioPhase::Warmup),
            ScenarioPhase::Warmup => Some(ScenarioPhase::Running),
            ScenarioPhase::Running => Some(ScenarioPhase::Draining),
            ScenarioPhase::Draining => Some(ScenarioPhase::Reported),
            ScenarioPhase::Reported => None,
        }
    }
}

/// Tracks the phase of one scenario run and rejects skipped steps.
#[derive(Debug)]
pub struct PhaseTracker {
    scenario: &'static str,
    phase: ScenarioPhase,
}

impl PhaseTracker {
    /// Starts in [`ScenarioPhase::Init`].
    pub fn new(scenario: &'static str) -> Self {
        Self {
            scenario,
            phase: ScenarioPhase::Init,
        }
    }

    /// Current phase.
    pub fn phase(&self) -> ScenarioPhase {
        self.phase
    }

    /// Moves to `to`, which must be the immediate successor.
    pub fn advance(&mut self, to: ScenarioPhase) -> Result<(), BenchError> {
        if self.phase.next() != Some(to) {
            return Err(BenchError::Phase {
                scenario: self.scenario,
                from: self.phase,
                to,
            });
        }
        self.phase = to;
        Ok(())
    }
}
