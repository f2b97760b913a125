//! Error types for engines and scenarios.
//!
//! Every failure means the measurement itself is invalid, so nothing here is
//! retried. [`FailureClass`] tells the driver how far a failure reaches.

use crate::phase::ScenarioPhase;
use std::io;
use thiserror::Error;

/// Failures reported by a scheduling engine adapter.
#[derive(Error, Debug)]
pub enum EngineError {
    /// A unit or context stack could not be allocated
    #[error("stack allocation failed: {0}")]
    StackAllocation(#[source] io::Error),

    /// The engine refused to create another unit
    #[error("spawn failed: {0}")]
    Spawn(#[source] io::Error),

    /// The engine could not be initialized
    #[error("{engine} initialization failed: {reason}")]
    Init {
        /// Engine name
        engine: &'static str,
        /// What went wrong
        reason: String,
    },

    /// A unit panicked; the payload was captured at join
    #[error("{engine} unit panicked: {message}")]
    UnitPanicked {
        /// Engine name
        engine: &'static str,
        /// Panic payload rendered as text
        message: String,
    },

    /// A raw context was destroyed before reaching its terminal state
    #[error("{engine} context destroyed while still suspended")]
    NotFinished {
        /// Engine name
        engine: &'static str,
    },
}

impl EngineError {
    /// True for stack or spawn failures.
    pub fn is_resource_exhaustion(&self) -> bool {
        matches!(self, EngineError::StackAllocation(_) | EngineError::Spawn(_))
    }

    /// Renders a panic payload captured by `join` or `catch_unwind`.
    pub fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
        if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "non-string panic payload".to_string()
        }
    }
}

/// Failures of a scenario run.
#[derive(Error, Debug)]
pub enum BenchError {
    /// Units ran out before the batch was complete; created units were unwound
    #[error("{scenario}: resource exhausted after {created} of {requested} units: {source}")]
    Exhausted {
        /// Scenario name
        scenario: &'static str,
        /// Units created before the failure
        created: usize,
        /// Units requested
        requested: usize,
        /// Underlying engine failure
        #[source]
        source: EngineError,
    },

    /// Any other engine failure
    #[error("engine error: {0}")]
    Engine(#[from] EngineError),

    /// A post-shutdown count did not match; the harness or engine is broken
    #[error("{scenario}: invariant violated: expected {expected}, observed {observed}")]
    Invariant {
        /// Scenario name
        scenario: &'static str,
        /// Expected count
        expected: u64,
        /// Observed count
        observed: u64,
    },

    /// A scenario skipped a lifecycle phase
    #[error("{scenario}: phase {from} cannot advance to {to}")]
    Phase {
        /// Scenario name
        scenario: &'static str,
        /// Phase the run was in
        from: ScenarioPhase,
        /// Requested phase
        to: ScenarioPhase,
    },

    /// Report serialization failed
    #[error("report error: {0}")]
    Report(#[from] serde_json::Error),
}

/// How far a failure reaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureClass {
    /// Skip the remaining levels of the current scenario
    ResourceExhaustion,
    /// Skip every scenario that depends on the engine
    EngineInit,
    /// Abort the process
    Invariant,
    /// Report and skip the remaining levels
    Other,
}

impl BenchError {
    /// Classifies the failure for the driver.
    pub fn class(&self) -> FailureClass {
        match self {
            BenchError::Exhausted { .. } => FailureClass::ResourceExhaustion,
            BenchError::Engine(e) if e.is_resource_exhaustion() => FailureClass::ResourceExhaustion,
            BenchError::Engine(EngineError::Init { .. }) => FailureClass::EngineInit,
            BenchError::Invariant { .. } | BenchError::Phase { .. } => FailureClass::Invariant,
            _ => FailureClass::Other,
        }
    }
}
