//! Unit tests for the error taxonomy

use core_types::{BenchError, EngineError, FailureClass};
use std::io;

#[test]
fn exhaustion_skips_remaining_levels() {
    let err = BenchError::Exhausted {
        scenario: "yield",
        created: 1,
        requested: 2,
        source: EngineError::Spawn(io::Error::new(io::ErrorKind::OutOfMemory, "limit")),
    };
    assert_eq!(err.class(), FailureClass::ResourceExhaustion);
    assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn bare_stack_failure_is_exhaustion() {
    let err: BenchError =
        EngineError::StackAllocation(io::Error::new(io::ErrorKind::OutOfMemory, "mmap")).into();
    assert_eq!(err.class(), FailureClass::ResourceExhaustion);
}

#[test]
fn init_failure_is_engine_wide() {
    let err: BenchError = EngineError::Init {
        engine: "thread",
        reason: "stack too small".to_string(),
    }
    .into();
    assert_eq!(err.class(), FailureClass::EngineInit);
    assert!(err.to_string().contains("thread initialization failed"));
}

#[test]
fn leaked_context_is_invariant() {
    let err = BenchError::Invariant {
        scenario: "switch",
        expected: 4,
        observed: 3,
    };
    assert_eq!(err.class(), FailureClass::Invariant);
    assert!(err.to_string().contains("expected 4, observed 3"));
}
