//! Contract compliance tests for core_types
//!
//! These tests pin the public shapes the engines and scenarios rely on.

use core_types::{
    levels_up_to, BenchError, EngineError, FailureClass, MeasurementWindow, RunFlag,
    ScenarioPhase, ScenarioResult, UnitCounters, CONCURRENCY_LEVELS, STACK_SIZE,
};
use std::time::Duration;

#[cfg(test)]
mod level_contract_tests {
    use super::*;

    /// Contract: seven levels from one unit to one hundred thousand
    #[test]
    fn test_levels_series() {
        assert_eq!(CONCURRENCY_LEVELS, [1, 2, 10, 100, 1_000, 10_000, 100_000]);
    }

    #[test]
    fn test_levels_cap_is_inclusive() {
        assert_eq!(levels_up_to(10), vec![1, 2, 10]);
    }

    #[test]
    fn test_raw_stack_size() {
        assert_eq!(STACK_SIZE, 16 * 1024);
    }
}

#[cfg(test)]
mod flag_contract_tests {
    use super::*;

    /// Contract: a stopped flag never reopens
    #[test]
    fn test_stop_is_final() {
        let flag = RunFlag::new();
        flag.stop();
        flag.open();
        assert!(flag.is_stopped());
        assert!(!flag.is_running());
    }

    #[test]
    fn test_clones_share_state() {
        let flag = RunFlag::new();
        let unit_view = flag.clone();
        flag.open();
        assert!(unit_view.is_running());
    }

    #[test]
    fn test_window_is_due_after_target() {
        let window = MeasurementWindow::start(Duration::from_millis(2));
        window.sleep_until_due();
        assert!(window.is_due(core_types::Timestamp::now()));
    }
}

#[cfg(test)]
mod result_contract_tests {
    use super::*;

    /// Contract: throughput is the counter sum over elapsed seconds
    #[test]
    fn test_throughput_is_sum_over_seconds() {
        let counters = UnitCounters::new(2);
        counters.slot(0).bump();
        counters.slot(1).bump();
        counters.slot(1).bump();
        let counts = counters.read_after_join();
        let result = ScenarioResult::from_counts("yield", "may", &counts, 500_000.0);
        assert_eq!(result.total_ops, counters.total());
        assert!((result.ops_per_sec - 6.0).abs() < 1e-9);
        assert_eq!(result.fairness_spread(), 1);
    }
}

#[cfg(test)]
mod error_contract_tests {
    use super::*;
    use std::io;

    /// Contract: every failure maps to exactly one class
    #[test]
    fn test_every_variant_classified() {
        let cases = [
            (
                BenchError::Exhausted {
                    scenario: "yield",
                    created: 0,
                    requested: 1,
                    source: EngineError::Spawn(io::Error::new(io::ErrorKind::OutOfMemory, "oom")),
                },
                FailureClass::ResourceExhaustion,
            ),
            (
                BenchError::Engine(EngineError::Init {
                    engine: "may",
                    reason: "zero workers".to_string(),
                }),
                FailureClass::EngineInit,
            ),
            (
                BenchError::Invariant {
                    scenario: "context switch",
                    expected: 2,
                    observed: 1,
                },
                FailureClass::Invariant,
            ),
            (
                BenchError::Phase {
                    scenario: "yield",
                    from: ScenarioPhase::Init,
                    to: ScenarioPhase::Reported,
                },
                FailureClass::Invariant,
            ),
            (
                BenchError::Engine(EngineError::NotFinished { engine: "generator" }),
                FailureClass::Other,
            ),
        ];
        for (err, class) in cases {
            assert_eq!(err.class(), class, "{err}");
        }
    }
}
