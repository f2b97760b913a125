//! Core measurement types and error handling for the fiber benchmark harness.
//!
//! This crate provides the foundational types every scenario shares: the
//! wall-clock timer, the measurement window and its run flag, per-unit
//! counters, aggregated results, and the error taxonomy.
//!
//! # Overview
//!
//! - [`Timestamp`] / [`elapsed_micros`] - Monotonic timing in microseconds
//! - [`MeasurementWindow`] - Fixed-duration window sampled from the clock
//! - [`RunFlag`] - Relaxed gate units poll at the top of their loop
//! - [`UnitCounters`] - One single-writer counter per execution unit
//! - [`ScenarioResult`] - Throughput plus min/max fairness
//! - [`EngineError`] / [`BenchError`] - Failure taxonomy
//!
//! # Examples
//!
//! ```
//! use core_types::{ScenarioResult, UnitCounters};
//!
//! let counters = UnitCounters::new(2);
//! counters.slot(0).bump();
//! counters.slot(1).bump();
//! counters.slot(1).bump();
//!
//! let counts = counters.read_after_join();
//! let result = ScenarioResult::from_counts("yield", "demo", &counts, 1_000_000.0);
//! assert_eq!(result.total_ops, 3);
//! assert_eq!(result.min_per_unit, 1);
//! assert_eq!(result.max_per_unit, 2);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod counters;
mod error;
mod level;
mod phase;
mod result;
mod timer;
mod window;

pub use counters::{CounterSlot, UnitCounters};
pub use error::{BenchError, EngineError, FailureClass};
pub use level::{levels_up_to, CONCURRENCY_LEVELS};
pub use phase::{PhaseTracker, ScenarioPhase};
pub use result::ScenarioResult;
pub use timer::{elapsed_micros, Timestamp};
pub use window::{MeasurementWindow, RunFlag, DEFAULT_WINDOW, MICROS_PER_SECOND};

/// Stack size in bytes given to raw contexts and thread-like units.
pub const STACK_SIZE: usize = 16 * 1024;
