//! Aggregated scenario results.

use crate::window::MICROS_PER_SECOND;
use serde::{Deserialize, Serialize};

/// Outcome of one scenario at one concurrency level.
///
/// Throughput is the sum of the per-unit counters divided by the elapsed
/// seconds. Fairness is the min/max spread of the per-unit counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioResult {
    /// Scenario name (e.g. "yield", "suspend")
    pub scenario: String,
    /// Engine the scenario was driven through
    pub engine: String,
    /// Concurrency level
    pub units: usize,
    /// Wall-clock microseconds between window start and end
    pub elapsed_micros: f64,
    /// Operations counted over the window
    pub total_ops: u64,
    /// Operations per second
    pub ops_per_sec: f64,
    /// Smallest per-unit count
    pub min_per_unit: u64,
    /// Largest per-unit count
    pub max_per_unit: u64,
}

impl ScenarioResult {
    /// Builds a result where every counted unit is one operation.
    pub fn from_counts(scenario: &str, engine: &str, counts: &[u64], elapsed_micros: f64) -> Self {
        let total: u64 = counts.iter().sum();
        Self::with_total(scenario, engine, counts, total, elapsed_micros)
    }

    /// Builds a result with an explicit operation total.
    ///
    /// Used where one counted increment stands for several operations, such
    /// as a raw switch round-trip.
    pub fn with_total(
        scenario: &str,
        engine: &str,
        counts: &[u64],
        total_ops: u64,
        elapsed_micros: f64,
    ) -> Self {
        let min_per_unit = counts.iter().copied().min().unwrap_or(0);
        let max_per_unit = counts.iter().copied().max().unwrap_or(0);
        let ops_per_sec = if elapsed_micros > 0.0 {
            total_ops as f64 / elapsed_micros * MICROS_PER_SECOND
        } else {
            0.0
        };

        Self {
            scenario: scenario.to_string(),
            engine: engine.to_string(),
            units: counts.len(),
            elapsed_micros,
            total_ops,
            ops_per_sec,
            min_per_unit,
            max_per_unit,
        }
    }

    /// Millions of operations per second.
    pub fn mops(&self) -> f64 {
        self.ops_per_sec / 1_000_000.0
    }

    /// Thousands of operations per second.
    pub fn kops(&self) -> f64 {
        self.ops_per_sec / 1_000.0
    }

    /// Difference between the busiest and the idlest unit.
    pub fn fairness_spread(&self) -> u64 {
        self.max_per_unit - self.min_per_unit
    }
}
