//! Human-readable and JSON output.
//!
//! The text layout is one block per level: a separator, a "Testing ..." line,
//! the throughput line and, for multi-unit scenarios, the min/max fairness.

use core_types::ScenarioResult;

/// Line printed between blocks.
pub const SEPARATOR: &str = "------------------------------------------";

/// Unit a throughput is scaled to in parentheses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rate {
    /// Millions of operations per second
    Mega,
    /// Thousands of operations per second
    Kilo,
}

/// What one unit of `engine` is called in reports.
pub fn unit_noun(engine: &str) -> &'static str {
    match engine {
        "may" => "fiber",
        "thread" => "thread",
        "corosensei" | "generator" => "context",
        _ => "unit",
    }
}

/// Plural description of `engine`'s units, e.g. "may fibers".
pub fn engine_label(engine: &str) -> String {
    match engine {
        "thread" => "OS threads".to_string(),
        _ => format!("{engine} {}s", unit_noun(engine)),
    }
}

/// The line announcing a level, printed before it runs.
pub fn level_header(scenario: &str, engine: &str, units: usize) -> String {
    format!("Testing {scenario} for {units} {}", engine_label(engine))
}

/// Throughput line of `result`.
pub fn format_throughput(result: &ScenarioResult, rate: Rate) -> String {
    let (scaled, suffix) = match rate {
        Rate::Mega => (result.mops(), "Mrps"),
        Rate::Kilo => (result.kops(), "krps"),
    };
    format!(
        "Total ops per second: {:.0} ({:.3} {})",
        result.ops_per_sec, scaled, suffix
    )
}

/// Fairness line of `result`.
pub fn format_fairness(result: &ScenarioResult) -> String {
    format!(
        "Ops per {}: min: {} max: {}",
        unit_noun(&result.engine),
        result.min_per_unit,
        result.max_per_unit
    )
}

/// Result lines for one level, without the header.
pub fn format_result(result: &ScenarioResult, rate: Rate) -> String {
    let mut output = format_throughput(result, rate);
    if result.units > 1 {
        output.push('\n');
        output.push_str(&format_fairness(result));
    }
    output
}

/// Format scenario results as JSON
pub fn format_results_json(results: &[ScenarioResult]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(results)
}
