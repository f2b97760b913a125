//! Plain function call baseline.

use core_types::{MeasurementWindow, ScenarioResult, Timestamp};
use std::hint::black_box;
use std::time::Duration;

/// Scenario name used in reports.
pub const SCENARIO: &str = "call";

/// Engine column for the baseline.
pub const ENGINE: &str = "plain";

/// Calls between clock samples.
pub const BATCH: u64 = 10_000;

/// The measured call. Never inlined.
#[inline(never)]
pub fn call_inc(v: &mut u64) {
    *v = black_box(*v) + 1;
}

/// Calls [`call_inc`] in batches until `window` has elapsed.
pub fn run(window: Duration) -> ScenarioResult {
    let mut total = 0u64;
    let window = MeasurementWindow::start(window);
    let end = loop {
        for _ in 0..BATCH {
            call_inc(&mut total);
        }
        let now = Timestamp::now();
        if window.is_due(now) {
            break now;
        }
    };
    ScenarioResult::from_counts(SCENARIO, ENGINE, &[total], window.elapsed_micros(end))
}
