//! Run configuration.

use crate::cli::Cli;
use core_types::{levels_up_to, DEFAULT_WINDOW, STACK_SIZE};
use engines::MayConfig;
use std::time::Duration;

/// Everything the runner needs to know before it starts.
///
/// `Default` is the no-argument behaviour of the binary.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchConfig {
    /// Measurement window per level
    pub window: Duration,
    /// Concurrency levels, ascending
    pub levels: Vec<usize>,
    /// Stack bytes per `may` fiber
    pub fiber_stack: usize,
    /// Stack bytes per raw context and per thread unit
    pub context_stack: usize,
    /// `may` worker threads
    pub may_workers: usize,
    /// Emit JSON instead of text
    pub json: bool,
}

impl Default for BenchConfig {
    fn default() -> Self {
        let may = MayConfig::default();
        Self {
            window: DEFAULT_WINDOW,
            levels: levels_up_to(usize::MAX),
            fiber_stack: may.stack_size,
            context_stack: STACK_SIZE,
            may_workers: may.workers,
            json: false,
        }
    }
}

impl BenchConfig {
    /// `may` scheduler settings derived from this configuration.
    pub fn may_config(&self) -> MayConfig {
        MayConfig {
            workers: self.may_workers,
            stack_size: self.fiber_stack,
        }
    }
}

impl From<&Cli> for BenchConfig {
    fn from(cli: &Cli) -> Self {
        Self {
            window: Duration::from_millis(cli.window_ms),
            levels: levels_up_to(cli.max_units),
            may_workers: cli.may_workers,
            json: cli.json,
            ..Self::default()
        }
    }
}
