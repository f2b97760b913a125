//! Command-line arguments.
//!
//! Every flag is optional; with none, the binary runs the full fixed sequence.

use clap::Parser;

/// Arguments of the `fiber-bench` binary.
#[derive(Parser, Debug, Clone)]
#[command(name = "fiber-bench")]
#[command(version, about = "Cooperative scheduling microbenchmarks", long_about = None)]
pub struct Cli {
    /// Measurement window per level, in milliseconds
    #[arg(long = "window-ms", default_value_t = 1000)]
    pub window_ms: u64,

    /// Highest concurrency level to run
    #[arg(long = "max-units", default_value_t = 100_000)]
    pub max_units: usize,

    /// Worker threads for the `may` scheduler
    #[arg(long = "may-workers", default_value_t = 1)]
    pub may_workers: usize,

    /// Print results as JSON instead of text
    #[arg(long = "json")]
    pub json: bool,

    /// Debug-level logging on stderr
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,

    /// Errors only on stderr
    #[arg(short = 'q', long = "quiet")]
    pub quiet: bool,
}
