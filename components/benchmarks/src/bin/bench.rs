//! Fiber benchmark CLI
//!
//! Runs every scenario in the fixed order. The exit code is the result of the
//! CPU ramp over the argument count and carries no meaning.

use benchmarks::{cpu_ramp, BenchConfig, Cli, Runner, CPU_RAMP_ITERATIONS};
use clap::Parser;
use std::process;
use tracing::{debug, error, Level};
use tracing_subscriber::FmtSubscriber;

fn setup_logging(verbose: bool, quiet: bool) {
    let level = if quiet {
        Level::ERROR
    } else if verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

fn main() {
    let cli = Cli::parse();
    setup_logging(cli.verbose, cli.quiet);

    let argc = std::env::args().count() as i32;
    let code = cpu_ramp(argc, CPU_RAMP_ITERATIONS);
    debug!(code, "cpu ramp done");

    let config = BenchConfig::from(&cli);
    let json = config.json;
    let mut runner = Runner::new(config);
    runner.run_all();

    if json {
        match runner.report_json() {
            Ok(report) => println!("{report}"),
            Err(e) => {
                error!(error = %e, "could not format results");
                eprintln!("Error formatting JSON: {e}");
            }
        }
    }

    process::exit(code);
}
