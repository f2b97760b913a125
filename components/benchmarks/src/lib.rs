//! Cooperative scheduling microbenchmarks
//!
//! Measures the raw cost of scheduling primitives across engines at
//! concurrency levels from 1 to 100,000 units, using fixed wall-clock windows.
//! It includes:
//!
//! - Yield-loop and create+yield throughput for scheduled engines
//! - A suspend/resume ring built on wake signals
//! - A plain function call baseline
//! - Raw context-switch throughput for stackful context primitives
//! - Warmup, panic propagation probe and the driver that sequences them
//!
//! # Examples
//!
//! ```rust,no_run
//! use benchmarks::{yield_loop, BenchConfig};
//! use engines::MayEngine;
//!
//! let config = BenchConfig::default();
//! let may = MayEngine::init(config.may_config()).unwrap();
//! let result = yield_loop::run(&may, 10, config.window).unwrap();
//! println!("{}: {:.2} Mrps", result.scenario, result.mops());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cli;
pub mod config;
pub mod context_switch;
pub mod create_yield;
mod gated;
pub mod panic_probe;
pub mod plain_call;
pub mod report;
pub mod runner;
pub mod suspend_ring;
pub mod warmup;
pub mod yield_loop;

pub use cli::Cli;
pub use config::BenchConfig;
pub use runner::{cpu_ramp, policy_for, Policy, Runner, CPU_RAMP_ITERATIONS};
pub use suspend_ring::RingStop;
