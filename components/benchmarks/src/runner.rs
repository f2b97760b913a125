//! Benchmark driver.
//!
//! Runs the scenarios in a fixed order across the configured concurrency
//! levels, prints one block per level and applies the failure policy.

use crate::config::BenchConfig;
use crate::report::{
    engine_label, format_result, format_results_json, level_header, Rate, SEPARATOR,
};
use crate::suspend_ring::RingStop;
use crate::{
    context_switch, create_yield, panic_probe, plain_call, suspend_ring, warmup, yield_loop,
};
use core_types::{BenchError, FailureClass, ScenarioResult};
use engines::{CoroEngine, FiberEngine, GeneratorEngine, MayEngine, RawContextEngine, ThreadEngine};
use std::hint::black_box;
use tracing::{error, info, warn};

/// Iterations of the CPU ramp run before anything is measured.
pub const CPU_RAMP_ITERATIONS: u64 = 1_000_000_000;

/// Busy loop that brings the core up to speed.
///
/// Applies `n = n * 13 + 17` (wrapping) `iterations` times; the binary uses
/// the result as its exit code.
pub fn cpu_ramp(seed: i32, iterations: u64) -> i32 {
    let mut n = seed;
    for _ in 0..iterations {
        n = black_box(n.wrapping_mul(13).wrapping_add(17));
    }
    n
}

/// What the driver does after a failed level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    /// Print a diagnostic and skip the remaining levels of the scenario
    SkipLevels,
    /// Print a diagnostic and skip every scenario using the engine
    SkipEngine,
    /// Print a diagnostic and abort the process
    Abort,
}

/// Maps a failure class to the driver's reaction. Nothing is retried.
pub fn policy_for(class: FailureClass) -> Policy {
    match class {
        FailureClass::ResourceExhaustion | FailureClass::Other => Policy::SkipLevels,
        FailureClass::EngineInit => Policy::SkipEngine,
        FailureClass::Invariant => Policy::Abort,
    }
}

enum Sweep {
    Completed,
    Stopped,
    EngineDown,
}

/// Drives every scenario and collects the results.
pub struct Runner {
    config: BenchConfig,
    results: Vec<ScenarioResult>,
}

impl Runner {
    /// Create a runner for `config`
    pub fn new(config: BenchConfig) -> Self {
        Self {
            config,
            results: Vec::new(),
        }
    }

    /// Results collected so far, in run order.
    pub fn results(&self) -> &[ScenarioResult] {
        &self.results
    }

    /// Collected results as pretty JSON.
    pub fn report_json(&self) -> Result<String, BenchError> {
        Ok(format_results_json(&self.results)?)
    }

    /// Runs warmup and then every scenario in the fixed order.
    pub fn run_all(&mut self) {
        info!(
            levels = ?self.config.levels,
            window_ms = self.config.window.as_millis() as u64,
            "starting benchmark run"
        );

        self.warmup();
        self.run_may();
        self.run_plain_call();
        self.run_threads();

        let stack = self.config.context_stack;
        self.run_context_switch(&CoroEngine::new(stack));
        self.run_context_switch(&GeneratorEngine::new(stack));

        info!(results = self.results.len(), "benchmark run finished");
    }

    /// Times one raw context round trip. `None` if it failed.
    pub fn warmup(&mut self) -> Option<f64> {
        self.emit(SEPARATOR);
        match warmup::run(&CoroEngine::new(self.config.context_stack)) {
            Ok(micros) => {
                self.emit(&format!("Warmup time: {micros}us"));
                Some(micros)
            }
            Err(e) => {
                self.handle(warmup::SCENARIO, e);
                None
            }
        }
    }

    fn run_may(&mut self) {
        let may = match MayEngine::init(self.config.may_config()) {
            Ok(may) => may,
            Err(e) => {
                self.handle(MayEngine::NAME, e.into());
                return;
            }
        };
        let window = self.config.window;

        if let Sweep::EngineDown = self.sweep(yield_loop::SCENARIO, &may, Rate::Mega, |n| {
            yield_loop::run(&may, n, window).map(Some)
        }) {
            return;
        }
        if let Sweep::EngineDown = self.sweep(create_yield::SCENARIO, &may, Rate::Kilo, |n| {
            create_yield::run(&may, n, window).map(Some)
        }) {
            return;
        }
        if let Sweep::EngineDown = self.sweep(suspend_ring::SCENARIO, &may, Rate::Mega, |n| {
            suspend_ring::run(&may, n, RingStop::Window(window))
        }) {
            return;
        }
        self.probe_panic(&may);
    }

    fn run_plain_call(&mut self) {
        self.emit(SEPARATOR);
        self.emit(SEPARATOR);
        self.emit("Testing usual function call");
        let result = plain_call::run(self.config.window);
        info!(ops_per_sec = result.ops_per_sec, "plain call baseline");
        self.emit(&format_result(&result, Rate::Mega));
        self.results.push(result);
    }

    fn run_threads(&mut self) {
        let threads = match ThreadEngine::init(self.config.context_stack) {
            Ok(threads) => threads,
            Err(e) => {
                self.handle(ThreadEngine::NAME, e.into());
                return;
            }
        };
        let window = self.config.window;
        self.sweep(yield_loop::SCENARIO, &threads, Rate::Mega, |n| {
            yield_loop::run(&threads, n, window).map(Some)
        });
    }

    fn run_context_switch<E: RawContextEngine>(&mut self, engine: &E) {
        let window = self.config.window;
        let levels = self.config.levels.clone();
        self.sweep_levels(context_switch::SCENARIO, engine.name(), Rate::Mega, levels, |n| {
            context_switch::run(engine, n, window).map(Some)
        });
    }

    fn probe_panic<E: FiberEngine>(&mut self, engine: &E) {
        self.emit(SEPARATOR);
        self.emit(SEPARATOR);
        self.emit(&format!(
            "Testing panic propagation for {}",
            engine_label(engine.name())
        ));
        match panic_probe::run(engine) {
            Ok(message) => self.emit(&format!("Panic captured: {message}")),
            Err(e) => {
                self.handle(panic_probe::SCENARIO, e);
            }
        }
    }

    fn sweep<E, F>(&mut self, scenario: &str, engine: &E, rate: Rate, run_level: F) -> Sweep
    where
        E: FiberEngine,
        F: FnMut(usize) -> Result<Option<ScenarioResult>, BenchError>,
    {
        let mut levels = self.config.levels.clone();
        if scenario == suspend_ring::SCENARIO {
            levels.retain(|&n| n >= suspend_ring::MIN_UNITS);
        }
        self.sweep_levels(scenario, engine.name(), rate, levels, run_level)
    }

    fn sweep_levels<F>(
        &mut self,
        scenario: &str,
        engine: &str,
        rate: Rate,
        levels: Vec<usize>,
        mut run_level: F,
    ) -> Sweep
    where
        F: FnMut(usize) -> Result<Option<ScenarioResult>, BenchError>,
    {
        self.emit(SEPARATOR);
        for units in levels {
            self.emit(SEPARATOR);
            self.emit(&level_header(scenario, engine, units));
            match run_level(units) {
                Ok(Some(result)) => {
                    info!(
                        scenario,
                        engine,
                        units,
                        ops_per_sec = result.ops_per_sec,
                        spread = result.fairness_spread(),
                        "level complete"
                    );
                    self.emit(&format_result(&result, rate));
                    self.results.push(result);
                }
                Ok(None) => {}
                Err(e) => {
                    return match self.handle(scenario, e) {
                        Policy::SkipEngine => Sweep::EngineDown,
                        _ => Sweep::Stopped,
                    };
                }
            }
        }
        Sweep::Completed
    }

    /// Prints the diagnostic for `err` and applies its policy.
    fn handle(&self, scenario: &str, err: BenchError) -> Policy {
        let policy = policy_for(err.class());
        match policy {
            Policy::SkipLevels => {
                warn!(scenario, error = %err, "skipping remaining levels");
                self.emit(&format!("{scenario} failed: {err}; skipping remaining levels"));
            }
            Policy::SkipEngine => {
                error!(scenario, error = %err, "engine unavailable");
                self.emit(&format!("FATAL! {err}; skipping dependent scenarios"));
            }
            Policy::Abort => {
                error!(scenario, error = %err, "invariant violated, aborting");
                eprintln!("FATAL! {err}");
                std::process::abort();
            }
        }
        policy
    }

    fn emit(&self, text: &str) {
        if !self.config.json {
            println!("{text}");
        }
    }
}
