//! Cooperative fibers scheduled by `may`.
//!
//! `may` runs coroutines on its own worker threads; the driver stays on the
//! main OS thread and joins from there. Worker count and default stack size
//! are process-wide and can only be applied once, before the first spawn.

use crate::engine::{stack_words, FiberEngine, WakeSignal};
use core_types::EngineError;
use may::coroutine::{self, JoinHandle};
use may::sync::Semphore;
use std::io;
use std::panic::{self, AssertUnwindSafe};
use std::sync::OnceLock;
use tracing::{info, warn};

/// Smallest fiber stack the adapter accepts, in bytes.
pub const MIN_FIBER_STACK: usize = 8 * 1024;

/// Default fiber stack, in bytes.
pub const DEFAULT_FIBER_STACK: usize = 32 * 1024;

static APPLIED: OnceLock<MayConfig> = OnceLock::new();

/// Scheduler configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MayConfig {
    /// Worker threads running coroutines
    pub workers: usize,
    /// Stack size in bytes for each coroutine
    pub stack_size: usize,
}

impl Default for MayConfig {
    fn default() -> Self {
        Self {
            workers: 1,
            stack_size: DEFAULT_FIBER_STACK,
        }
    }
}

/// Handle to the `may` scheduler.
#[derive(Debug, Clone)]
pub struct MayEngine {
    stack_words: usize,
}

impl MayEngine {
    /// Engine name used in reports.
    pub const NAME: &'static str = "may";

    /// Validates `config` and applies it to the scheduler.
    ///
    /// The first successful call configures the process; later calls keep the
    /// worker count already in place and only change the per-fiber stack size.
    pub fn init(config: MayConfig) -> Result<Self, EngineError> {
        if config.workers == 0 {
            return Err(EngineError::Init {
                engine: Self::NAME,
                reason: "at least one worker is required".to_string(),
            });
        }
        if config.stack_size < MIN_FIBER_STACK {
            return Err(EngineError::Init {
                engine: Self::NAME,
                reason: format!(
                    "stack size {} is below the {} byte minimum",
                    config.stack_size, MIN_FIBER_STACK
                ),
            });
        }

        let words = stack_words(config.stack_size);
        let applied = APPLIED.get_or_init(|| {
            may::config()
                .set_workers(config.workers)
                .set_stack_size(words);
            info!(
                workers = config.workers,
                stack_size = config.stack_size,
                "may scheduler configured"
            );
            config
        });
        if applied.workers != config.workers {
            warn!(
                requested = config.workers,
                active = applied.workers,
                "may workers already configured"
            );
        }

        Ok(Self { stack_words: words })
    }
}

impl FiberEngine for MayEngine {
    type Unit = JoinHandle<()>;
    type Signal = MaySignal;

    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn spawn<F>(&self, work: F) -> Result<Self::Unit, EngineError>
    where
        F: FnOnce() + Send + 'static,
    {
        let builder = coroutine::Builder::new().stack_size(self.stack_words);
        // `may` panics instead of returning an error when the stack mapping
        // fails (address space or map count exhausted).
        let spawned = panic::catch_unwind(AssertUnwindSafe(move || {
            // SAFETY: work closures only touch atomics, wake signals and this
            // engine; they hold no thread-local borrows across suspension
            // points and never block the worker thread.
            unsafe { builder.spawn(work) }
        }));

        match spawned {
            Ok(handle) => handle.map_err(EngineError::Spawn),
            Err(payload) => Err(EngineError::StackAllocation(io::Error::new(
                io::ErrorKind::OutOfMemory,
                EngineError::panic_message(payload.as_ref()),
            ))),
        }
    }

    #[inline]
    fn yield_now(&self) {
        coroutine::yield_now();
    }

    fn join(&self, unit: Self::Unit) -> Result<(), EngineError> {
        unit.join().map_err(|payload| EngineError::UnitPanicked {
            engine: Self::NAME,
            message: EngineError::panic_message(payload.as_ref()),
        })
    }

    fn signal(&self) -> Self::Signal {
        MaySignal(Semphore::new(0))
    }
}

/// Wake signal backed by a `may` semaphore.
///
/// Waiting suspends the calling coroutine, or parks the thread when called
/// outside one.
pub struct MaySignal(Semphore);

impl WakeSignal for MaySignal {
    #[inline]
    fn wait(&self) {
        self.0.wait();
    }

    #[inline]
    fn notify(&self) {
        self.0.post();
    }
}
