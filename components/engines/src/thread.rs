//! Thread-like units with attribute-based stack sizing.
//!
//! Each unit is a joinable OS thread created through `std::thread::Builder`
//! with an explicit stack size. Yielding hands the core back to the kernel
//! scheduler, so fairness here is whatever the OS provides.

use crate::engine::{FiberEngine, WakeSignal};
use core_types::EngineError;
use parking_lot::{Condvar, Mutex};
use std::thread::{self, JoinHandle};

/// Handle to the thread engine.
#[derive(Debug, Clone)]
pub struct ThreadEngine {
    stack_size: usize,
}

impl ThreadEngine {
    /// Engine name used in reports.
    pub const NAME: &'static str = "thread";

    /// Creates an engine whose units get `stack_size` bytes of stack.
    ///
    /// The platform may round the size up to its minimum.
    pub fn init(stack_size: usize) -> Result<Self, EngineError> {
        if stack_size == 0 {
            return Err(EngineError::Init {
                engine: Self::NAME,
                reason: "stack size must be non-zero".to_string(),
            });
        }
        Ok(Self { stack_size })
    }

    /// Requested stack size in bytes.
    pub fn stack_size(&self) -> usize {
        self.stack_size
    }
}

impl FiberEngine for ThreadEngine {
    type Unit = JoinHandle<()>;
    type Signal = ThreadSignal;

    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn spawn<F>(&self, work: F) -> Result<Self::Unit, EngineError>
    where
        F: FnOnce() + Send + 'static,
    {
        thread::Builder::new()
            .stack_size(self.stack_size)
            .spawn(work)
            .map_err(EngineError::Spawn)
    }

    #[inline]
    fn yield_now(&self) {
        thread::yield_now();
    }

    fn join(&self, unit: Self::Unit) -> Result<(), EngineError> {
        unit.join().map_err(|payload| EngineError::UnitPanicked {
            engine: Self::NAME,
            message: EngineError::panic_message(payload.as_ref()),
        })
    }

    fn signal(&self) -> Self::Signal {
        ThreadSignal::default()
    }
}

/// Counting wake signal for threads.
#[derive(Debug, Default)]
pub struct ThreadSignal {
    permits: Mutex<usize>,
    ready: Condvar,
}

impl WakeSignal for ThreadSignal {
    fn wait(&self) {
        let mut permits = self.permits.lock();
        while *permits == 0 {
            self.ready.wait(&mut permits);
        }
        *permits -= 1;
    }

    fn notify(&self) {
        *self.permits.lock() += 1;
        self.ready.notify_one();
    }
}
