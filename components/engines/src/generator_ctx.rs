//! Raw contexts from `generator`, the context layer `may` is built on.
//!
//! The stack is mapped when the context is created, so
//! [`RawContextEngine::allocate_stack`] only reserves a size and
//! [`RawContextEngine::create`] reports the mapping failure.

use crate::engine::{stack_words, ContextBody, Handoff, RawContext, RawContextEngine};
use core_types::EngineError;
use generator::{Generator, Gn};
use std::io;
use std::panic::{self, AssertUnwindSafe};

/// Handle to the `generator` context primitive.
#[derive(Debug, Clone)]
pub struct GeneratorEngine {
    stack_size: usize,
}

impl GeneratorEngine {
    /// Engine name used in reports.
    pub const NAME: &'static str = "generator";

    /// Creates an engine using `stack_size`-byte stacks.
    pub fn new(stack_size: usize) -> Self {
        Self { stack_size }
    }
}

/// A stack size reserved for one context, in machine words.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StackReservation {
    words: usize,
}

impl StackReservation {
    /// Reserved size in machine words.
    pub fn words(&self) -> usize {
        self.words
    }
}

/// A context created by [`GeneratorEngine`].
pub struct GeneratorContext {
    inner: Generator<'static, (), ()>,
    started: bool,
}

impl RawContext for GeneratorContext {
    #[inline]
    fn transfer(&mut self) -> Handoff {
        if self.inner.is_done() {
            return Handoff::Finished;
        }
        self.started = true;
        let _ = self.inner.resume();
        if self.inner.is_done() {
            Handoff::Finished
        } else {
            Handoff::Suspended
        }
    }

    fn is_finished(&self) -> bool {
        self.inner.is_done()
    }
}

impl RawContextEngine for GeneratorEngine {
    type Stack = StackReservation;
    type Context = GeneratorContext;

    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn stack_size(&self) -> usize {
        self.stack_size
    }

    fn allocate_stack(&self) -> Result<Self::Stack, EngineError> {
        let words = stack_words(self.stack_size);
        if words == 0 {
            return Err(EngineError::StackAllocation(io::Error::new(
                io::ErrorKind::InvalidInput,
                "stack size rounds down to zero words",
            )));
        }
        Ok(StackReservation { words })
    }

    fn create(&self, stack: Self::Stack, body: ContextBody) -> Result<Self::Context, EngineError> {
        let created = panic::catch_unwind(AssertUnwindSafe(move || {
            Gn::<()>::new_scoped_opt(stack.words, move |mut scope| {
                let mut back = || {
                    scope.yield_(());
                };
                body(&mut back);
            })
        }));

        match created {
            Ok(inner) => Ok(GeneratorContext {
                inner,
                started: false,
            }),
            Err(payload) => Err(EngineError::StackAllocation(io::Error::new(
                io::ErrorKind::OutOfMemory,
                EngineError::panic_message(payload.as_ref()),
            ))),
        }
    }

    fn destroy(&self, context: Self::Context) -> Result<(), EngineError> {
        if context.started && !context.inner.is_done() {
            return Err(EngineError::NotFinished { engine: Self::NAME });
        }
        drop(context);
        Ok(())
    }
}
