//! Raw stackful contexts from `corosensei`.
//!
//! No scheduler: the driver transfers into a context, the context transfers
//! straight back. Stacks are allocated explicitly and freed on destroy.

use crate::engine::{ContextBody, Handoff, RawContext, RawContextEngine};
use core_types::EngineError;
use corosensei::stack::DefaultStack;
use corosensei::{Coroutine, CoroutineResult, Yielder};

/// Handle to the `corosensei` context primitive.
#[derive(Debug, Clone)]
pub struct CoroEngine {
    stack_size: usize,
}

impl CoroEngine {
    /// Engine name used in reports.
    pub const NAME: &'static str = "corosensei";

    /// Creates an engine allocating `stack_size`-byte stacks.
    pub fn new(stack_size: usize) -> Self {
        Self { stack_size }
    }
}

/// A context created by [`CoroEngine`].
pub struct CoroContext {
    coroutine: Coroutine<(), (), (), DefaultStack>,
}

impl RawContext for CoroContext {
    #[inline]
    fn transfer(&mut self) -> Handoff {
        if self.coroutine.done() {
            return Handoff::Finished;
        }
        match self.coroutine.resume(()) {
            CoroutineResult::Yield(()) => Handoff::Suspended,
            CoroutineResult::Return(()) => Handoff::Finished,
        }
    }

    fn is_finished(&self) -> bool {
        self.coroutine.done()
    }
}

impl RawContextEngine for CoroEngine {
    type Stack = DefaultStack;
    type Context = CoroContext;

    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn stack_size(&self) -> usize {
        self.stack_size
    }

    fn allocate_stack(&self) -> Result<Self::Stack, EngineError> {
        DefaultStack::new(self.stack_size).map_err(EngineError::StackAllocation)
    }

    fn create(&self, stack: Self::Stack, body: ContextBody) -> Result<Self::Context, EngineError> {
        let coroutine = Coroutine::with_stack(stack, move |yielder: &Yielder<(), ()>, _: ()| {
            let mut back = || yielder.suspend(());
            body(&mut back);
        });
        Ok(CoroContext { coroutine })
    }

    fn destroy(&self, context: Self::Context) -> Result<(), EngineError> {
        if context.coroutine.started() && !context.coroutine.done() {
            return Err(EngineError::NotFinished { engine: Self::NAME });
        }
        // Dropping a finished or never-started coroutine unmaps its stack.
        drop(context);
        Ok(())
    }
}
