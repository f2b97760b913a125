//! Capability traits every engine adapter implements.
//!
//! Scheduled engines implement [`FiberEngine`]; raw context primitives
//! implement [`RawContextEngine`]. Neither trait assumes thread safety beyond
//! what the bounds state.

use core_types::{BenchError, EngineError};
use tracing::{debug, warn};

/// An engine that schedules units of concurrent work.
///
/// Handles are cheap to clone; units capture a clone to call
/// [`FiberEngine::yield_now`] or spawn children.
pub trait FiberEngine: Clone + Send + Sync + 'static {
    /// Opaque handle to one spawned unit.
    type Unit: Send;
    /// Wake signal used by suspend/resume handoffs.
    type Signal: WakeSignal;

    /// Short engine name used in reports.
    fn name(&self) -> &'static str;

    /// Creates and schedules a unit running `work`.
    ///
    /// Fails only on resource exhaustion.
    fn spawn<F>(&self, work: F) -> Result<Self::Unit, EngineError>
    where
        F: FnOnce() + Send + 'static;

    /// Gives up the current unit's turn. Returns once rescheduled.
    fn yield_now(&self);

    /// Blocks until `unit` has finished. Called exactly once per unit.
    fn join(&self, unit: Self::Unit) -> Result<(), EngineError>;

    /// Creates a wake signal with no pending permits.
    fn signal(&self) -> Self::Signal;
}

/// A counting wake signal: every `notify` releases exactly one `wait`.
pub trait WakeSignal: Send + Sync + 'static {
    /// Suspends the caller until a permit is available, then consumes it.
    fn wait(&self);
    /// Makes one permit available.
    fn notify(&self);
}

/// Where control stands after a transfer into a raw context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handoff {
    /// The context transferred control back and can be resumed again
    Suspended,
    /// The context's body returned
    Finished,
}

/// Body of a raw context.
///
/// The argument transfers control back to the driver; it returns when the
/// driver transfers into the context again.
pub type ContextBody = Box<dyn FnOnce(&mut dyn FnMut()) + Send + 'static>;

/// Boxes a closure as a [`ContextBody`].
pub fn context_body<F>(body: F) -> ContextBody
where
    F: FnOnce(&mut dyn FnMut()) + Send + 'static,
{
    Box::new(body)
}

/// One raw execution context owned by the driver.
///
/// Exactly one side runs at a time: the driver inside [`RawContext::transfer`]
/// is suspended until the context hands control back or finishes.
pub trait RawContext {
    /// Transfers control from the driver into this context.
    fn transfer(&mut self) -> Handoff;

    /// True once the body has returned.
    fn is_finished(&self) -> bool;
}

/// A raw stackful context primitive with no scheduler.
pub trait RawContextEngine {
    /// An allocated, not yet used stack.
    type Stack;
    /// A created context.
    type Context: RawContext;

    /// Short engine name used in reports.
    fn name(&self) -> &'static str;

    /// Bytes requested per stack.
    fn stack_size(&self) -> usize;

    /// Allocates one stack.
    fn allocate_stack(&self) -> Result<Self::Stack, EngineError>;

    /// Creates a context that will run `body` on `stack`.
    ///
    /// The body does not start until the first transfer.
    fn create(&self, stack: Self::Stack, body: ContextBody) -> Result<Self::Context, EngineError>;

    /// Releases a finished context and its stack.
    fn destroy(&self, context: Self::Context) -> Result<(), EngineError>;
}

/// Converts a byte stack size into the word count `may` and `generator`
/// expect, rounded down to an even number.
///
/// An odd word count switches on stack usage tracing in those engines.
pub fn stack_words(bytes: usize) -> usize {
    (bytes / std::mem::size_of::<usize>()) & !1
}

/// Joins every unit, even after a failure; returns the first failure.
pub fn join_all<E: FiberEngine>(engine: &E, units: Vec<E::Unit>) -> Result<(), EngineError> {
    let mut first_error = None;
    for unit in units {
        if let Err(e) = engine.join(unit) {
            warn!(engine = engine.name(), error = %e, "unit failed");
            first_error.get_or_insert(e);
        }
    }
    match first_error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

/// Spawns `count` units built by `make_work`.
///
/// On the first spawn failure, `cancel` is called so already-running units can
/// leave their loops, every created unit is joined, and the failure is
/// returned with the created/requested counts. No partial batch escapes.
pub fn spawn_batch<E, F, M, C>(
    engine: &E,
    scenario: &'static str,
    count: usize,
    mut make_work: M,
    cancel: C,
) -> Result<Vec<E::Unit>, BenchError>
where
    E: FiberEngine,
    F: FnOnce() + Send + 'static,
    M: FnMut(usize) -> F,
    C: FnOnce(),
{
    let mut units = Vec::with_capacity(count);
    for index in 0..count {
        match engine.spawn(make_work(index)) {
            Ok(unit) => units.push(unit),
            Err(source) => {
                let created = units.len();
                warn!(
                    engine = engine.name(),
                    scenario,
                    created,
                    requested = count,
                    error = %source,
                    "spawn failed, unwinding batch"
                );
                cancel();
                join_all(engine, units)?;
                return Err(BenchError::Exhausted {
                    scenario,
                    created,
                    requested: count,
                    source,
                });
            }
        }
    }
    debug!(engine = engine.name(), scenario, count, "batch spawned");
    Ok(units)
}
