//! Scheduling engines under test.
//!
//! This crate exposes the narrow capability interface the benchmark scenarios
//! drive, and one adapter per engine:
//!
//! - [`FiberEngine`] - spawn, yield, join and wake signals for scheduled units
//! - [`RawContextEngine`] / [`RawContext`] - explicit stacks and a symmetric
//!   driver ↔ context transfer with no scheduler involved
//!
//! # Engines
//!
//! - [`MayEngine`] - cooperative fibers with a work-stealing scheduler (`may`)
//! - [`ThreadEngine`] - thread-like units with attribute-based stack sizing
//! - [`CoroEngine`] - raw stackful contexts (`corosensei`)
//! - [`GeneratorEngine`] - the raw context layer underneath `may` (`generator`)
//!
//! The engines share no implementation, only the contract shape.
//!
//! # Examples
//!
//! ```
//! use engines::{FiberEngine, ThreadEngine};
//! use std::sync::atomic::{AtomicBool, Ordering};
//! use std::sync::Arc;
//!
//! let engine = ThreadEngine::init(64 * 1024).unwrap();
//! let ran = Arc::new(AtomicBool::new(false));
//! let flag = ran.clone();
//! let unit = engine.spawn(move || flag.store(true, Ordering::Relaxed)).unwrap();
//! engine.join(unit).unwrap();
//! assert!(ran.load(Ordering::Relaxed));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod coro;
pub mod engine;
pub mod generator_ctx;
pub mod may_fiber;
pub mod thread;

// Re-export main types at crate root
pub use coro::{CoroContext, CoroEngine};
pub use engine::{
    context_body, join_all, spawn_batch, stack_words, ContextBody, FiberEngine, Handoff, RawContext,
    RawContextEngine, WakeSignal,
};
pub use generator_ctx::{GeneratorContext, GeneratorEngine, StackReservation};
pub use may_fiber::{MayConfig, MayEngine, MaySignal};
pub use thread::{ThreadEngine, ThreadSignal};
