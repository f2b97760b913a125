//! Contract tests for the engines component
//!
//! Every adapter must expose exactly the spawn / yield / join / signal
//! contract, or the allocate / create / transfer / destroy contract for raw
//! contexts.

use engines::{
    context_body, CoroEngine, FiberEngine, GeneratorEngine, Handoff, MayConfig, MayEngine,
    RawContext, RawContextEngine, ThreadEngine, WakeSignal,
};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

fn fiber_contract<E: FiberEngine>(engine: E) {
    // spawn runs the work exactly once; join returns after it finished
    let hits = Arc::new(AtomicU64::new(0));
    let units: Vec<_> = (0..4)
        .map(|_| {
            let hits = hits.clone();
            let inner = engine.clone();
            engine
                .spawn(move || {
                    for _ in 0..10 {
                        hits.fetch_add(1, Ordering::Relaxed);
                        inner.yield_now();
                    }
                })
                .unwrap()
        })
        .collect();
    for unit in units {
        engine.join(unit).unwrap();
    }
    assert_eq!(hits.load(Ordering::Relaxed), 40);

    // one notify releases one wait
    let signal = engine.signal();
    signal.notify();
    signal.wait();
}

fn raw_contract<E: RawContextEngine>(engine: E) {
    assert!(engine.stack_size() > 0);
    let stack = engine.allocate_stack().unwrap();
    let mut ctx = engine
        .create(
            stack,
            context_body(|back| {
                back();
            }),
        )
        .unwrap();
    assert!(!ctx.is_finished());
    assert_eq!(ctx.transfer(), Handoff::Suspended);
    assert_eq!(ctx.transfer(), Handoff::Finished);
    assert!(ctx.is_finished());
    engine.destroy(ctx).unwrap();
}

mod fiber_engines {
    use super::*;

    #[test]
    fn may_satisfies_contract() {
        let engine = MayEngine::init(MayConfig::default()).unwrap();
        assert_eq!(engine.name(), "may");
        fiber_contract(engine);
    }

    #[test]
    fn thread_satisfies_contract() {
        let engine = ThreadEngine::init(core_types::STACK_SIZE).unwrap();
        assert_eq!(engine.name(), "thread");
        fiber_contract(engine);
    }
}

mod raw_engines {
    use super::*;

    #[test]
    fn corosensei_satisfies_contract() {
        let engine = CoroEngine::new(core_types::STACK_SIZE);
        assert_eq!(engine.name(), "corosensei");
        raw_contract(engine);
    }

    #[test]
    fn generator_satisfies_contract() {
        let engine = GeneratorEngine::new(core_types::STACK_SIZE);
        assert_eq!(engine.name(), "generator");
        raw_contract(engine);
    }
}
