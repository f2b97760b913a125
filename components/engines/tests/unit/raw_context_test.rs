//! Unit tests for raw context round trips

use engines::{context_body, CoroEngine, GeneratorEngine, Handoff, RawContext, RawContextEngine};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

fn round_robin<E: RawContextEngine>(engine: &E, contexts: usize, rounds: u64) -> (u64, u64) {
    let run = Arc::new(AtomicBool::new(true));
    let total = Arc::new(AtomicU64::new(0));
    let finished = Arc::new(AtomicU64::new(0));

    let mut ctxs = Vec::new();
    for _ in 0..contexts {
        let (run, total, finished) = (run.clone(), total.clone(), finished.clone());
        let stack = engine.allocate_stack().unwrap();
        let ctx = engine
            .create(
                stack,
                context_body(move |back| {
                    while run.load(Ordering::Relaxed) {
                        total.fetch_add(1, Ordering::Relaxed);
                        back();
                    }
                    finished.fetch_add(1, Ordering::Relaxed);
                }),
            )
            .unwrap();
        ctxs.push(ctx);
    }

    for _ in 0..rounds {
        for ctx in ctxs.iter_mut() {
            assert_eq!(ctx.transfer(), Handoff::Suspended);
        }
    }

    run.store(false, Ordering::Relaxed);
    for mut ctx in ctxs {
        assert_eq!(ctx.transfer(), Handoff::Finished);
        engine.destroy(ctx).unwrap();
    }

    (total.load(Ordering::Relaxed), finished.load(Ordering::Relaxed))
}

#[test]
fn corosensei_round_robin() {
    let engine = CoroEngine::new(core_types::STACK_SIZE);
    assert_eq!(round_robin(&engine, 10, 50), (500, 10));
}

#[test]
fn generator_round_robin() {
    let engine = GeneratorEngine::new(core_types::STACK_SIZE);
    assert_eq!(round_robin(&engine, 10, 50), (500, 10));
}

#[test]
fn context_does_not_start_before_transfer() {
    let engine = CoroEngine::new(core_types::STACK_SIZE);
    let started = Arc::new(AtomicBool::new(false));
    let s = started.clone();
    let stack = engine.allocate_stack().unwrap();
    let mut ctx = engine
        .create(stack, context_body(move |_| s.store(true, Ordering::Relaxed)))
        .unwrap();
    assert!(!started.load(Ordering::Relaxed));
    assert_eq!(ctx.transfer(), Handoff::Finished);
    assert!(started.load(Ordering::Relaxed));
    engine.destroy(ctx).unwrap();
}
