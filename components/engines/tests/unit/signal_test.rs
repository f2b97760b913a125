//! Unit tests for wake signals

use engines::{FiberEngine, MayConfig, MayEngine, ThreadEngine, WakeSignal};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

fn relay<E: FiberEngine>(engine: &E, hops: u64) -> u64 {
    let ping = Arc::new(engine.signal());
    let pong = Arc::new(engine.signal());
    let seen = Arc::new(AtomicU64::new(0));

    let (p, q, s) = (ping.clone(), pong.clone(), seen.clone());
    let unit = engine
        .spawn(move || {
            for _ in 0..hops {
                p.wait();
                s.fetch_add(1, Ordering::Relaxed);
                q.notify();
            }
        })
        .unwrap();

    for _ in 0..hops {
        ping.notify();
        pong.wait();
    }
    engine.join(unit).unwrap();
    seen.load(Ordering::Relaxed)
}

#[test]
fn thread_signal_relays() {
    let engine = ThreadEngine::init(64 * 1024).unwrap();
    assert_eq!(relay(&engine, 100), 100);
}

#[test]
fn may_signal_relays() {
    let engine = MayEngine::init(MayConfig::default()).unwrap();
    assert_eq!(relay(&engine, 100), 100);
}

#[test]
fn notify_before_wait_is_kept() {
    let engine = ThreadEngine::init(64 * 1024).unwrap();
    let signal = engine.signal();
    signal.notify();
    signal.wait();
}
