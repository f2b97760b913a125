//! Unit tests for batch spawning and unwinding

use core_types::{BenchError, EngineError, RunFlag, UnitCounters};
use engines::{join_all, spawn_batch, FiberEngine, ThreadEngine};
use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Thread engine that refuses to spawn after a fixed number of units.
#[derive(Clone)]
struct LimitedEngine {
    inner: ThreadEngine,
    remaining: Arc<AtomicUsize>,
}

impl LimitedEngine {
    fn new(limit: usize) -> Self {
        Self {
            inner: ThreadEngine::init(64 * 1024).unwrap(),
            remaining: Arc::new(AtomicUsize::new(limit)),
        }
    }
}

impl FiberEngine for LimitedEngine {
    type Unit = <ThreadEngine as FiberEngine>::Unit;
    type Signal = <ThreadEngine as FiberEngine>::Signal;

    fn name(&self) -> &'static str {
        "limited"
    }

    fn spawn<F>(&self, work: F) -> Result<Self::Unit, EngineError>
    where
        F: FnOnce() + Send + 'static,
    {
        let granted = self
            .remaining
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |n| n.checked_sub(1))
            .is_ok();
        if !granted {
            return Err(EngineError::Spawn(io::Error::new(
                io::ErrorKind::OutOfMemory,
                "unit limit reached",
            )));
        }
        self.inner.spawn(work)
    }

    fn yield_now(&self) {
        self.inner.yield_now();
    }

    fn join(&self, unit: Self::Unit) -> Result<(), EngineError> {
        self.inner.join(unit)
    }

    fn signal(&self) -> Self::Signal {
        self.inner.signal()
    }
}

#[test]
fn batch_spawns_every_unit() {
    let engine = ThreadEngine::init(64 * 1024).unwrap();
    let counters = UnitCounters::new(8);
    let units = spawn_batch(
        &engine,
        "batch",
        8,
        |i| {
            let slot = counters.slot(i);
            move || slot.bump()
        },
        || {},
    )
    .unwrap();
    assert_eq!(units.len(), 8);
    join_all(&engine, units).unwrap();
    assert_eq!(counters.read_after_join(), vec![1; 8]);
}

#[test]
fn failed_batch_unwinds_running_units() {
    let engine = LimitedEngine::new(3);
    let flag = RunFlag::running();
    let exited = Arc::new(AtomicUsize::new(0));

    let err = spawn_batch(
        &engine,
        "yield",
        10,
        |_| {
            let flag = flag.clone();
            let exited = exited.clone();
            let engine = engine.clone();
            move || {
                while flag.is_running() {
                    engine.yield_now();
                }
                exited.fetch_add(1, Ordering::Relaxed);
            }
        },
        || flag.stop(),
    )
    .unwrap_err();

    match err {
        BenchError::Exhausted {
            scenario,
            created,
            requested,
            source,
        } => {
            assert_eq!(scenario, "yield");
            assert_eq!(created, 3);
            assert_eq!(requested, 10);
            assert!(source.is_resource_exhaustion());
        }
        other => panic!("unexpected error: {other}"),
    }
    // Every created unit was joined before the error came back.
    assert_eq!(exited.load(Ordering::Relaxed), 3);
}

#[test]
fn join_all_reports_first_panic_but_joins_everything() {
    let engine = ThreadEngine::init(256 * 1024).unwrap();
    let finished = Arc::new(AtomicUsize::new(0));
    let mut units = Vec::new();
    units.push(engine.spawn(|| panic!("first")).unwrap());
    for _ in 0..3 {
        let finished = finished.clone();
        units.push(
            engine
                .spawn(move || {
                    finished.fetch_add(1, Ordering::Relaxed);
                })
                .unwrap(),
        );
    }
    let err = join_all(&engine, units).unwrap_err();
    assert!(matches!(err, EngineError::UnitPanicked { .. }));
    assert_eq!(finished.load(Ordering::Relaxed), 3);
}
