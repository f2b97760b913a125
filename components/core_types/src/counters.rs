//! Per-unit operation counters.
//!
//! Each counter has exactly one writer, the unit it belongs to. The driver
//! reads counters only after every unit has been joined.

use crossbeam::utils::CachePadded;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// A set of per-unit counters, one per execution unit.
///
/// Counters are cache-padded so units running on different worker threads do
/// not share cache lines.
#[derive(Debug, Clone)]
pub struct UnitCounters {
    cells: Arc<[CachePadded<AtomicU64>]>,
}

impl UnitCounters {
    /// Creates `units` zeroed counters.
    pub fn new(units: usize) -> Self {
        Self {
            cells: (0..units)
                .map(|_| CachePadded::new(AtomicU64::new(0)))
                .collect(),
        }
    }

    /// Number of counters.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns true if there are no counters.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// The writer handle for unit `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn slot(&self, index: usize) -> CounterSlot {
        assert!(index < self.cells.len(), "counter index out of range");
        CounterSlot {
            cells: Arc::clone(&self.cells),
            index,
        }
    }

    /// Reads every counter.
    ///
    /// Call only after all writers have been joined.
    pub fn read_after_join(&self) -> Vec<u64> {
        self.cells
            .iter()
            .map(|cell| cell.load(Ordering::Relaxed))
            .collect()
    }

    /// Sum of every counter.
    pub fn total(&self) -> u64 {
        self.read_after_join().iter().sum()
    }
}

/// Writer side of one unit's counter.
#[derive(Debug, Clone)]
pub struct CounterSlot {
    cells: Arc<[CachePadded<AtomicU64>]>,
    index: usize,
}

impl CounterSlot {
    /// Adds one.
    ///
    /// A plain load+store: the slot has a single writer.
    #[inline]
    pub fn bump(&self) {
        let cell = &self.cells[self.index];
        cell.store(cell.load(Ordering::Relaxed) + 1, Ordering::Relaxed);
    }

}
