//! Concurrency levels every scenario is repeated at.

/// Ascending series of unit counts.
pub const CONCURRENCY_LEVELS: [usize; 7] = [1, 2, 10, 100, 1_000, 10_000, 100_000];

/// The levels not above `max_units`, in ascending order.
pub fn levels_up_to(max_units: usize) -> Vec<usize> {
    CONCURRENCY_LEVELS
        .iter()
        .copied()
        .filter(|&n| n <= max_units)
        .collect()
}
