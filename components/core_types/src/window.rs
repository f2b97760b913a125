//! Measurement windows and the shared run flag.

use crate::timer::{elapsed_micros, Timestamp};
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Microseconds in one second.
pub const MICROS_PER_SECOND: f64 = 1_000_000.0;

/// Target duration of every measurement window.
pub const DEFAULT_WINDOW: Duration = Duration::from_secs(1);

/// A fixed-duration measurement window.
///
/// The window is opened before any unit is released to do measured work, and
/// its elapsed time always comes from real clock samples.
#[derive(Debug, Clone, Copy)]
pub struct MeasurementWindow {
    start: Timestamp,
    target: Duration,
}

impl MeasurementWindow {
    /// Opens a window now.
    pub fn start(target: Duration) -> Self {
        Self {
            start: Timestamp::now(),
            target,
        }
    }

    /// When the window was opened.
    pub fn start_time(&self) -> Timestamp {
        self.start
    }

    /// Target duration in microseconds.
    pub fn target_micros(&self) -> f64 {
        self.target.as_secs_f64() * MICROS_PER_SECOND
    }

    /// Whether the target duration has passed at `now`.
    pub fn is_due(&self, now: Timestamp) -> bool {
        elapsed_micros(self.start, now) >= self.target_micros()
    }

    /// Microseconds between the window start and `end`.
    pub fn elapsed_micros(&self, end: Timestamp) -> f64 {
        elapsed_micros(self.start, end)
    }

    /// Blocks the calling OS thread until the window is due.
    ///
    /// `thread::sleep` may wake early on some platforms, so the clock is
    /// re-sampled until the target has really passed.
    pub fn sleep_until_due(&self) {
        loop {
            let now = Timestamp::now();
            if self.is_due(now) {
                return;
            }
            let passed = now.instant().saturating_duration_since(self.start.instant());
            std::thread::sleep(self.target.saturating_sub(passed));
        }
    }
}

const PENDING: u8 = 0;
const RUNNING: u8 = 1;
const STOPPED: u8 = 2;

/// The flag every unit polls at the top of its loop.
///
/// Starts `Pending` so that spawned units wait (yielding) without counting,
/// becomes `Running` when the driver opens the window, and `Stopped` when the
/// window closes. All accesses are relaxed: the harness measures scheduler
/// behaviour, not the cost of a synchronized stop.
#[derive(Debug, Clone, Default)]
pub struct RunFlag {
    state: Arc<AtomicU8>,
}

impl RunFlag {
    /// Creates a pending flag.
    pub fn new() -> Self {
        Self {
            state: Arc::new(AtomicU8::new(PENDING)),
        }
    }

    /// Creates a flag that is already running.
    pub fn running() -> Self {
        Self {
            state: Arc::new(AtomicU8::new(RUNNING)),
        }
    }

    /// Releases waiting units. Has no effect once stopped.
    pub fn open(&self) {
        let _ = self
            .state
            .compare_exchange(PENDING, RUNNING, Ordering::Relaxed, Ordering::Relaxed);
    }

    /// Tells every unit to leave its loop.
    pub fn stop(&self) {
        self.state.store(STOPPED, Ordering::Relaxed);
    }

    /// True while measured work should continue.
    #[inline]
    pub fn is_running(&self) -> bool {
        self.state.load(Ordering::Relaxed) == RUNNING
    }

    /// True until the driver opens or stops the flag.
    #[inline]
    pub fn is_pending(&self) -> bool {
        self.state.load(Ordering::Relaxed) == PENDING
    }

    /// True once the flag has been stopped.
    #[inline]
    pub fn is_stopped(&self) -> bool {
        self.state.load(Ordering::Relaxed) == STOPPED
    }

    /// Calls `park` until the flag leaves the pending state.
    ///
    /// Units pass their engine's yield here so the gate never blocks.
    #[inline]
    pub fn wait_open<F: FnMut()>(&self, mut park: F) {
        while self.is_pending() {
            park();
        }
    }
}
