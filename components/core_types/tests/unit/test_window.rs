//! Unit tests for the measurement window, run flag and counters

use core_types::{elapsed_micros, MeasurementWindow, RunFlag, Timestamp, UnitCounters};
use std::time::Duration;

#[test]
fn window_elapsed_covers_target() {
    let window = MeasurementWindow::start(Duration::from_millis(20));
    window.sleep_until_due();
    let end = Timestamp::now();
    assert!(window.elapsed_micros(end) >= 20_000.0);
    assert!(window.is_due(end));
}

#[test]
fn window_start_precedes_measured_work() {
    let flag = RunFlag::new();
    let window = MeasurementWindow::start(Duration::from_millis(1));
    flag.open();
    let first_work = Timestamp::now();
    assert!(window.start_time() <= first_work);
}

#[test]
fn elapsed_from_real_samples() {
    let t0 = Timestamp::now();
    std::thread::sleep(Duration::from_millis(3));
    let t1 = Timestamp::now();
    let micros = elapsed_micros(t0, t1);
    assert!(micros >= 3_000.0);
    assert!(micros < 10_000_000.0);
}

#[test]
fn gated_threads_count_only_while_running() {
    let flag = RunFlag::new();
    let counters = UnitCounters::new(4);

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let flag = flag.clone();
            let slot = counters.slot(i);
            std::thread::spawn(move || {
                flag.wait_open(std::thread::yield_now);
                while flag.is_running() {
                    slot.bump();
                    std::thread::yield_now();
                }
            })
        })
        .collect();

    // Nothing may be counted before the gate opens.
    std::thread::sleep(Duration::from_millis(5));
    assert_eq!(counters.total(), 0);

    flag.open();
    std::thread::sleep(Duration::from_millis(10));
    flag.stop();
    for h in handles {
        h.join().unwrap();
    }

    let counts = counters.read_after_join();
    assert_eq!(counts.iter().sum::<u64>(), counters.total());
    assert!(counters.total() > 0);
}

#[test]
fn stopped_before_open_counts_nothing() {
    let flag = RunFlag::new();
    let counters = UnitCounters::new(1);
    let slot = counters.slot(0);
    let unit_flag = flag.clone();
    flag.stop();

    let handle = std::thread::spawn(move || {
        unit_flag.wait_open(std::thread::yield_now);
        while unit_flag.is_running() {
            slot.bump();
        }
    });
    handle.join().unwrap();
    assert_eq!(counters.total(), 0);
}
