use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use dimmer_hardware::ZeroCrossTicker;
use rstest::rstest;

#[rstest]
fn ticker_emits_edges_at_the_half_cycle_cadence() {
    let edges = Arc::new(AtomicU64::new(0));
    let edges_clone = edges.clone();
    // 10 ms half-cycle (50 Hz mains).
    let ticker = ZeroCrossTicker::spawn(10_000, move || {
        edges_clone.fetch_add(1, Ordering::Relaxed);
    });

    std::thread::sleep(Duration::from_millis(205));
    drop(ticker);

    // ~20 edges expected; generous bounds for scheduler jitter.
    let n = edges.load(Ordering::Relaxed);
    assert!((10..=30).contains(&n), "saw {n} edges");
}

#[rstest]
fn dropping_the_ticker_stops_edges() {
    let edges = Arc::new(AtomicU64::new(0));
    let edges_clone = edges.clone();
    let ticker = ZeroCrossTicker::spawn(5_000, move || {
        edges_clone.fetch_add(1, Ordering::Relaxed);
    });

    std::thread::sleep(Duration::from_millis(50));
    drop(ticker);

    let at_drop = edges.load(Ordering::Relaxed);
    std::thread::sleep(Duration::from_millis(50));
    assert_eq!(edges.load(Ordering::Relaxed), at_drop);
}
