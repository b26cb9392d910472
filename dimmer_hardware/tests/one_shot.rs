use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use dimmer_hardware::ThreadOneShot;
use dimmer_traits::OneShot;
use rstest::rstest;

fn counting_timer() -> (ThreadOneShot, Arc<AtomicU64>) {
    let fired = Arc::new(AtomicU64::new(0));
    let fired_clone = fired.clone();
    let timer = ThreadOneShot::spawn(move || {
        fired_clone.fetch_add(1, Ordering::Relaxed);
    });
    (timer, fired)
}

#[rstest]
fn fires_once_per_arm() {
    let (mut timer, fired) = counting_timer();

    timer.arm(Duration::from_millis(5));
    std::thread::sleep(Duration::from_millis(50));
    assert_eq!(fired.load(Ordering::Relaxed), 1);

    // Stays idle until re-armed.
    std::thread::sleep(Duration::from_millis(30));
    assert_eq!(fired.load(Ordering::Relaxed), 1);

    timer.arm(Duration::from_millis(5));
    std::thread::sleep(Duration::from_millis(50));
    assert_eq!(fired.load(Ordering::Relaxed), 2);
}

#[rstest]
fn never_fires_without_an_arm() {
    let (_timer, fired) = counting_timer();
    std::thread::sleep(Duration::from_millis(30));
    assert_eq!(fired.load(Ordering::Relaxed), 0);
}

#[rstest]
fn rearm_replaces_the_pending_deadline() {
    let (mut timer, fired) = counting_timer();

    // A long arm immediately superseded by a short one fires exactly once,
    // at the later request's deadline.
    timer.arm(Duration::from_millis(500));
    timer.arm(Duration::from_millis(5));
    std::thread::sleep(Duration::from_millis(60));
    assert_eq!(fired.load(Ordering::Relaxed), 1);

    // And nothing left over from the superseded arm.
    std::thread::sleep(Duration::from_millis(500));
    assert_eq!(fired.load(Ordering::Relaxed), 1);
}

#[rstest]
fn burst_of_arms_fires_once() {
    let (mut timer, fired) = counting_timer();

    for _ in 0..10 {
        timer.arm(Duration::from_millis(20));
    }
    std::thread::sleep(Duration::from_millis(100));
    assert_eq!(fired.load(Ordering::Relaxed), 1);
}

#[rstest]
fn drop_joins_cleanly_while_idle() {
    let (timer, fired) = counting_timer();
    drop(timer);
    assert_eq!(fired.load(Ordering::Relaxed), 0);
}
