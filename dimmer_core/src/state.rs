//! The shared dimmer state and the lock that guards it.
//!
//! `DimmerState` is the only mutable state shared between execution
//! contexts. It is guarded by a small spin lock rather than
//! `std::sync::Mutex`: the zero-cross path runs in interrupt-style context
//! and may only take a short, bounded, non-poisoning critical section that
//! never waits on a syscall. Writers hold the lock for a three-field store;
//! readers for a three-field copy. Nothing else is permitted under the lock.

use std::cell::UnsafeCell;
use std::sync::atomic::{AtomicBool, Ordering};

/// Snapshot of the dimmer's committed state.
///
/// Invariant: `enabled == false` iff `power_percent == 0` iff
/// `firing_delay_us` equals the half-cycle. When enabled, `firing_delay_us`
/// is the exact image of `power_percent` under `mapping::power_to_delay_us`;
/// the two never disagree because the three fields are only ever committed
/// together.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DimmerState {
    /// Whether firing is active.
    pub enabled: bool,
    /// Last committed, clamped power request (0 or within the limits).
    pub power_percent: u8,
    /// Time from zero-crossing to trigger pulse, microseconds.
    pub firing_delay_us: u32,
}

impl DimmerState {
    /// The OFF state: disabled, zero power, delay parked at the half-cycle.
    #[inline]
    pub const fn off(half_cycle_us: u32) -> Self {
        Self {
            enabled: false,
            power_percent: 0,
            firing_delay_us: half_cycle_us,
        }
    }
}

/// Minimal spin lock with acquire/release ordering.
///
/// Acquire on lock / release on unlock makes every normal-context commit
/// visible to the next edge-context snapshot. Critical sections must stay
/// a handful of loads/stores; holding this lock across a blocking call, the
/// pulse wait, or a logging call violates the concurrency contract.
pub struct SpinLock<T> {
    locked: AtomicBool,
    value: UnsafeCell<T>,
}

// The lock provides the required mutual exclusion.
unsafe impl<T: Send> Sync for SpinLock<T> {}

impl<T> SpinLock<T> {
    #[inline]
    pub const fn new(value: T) -> Self {
        Self {
            locked: AtomicBool::new(false),
            value: UnsafeCell::new(value),
        }
    }

    /// Acquire the lock, spinning until it is free.
    #[inline]
    pub fn lock(&self) -> SpinGuard<'_, T> {
        while self
            .locked
            .compare_exchange_weak(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            std::hint::spin_loop();
        }
        SpinGuard { lock: self }
    }
}

/// RAII guard; releases the lock on drop.
pub struct SpinGuard<'a, T> {
    lock: &'a SpinLock<T>,
}

impl<T> std::ops::Deref for SpinGuard<'_, T> {
    type Target = T;
    #[inline]
    fn deref(&self) -> &T {
        // Safety: the guard holds the lock.
        unsafe { &*self.lock.value.get() }
    }
}

impl<T> std::ops::DerefMut for SpinGuard<'_, T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut T {
        // Safety: the guard holds the lock exclusively.
        unsafe { &mut *self.lock.value.get() }
    }
}

impl<T> Drop for SpinGuard<'_, T> {
    #[inline]
    fn drop(&mut self) {
        self.lock.locked.store(false, Ordering::Release);
    }
}

/// The single shared `DimmerState` instance, exposing only whole-struct
/// operations so no partial update is ever observable.
pub struct SharedState {
    state: SpinLock<DimmerState>,
}

impl SharedState {
    #[inline]
    pub const fn new(initial: DimmerState) -> Self {
        Self {
            state: SpinLock::new(initial),
        }
    }

    /// Copy the current state out under the lock.
    #[inline]
    pub fn snapshot(&self) -> DimmerState {
        *self.state.lock()
    }

    /// Replace the state as one atomic unit.
    #[inline]
    pub fn commit(&self, next: DimmerState) {
        *self.state.lock() = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn snapshot_returns_committed_state() {
        let shared = SharedState::new(DimmerState::off(10_000));
        assert_eq!(shared.snapshot(), DimmerState::off(10_000));

        let next = DimmerState {
            enabled: true,
            power_percent: 50,
            firing_delay_us: 4750,
        };
        shared.commit(next);
        assert_eq!(shared.snapshot(), next);
    }

    #[test]
    fn lock_serializes_concurrent_increments() {
        let lock = Arc::new(SpinLock::new(0u64));
        let mut handles = Vec::new();
        for _ in 0..4 {
            let lock = lock.clone();
            handles.push(std::thread::spawn(move || {
                for _ in 0..10_000 {
                    *lock.lock() += 1;
                }
            }));
        }
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(*lock.lock(), 40_000);
    }
}
