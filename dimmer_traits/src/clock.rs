use std::time::{Duration, Instant};

/// Monotonic clock abstraction for pulse timing across the stack.
///
/// - now(): returns a monotonic Instant
/// - busy_wait(): spins for the provided duration without yielding
///
/// `busy_wait` exists because the trigger pulse is generated in timer-expiry
/// context, which has no suspension point: the wait must be a deterministic
/// spin, not a sleep. It is not cancellable, so callers must keep the
/// duration short relative to the host's scheduling granularity.
pub trait Clock {
    fn now(&self) -> Instant;
    fn busy_wait(&self, d: Duration);

    /// Microseconds elapsed since `epoch`, saturating at 0 on underflow.
    fn us_since(&self, epoch: Instant) -> u64 {
        let dur = self.now().saturating_duration_since(epoch);
        dur.as_micros().min(u128::from(u64::MAX)) as u64
    }
}

impl<C: Clock + ?Sized> Clock for Box<C> {
    #[inline]
    fn now(&self) -> Instant {
        (**self).now()
    }
    #[inline]
    fn busy_wait(&self, d: Duration) {
        (**self).busy_wait(d);
    }
}

/// Default, real-time monotonic clock backed by std::time::Instant.
#[derive(Debug, Default, Clone, Copy)]
pub struct MonotonicClock;

impl MonotonicClock {
    #[inline]
    pub fn new() -> Self {
        Self
    }
}

impl Clock for MonotonicClock {
    #[inline]
    fn now(&self) -> Instant {
        Instant::now()
    }

    #[inline]
    fn busy_wait(&self, d: Duration) {
        if d.is_zero() {
            return;
        }
        let deadline = Instant::now() + d;
        while Instant::now() < deadline {
            std::hint::spin_loop();
        }
    }
}
