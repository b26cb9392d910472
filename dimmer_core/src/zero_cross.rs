//! Zero-crossing edge handling.

use std::sync::Arc;
use std::time::Duration;

use dimmer_traits::OneShot;

use crate::state::SharedState;

/// Runs on each detected zero-cross edge; the hosting environment invokes
/// `on_zero_cross` from whatever interrupt or callback mechanism it owns.
///
/// The handler owns the one-shot timer exclusively. It performs exactly one
/// bounded critical section (the state snapshot) and one bounded hand-off
/// (the arm); no allocation, no logging, no waiting.
pub struct ZeroCrossHandler<T: OneShot> {
    shared: Arc<SharedState>,
    timer: T,
    half_cycle_us: u32,
}

impl<T: OneShot> ZeroCrossHandler<T> {
    pub(crate) fn new(shared: Arc<SharedState>, timer: T, half_cycle_us: u32) -> Self {
        Self {
            shared,
            timer,
            half_cycle_us,
        }
    }

    /// Handle one zero-cross edge.
    ///
    /// Arms the one-shot only when firing is enabled and the committed delay
    /// is strictly inside the half-cycle; a delay at or past the half-cycle
    /// means "off" and must never fire into the next window. Spurious or
    /// duplicate edges are harmless: re-arming replaces the pending deadline
    /// (the `OneShot` contract), nothing accumulates.
    #[inline]
    pub fn on_zero_cross(&mut self) {
        let s = self.shared.snapshot();
        if !s.enabled {
            return;
        }
        if s.firing_delay_us < self.half_cycle_us {
            self.timer
                .arm(Duration::from_micros(u64::from(s.firing_delay_us)));
        }
    }

    /// The half-cycle bound this handler guards against, microseconds.
    #[inline]
    pub fn half_cycle_us(&self) -> u32 {
        self.half_cycle_us
    }
}
