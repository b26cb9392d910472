//! Trigger pulse generation in timer-expiry context.

use std::time::Duration;

use dimmer_traits::{Clock, TriggerLine};

/// Runs when the armed one-shot elapses: asserts the gate line, holds it
/// for the fixed pulse width, deasserts it.
///
/// The hold is a deterministic busy-wait; this context cannot yield or
/// sleep, and the wait is not cancellable. The builder guarantees
/// `max_delay + pulse_width < half_cycle`, so the pulse can never overrun
/// into the next zero-crossing window. The pulse width does not vary with
/// power level; it is sized once to latch the load's switching element.
pub struct FirePulse<L: TriggerLine, C: Clock> {
    line: L,
    clock: C,
    pulse_width: Duration,
}

impl<L: TriggerLine, C: Clock> FirePulse<L, C> {
    pub(crate) fn new(line: L, clock: C, pulse_width_us: u32) -> Self {
        Self {
            line,
            clock,
            pulse_width: Duration::from_micros(u64::from(pulse_width_us)),
        }
    }

    /// Emit one trigger pulse. Infallible; line writes cannot fail at this
    /// layer and there is no caller to report to anyway.
    #[inline]
    pub fn on_timer_fire(&mut self) {
        self.line.set_active();
        self.clock.busy_wait(self.pulse_width);
        self.line.set_inactive();
    }

    /// The fixed pulse width.
    #[inline]
    pub fn pulse_width(&self) -> Duration {
        self.pulse_width
    }
}
