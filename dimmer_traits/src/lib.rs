pub mod clock;

pub use clock::{Clock, MonotonicClock};

/// Digital output driving the switching element (TRIAC gate).
///
/// Both operations are infallible by design: they are called from
/// timer-expiry context, which cannot raise recoverable errors to anyone.
/// Implementations must be bounded in time (a register/GPIO write, or an
/// atomic store for simulations) and must not allocate, block, or log.
pub trait TriggerLine {
    /// Drive the line to the active (triggering) level.
    fn set_active(&mut self);
    /// Drive the line back to the inactive level.
    fn set_inactive(&mut self);
}

/// One-shot delay timer armed from zero-cross context.
///
/// Contract:
/// - After `arm(d)` the hosting environment invokes the bound fire callback
///   once, `d` after the call, then the timer is idle until re-armed.
/// - Arming an already-armed timer replaces the pending deadline; there is
///   at most one pending firing at any time and none is duplicated
///   (latest-arm-wins).
/// - `arm` is infallible and non-blocking: it is called from interrupt-style
///   context and may only perform a bounded hand-off (store/channel send).
pub trait OneShot {
    fn arm(&mut self, delay: std::time::Duration);
}

impl<L: TriggerLine + ?Sized> TriggerLine for Box<L> {
    #[inline]
    fn set_active(&mut self) {
        (**self).set_active();
    }
    #[inline]
    fn set_inactive(&mut self) {
        (**self).set_inactive();
    }
}

impl<T: OneShot + ?Sized> OneShot for Box<T> {
    #[inline]
    fn arm(&mut self, delay: std::time::Duration) {
        (**self).arm(delay);
    }
}
