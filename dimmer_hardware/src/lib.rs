//! Hardware and simulation backends for the dimmer seams.
//!
//! Without the `hardware` feature the crate provides host-side stand-ins:
//! `SimulatedTriggerLine` (an observable gate line), `ZeroCrossTicker`
//! (a paced edge source) and `ThreadOneShot` (a thread-backed delay timer).
//! With `hardware` enabled, `gpio` adds Raspberry Pi GPIO backends for the
//! gate line and the zero-crossing input.

pub mod error;
#[cfg(feature = "hardware")]
pub mod gpio;
pub mod one_shot;
pub mod zero_cross;

pub use error::HwError;
pub use one_shot::ThreadOneShot;
pub use zero_cross::ZeroCrossTicker;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use dimmer_traits::TriggerLine;

/// Simulated TRIAC gate line backed by atomics, so the line state can be
/// observed from other threads without touching the pulse path.
pub struct SimulatedTriggerLine {
    level: Arc<AtomicBool>,
    pulses: Arc<AtomicU64>,
}

impl SimulatedTriggerLine {
    pub fn new() -> Self {
        Self {
            level: Arc::new(AtomicBool::new(false)),
            pulses: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Observer handle; the line itself moves into the pulse path.
    pub fn probe(&self) -> SimulatedLineProbe {
        SimulatedLineProbe {
            level: self.level.clone(),
            pulses: self.pulses.clone(),
        }
    }
}

impl Default for SimulatedTriggerLine {
    fn default() -> Self {
        Self::new()
    }
}

impl TriggerLine for SimulatedTriggerLine {
    #[inline]
    fn set_active(&mut self) {
        self.level.store(true, Ordering::Relaxed);
        self.pulses.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    fn set_inactive(&mut self) {
        self.level.store(false, Ordering::Relaxed);
    }
}

/// Read side of a `SimulatedTriggerLine`.
#[derive(Clone)]
pub struct SimulatedLineProbe {
    level: Arc<AtomicBool>,
    pulses: Arc<AtomicU64>,
}

impl SimulatedLineProbe {
    /// Whether the line is currently driven active.
    pub fn is_active(&self) -> bool {
        self.level.load(Ordering::Relaxed)
    }

    /// Number of pulses emitted so far.
    pub fn pulse_count(&self) -> u64 {
        self.pulses.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simulated_line_counts_pulses() {
        let mut line = SimulatedTriggerLine::new();
        let probe = line.probe();

        assert!(!probe.is_active());
        line.set_active();
        assert!(probe.is_active());
        line.set_inactive();
        assert!(!probe.is_active());
        line.set_active();
        line.set_inactive();
        assert_eq!(probe.pulse_count(), 2);
    }
}
