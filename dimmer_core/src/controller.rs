//! `SpeedController`, the normal-context entry point.

use std::sync::Arc;

use crate::config::{PowerLimits, TimingCfg};
use crate::mapping::{clamp_power, power_to_delay_us};
use crate::state::{DimmerState, SharedState};
use crate::status::PowerState;

/// Public control handle for the dimmer. Validates and clamps power
/// requests and commits them into the shared state; actuation happens on
/// the next zero-crossing, never synchronously from here.
///
/// Cloning is cheap; all clones commit into the same shared state.
#[derive(Clone)]
pub struct SpeedController {
    shared: Arc<SharedState>,
    timing: TimingCfg,
    limits: PowerLimits,
}

impl core::fmt::Debug for SpeedController {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let s = self.shared.snapshot();
        f.debug_struct("SpeedController")
            .field("enabled", &s.enabled)
            .field("power_percent", &s.power_percent)
            .field("firing_delay_us", &s.firing_delay_us)
            .finish()
    }
}

impl SpeedController {
    pub(crate) fn new(shared: Arc<SharedState>, timing: TimingCfg, limits: PowerLimits) -> Self {
        Self {
            shared,
            timing,
            limits,
        }
    }

    /// Set the requested power level in percent. Total over any integer:
    /// `requested <= 0` turns the output off; everything else is clamped
    /// into the configured limits. Cannot fail, and never emits a pulse
    /// itself; the new state is observed by the next zero-crossing.
    pub fn set_power(&self, requested: i32) {
        let next = if requested <= 0 {
            DimmerState::off(self.timing.half_cycle_us())
        } else {
            let clamped = clamp_power(requested, &self.limits);
            if i32::from(clamped) != requested {
                tracing::warn!(requested, clamped, "power request out of range, clamping");
            }
            DimmerState {
                enabled: true,
                power_percent: clamped,
                firing_delay_us: power_to_delay_us(clamped, &self.limits, &self.timing),
            }
        };

        self.shared.commit(next);

        // Log only after the critical section; the lock is also taken from
        // edge context and must never be held across a logging call.
        if next.enabled {
            tracing::info!(
                power = next.power_percent,
                delay_us = next.firing_delay_us,
                "power set"
            );
        } else {
            tracing::info!("output off");
        }
    }

    /// Current committed state, read as one atomic unit.
    #[inline]
    pub fn state(&self) -> DimmerState {
        self.shared.snapshot()
    }

    /// Logical OFF/ON view of the committed state.
    #[inline]
    pub fn power_state(&self) -> PowerState {
        self.state().into()
    }

    /// The configured power limits.
    #[inline]
    pub fn limits(&self) -> &PowerLimits {
        &self.limits
    }
}
