//! Type-state builder for the dimmer and the generic `build_dimmer`
//! constructor.
//!
//! The builder enforces at compile time that a trigger line and a one-shot
//! timer are provided before `build()` is available; `try_build()` is
//! always available for dynamic checks. Both funnel through one
//! validation-and-wiring function so the config invariants hold on every
//! path.

use std::marker::PhantomData;
use std::sync::Arc;

use dimmer_traits::clock::{Clock, MonotonicClock};
use dimmer_traits::{OneShot, TriggerLine};

use crate::config::{PowerLimits, TimingCfg};
use crate::controller::SpeedController;
use crate::error::{BuildError, Result};
use crate::pulse::FirePulse;
use crate::state::{DimmerState, SharedState};
use crate::zero_cross::ZeroCrossHandler;

/// The wired dimmer: three execution handles around one shared state,
/// created once at initialization and never re-created.
///
/// Each handle moves into its own execution context: `controller` stays in
/// normal/task context, `zero_cross` into whatever invokes the edge
/// callback, `pulse` into whatever invokes the timer-expiry callback.
pub struct Dimmer<L: TriggerLine, T: OneShot, C: Clock> {
    pub controller: SpeedController,
    pub zero_cross: ZeroCrossHandler<T>,
    pub pulse: FirePulse<L, C>,
}

impl<L: TriggerLine, T: OneShot, C: Clock> Dimmer<L, T, C> {
    /// Split into the three per-context handles.
    pub fn split(self) -> (SpeedController, ZeroCrossHandler<T>, FirePulse<L, C>) {
        (self.controller, self.zero_cross, self.pulse)
    }
}

/// Dynamic (boxed) variant produced by `DimmerBuilder`.
pub type BoxedDimmer =
    Dimmer<Box<dyn TriggerLine + Send>, Box<dyn OneShot + Send>, Box<dyn Clock + Send>>;

/// Validate timing and power limits, then wire the handles.
///
/// This is the single source of truth for validation and construction.
pub fn build_dimmer<L: TriggerLine, T: OneShot, C: Clock>(
    trigger: L,
    timer: T,
    clock: C,
    timing: TimingCfg,
    limits: PowerLimits,
) -> Result<Dimmer<L, T, C>> {
    if timing.mains_hz != 50 && timing.mains_hz != 60 {
        return Err(eyre::Report::new(BuildError::InvalidConfig(
            "mains_hz must be 50 or 60",
        )));
    }
    let half_cycle_us = timing.half_cycle_us();
    if timing.min_delay_us == 0 {
        return Err(eyre::Report::new(BuildError::InvalidConfig(
            "min_delay_us must be > 0",
        )));
    }
    if timing.min_delay_us >= timing.max_delay_us {
        return Err(eyre::Report::new(BuildError::InvalidConfig(
            "min_delay_us must be < max_delay_us",
        )));
    }
    if timing.max_delay_us >= half_cycle_us {
        return Err(eyre::Report::new(BuildError::InvalidConfig(
            "max_delay_us must be < the half-cycle",
        )));
    }
    if timing.pulse_width_us == 0 {
        return Err(eyre::Report::new(BuildError::InvalidConfig(
            "pulse_width_us must be > 0",
        )));
    }
    if timing.max_delay_us + timing.pulse_width_us >= half_cycle_us {
        return Err(eyre::Report::new(BuildError::InvalidConfig(
            "pulse must end before the next zero-crossing",
        )));
    }
    if limits.min_percent >= limits.max_percent {
        return Err(eyre::Report::new(BuildError::InvalidConfig(
            "min_percent must be < max_percent",
        )));
    }
    if limits.max_percent > 100 {
        return Err(eyre::Report::new(BuildError::InvalidConfig(
            "max_percent must be <= 100",
        )));
    }

    // Single shared state, initialized OFF; exclusive ownership stays inside
    // the three handles.
    let shared = Arc::new(SharedState::new(DimmerState::off(half_cycle_us)));

    Ok(Dimmer {
        controller: SpeedController::new(Arc::clone(&shared), timing, limits),
        zero_cross: ZeroCrossHandler::new(shared, timer, half_cycle_us),
        pulse: FirePulse::new(trigger, clock, timing.pulse_width_us),
    })
}

// ── Type-state markers ───────────────────────────────────────────────────────

pub struct Missing;
pub struct Set;

/// Builder for the boxed dimmer. Timing and limits default when not given.
pub struct DimmerBuilder<L, T> {
    trigger: Option<Box<dyn TriggerLine + Send>>,
    timer: Option<Box<dyn OneShot + Send>>,
    clock: Option<Box<dyn Clock + Send>>,
    timing: Option<TimingCfg>,
    limits: Option<PowerLimits>,
    _l: PhantomData<L>,
    _t: PhantomData<T>,
}

impl Default for DimmerBuilder<Missing, Missing> {
    fn default() -> Self {
        Self {
            trigger: None,
            timer: None,
            clock: None,
            timing: None,
            limits: None,
            _l: PhantomData,
            _t: PhantomData,
        }
    }
}

impl BoxedDimmer {
    /// Start building a dimmer with boxed seams.
    pub fn builder() -> DimmerBuilder<Missing, Missing> {
        DimmerBuilder::default()
    }
}

impl<L, T> DimmerBuilder<L, T> {
    pub fn with_trigger(self, trigger: impl TriggerLine + Send + 'static) -> DimmerBuilder<Set, T> {
        DimmerBuilder {
            trigger: Some(Box::new(trigger)),
            timer: self.timer,
            clock: self.clock,
            timing: self.timing,
            limits: self.limits,
            _l: PhantomData,
            _t: PhantomData,
        }
    }

    pub fn with_timer(self, timer: impl OneShot + Send + 'static) -> DimmerBuilder<L, Set> {
        DimmerBuilder {
            trigger: self.trigger,
            timer: Some(Box::new(timer)),
            clock: self.clock,
            timing: self.timing,
            limits: self.limits,
            _l: PhantomData,
            _t: PhantomData,
        }
    }

    pub fn with_clock(mut self, clock: impl Clock + Send + 'static) -> Self {
        self.clock = Some(Box::new(clock));
        self
    }

    pub fn with_timing(mut self, timing: TimingCfg) -> Self {
        self.timing = Some(timing);
        self
    }

    pub fn with_limits(mut self, limits: PowerLimits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Build with dynamic checks for the required seams.
    pub fn try_build(self) -> Result<BoxedDimmer> {
        let trigger = self
            .trigger
            .ok_or_else(|| eyre::Report::new(BuildError::MissingTrigger))?;
        let timer = self
            .timer
            .ok_or_else(|| eyre::Report::new(BuildError::MissingTimer))?;
        let clock: Box<dyn Clock + Send> = self
            .clock
            .unwrap_or_else(|| Box::new(MonotonicClock::new()));
        build_dimmer(
            trigger,
            timer,
            clock,
            self.timing.unwrap_or_default(),
            self.limits.unwrap_or_default(),
        )
    }
}

impl DimmerBuilder<Set, Set> {
    /// Build; the required seams are proven present by the type state.
    pub fn build(self) -> Result<BoxedDimmer> {
        self.try_build()
    }
}
