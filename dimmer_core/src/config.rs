//! Configuration types for the dimming core.
//!
//! These are the runtime configuration structs consumed by the builder.
//! They are separate from the TOML-deserialized config in `dimmer_config`.

/// Number of microseconds in one second.
pub const MICROS_PER_SEC: u32 = 1_000_000;

/// AC timing parameters.
///
/// All values are microseconds except `mains_hz`. The builder enforces
/// `0 < min_delay_us < max_delay_us < half_cycle_us()` and
/// `max_delay_us + pulse_width_us < half_cycle_us()` so a pulse can never
/// run into the next zero-crossing window.
#[derive(Debug, Clone, Copy)]
pub struct TimingCfg {
    /// Mains frequency in Hz; 50 or 60.
    pub mains_hz: u32,
    /// Trigger pulse duration. Longer pulses latch inductive loads reliably.
    pub pulse_width_us: u32,
    /// Shortest permitted firing delay after a zero-crossing.
    pub min_delay_us: u32,
    /// Longest permitted firing delay for a nonzero power level.
    pub max_delay_us: u32,
}

impl TimingCfg {
    /// Time between consecutive zero-crossings; the upper bound on any
    /// firing delay and the committed delay for the OFF state.
    #[inline]
    pub fn half_cycle_us(&self) -> u32 {
        MICROS_PER_SEC / (2 * self.mains_hz.max(1))
    }
}

impl Default for TimingCfg {
    fn default() -> Self {
        Self {
            mains_hz: 50,
            pulse_width_us: 50,
            min_delay_us: 500,
            max_delay_us: 9000,
        }
    }
}

/// Floor and ceiling for nonzero power requests, in percent.
///
/// Requests in `(0, min_percent)` are forced up to `min_percent` (a fan or
/// motor below its minimum sustainable drive level stalls rather than runs
/// slowly); requests above `max_percent` clamp down.
#[derive(Debug, Clone, Copy)]
pub struct PowerLimits {
    pub min_percent: u8,
    pub max_percent: u8,
}

impl Default for PowerLimits {
    fn default() -> Self {
        Self {
            min_percent: 20,
            max_percent: 100,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn half_cycle_for_common_mains() {
        let mut t = TimingCfg::default();
        assert_eq!(t.half_cycle_us(), 10_000);
        t.mains_hz = 60;
        assert_eq!(t.half_cycle_us(), 8_333);
    }

    #[test]
    fn half_cycle_guards_zero_hz() {
        let t = TimingCfg {
            mains_hz: 0,
            ..TimingCfg::default()
        };
        assert_eq!(t.half_cycle_us(), 500_000);
    }
}
