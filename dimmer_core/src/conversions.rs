//! Conversions from the config schema (`dimmer_config`) to core types.
//!
//! Kept here so the config crate stays a pure schema with no dependency on
//! core, and core never parses TOML itself.

use crate::config::{PowerLimits, TimingCfg};

impl From<&dimmer_config::Timing> for TimingCfg {
    fn from(t: &dimmer_config::Timing) -> Self {
        Self {
            mains_hz: t.mains_hz,
            pulse_width_us: t.pulse_width_us,
            min_delay_us: t.min_delay_us,
            max_delay_us: t.max_delay_us,
        }
    }
}

impl From<&dimmer_config::Power> for PowerLimits {
    fn from(p: &dimmer_config::Power) -> Self {
        Self {
            min_percent: p.min_percent,
            max_percent: p.max_percent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timing_conversion_preserves_fields() {
        let cfg = dimmer_config::Timing {
            mains_hz: 60,
            pulse_width_us: 40,
            min_delay_us: 400,
            max_delay_us: 7000,
        };
        let t = TimingCfg::from(&cfg);
        assert_eq!(t.mains_hz, 60);
        assert_eq!(t.pulse_width_us, 40);
        assert_eq!(t.min_delay_us, 400);
        assert_eq!(t.max_delay_us, 7000);
        assert_eq!(t.half_cycle_us(), 8_333);
    }

    #[test]
    fn power_conversion_drops_default_percent() {
        let cfg = dimmer_config::Power {
            min_percent: 10,
            max_percent: 90,
            default_percent: 55,
        };
        let p = PowerLimits::from(&cfg);
        assert_eq!(p.min_percent, 10);
        assert_eq!(p.max_percent, 90);
    }
}
