//! Pure power-to-delay conversion.
//!
//! Phase control: higher power means a shorter delay between the
//! zero-crossing and the trigger pulse, so the switching element conducts
//! for more of the half-cycle. All arithmetic is integer (truncating) for
//! deterministic behavior; the functions are total over their inputs.

use crate::config::{PowerLimits, TimingCfg};

/// Clamp an arbitrary requested power into the committed range.
///
/// - `requested <= 0` maps to 0 (off).
/// - `(0, min_percent)` is forced up to `min_percent`.
/// - Above `max_percent` clamps down.
#[inline]
pub fn clamp_power(requested: i32, limits: &PowerLimits) -> u8 {
    if requested <= 0 {
        return 0;
    }
    let p = requested.min(i32::from(limits.max_percent));
    (p.max(i32::from(limits.min_percent))) as u8
}

/// Convert a power percentage to a firing delay in microseconds.
///
/// - `power_percent == 0` returns the half-cycle: the timer is never armed
///   at or past the next zero-crossing, so the output stays off.
/// - Nonzero input is clamped into `[min_percent, max_percent]`, then mapped
///   linearly and decreasingly:
///   `delay = max_delay - (max_delay - min_delay) * p / 100`.
///
/// The result is monotonically non-increasing in `power_percent` and always
/// lies in `[min_delay_us, max_delay_us]` for nonzero input.
#[inline]
pub fn power_to_delay_us(power_percent: u8, limits: &PowerLimits, timing: &TimingCfg) -> u32 {
    if power_percent == 0 {
        return timing.half_cycle_us();
    }
    let p = power_percent
        .max(limits.min_percent)
        .min(limits.max_percent);

    // u64 intermediates; (max - min) * 100 stays far below u32::MAX for any
    // validated config, but the widening costs nothing and removes doubt.
    let span = u64::from(timing.max_delay_us - timing.min_delay_us);
    let cut = span * u64::from(p) / 100;
    timing.max_delay_us - cut as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults() -> (PowerLimits, TimingCfg) {
        (PowerLimits::default(), TimingCfg::default())
    }

    #[test]
    fn zero_maps_to_half_cycle() {
        let (limits, timing) = defaults();
        assert_eq!(power_to_delay_us(0, &limits, &timing), 10_000);
    }

    #[test]
    fn spec_table_for_default_hardware() {
        let (limits, timing) = defaults();
        // 9000 - 8500 * p / 100
        assert_eq!(power_to_delay_us(20, &limits, &timing), 7300);
        assert_eq!(power_to_delay_us(50, &limits, &timing), 4750);
        assert_eq!(power_to_delay_us(100, &limits, &timing), 500);
        // below the floor clamps up to 20%
        assert_eq!(power_to_delay_us(10, &limits, &timing), 7300);
    }

    #[test]
    fn clamp_power_is_total() {
        let limits = PowerLimits::default();
        assert_eq!(clamp_power(i32::MIN, &limits), 0);
        assert_eq!(clamp_power(-1, &limits), 0);
        assert_eq!(clamp_power(0, &limits), 0);
        assert_eq!(clamp_power(1, &limits), 20);
        assert_eq!(clamp_power(19, &limits), 20);
        assert_eq!(clamp_power(20, &limits), 20);
        assert_eq!(clamp_power(55, &limits), 55);
        assert_eq!(clamp_power(100, &limits), 100);
        assert_eq!(clamp_power(150, &limits), 100);
        assert_eq!(clamp_power(i32::MAX, &limits), 100);
    }

    #[test]
    fn truncating_division_matches_embedded_arithmetic() {
        let (limits, timing) = defaults();
        // 9000 - 8500 * 33 / 100 = 9000 - 2805 = 6195 (exact)
        assert_eq!(power_to_delay_us(33, &limits, &timing), 6195);
        // 9000 - 8500 * 21 / 100 = 9000 - 1785 = 7215
        assert_eq!(power_to_delay_us(21, &limits, &timing), 7215);
    }
}
