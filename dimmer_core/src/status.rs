//! Logical state machine view over the committed dimmer state.

use crate::state::DimmerState;

/// OFF, or ON at a clamped power level. `set_power(p <= 0)` reaches OFF
/// from any state and `set_power(p > 0)` reaches ON from any state; the
/// edge and expiry handlers only observe, they never transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerState {
    Off,
    On { percent: u8, delay_us: u32 },
}

impl From<DimmerState> for PowerState {
    fn from(s: DimmerState) -> Self {
        if s.enabled {
            Self::On {
                percent: s.power_percent,
                delay_us: s.firing_delay_us,
            }
        } else {
            Self::Off
        }
    }
}
