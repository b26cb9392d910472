#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
//! Config schema for the dimmer.
//!
//! `Config` and its sub-structs are deserialized from TOML and validated.
//! The timing invariants here mirror the builder checks in `dimmer_core`;
//! validating at load time gives the operator a config-file error message
//! instead of a build error deep in initialization.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Pins {
    /// Edge-triggerable input sensing the mains zero-crossing.
    pub zero_cross: u8,
    /// Output driving the TRIAC gate.
    pub triac_trigger: u8,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Timing {
    /// Mains frequency in Hz; 50 or 60.
    pub mains_hz: u32,
    /// Trigger pulse width in microseconds.
    pub pulse_width_us: u32,
    /// Safety floor on the firing delay, microseconds.
    pub min_delay_us: u32,
    /// Safety ceiling on the firing delay, microseconds.
    pub max_delay_us: u32,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            mains_hz: 50,
            pulse_width_us: 50,
            min_delay_us: 500,
            max_delay_us: 9000,
        }
    }
}

impl Timing {
    #[inline]
    pub fn half_cycle_us(&self) -> u32 {
        1_000_000 / (2 * self.mains_hz.max(1))
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Power {
    /// Floor for nonzero power requests, percent.
    pub min_percent: u8,
    /// Ceiling for power requests, percent.
    pub max_percent: u8,
    /// Power applied by `run` when no level is given on the command line.
    pub default_percent: u8,
}

impl Default for Power {
    fn default() -> Self {
        Self {
            min_percent: 20,
            max_percent: 100,
            default_percent: 50,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Demo {
    /// Preset power levels the demo cycles through, percent.
    pub speeds: Vec<u8>,
    /// How long each preset is held, milliseconds.
    pub hold_ms: u64,
}

impl Default for Demo {
    fn default() -> Self {
        Self {
            speeds: vec![0, 30, 50, 75, 100],
            hold_ms: 10_000,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct Logging {
    pub file: Option<String>,  // path to .log (JSON lines)
    pub level: Option<String>, // "info","debug"
    /// Log rotation policy: "never" | "daily" | "hourly" (default: never)
    pub rotation: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub pins: Pins,
    #[serde(default)]
    pub timing: Timing,
    #[serde(default)]
    pub power: Power,
    #[serde(default)]
    pub demo: Demo,
    #[serde(default)]
    pub logging: Logging,
}

pub fn load_toml(s: &str) -> Result<Config, toml::de::Error> {
    toml::from_str::<Config>(s)
}

impl Config {
    pub fn validate(&self) -> eyre::Result<()> {
        // Timing
        if self.timing.mains_hz != 50 && self.timing.mains_hz != 60 {
            eyre::bail!("timing.mains_hz must be 50 or 60");
        }
        let half_cycle = self.timing.half_cycle_us();
        if self.timing.min_delay_us == 0 {
            eyre::bail!("timing.min_delay_us must be > 0");
        }
        if self.timing.min_delay_us >= self.timing.max_delay_us {
            eyre::bail!("timing.min_delay_us must be < timing.max_delay_us");
        }
        if self.timing.max_delay_us >= half_cycle {
            eyre::bail!("timing.max_delay_us must be < the half-cycle ({half_cycle} us)");
        }
        if self.timing.pulse_width_us == 0 {
            eyre::bail!("timing.pulse_width_us must be > 0");
        }
        if self.timing.max_delay_us + self.timing.pulse_width_us >= half_cycle {
            eyre::bail!(
                "timing.max_delay_us + timing.pulse_width_us must stay below the half-cycle"
            );
        }

        // Power
        if self.power.min_percent >= self.power.max_percent {
            eyre::bail!("power.min_percent must be < power.max_percent");
        }
        if self.power.max_percent > 100 {
            eyre::bail!("power.max_percent must be <= 100");
        }
        if self.power.default_percent > self.power.max_percent {
            eyre::bail!("power.default_percent must be <= power.max_percent");
        }

        // Demo
        if self.demo.speeds.is_empty() {
            eyre::bail!("demo.speeds must not be empty");
        }
        if self.demo.speeds.iter().any(|&s| s > 100) {
            eyre::bail!("demo.speeds entries must be <= 100");
        }
        if self.demo.hold_ms == 0 {
            eyre::bail!("demo.hold_ms must be >= 1");
        }

        Ok(())
    }
}
