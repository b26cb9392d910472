#![cfg_attr(all(not(debug_assertions), not(test)), deny(warnings))]
#![cfg_attr(
    all(not(debug_assertions), not(test)),
    deny(clippy::all, clippy::pedantic, clippy::nursery)
)]
#![allow(clippy::module_name_repetitions, clippy::missing_errors_doc)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
//! Phase-control dimming core (hardware-agnostic).
//!
//! This crate implements the timing-critical control loop for an AC
//! phase-control dimmer: zero-crossing handling, power-to-delay mapping,
//! one-shot arming, and trigger pulse generation. All hardware interactions
//! go through `dimmer_traits::TriggerLine`, `dimmer_traits::OneShot` and
//! `dimmer_traits::Clock`.
//!
//! ## Architecture
//!
//! - **Mapping**: pure power-percent to firing-delay conversion (`mapping`)
//! - **State**: the single shared `DimmerState` behind a spin lock (`state`)
//! - **Control**: `SpeedController`, the normal-context entry point
//! - **Edge path**: `ZeroCrossHandler` (zero-cross context) and `FirePulse`
//!   (timer-expiry context), wired by the builder around one shared state
//! - **Status**: logical OFF/ON view (`status` module)
//!
//! ## Execution contexts
//!
//! Three contexts touch the core: normal/task context (`set_power`), the
//! zero-cross edge context (`on_zero_cross`) and the timer-expiry context
//! (`on_timer_fire`). The edge and expiry paths never allocate, log, or
//! block beyond the bounded state-read critical section and the bounded
//! pulse busy-wait. A `set_power` takes effect on the next zero-crossing,
//! not immediately; that latency (up to one half-cycle) is by contract.

pub mod builder;
pub mod config;
pub mod controller;
pub mod conversions;
pub mod error;
pub mod mapping;
pub mod mocks;
pub mod pulse;
pub mod state;
pub mod status;
pub mod zero_cross;

pub use builder::{BoxedDimmer, Dimmer, DimmerBuilder, build_dimmer};
pub use config::{PowerLimits, TimingCfg};
pub use controller::SpeedController;
pub use error::{BuildError, Result};
pub use mapping::{clamp_power, power_to_delay_us};
pub use pulse::FirePulse;
pub use state::{DimmerState, SharedState};
pub use status::PowerState;
pub use zero_cross::ZeroCrossHandler;
