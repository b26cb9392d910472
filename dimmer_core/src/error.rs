use thiserror::Error;

/// Initialization failures. These are fatal-to-feature: the caller may keep
/// the process alive in a safe, firing-disabled state, but dimming stays
/// inert until the configuration or hardware is corrected. Runtime paths
/// (`set_power`, the edge and expiry handlers) have no failure modes.
#[derive(Debug, Error, Clone)]
pub enum BuildError {
    #[error("missing trigger line")]
    MissingTrigger,
    #[error("missing one-shot timer")]
    MissingTimer,
    #[error("invalid config: {0}")]
    InvalidConfig(&'static str),
}

pub type Result<T> = eyre::Result<T>;
pub use eyre::Report;
