use thiserror::Error;

use crate::types::LegId;

/// Top-level error type for skitter.
#[derive(Debug, Error)]
pub enum SkitterError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Rig error: {0}")]
    Rig(#[from] RigError),
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid {field}: {value} (must be > 0)")]
    NonPositive { field: &'static str, value: f64 },

    #[error("Invalid {field}: {value} (must be >= 0)")]
    Negative { field: &'static str, value: f64 },

    #[error("{min_field} ({min}) must not exceed {max_field} ({max})")]
    InvertedRange {
        min_field: &'static str,
        max_field: &'static str,
        min: f64,
        max: f64,
    },

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

/// Leg rig assembly errors.
///
/// Copy + static payloads so they are cheap to return from constructors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RigError {
    #[error("Leg {0} is missing from the rig")]
    MissingLeg(LegId),

    #[error("Leg {0} appears more than once in the rig")]
    DuplicateLeg(LegId),
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
