//! Error types for the Drift simulation.
//!
//! The simulation itself is a set of total functions over clamped inputs,
//! so the only fallible step is construction: every builder, preset
//! validation and driver constructor reports problems through
//! [`ConfigError`] and refuses to produce a half-initialised value.

use std::error::Error;
use std::fmt;

/// Errors detected while validating simulation configuration.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// Grid width or height is zero (or does not fit the cell index type).
    InvalidDimensions {
        /// Requested width in cells.
        width: u32,
        /// Requested height in cells.
        height: u32,
    },
    /// The agent ensemble would contain no members.
    EmptyEnsemble,
    /// A numeric parameter is outside its valid range.
    InvalidParameter {
        /// Name of the offending parameter.
        name: &'static str,
        /// Human-readable description of the valid range.
        reason: String,
    },
}

impl ConfigError {
    /// Shorthand for an [`InvalidParameter`](Self::InvalidParameter) error.
    pub fn parameter(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDimensions { width, height } => {
                write!(f, "grid dimensions must be positive, got {width}x{height}")
            }
            Self::EmptyEnsemble => write!(f, "ensemble must contain at least one agent"),
            Self::InvalidParameter { name, reason } => {
                write!(f, "invalid parameter '{name}': {reason}")
            }
        }
    }
}

impl Error for ConfigError {}

/// Check that `value` is finite and lies in `[lo, hi]`.
///
/// Shared by the `validate()` methods of every parameter struct.
pub fn check_range(name: &'static str, value: f64, lo: f64, hi: f64) -> Result<(), ConfigError> {
    if !value.is_finite() || value < lo || value > hi {
        return Err(ConfigError::parameter(
            name,
            format!("must be finite and in [{lo}, {hi}], got {value}"),
        ));
    }
    Ok(())
}

/// Check that `value` is finite and strictly positive.
pub fn check_positive(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ConfigError::parameter(
            name,
            format!("must be finite and > 0, got {value}"),
        ));
    }
    Ok(())
}
