//! Unified error types for the windmc workspace
//!
//! [`WindError`] covers the two failure classes of a simulation run:
//! configuration errors, raised before any sampling starts, and dimension
//! mismatches, which indicate broken internal wiring. File-level failures
//! from the configuration loader are folded in so that callers only deal
//! with one error type at library boundaries.
//!
//! # Example
//!
//! ```
//! use windmc_core::{WindError, WindResult};
//!
//! fn check_step(step: usize) -> WindResult<()> {
//!     if step == 0 {
//!         return Err(WindError::config("checkpoints.step", "must be >= 1"));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check_step(0).is_err());
//! ```

use thiserror::Error;

/// Unified error type for all windmc operations.
#[derive(Error, Debug)]
pub enum WindError {
    /// A parameter violates its domain constraint
    #[error("Configuration error: `{parameter}` {constraint}")]
    Configuration {
        /// Name of the offending parameter (e.g. `farm1.shape`)
        parameter: String,
        /// Human-readable constraint that failed (e.g. `must be > 0 (got -1)`)
        constraint: String,
    },

    /// Two per-farm vectors of different length reached the aggregator
    #[error("Dimension mismatch: farm vectors have lengths {left} and {right}")]
    DimensionMismatch { left: usize, right: usize },

    /// I/O errors while reading configuration
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Parsing/deserialization errors
    #[error("Parse error: {0}")]
    Parse(String),
}

impl WindError {
    /// Shorthand for building a [`WindError::Configuration`]
    pub fn config(parameter: impl Into<String>, constraint: impl Into<String>) -> Self {
        WindError::Configuration {
            parameter: parameter.into(),
            constraint: constraint.into(),
        }
    }

    /// True for errors raised by parameter validation
    pub fn is_configuration(&self) -> bool {
        matches!(self, WindError::Configuration { .. })
    }
}

/// Convenience type alias for Results using WindError.
pub type WindResult<T> = Result<T, WindError>;

impl From<serde_json::Error> for WindError {
    fn from(err: serde_json::Error) -> Self {
        WindError::Parse(err.to_string())
    }
}

impl From<toml::de::Error> for WindError {
    fn from(err: toml::de::Error) -> Self {
        WindError::Parse(err.to_string())
    }
}

/// Fails unless `value` is finite and strictly positive.
pub(crate) fn require_positive(parameter: &str, value: f64) -> WindResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(WindError::config(
            parameter,
            format!("must be a finite value > 0 (got {value})"),
        ))
    }
}
