//! Steering configuration, validation, and error types.

use std::error::Error;
use std::fmt;

use trellis_index::{IndexConfig, IndexConfigError};

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected during [`SteeringConfig::validate()`].
#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// Index configuration is invalid.
    Index(IndexConfigError),
    /// `max_steps` is `Some(0)`; the loop could never step.
    ZeroMaxSteps,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(e) => write!(f, "index: {e}"),
            Self::ZeroMaxSteps => write!(f, "max_steps must be at least 1 when set"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Index(e) => Some(e),
            Self::ZeroMaxSteps => None,
        }
    }
}

impl From<IndexConfigError> for ConfigError {
    fn from(e: IndexConfigError) -> Self {
        Self::Index(e)
    }
}

// ── SteeringConfig ─────────────────────────────────────────────────

/// Configuration for a [`SteeringLoop`](crate::SteeringLoop).
#[derive(Clone, Debug, Default)]
pub struct SteeringConfig {
    /// Number of steps after which [`step()`](crate::SteeringLoop::step)
    /// reports [`StepError::Finished`](trellis_core::StepError::Finished).
    /// `None` runs until [`finish()`](crate::SteeringLoop::finish).
    pub max_steps: Option<u64>,
    /// How identifiers and module scopes are recognised.
    pub index: IndexConfig,
}

impl SteeringConfig {
    /// Validate all structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_steps == Some(0) {
            return Err(ConfigError::ZeroMaxSteps);
        }
        self.index.validate()?;
        Ok(())
    }
}
