//! Orbit error types

use thiserror::Error;

/// Result type for orbit computations
pub type KeplerResult<T> = Result<T, KeplerError>;

/// Errors raised while configuring or evaluating Keplerian orbits
#[derive(Error, Debug, Clone, PartialEq)]
pub enum KeplerError {
    /// Invalid or conflicting orbital parameters
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Kepler's equation did not converge within the iteration cap
    #[error(
        "Kepler solver did not converge after {iterations} iterations \
         ({unconverged} anomalies left, max residual {max_residual:e})"
    )]
    NonConvergence {
        iterations: usize,
        unconverged: usize,
        max_residual: f64,
    },

    /// Mean anomaly and eccentricity arrays of different length
    #[error("Length mismatch: {mean_anomalies} mean anomalies, {eccentricities} eccentricities")]
    LengthMismatch {
        mean_anomalies: usize,
        eccentricities: usize,
    },
}

impl KeplerError {
    pub(crate) fn config(message: impl Into<String>) -> Self {
        KeplerError::Configuration(message.into())
    }
}
