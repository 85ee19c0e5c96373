//! Signal composition error types

use kepler::KeplerError;
use spectral::SpectralError;
use thiserror::Error;

/// Result type for signal construction and sampling
pub type SignalResult<T> = Result<T, SignalError>;

/// Errors raised while building or sampling RV signals
#[derive(Error, Debug)]
pub enum SignalError {
    /// Invalid or conflicting construction parameters
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Sampling requested with neither times nor an attached sampling context
    #[error("Missing input: {0}")]
    MissingInput(String),

    /// The external active-region simulator could not be provided
    #[error("Unavailable collaborator: {0}")]
    UnavailableCollaborator(String),

    /// Kepler's equation failed to converge
    #[error(transparent)]
    Kepler(KeplerError),

    /// Spectral synthesis failure
    #[error(transparent)]
    Spectral(SpectralError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid scenario: {0}")]
    Json(#[from] serde_json::Error),
}

impl SignalError {
    pub(crate) fn config(message: impl Into<String>) -> Self {
        SignalError::Configuration(message.into())
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, SignalError::Configuration(_))
    }
}

// Parameter problems detected by the engines are construction errors here too.
impl From<KeplerError> for SignalError {
    fn from(err: KeplerError) -> Self {
        match err {
            KeplerError::Configuration(message) => SignalError::Configuration(message),
            other => SignalError::Kepler(other),
        }
    }
}

impl From<SpectralError> for SignalError {
    fn from(err: SpectralError) -> Self {
        match err {
            SpectralError::Configuration(message) => SignalError::Configuration(message),
            other => SignalError::Spectral(other),
        }
    }
}
