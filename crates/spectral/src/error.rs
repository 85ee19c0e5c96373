//! Spectral synthesis error types

use thiserror::Error;

/// Result type for spectral operations
pub type SpectralResult<T> = Result<T, SpectralError>;

/// Errors that can occur while building spectra or synthesizing series
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SpectralError {
    /// Time support has fewer than two distinct epochs
    #[error("Degenerate time series: {0}")]
    DegenerateSeries(String),

    /// Frequency grid is not strictly positive, ascending and uniform
    #[error("Invalid frequency grid: {0}")]
    InvalidGrid(String),

    /// Power array does not line up with the frequency grid
    #[error("Power length mismatch: expected {expected}, got {actual}")]
    PowerLengthMismatch { expected: usize, actual: usize },

    /// Power values must be finite and non-negative
    #[error("Invalid power spectrum: {0}")]
    InvalidPower(String),

    /// Inverse transform is shorter than the requested support
    #[error("Spectrum of {bins} bins cannot cover {requested} samples")]
    InsufficientBins { bins: usize, requested: usize },

    /// Invalid PSD model parameters
    #[error("Configuration error: {0}")]
    Configuration(String),
}
