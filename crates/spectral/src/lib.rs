//! Power spectra and their stochastic time-domain realizations.
//!
//! - [`FrequencyGrid`]: uniform grids, built from observation times
//! - [`GranulationPsd`], [`OscillationPsd`]: parametric stellar PSDs
//! - [`synthesize`] / [`realize`]: PSD → normalized Gaussian time series

pub mod error;
pub mod grid;
pub mod psd;
pub mod synthesis;

#[cfg(test)]
mod grid_test;
#[cfg(test)]
mod synthesis_test;

pub use error::{SpectralError, SpectralResult};
pub use grid::{min_spacing, span, FrequencyGrid, FrequencyGridConfig, DEFAULT_SAMPLES_PER_PEAK};
pub use psd::{
    GranulationPsd, GranulationShape, OscillationProfile, OscillationPsd, PowerSpectrum,
    PowerUnit,
};
pub use synthesis::{
    integrated_power, normalise_timeseries, realize, synthesize, timeseries_from_power_spectrum,
};
