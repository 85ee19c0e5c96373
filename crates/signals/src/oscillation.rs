//! Solar-like p-mode oscillations as a colored-noise component.

use spectral::{realize, FrequencyGridConfig, OscillationProfile, OscillationPsd};
use std::fmt;
use tracing::debug;
use units::Frequency;

use crate::component::SignalComponent;
use crate::error::SignalResult;
use crate::random_state::{Draw, RandomState};
use crate::samples::Samples;
use crate::sampling::SamplingContext;

/// Default peak power density, (m/s)²/µHz
pub const DEFAULT_OSCILLATION_AMPLITUDE: f64 = 1.0;

/// Default envelope width (µHz)
pub const DEFAULT_OSCILLATION_WIDTH: f64 = 0.5;

/// Default frequency of maximum power (µHz)
pub const DEFAULT_NUMAX: f64 = 3000.0;

/// Stochastic RV signal with an oscillation power excess around ν_max.
///
/// The PSD is per µHz; realizations are rescaled to m/s. The sampling must
/// resolve ν_max (a few minutes cadence for Sun-like stars) for the
/// oscillations to show up.
#[derive(Debug, Clone)]
pub struct Oscillation {
    psd: OscillationPsd,
    grid: FrequencyGridConfig,
    state: RandomState,
    sampling: Option<SamplingContext>,
}

impl Oscillation {
    /// # Arguments
    /// * `amplitude` - Peak power density, (m/s)²/µHz
    /// * `width` - Lorentzian half width or Gaussian FWHM
    /// * `numax` - Frequency of maximum power
    /// * `profile` - Envelope shape
    pub fn new(
        amplitude: f64,
        width: Frequency,
        numax: Frequency,
        profile: OscillationProfile,
    ) -> SignalResult<Self> {
        Ok(Self::from_psd(OscillationPsd::new(
            amplitude, width, numax, profile,
        )?))
    }

    fn from_psd(psd: OscillationPsd) -> Self {
        Self {
            psd,
            grid: FrequencyGridConfig::default(),
            state: RandomState::from_entropy(),
            sampling: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.state = RandomState::from_seed(seed);
        self
    }

    pub fn with_grid_config(mut self, grid: FrequencyGridConfig) -> Self {
        self.grid = grid;
        self
    }

    pub fn psd(&self) -> &OscillationPsd {
        &self.psd
    }
}

impl Default for Oscillation {
    fn default() -> Self {
        Self::from_psd(OscillationPsd {
            amplitude: DEFAULT_OSCILLATION_AMPLITUDE,
            width: Frequency::from_microhertz(DEFAULT_OSCILLATION_WIDTH),
            numax: Frequency::from_microhertz(DEFAULT_NUMAX),
            profile: OscillationProfile::Lorentzian,
        })
    }
}

impl SignalComponent for Oscillation {
    fn sample_at(&mut self, times: &[f64], draw: Draw) -> SignalResult<Samples> {
        debug!(n_times = times.len(), "sampling oscillations");
        let rng = self.state.generator(draw);
        let values = realize(&self.psd, times, &self.grid, rng)?;
        Ok(Samples::from_values(values))
    }

    fn sampling(&self) -> Option<&SamplingContext> {
        self.sampling.as_ref()
    }

    fn set_sampling(&mut self, sampling: SamplingContext) {
        self.sampling = Some(sampling);
    }

    fn condensed(&self) -> String {
        format!("Osc({:.0})", self.psd.numax.to_microhertz())
    }
}

impl fmt::Display for Oscillation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Oscillation(sigma={:.2} m²/s²/µHz, width={:.2} µHz, numax={:.2} µHz)",
            self.psd.amplitude,
            self.psd.width.to_microhertz(),
            self.psd.numax.to_microhertz()
        )
    }
}
