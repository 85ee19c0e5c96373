//! Granulation as a colored-noise component.

use spectral::{realize, FrequencyGridConfig, GranulationPsd, GranulationShape};
use std::fmt;
use tracing::debug;
use units::{Time, Velocity};

use crate::component::SignalComponent;
use crate::error::SignalResult;
use crate::random_state::{Draw, RandomState};
use crate::samples::Samples;
use crate::sampling::SamplingContext;

/// Default granulation amplitude (m/s)
pub const DEFAULT_GRANULATION_SIGMA: f64 = 75.0;

/// Default granulation timescale (hours)
pub const DEFAULT_GRANULATION_TAU_HOURS: f64 = 2.0;

/// Stochastic RV signal with a granulation PSD.
///
/// # Examples
///
/// ```
/// use signals::{Granulation, SignalComponent};
/// use spectral::GranulationShape;
/// use units::{Time, Velocity};
///
/// let mut granulation = Granulation::new(
///     Velocity::from_meters_per_sec(1.0),
///     Time::from_hours(3.0),
///     GranulationShape::Harvey,
/// )
/// .unwrap()
/// .with_seed(1);
///
/// let times: Vec<f64> = (0..50).map(|i| i as f64 * 0.02).collect();
/// assert_eq!(granulation.sample(&times).unwrap().len(), 50);
/// assert_eq!(granulation.condensed(), "KGran(1.0, 3.0)");
/// ```
#[derive(Debug, Clone)]
pub struct Granulation {
    psd: GranulationPsd,
    grid: FrequencyGridConfig,
    state: RandomState,
    sampling: Option<SamplingContext>,
}

impl Granulation {
    pub fn new(sigma: Velocity, tau: Time, shape: GranulationShape) -> SignalResult<Self> {
        Ok(Self::from_psd(GranulationPsd::new(sigma, tau, shape)?))
    }

    fn from_psd(psd: GranulationPsd) -> Self {
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

    pub fn psd(&self) -> &GranulationPsd {
        &self.psd
    }
}

impl Default for Granulation {
    /// σ = 75 m/s, τ = 2 h, Kallinger shape
    fn default() -> Self {
        Self::from_psd(GranulationPsd {
            sigma: Velocity::from_meters_per_sec(DEFAULT_GRANULATION_SIGMA),
            tau: Time::from_hours(DEFAULT_GRANULATION_TAU_HOURS),
            shape: GranulationShape::Kallinger,
        })
    }
}

impl SignalComponent for Granulation {
    fn sample_at(&mut self, times: &[f64], draw: Draw) -> SignalResult<Samples> {
        debug!(component = %self.condensed(), n_times = times.len(), "sampling granulation");
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
        format!(
            "KGran({:.1}, {:.1})",
            self.psd.sigma.to_meters_per_sec(),
            self.psd.tau.to_hours()
        )
    }
}

impl fmt::Display for Granulation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Granulation(sigma={:.2} m/s, tau={:.2} h, model={})",
            self.psd.sigma.to_meters_per_sec(),
            self.psd.tau.to_hours(),
            self.psd.shape
        )
    }
}
