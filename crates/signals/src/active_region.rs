//! Active regions (spots and plages) computed by an external simulator.
//!
//! The stellar-surface simulation itself lives outside this crate. A
//! [`SimulatorFactory`] provides an [`ActiveRegionSimulator`] for a set of
//! [`SpotParameters`]; if it cannot, construction fails immediately.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;
use tracing::debug;
use units::Time;

use crate::component::SignalComponent;
use crate::error::{SignalError, SignalResult};
use crate::random_state::Draw;
use crate::samples::Samples;
use crate::sampling::SamplingContext;

/// km/s to m/s
const SIMULATOR_SCALE: f64 = 1e3;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegionKind {
    /// Dark spot
    #[default]
    Spot,
    /// Bright plage
    Plage,
}

/// Star and active-region description handed to the simulator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpotParameters {
    /// Stellar rotation period
    pub rotation_period: Time,
    /// Degrees
    pub latitude: f64,
    /// Degrees
    pub longitude: f64,
    /// Region radius as a fraction of the stellar radius
    pub size: f64,
    #[serde(default)]
    pub kind: RegionKind,
}

impl Default for SpotParameters {
    fn default() -> Self {
        Self {
            rotation_period: Time::from_days(25.05),
            latitude: 0.0,
            longitude: 180.0,
            size: 0.1,
            kind: RegionKind::Spot,
        }
    }
}

impl SpotParameters {
    pub fn validate(&self) -> SignalResult<()> {
        let p = self.rotation_period.to_days();
        if !(p.is_finite() && p > 0.0) {
            return Err(SignalError::config(format!(
                "rotation period must be positive, got {p} days"
            )));
        }
        if !(self.size.is_finite() && self.size > 0.0 && self.size <= 1.0) {
            return Err(SignalError::config(format!(
                "active region size must be in (0, 1], got {}",
                self.size
            )));
        }
        if !(self.latitude.is_finite() && self.longitude.is_finite()) {
            return Err(SignalError::config("active region position must be finite"));
        }
        Ok(())
    }
}

/// A stellar-surface simulation: rotational phase in, RV out (km/s).
pub trait ActiveRegionSimulator: fmt::Display + Send {
    fn evaluate(&mut self, phase: &[f64]) -> SignalResult<Vec<f64>>;
}

/// Creates simulators; fails when the simulation backend is unavailable.
pub trait SimulatorFactory {
    fn create(
        &self,
        parameters: &SpotParameters,
    ) -> Result<Box<dyn ActiveRegionSimulator>, Box<dyn Error + Send + Sync>>;
}

/// RV signal of a rotating active region, mean-centered, in m/s.
pub struct ActiveRegion {
    parameters: SpotParameters,
    simulator: Box<dyn ActiveRegionSimulator>,
    sampling: Option<SamplingContext>,
}

impl ActiveRegion {
    pub fn new(parameters: SpotParameters, factory: &dyn SimulatorFactory) -> SignalResult<Self> {
        parameters.validate()?;
        let simulator = factory
            .create(&parameters)
            .map_err(|err| SignalError::UnavailableCollaborator(err.to_string()))?;
        Ok(Self {
            parameters,
            simulator,
            sampling: None,
        })
    }

    pub fn parameters(&self) -> &SpotParameters {
        &self.parameters
    }
}

impl SignalComponent for ActiveRegion {
    fn sample_at(&mut self, times: &[f64], _draw: Draw) -> SignalResult<Samples> {
        let rotation = self.parameters.rotation_period.to_days();
        let phase: Vec<f64> = times.iter().map(|t| t / rotation).collect();

        let rv = self.simulator.evaluate(&phase)?;
        if rv.len() != phase.len() {
            return Err(SignalError::UnavailableCollaborator(format!(
                "simulator returned {} values for {} phases",
                rv.len(),
                phase.len()
            )));
        }

        let mean = if rv.is_empty() {
            0.0
        } else {
            rv.iter().sum::<f64>() / rv.len() as f64
        };
        debug!(mean_km_s = mean, n = rv.len(), "centered active region signal");
        Ok(Samples::from_values(
            rv.iter().map(|v| (v - mean) * SIMULATOR_SCALE).collect(),
        ))
    }

    fn sampling(&self) -> Option<&SamplingContext> {
        self.sampling.as_ref()
    }

    fn set_sampling(&mut self, sampling: SamplingContext) {
        self.sampling = Some(sampling);
    }
}

impl fmt::Display for ActiveRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.simulator)
    }
}

/// Factory for builds without a simulation backend
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSimulator;

impl SimulatorFactory for NoSimulator {
    fn create(
        &self,
        _parameters: &SpotParameters,
    ) -> Result<Box<dyn ActiveRegionSimulator>, Box<dyn Error + Send + Sync>> {
        Err("no active-region simulator is available in this build".into())
    }
}
