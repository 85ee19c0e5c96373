//! JSON description of a synthetic data set.
//!
//! A scenario lists the sampling and the components to add up, in order. The
//! n-th component gets the n-th seed derived from the master seed and draws
//! only from its own generator.
//!
//! ```json
//! {
//!   "seed": 42,
//!   "sampling": { "kind": "uniform", "start": 0.0, "end": 100.0, "count": 80 },
//!   "components": [
//!     { "type": "planet", "period": 10.0, "semi_amplitude": 3.0, "eccentricity": 0.1 },
//!     { "type": "granulation", "sigma": 1.0 },
//!     { "type": "white_noise", "sd": 0.5 }
//!   ]
//! }
//! ```

use kepler::{OrbitSpec, SolverConfig};
use serde::{Deserialize, Serialize};
use spectral::{FrequencyGridConfig, GranulationShape, OscillationProfile};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use units::{Frequency, Time, Velocity};

use crate::active_region::{ActiveRegion, NoSimulator, SimulatorFactory, SpotParameters};
use crate::component::SignalComponent;
use crate::composite::CompositeSignal;
use crate::error::{SignalError, SignalResult};
use crate::granulation::{Granulation, DEFAULT_GRANULATION_SIGMA, DEFAULT_GRANULATION_TAU_HOURS};
use crate::noise::WhiteNoise;
use crate::oscillation::{
    Oscillation, DEFAULT_NUMAX, DEFAULT_OSCILLATION_AMPLITUDE, DEFAULT_OSCILLATION_WIDTH,
};
use crate::planet::Planet;
use crate::random_state::{fresh_seed, Draw, SeedSequence};
use crate::samples::TimeSeries;
use crate::sampling::SamplingContext;
use crate::trend::{Offset, Slope};

/// Where the observation epochs come from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SamplingConfig {
    Times { times: Vec<f64> },
    Uniform { start: f64, end: f64, count: usize },
    File { path: PathBuf },
}

impl SamplingConfig {
    pub fn build(&self) -> SignalResult<SamplingContext> {
        match self {
            SamplingConfig::Times { times } => SamplingContext::new(times.clone()),
            SamplingConfig::Uniform { start, end, count } => {
                SamplingContext::uniform(*start, *end, *count)
            }
            SamplingConfig::File { path } => SamplingContext::from_file(path),
        }
    }
}

/// A fixed value or a sweep
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AxisValue {
    Fixed(f64),
    Sweep(Vec<f64>),
}

impl AxisValue {
    fn values(&self) -> Vec<f64> {
        match self {
            AxisValue::Fixed(value) => vec![*value],
            AxisValue::Sweep(values) => values.clone(),
        }
    }
}

/// One term of the summed signal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ComponentConfig {
    Planet {
        /// Days
        period: Option<AxisValue>,
        /// m/s
        semi_amplitude: Option<AxisValue>,
        eccentricity: Option<AxisValue>,
        #[serde(default)]
        orbit: OrbitSpec,
    },
    Offset {
        /// m/s
        value: f64,
    },
    Slope {
        /// m/s per day
        slope: f64,
    },
    WhiteNoise {
        /// m/s
        sd: Option<f64>,
        /// (m/s)²
        variance: Option<f64>,
    },
    Granulation {
        #[serde(default = "default_granulation_sigma")]
        sigma: f64,
        #[serde(default = "default_granulation_tau")]
        tau_hours: f64,
        #[serde(default = "default_granulation_model")]
        model: String,
        exponent: Option<f64>,
    },
    Oscillation {
        #[serde(default = "default_oscillation_amplitude")]
        amplitude: f64,
        /// µHz
        #[serde(default = "default_oscillation_width")]
        width: f64,
        /// µHz
        #[serde(default = "default_numax")]
        numax: f64,
        #[serde(default = "default_oscillation_profile")]
        profile: String,
    },
    ActiveRegion {
        #[serde(default)]
        spot: SpotParameters,
    },
}

fn default_granulation_sigma() -> f64 {
    DEFAULT_GRANULATION_SIGMA
}

fn default_granulation_tau() -> f64 {
    DEFAULT_GRANULATION_TAU_HOURS
}

fn default_granulation_model() -> String {
    "kallinger".into()
}

fn default_oscillation_amplitude() -> f64 {
    DEFAULT_OSCILLATION_AMPLITUDE
}

fn default_oscillation_width() -> f64 {
    DEFAULT_OSCILLATION_WIDTH
}

fn default_numax() -> f64 {
    DEFAULT_NUMAX
}

fn default_oscillation_profile() -> String {
    "lorentzian".into()
}

impl ComponentConfig {
    /// Construct and validate the component.
    pub fn build(
        &self,
        seed: u64,
        scenario: &ScenarioConfig,
        simulators: &dyn SimulatorFactory,
    ) -> SignalResult<Box<dyn SignalComponent>> {
        let component: Box<dyn SignalComponent> = match self {
            ComponentConfig::Planet {
                period,
                semi_amplitude,
                eccentricity,
                orbit,
            } => {
                let mut builder = Planet::builder()
                    .orbit(*orbit)
                    .solver(scenario.solver)
                    .seed(seed);
                if let Some(period) = period {
                    builder = builder
                        .periods(period.values().into_iter().map(Time::from_days).collect());
                }
                if let Some(k) = semi_amplitude {
                    builder = builder.semi_amplitudes(
                        k.values()
                            .into_iter()
                            .map(Velocity::from_meters_per_sec)
                            .collect(),
                    );
                }
                if let Some(e) = eccentricity {
                    builder = builder.eccentricities(e.values());
                }
                Box::new(builder.build()?)
            }
            ComponentConfig::Offset { value } => {
                Box::new(Offset::new(Velocity::from_meters_per_sec(*value)))
            }
            ComponentConfig::Slope { slope } => Box::new(Slope::new(*slope)),
            ComponentConfig::WhiteNoise { sd, variance } => {
                let noise = match (sd, variance) {
                    (Some(_), Some(_)) => {
                        return Err(SignalError::config(
                            "white noise takes either sd or variance, not both",
                        ))
                    }
                    (Some(sd), None) => WhiteNoise::from_sd(Velocity::from_meters_per_sec(*sd))?,
                    (None, Some(variance)) => WhiteNoise::from_variance(*variance)?,
                    (None, None) => WhiteNoise::default(),
                };
                Box::new(noise.with_seed(seed))
            }
            ComponentConfig::Granulation {
                sigma,
                tau_hours,
                model,
                exponent,
            } => {
                let shape = GranulationShape::from_tag(model, *exponent)?;
                Box::new(
                    Granulation::new(
                        Velocity::from_meters_per_sec(*sigma),
                        Time::from_hours(*tau_hours),
                        shape,
                    )?
                    .with_seed(seed)
                    .with_grid_config(scenario.frequency_grid),
                )
            }
            ComponentConfig::Oscillation {
                amplitude,
                width,
                numax,
                profile,
            } => Box::new(
                Oscillation::new(
                    *amplitude,
                    Frequency::from_microhertz(*width),
                    Frequency::from_microhertz(*numax),
                    OscillationProfile::from_tag(profile)?,
                )?
                .with_seed(seed)
                .with_grid_config(scenario.frequency_grid),
            ),
            ComponentConfig::ActiveRegion { spot } => {
                Box::new(ActiveRegion::new(*spot, simulators)?)
            }
        };
        debug!(component = %component.condensed(), seed, "built component");
        Ok(component)
    }
}

/// A complete synthetic data set description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioConfig {
    /// Master seed; a fresh one is drawn when absent
    #[serde(default)]
    pub seed: Option<u64>,
    pub sampling: SamplingConfig,
    pub components: Vec<ComponentConfig>,
    #[serde(default)]
    pub solver: SolverConfig,
    #[serde(default)]
    pub frequency_grid: FrequencyGridConfig,
}

impl ScenarioConfig {
    pub fn from_json(json: &str) -> SignalResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> SignalResult<Self> {
        Self::from_json(&fs::read_to_string(path)?)
    }

    pub fn to_json(&self) -> SignalResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Build without an active-region simulator
    pub fn build(&self) -> SignalResult<Scenario> {
        self.build_with(&NoSimulator)
    }

    /// Build every component and attach the sampling to the summed signal.
    pub fn build_with(&self, simulators: &dyn SimulatorFactory) -> SignalResult<Scenario> {
        let sampling = self.sampling.build()?;
        let master = self.seed.unwrap_or_else(fresh_seed);
        let mut seeds = SeedSequence::new(master);

        let mut signal: Option<Box<dyn SignalComponent>> = None;
        for config in &self.components {
            let component = config.build(seeds.next_seed(), self, simulators)?;
            signal = Some(match signal {
                None => component,
                Some(sum) => Box::new(CompositeSignal::from_boxed(sum, component)),
            });
        }
        let mut signal =
            signal.ok_or_else(|| SignalError::config("a scenario needs at least one component"))?;
        signal.set_sampling(sampling.clone());

        info!(
            components = self.components.len(),
            nobs = sampling.nobs(),
            seed = master,
            "built scenario"
        );
        Ok(Scenario {
            signal,
            sampling,
            seed: master,
        })
    }
}

/// A built scenario: the summed signal and its epochs
pub struct Scenario {
    pub signal: Box<dyn SignalComponent>,
    pub sampling: SamplingContext,
    /// Master seed actually used
    pub seed: u64,
}

impl Scenario {
    pub fn sample(&mut self, draw: Draw) -> SignalResult<TimeSeries> {
        self.signal.sample_attached(draw)
    }
}
