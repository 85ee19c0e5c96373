//! Composable synthetic stellar radial-velocity signals.
//!
//! Leaves of a signal are [`Planet`]s, deterministic trends ([`Offset`],
//! [`Slope`]), noise ([`WhiteNoise`], [`DistributedNoise`]), colored stellar
//! noise ([`Granulation`], [`Oscillation`]) and externally simulated
//! [`ActiveRegion`]s. Adding components builds a [`CompositeSignal`] that is
//! sampled as a whole.
//!
//! # Examples
//!
//! ```
//! use signals::{Draw, Offset, Planet, SamplingContext, SignalComponent, WhiteNoise};
//! use units::{Time, Velocity};
//!
//! let planet = Planet::builder()
//!     .period(Time::from_days(4.2))
//!     .semi_amplitude(Velocity::from_meters_per_sec(5.0))
//!     .eccentricity(0.05)
//!     .seed(1)
//!     .build()
//!     .unwrap();
//! let noise = WhiteNoise::from_sd(Velocity::from_meters_per_sec(1.0))
//!     .unwrap()
//!     .with_seed(2);
//!
//! let mut signal = planet + noise + Offset::new(Velocity::from_meters_per_sec(-10.0));
//! signal.set_sampling(SamplingContext::uniform(0.0, 20.0, 40).unwrap());
//!
//! let series = signal.sample_attached(Draw::Replay).unwrap();
//! assert_eq!(series.samples.len(), 40);
//! ```

pub mod active_region;
pub mod component;
pub mod composite;
pub mod error;
pub mod granulation;
pub mod noise;
pub mod oscillation;
pub mod planet;
pub mod random_state;
pub mod rdb;
pub mod samples;
pub mod sampling;
pub mod scenario;
pub mod trend;

#[cfg(test)]
mod composite_test;
#[cfg(test)]
mod noise_test;
#[cfg(test)]
mod scenario_test;
#[cfg(test)]
mod stochastic_test;

pub use active_region::{
    ActiveRegion, ActiveRegionSimulator, NoSimulator, RegionKind, SimulatorFactory,
    SpotParameters,
};
pub use component::SignalComponent;
pub use composite::CompositeSignal;
pub use error::{SignalError, SignalResult};
pub use granulation::Granulation;
pub use noise::{DistributedNoise, WhiteNoise};
pub use oscillation::Oscillation;
pub use planet::{Planet, PlanetBuilder};
pub use random_state::{Draw, RandomState, SeedSequence};
pub use rdb::{
    has_extra_columns, has_extras, parse_rv, read_rv_file, write_rv, write_rv_file, RvData,
    VelocityUnit,
};
pub use samples::{Samples, TimeSeries};
pub use sampling::SamplingContext;
pub use scenario::{AxisValue, ComponentConfig, SamplingConfig, Scenario, ScenarioConfig};
pub use trend::{Offset, Slope};
