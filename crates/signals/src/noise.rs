//! Independent, identically distributed noise.

use rand_distr::{Distribution, StandardNormal};
use std::fmt;
use std::ops::Add;
use units::Velocity;

use crate::component::SignalComponent;
use crate::composite::CompositeSignal;
use crate::error::{SignalError, SignalResult};
use crate::random_state::{Draw, RandomState};
use crate::samples::Samples;
use crate::sampling::SamplingContext;

/// Gaussian white noise with zero mean.
///
/// # Examples
///
/// ```
/// use signals::{SignalComponent, WhiteNoise};
/// use units::Velocity;
///
/// let mut noise = WhiteNoise::from_sd(Velocity::from_meters_per_sec(2.0))
///     .unwrap()
///     .with_seed(3);
/// let times = [0.0, 1.0, 2.0];
///
/// // Replays the same draws until asked to advance
/// assert_eq!(noise.sample(&times).unwrap(), noise.sample(&times).unwrap());
///
/// assert!(WhiteNoise::from_variance(-1.0).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct WhiteNoise {
    sd: Velocity,
    state: RandomState,
    sampling: Option<SamplingContext>,
}

impl WhiteNoise {
    pub fn from_sd(sd: Velocity) -> SignalResult<Self> {
        let sigma = sd.to_meters_per_sec();
        if !(sigma.is_finite() && sigma > 0.0) {
            return Err(SignalError::config(format!(
                "white noise standard deviation must be positive, got {sigma} m/s"
            )));
        }
        Ok(Self {
            sd,
            state: RandomState::from_entropy(),
            sampling: None,
        })
    }

    /// From a variance in (m/s)²
    pub fn from_variance(variance: f64) -> SignalResult<Self> {
        if !(variance.is_finite() && variance > 0.0) {
            return Err(SignalError::config(format!(
                "white noise variance must be positive, got {variance}"
            )));
        }
        Self::from_sd(Velocity::from_meters_per_sec(variance.sqrt()))
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.state = RandomState::from_seed(seed);
        self
    }

    pub fn sd(&self) -> Velocity {
        self.sd
    }

    pub fn variance(&self) -> f64 {
        self.sd.to_meters_per_sec().powi(2)
    }
}

impl Default for WhiteNoise {
    /// σ = 1 m/s
    fn default() -> Self {
        Self {
            sd: Velocity::from_meters_per_sec(1.0),
            state: RandomState::from_entropy(),
            sampling: None,
        }
    }
}

impl SignalComponent for WhiteNoise {
    fn sample_at(&mut self, times: &[f64], draw: Draw) -> SignalResult<Samples> {
        let sigma = self.sd.to_meters_per_sec();
        let rng = self.state.generator(draw);
        let values = times
            .iter()
            .map(|_| {
                let z: f64 = StandardNormal.sample(&mut *rng);
                sigma * z
            })
            .collect();
        Ok(Samples::from_values(values))
    }

    fn sampling(&self) -> Option<&SamplingContext> {
        self.sampling.as_ref()
    }

    fn set_sampling(&mut self, sampling: SamplingContext) {
        self.sampling = Some(sampling);
    }
}

impl fmt::Display for WhiteNoise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "WhiteNoise(sigma={:.2})", self.sd.to_meters_per_sec())
    }
}

/// I.i.d. draws from an arbitrary distribution (m/s).
#[derive(Debug, Clone)]
pub struct DistributedNoise<D> {
    distribution: D,
    state: RandomState,
    sampling: Option<SamplingContext>,
}

impl<D> DistributedNoise<D>
where
    D: Distribution<f64> + fmt::Debug + Send,
{
    pub fn new(distribution: D) -> Self {
        Self {
            distribution,
            state: RandomState::from_entropy(),
            sampling: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.state = RandomState::from_seed(seed);
        self
    }

    pub fn distribution(&self) -> &D {
        &self.distribution
    }

    /// Draw from `distribution` instead of the configured one, using this
    /// component's generator.
    pub fn sample_from<E>(&mut self, times: &[f64], distribution: &E, draw: Draw) -> Samples
    where
        E: Distribution<f64> + ?Sized,
    {
        let rng = self.state.generator(draw);
        Samples::from_values(times.iter().map(|_| distribution.sample(&mut *rng)).collect())
    }
}

impl<D> SignalComponent for DistributedNoise<D>
where
    D: Distribution<f64> + fmt::Debug + Send,
{
    fn sample_at(&mut self, times: &[f64], draw: Draw) -> SignalResult<Samples> {
        let rng = self.state.generator(draw);
        let values = times
            .iter()
            .map(|_| self.distribution.sample(&mut *rng))
            .collect();
        Ok(Samples::from_values(values))
    }

    fn sampling(&self) -> Option<&SamplingContext> {
        self.sampling.as_ref()
    }

    fn set_sampling(&mut self, sampling: SamplingContext) {
        self.sampling = Some(sampling);
    }
}

impl<D: fmt::Debug> fmt::Display for DistributedNoise<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DistributedNoise({:?})", self.distribution)
    }
}

impl<D, R> Add<R> for DistributedNoise<D>
where
    D: Distribution<f64> + fmt::Debug + Send + 'static,
    R: SignalComponent + 'static,
{
    type Output = CompositeSignal;

    fn add(self, rhs: R) -> CompositeSignal {
        CompositeSignal::new(self, rhs)
    }
}
