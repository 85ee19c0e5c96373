//! Keplerian planets.
//!
//! A [`Planet`] is either a single orbit or a sweep over a grid of periods,
//! semi-amplitudes and eccentricities. Parameters left unset are drawn from
//! broad priors using the planet's own seeded generator.

use kepler::{
    rv_curves, KeplerSolver, OrbitGeometry, OrbitSpec, OrbitalElements, ParameterGrid,
    SolverConfig,
};
use rand::distr::Uniform;
use rand::SeedableRng;
use rand_chacha::ChaChaRng;
use rand_distr::{Beta, Distribution};
use std::f64::consts::TAU;
use std::fmt;
use tracing::debug;
use units::{Mass, Time, Velocity};

use crate::component::SignalComponent;
use crate::error::{SignalError, SignalResult};
use crate::random_state::{fresh_seed, Draw};
use crate::samples::Samples;
use crate::sampling::SamplingContext;

/// Period prior bounds (days)
pub const PERIOD_PRIOR: (f64, f64) = (1.1, 1102.2);

/// Semi-amplitude prior bounds (m/s)
pub const SEMI_AMPLITUDE_PRIOR: (f64, f64) = (0.0, 100.0);

/// Beta(a, b) eccentricity prior
pub const ECCENTRICITY_PRIOR: (f64, f64) = (0.867, 3.03);

/// m sin i [M_J] per M★^(2/3) [M☉] · P^(1/3) [d] · K [m/s] · sqrt(1 − e²)
const MINIMUM_MASS_FACTOR: f64 = 4.919e-3;

/// Points in [`Planet::default_times`]
const PREVIEW_POINTS: usize = 1000;

/// Builder for [`Planet`].
///
/// # Examples
///
/// ```
/// use signals::{Planet, SignalComponent};
/// use units::{Time, Velocity};
///
/// let mut planet = Planet::builder()
///     .period(Time::from_days(10.0))
///     .semi_amplitude(Velocity::from_meters_per_sec(1.0))
///     .eccentricity(0.0)
///     .argument_of_periastron(0.0)
///     .time_of_periastron(Time::zero())
///     .build()
///     .unwrap();
///
/// let rv = planet.sample(&[0.0, 5.0]).unwrap().values().unwrap();
/// assert!((rv[0] - 1.0).abs() < 1e-12);
/// assert!((rv[1] + 1.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PlanetBuilder {
    periods: Option<Vec<Time>>,
    semi_amplitudes: Option<Vec<Velocity>>,
    eccentricities: Option<Vec<f64>>,
    orbit: OrbitSpec,
    solver: SolverConfig,
    seed: Option<u64>,
}

impl PlanetBuilder {
    pub fn period(self, period: Time) -> Self {
        self.periods(vec![period])
    }

    /// Sweep over several periods
    pub fn periods(mut self, periods: Vec<Time>) -> Self {
        self.periods = Some(periods);
        self
    }

    pub fn semi_amplitude(self, semi_amplitude: Velocity) -> Self {
        self.semi_amplitudes(vec![semi_amplitude])
    }

    pub fn semi_amplitudes(mut self, semi_amplitudes: Vec<Velocity>) -> Self {
        self.semi_amplitudes = Some(semi_amplitudes);
        self
    }

    pub fn eccentricity(self, eccentricity: f64) -> Self {
        self.eccentricities(vec![eccentricity])
    }

    pub fn eccentricities(mut self, eccentricities: Vec<f64>) -> Self {
        self.eccentricities = Some(eccentricities);
        self
    }

    /// ω (radians)
    pub fn argument_of_periastron(mut self, omega: f64) -> Self {
        self.orbit = self.orbit.argument_of_periastron(omega);
        self
    }

    /// ϖ (radians), an alternative to ω
    pub fn longitude_of_periastron(mut self, pomega: f64) -> Self {
        self.orbit = self.orbit.longitude_of_periastron(pomega);
        self
    }

    pub fn inclination(mut self, inclination: f64) -> Self {
        self.orbit = self.orbit.inclination(inclination);
        self
    }

    /// Ω (radians)
    pub fn longitude_of_node(mut self, node: f64) -> Self {
        self.orbit = self.orbit.longitude_of_node(node);
        self
    }

    pub fn true_anomaly(mut self, f: f64) -> Self {
        self.orbit = self.orbit.true_anomaly(f);
        self
    }

    pub fn mean_anomaly(mut self, m: f64) -> Self {
        self.orbit = self.orbit.mean_anomaly(m);
        self
    }

    /// λ (radians) at the reference epoch
    pub fn mean_longitude(mut self, lambda: f64) -> Self {
        self.orbit = self.orbit.mean_longitude(lambda);
        self
    }

    pub fn true_longitude(mut self, theta: f64) -> Self {
        self.orbit = self.orbit.true_longitude(theta);
        self
    }

    pub fn time_of_periastron(mut self, tp: Time) -> Self {
        self.orbit = self.orbit.time_of_periastron(tp.to_days());
        self
    }

    /// Epoch at which anomalies and longitudes are given
    pub fn reference_epoch(mut self, epoch: Time) -> Self {
        self.orbit = self.orbit.reference_epoch(epoch.to_days());
        self
    }

    /// Replace the orientation and phase wholesale
    pub fn orbit(mut self, orbit: OrbitSpec) -> Self {
        self.orbit = orbit;
        self
    }

    pub fn solver(mut self, solver: SolverConfig) -> Self {
        self.solver = solver;
        self
    }

    /// Seed for the priors of unset parameters
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Resolve phase conventions, draw missing parameters and validate.
    pub fn build(self) -> SignalResult<Planet> {
        let geometry = self.orbit.resolve()?;
        let mut rng = ChaChaRng::seed_from_u64(self.seed.unwrap_or_else(fresh_seed));

        let periods = match self.periods {
            Some(periods) => periods,
            None => vec![Time::from_days(uniform(PERIOD_PRIOR)?.sample(&mut rng))],
        };
        if let Some(p) = periods.iter().map(Time::to_days).find(|p| !(*p > 0.0)) {
            return Err(SignalError::config(format!(
                "orbital period must be positive, got {p} days"
            )));
        }

        let semi_amplitudes = match self.semi_amplitudes {
            Some(ks) => ks,
            None => vec![Velocity::from_meters_per_sec(
                uniform(SEMI_AMPLITUDE_PRIOR)?.sample(&mut rng),
            )],
        };

        let eccentricities = match self.eccentricities {
            Some(es) => es,
            None => {
                let (a, b) = ECCENTRICITY_PRIOR;
                let prior = Beta::new(a, b).map_err(|err| SignalError::config(err.to_string()))?;
                vec![prior.sample(&mut rng)]
            }
        };

        let omega = match geometry.argument_of_periastron {
            Some(omega) => omega,
            None => uniform((0.0, TAU))?.sample(&mut rng),
        };

        let grid = ParameterGrid::new(periods, semi_amplitudes, eccentricities)?;
        let orbits = grid.elements(omega, &geometry)?;
        debug!(combinations = orbits.len(), omega, "built planet");

        Ok(Planet {
            grid,
            geometry,
            orbits,
            solver: KeplerSolver::new(self.solver),
            sampling: None,
        })
    }
}

fn uniform((low, high): (f64, f64)) -> SignalResult<Uniform<f64>> {
    Uniform::new(low, high).map_err(|err| SignalError::config(err.to_string()))
}

/// A Keplerian RV signal, possibly swept over a parameter grid.
#[derive(Debug, Clone)]
pub struct Planet {
    grid: ParameterGrid,
    geometry: OrbitGeometry,
    orbits: Vec<OrbitalElements>,
    solver: KeplerSolver,
    sampling: Option<SamplingContext>,
}

impl Planet {
    pub fn builder() -> PlanetBuilder {
        PlanetBuilder::default()
    }

    /// A single orbit from canonical elements, with eccentricity clamped
    pub fn from_elements(elements: OrbitalElements) -> SignalResult<Self> {
        let elements = OrbitalElements::new(
            elements.period,
            elements.semi_amplitude,
            elements.eccentricity,
            elements.argument_of_periastron,
            elements.time_of_periastron,
        )?;
        Ok(Self::single(elements))
    }

    /// P = 365.25 d, K = 0.09 m/s, e = 0.0167
    pub fn earth_analog() -> Self {
        Self::analog(365.25, 0.09, 0.0167)
    }

    /// P = 4332.59 d, K = 12.5 m/s, e = 0.0489
    pub fn jupiter_analog() -> Self {
        Self::analog(4332.59, 12.5, 0.0489)
    }

    fn analog(period: f64, semi_amplitude: f64, eccentricity: f64) -> Self {
        Self::single(OrbitalElements {
            period: Time::from_days(period),
            semi_amplitude: Velocity::from_meters_per_sec(semi_amplitude),
            eccentricity,
            argument_of_periastron: 0.0,
            time_of_periastron: Time::from_days(kepler::DEFAULT_PERIASTRON_EPOCH),
        })
    }

    fn single(elements: OrbitalElements) -> Self {
        let grid = ParameterGrid {
            periods: vec![elements.period],
            semi_amplitudes: vec![elements.semi_amplitude],
            eccentricities: vec![elements.eccentricity],
        };
        let geometry = OrbitGeometry {
            argument_of_periastron: Some(elements.argument_of_periastron),
            phase: kepler::Phase::TimeOfPeriastron(elements.time_of_periastron.to_days()),
            inclination: 0.0,
            longitude_of_node: 0.0,
            reference_epoch: kepler::DEFAULT_REFERENCE_EPOCH,
        };
        Self {
            grid,
            geometry,
            orbits: vec![elements],
            solver: KeplerSolver::default(),
            sampling: None,
        }
    }

    /// One set of elements per grid combination
    pub fn elements(&self) -> &[OrbitalElements] {
        &self.orbits
    }

    pub fn grid(&self) -> &ParameterGrid {
        &self.grid
    }

    pub fn geometry(&self) -> &OrbitGeometry {
        &self.geometry
    }

    /// True when any of P, K, e is swept
    pub fn is_grid(&self) -> bool {
        self.orbits.len() > 1
    }

    /// RV curves at `times`, one row per grid combination (m/s).
    pub fn rv(&self, times: &[f64]) -> SignalResult<Samples> {
        Ok(Samples::from_matrix(rv_curves(
            times,
            &self.orbits,
            &self.solver,
        )?))
    }

    /// Minimum mass m·sin i for a star of `star_mass`, per grid combination
    pub fn minimum_mass(&self, star_mass: Mass) -> Vec<Mass> {
        let m_star = star_mass.to_solar_masses();
        self.orbits
            .iter()
            .map(|orbit| {
                let e = orbit.eccentricity;
                Mass::from_jupiter_masses(
                    MINIMUM_MASS_FACTOR
                        * m_star.powf(2.0 / 3.0)
                        * orbit.period.to_days().cbrt()
                        * orbit.semi_amplitude.to_meters_per_sec()
                        * (1.0 - e * e).sqrt(),
                )
            })
            .collect()
    }

    /// Dense preview times covering three (mean) periods
    pub fn default_times(&self) -> Vec<f64> {
        let periods = &self.grid.periods;
        let mean = periods.iter().map(Time::to_days).sum::<f64>() / periods.len() as f64;
        let step = 3.0 * mean / (PREVIEW_POINTS - 1) as f64;
        (0..PREVIEW_POINTS).map(|i| i as f64 * step).collect()
    }
}

impl SignalComponent for Planet {
    fn sample_at(&mut self, times: &[f64], _draw: Draw) -> SignalResult<Samples> {
        self.rv(times)
    }

    fn sampling(&self) -> Option<&SamplingContext> {
        self.sampling.as_ref()
    }

    fn set_sampling(&mut self, sampling: SamplingContext) {
        self.sampling = Some(sampling);
    }

    fn shortest_period(&self) -> Option<f64> {
        self.grid
            .periods
            .iter()
            .map(Time::to_days)
            .reduce(f64::min)
    }
}

impl fmt::Display for Planet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let periods: Vec<f64> = self.grid.periods.iter().map(Time::to_days).collect();
        let ks: Vec<f64> = self
            .grid
            .semi_amplitudes
            .iter()
            .map(Velocity::to_meters_per_sec)
            .collect();
        write!(
            f,
            "Planet(P={} d, K={} m/s, e={})",
            axis(&periods),
            axis(&ks),
            axis(&self.grid.eccentricities)
        )
    }
}

fn axis(values: &[f64]) -> String {
    match values {
        [value] => format!("{value:.2}"),
        [first, .., last] if values.len() > 3 => format!("[{first:.2}..{last:.2}]"),
        _ => {
            let items: Vec<String> = values.iter().map(|v| format!("{v:.2}")).collect();
            format!("[{}]", items.join(", "))
        }
    }
}
