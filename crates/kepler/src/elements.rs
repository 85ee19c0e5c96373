//! Radial-velocity orbital elements and phase conventions.
//!
//! An RV orbit is fully described by five numbers: period P, semi-amplitude K,
//! eccentricity e, argument of periastron ω and time of periastron Tp. Users
//! may instead pin the orbital phase with an anomaly or a longitude at a
//! reference epoch, or give the longitude of periastron ϖ instead of ω;
//! [`OrbitSpec`] reduces those alternatives to the canonical set.

use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;
use units::{Time, Velocity};

use crate::error::{KeplerError, KeplerResult};

/// Upper clamp for eccentricity
pub const MAX_ECCENTRICITY: f64 = 0.99;

/// Time of periastron used when no phase information is given (days)
pub const DEFAULT_PERIASTRON_EPOCH: f64 = 57_000.0;

/// Epoch at which anomalies and longitudes are interpreted (days)
pub const DEFAULT_REFERENCE_EPOCH: f64 = 2_454_000.0;

/// The five canonical RV orbital elements.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrbitalElements {
    /// Orbital period
    pub period: Time,

    /// RV semi-amplitude
    pub semi_amplitude: Velocity,

    /// Eccentricity (dimensionless, clamped to [0, 0.99])
    pub eccentricity: f64,

    /// Argument of periastron ω (radians)
    pub argument_of_periastron: f64,

    /// Epoch of periastron passage
    pub time_of_periastron: Time,
}

impl OrbitalElements {
    /// Build a validated set of elements.
    ///
    /// The period must be strictly positive and K non-negative. Eccentricity is
    /// clamped into [0, 0.99] rather than rejected.
    pub fn new(
        period: Time,
        semi_amplitude: Velocity,
        eccentricity: f64,
        argument_of_periastron: f64,
        time_of_periastron: Time,
    ) -> KeplerResult<Self> {
        let elements = Self {
            period,
            semi_amplitude,
            eccentricity: clamp_eccentricity(eccentricity),
            argument_of_periastron,
            time_of_periastron,
        };
        elements.validate()?;
        Ok(elements)
    }

    /// Checks the invariants that `new` enforces.
    pub fn validate(&self) -> KeplerResult<()> {
        let p = self.period.to_days();
        if !p.is_finite() || p <= 0.0 {
            return Err(KeplerError::config(format!(
                "period must be positive, got {p} days"
            )));
        }
        let k = self.semi_amplitude.to_meters_per_sec();
        if !k.is_finite() || k < 0.0 {
            return Err(KeplerError::config(format!(
                "semi-amplitude must be non-negative, got {k} m/s"
            )));
        }
        if !self.eccentricity.is_finite() {
            return Err(KeplerError::config("eccentricity must be finite"));
        }
        if !self.argument_of_periastron.is_finite() || !self.time_of_periastron.is_finite() {
            return Err(KeplerError::config(
                "argument and time of periastron must be finite",
            ));
        }
        Ok(())
    }

    /// Mean anomaly at time `t` (days), always in [0, 2π).
    pub fn mean_anomaly(&self, t: f64) -> f64 {
        mean_anomaly(t, self.period.to_days(), self.time_of_periastron.to_days())
    }

    pub fn is_circular(&self) -> bool {
        self.eccentricity == 0.0
    }
}

/// M = 2π·frac((t − Tp)/P), frac taken by floor subtraction.
pub fn mean_anomaly(t: f64, period: f64, time_of_periastron: f64) -> f64 {
    let cycles = (t - time_of_periastron) / period;
    TAU * (cycles - cycles.floor())
}

pub fn clamp_eccentricity(eccentricity: f64) -> f64 {
    eccentricity.clamp(0.0, MAX_ECCENTRICITY)
}

/// Mean anomaly corresponding to a true anomaly.
pub fn true_to_mean_anomaly(true_anomaly: f64, eccentricity: f64) -> f64 {
    let e = clamp_eccentricity(eccentricity);
    let half = true_anomaly / 2.0;
    let ecc_anomaly = 2.0 * ((1.0 - e).sqrt() * half.sin()).atan2((1.0 + e).sqrt() * half.cos());
    ecc_anomaly - e * ecc_anomaly.sin()
}

/// A single, already disambiguated statement of orbital phase.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Phase {
    /// Epoch of periastron passage (days)
    TimeOfPeriastron(f64),
    /// Mean anomaly M at the reference epoch (radians)
    MeanAnomaly(f64),
    /// True anomaly f at the reference epoch (radians)
    TrueAnomaly(f64),
    /// Mean longitude l = Ω + ω + M at the reference epoch (radians)
    MeanLongitude(f64),
    /// True longitude θ = Ω + ω + f at the reference epoch (radians)
    TrueLongitude(f64),
}

/// Orbit orientation and phase after validation.
///
/// The time of periastron is computed per (P, e, ω) combination, since a phase
/// given as an anomaly or longitude maps to a different Tp for every period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrbitGeometry {
    /// ω if it was given directly or through ϖ
    pub argument_of_periastron: Option<f64>,
    pub phase: Phase,
    pub inclination: f64,
    pub longitude_of_node: f64,
    pub reference_epoch: f64,
}

impl OrbitGeometry {
    fn is_prograde(&self) -> bool {
        self.inclination.cos() > 0.0
    }

    /// Time of periastron (days) for the given period, eccentricity and ω.
    pub fn time_of_periastron(&self, period: f64, eccentricity: f64, omega: f64) -> f64 {
        let node = self.longitude_of_node;
        let mean_anomaly = match self.phase {
            Phase::TimeOfPeriastron(tp) => return tp,
            Phase::MeanAnomaly(m) => m,
            Phase::TrueAnomaly(f) => true_to_mean_anomaly(f, eccentricity),
            Phase::MeanLongitude(l) => {
                if self.is_prograde() {
                    l - node - omega
                } else {
                    node - omega - l
                }
            }
            Phase::TrueLongitude(theta) => {
                let f = if self.is_prograde() {
                    theta - node - omega
                } else {
                    node - omega - theta
                };
                true_to_mean_anomaly(f, eccentricity)
            }
        };
        self.reference_epoch - mean_anomaly * period / TAU
    }
}

/// Loosely specified orbit orientation and phase, as a user would write it.
///
/// At most one of ω / ϖ and at most one of f, M, l, θ, Tp may be set.
///
/// # Examples
///
/// ```
/// use kepler::OrbitSpec;
///
/// let geometry = OrbitSpec::default()
///     .argument_of_periastron(0.5)
///     .mean_longitude(1.5)
///     .resolve()
///     .unwrap();
///
/// // Tp = P·(ω − λ)/(2π) + epoch
/// let tp = geometry.time_of_periastron(10.0, 0.1, 0.5);
/// assert!((tp - (10.0 * (0.5 - 1.5) / std::f64::consts::TAU + 2_454_000.0)).abs() < 1e-9);
///
/// assert!(OrbitSpec::default().mean_anomaly(0.1).time_of_periastron(57_000.0).resolve().is_err());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitSpec {
    pub inclination: Option<f64>,
    pub longitude_of_node: Option<f64>,
    pub argument_of_periastron: Option<f64>,
    pub longitude_of_periastron: Option<f64>,
    pub true_anomaly: Option<f64>,
    pub mean_anomaly: Option<f64>,
    #[serde(alias = "lambda")]
    pub mean_longitude: Option<f64>,
    pub true_longitude: Option<f64>,
    pub time_of_periastron: Option<f64>,
    pub reference_epoch: Option<f64>,
}

impl OrbitSpec {
    pub fn inclination(mut self, value: f64) -> Self {
        self.inclination = Some(value);
        self
    }

    pub fn longitude_of_node(mut self, value: f64) -> Self {
        self.longitude_of_node = Some(value);
        self
    }

    pub fn argument_of_periastron(mut self, value: f64) -> Self {
        self.argument_of_periastron = Some(value);
        self
    }

    pub fn longitude_of_periastron(mut self, value: f64) -> Self {
        self.longitude_of_periastron = Some(value);
        self
    }

    pub fn true_anomaly(mut self, value: f64) -> Self {
        self.true_anomaly = Some(value);
        self
    }

    pub fn mean_anomaly(mut self, value: f64) -> Self {
        self.mean_anomaly = Some(value);
        self
    }

    /// Mean longitude λ at the reference epoch
    pub fn mean_longitude(mut self, value: f64) -> Self {
        self.mean_longitude = Some(value);
        self
    }

    pub fn true_longitude(mut self, value: f64) -> Self {
        self.true_longitude = Some(value);
        self
    }

    pub fn time_of_periastron(mut self, value: f64) -> Self {
        self.time_of_periastron = Some(value);
        self
    }

    pub fn reference_epoch(mut self, value: f64) -> Self {
        self.reference_epoch = Some(value);
        self
    }

    /// Check for conflicting conventions and reduce to an [`OrbitGeometry`].
    pub fn resolve(&self) -> KeplerResult<OrbitGeometry> {
        let inclination = self.inclination.unwrap_or(0.0);
        let longitude_of_node = self.longitude_of_node.unwrap_or(0.0);
        let prograde = inclination.cos() > 0.0;

        let argument_of_periastron =
            match (self.argument_of_periastron, self.longitude_of_periastron) {
                (Some(_), Some(_)) => {
                    return Err(KeplerError::config(
                        "can't pass both the argument (omega) and longitude (pomega) of periastron",
                    ))
                }
                (Some(omega), None) => Some(omega),
                (None, Some(pomega)) if prograde => Some(pomega - longitude_of_node),
                (None, Some(pomega)) => Some(longitude_of_node - pomega),
                (None, None) => None,
            };

        let candidates = [
            self.true_anomaly.map(Phase::TrueAnomaly),
            self.mean_anomaly.map(Phase::MeanAnomaly),
            self.mean_longitude.map(Phase::MeanLongitude),
            self.true_longitude.map(Phase::TrueLongitude),
            self.time_of_periastron.map(Phase::TimeOfPeriastron),
        ];
        let mut given = candidates.into_iter().flatten();
        let phase = match (given.next(), given.next()) {
            (Some(_), Some(_)) => {
                return Err(KeplerError::config(
                    "only one longitude/anomaly may be given among \
                     [true anomaly, mean anomaly, mean longitude, true longitude, time of periastron]",
                ))
            }
            (Some(phase), None) => phase,
            (None, _) => Phase::TimeOfPeriastron(DEFAULT_PERIASTRON_EPOCH),
        };

        let phase_value = match phase {
            Phase::TimeOfPeriastron(v)
            | Phase::MeanAnomaly(v)
            | Phase::TrueAnomaly(v)
            | Phase::MeanLongitude(v)
            | Phase::TrueLongitude(v) => v,
        };
        let values = [
            Some(phase_value),
            Some(inclination),
            Some(longitude_of_node),
            argument_of_periastron,
            self.reference_epoch,
        ];
        if values.iter().flatten().any(|v| !v.is_finite()) {
            return Err(KeplerError::config("orbit angles and epochs must be finite"));
        }

        Ok(OrbitGeometry {
            argument_of_periastron,
            phase,
            inclination,
            longitude_of_node,
            reference_epoch: self.reference_epoch.unwrap_or(DEFAULT_REFERENCE_EPOCH),
        })
    }
}
