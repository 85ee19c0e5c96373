//! Parameter sweeps over period, semi-amplitude and eccentricity.

use serde::{Deserialize, Serialize};
use units::{Time, Velocity};

use crate::elements::{OrbitGeometry, OrbitalElements};
use crate::error::{KeplerError, KeplerResult};

/// Cartesian product of P, K and e values.
///
/// Fixed parameters are one-element axes. Combinations are enumerated with P
/// as the outermost axis and e as the innermost.
///
/// # Examples
///
/// ```
/// use kepler::ParameterGrid;
/// use units::{Time, Velocity};
///
/// let grid = ParameterGrid::new(
///     vec![Time::from_days(5.0), Time::from_days(10.0)],
///     vec![Velocity::from_meters_per_sec(1.0)],
///     vec![0.0, 0.2, 0.4],
/// )
/// .unwrap();
///
/// assert_eq!(grid.len(), 6);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterGrid {
    pub periods: Vec<Time>,
    pub semi_amplitudes: Vec<Velocity>,
    pub eccentricities: Vec<f64>,
}

impl ParameterGrid {
    pub fn new(
        periods: Vec<Time>,
        semi_amplitudes: Vec<Velocity>,
        eccentricities: Vec<f64>,
    ) -> KeplerResult<Self> {
        if periods.is_empty() || semi_amplitudes.is_empty() || eccentricities.is_empty() {
            return Err(KeplerError::config("grid axes must not be empty"));
        }
        Ok(Self {
            periods,
            semi_amplitudes,
            eccentricities,
        })
    }

    /// Number of (P, K, e) combinations
    pub fn len(&self) -> usize {
        self.periods.len() * self.semi_amplitudes.len() * self.eccentricities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True when more than one axis is swept
    pub fn is_2d(&self) -> bool {
        [
            self.periods.len(),
            self.semi_amplitudes.len(),
            self.eccentricities.len(),
        ]
        .iter()
        .filter(|&&n| n > 1)
        .count()
            > 1
    }

    /// Iterate the (P, K, e) combinations in product order
    pub fn combinations(&self) -> impl Iterator<Item = (Time, Velocity, f64)> + '_ {
        self.periods.iter().flat_map(move |&p| {
            self.semi_amplitudes.iter().flat_map(move |&k| {
                self.eccentricities.iter().map(move |&e| (p, k, e))
            })
        })
    }

    /// Concrete elements for every combination, with Tp resolved per combination.
    pub fn elements(
        &self,
        argument_of_periastron: f64,
        geometry: &OrbitGeometry,
    ) -> KeplerResult<Vec<OrbitalElements>> {
        self.combinations()
            .map(|(p, k, e)| {
                let tp = geometry.time_of_periastron(p.to_days(), e, argument_of_periastron);
                OrbitalElements::new(p, k, e, argument_of_periastron, Time::from_days(tp))
            })
            .collect()
    }
}
