//! Kepler's equation solver.
//!
//! Solves `M = E − e·sin(E)` for the eccentric anomaly E using Newton-Raphson
//! with a third-order correction. Only anomalies whose residual is still above
//! tolerance are iterated on each pass.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::{KeplerError, KeplerResult};

/// Residual below which an anomaly counts as converged
pub const CONVERGENCE_TOLERANCE: f64 = 1e-12;

/// Hard cap on solver passes
pub const DEFAULT_MAX_ITERATIONS: usize = 100;

/// Starting-value factor: E₀ = M + sign(sin M)·k·e
const STARTING_FACTOR: f64 = 0.85;

/// Solver tuning knobs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Convergence criterion on |E − e·sin(E) − M|
    pub tolerance: f64,
    /// Passes before giving up with `NonConvergence`
    pub max_iterations: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: CONVERGENCE_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

/// Kepler equation solver
///
/// # Examples
///
/// ```
/// use kepler::KeplerSolver;
///
/// let solver = KeplerSolver::default();
/// let e = 0.3;
/// let ecc = solver.solve_uniform(&[0.5, 2.0, 4.0], e).unwrap();
///
/// for (m, big_e) in [0.5, 2.0, 4.0].iter().zip(&ecc) {
///     assert!((big_e - e * big_e.sin() - m).abs() < 1e-10);
/// }
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct KeplerSolver {
    pub config: SolverConfig,
}

impl KeplerSolver {
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    /// Solve elementwise for paired mean anomalies and eccentricities.
    ///
    /// # Arguments
    /// * `mean_anomaly` - Mean anomalies M (radians)
    /// * `eccentricity` - One eccentricity per mean anomaly
    ///
    /// # Returns
    /// Eccentric anomalies E (radians), same length as the input
    pub fn solve(&self, mean_anomaly: &[f64], eccentricity: &[f64]) -> KeplerResult<Vec<f64>> {
        if mean_anomaly.len() != eccentricity.len() {
            return Err(KeplerError::LengthMismatch {
                mean_anomalies: mean_anomaly.len(),
                eccentricities: eccentricity.len(),
            });
        }

        let residual = |m: f64, e: f64, big_e: f64| big_e - e * big_e.sin() - m;

        let mut ecc_anomaly: Vec<f64> = mean_anomaly
            .iter()
            .zip(eccentricity)
            .map(|(&m, &e)| m + sign(m.sin()) * STARTING_FACTOR * e)
            .collect();

        let mut pending: Vec<usize> = (0..mean_anomaly.len())
            .filter(|&i| {
                residual(mean_anomaly[i], eccentricity[i], ecc_anomaly[i]).abs()
                    > self.config.tolerance
            })
            .collect();

        let mut iterations = 0;
        while !pending.is_empty() {
            if iterations == self.config.max_iterations {
                let max_residual = pending
                    .iter()
                    .map(|&i| residual(mean_anomaly[i], eccentricity[i], ecc_anomaly[i]).abs())
                    .fold(0.0, f64::max);
                return Err(KeplerError::NonConvergence {
                    iterations,
                    unconverged: pending.len(),
                    max_residual,
                });
            }
            iterations += 1;

            for &i in &pending {
                let (m, e, big_e) = (mean_anomaly[i], eccentricity[i], ecc_anomaly[i]);

                let fi = residual(m, e, big_e);
                let fip = 1.0 - e * big_e.cos();
                let fipp = e * big_e.sin();
                let fippp = 1.0 - fip;

                // first, second and third order corrections
                let d1 = -fi / fip;
                let d2 = -fi / (fip + d1 * fipp / 2.0);
                let d3 = -fi / (fip + d2 * fipp / 2.0 + d2 * d2 * fippp / 6.0);

                ecc_anomaly[i] = big_e + d3;
            }

            pending.retain(|&i| {
                residual(mean_anomaly[i], eccentricity[i], ecc_anomaly[i]).abs()
                    > self.config.tolerance
            });
            trace!(iterations, remaining = pending.len(), "kepler pass");
        }

        debug!(
            n = mean_anomaly.len(),
            iterations, "kepler equation converged"
        );
        Ok(ecc_anomaly)
    }

    /// Solve for many mean anomalies sharing one eccentricity
    pub fn solve_uniform(&self, mean_anomaly: &[f64], eccentricity: f64) -> KeplerResult<Vec<f64>> {
        let eccentricities = vec![eccentricity; mean_anomaly.len()];
        self.solve(mean_anomaly, &eccentricities)
    }

    /// Solve for a single mean anomaly
    pub fn solve_scalar(&self, mean_anomaly: f64, eccentricity: f64) -> KeplerResult<f64> {
        let solved = self.solve(&[mean_anomaly], &[eccentricity])?;
        Ok(solved[0])
    }
}

/// Sign with sign(0) = 0, so M = 0 starts exactly at E₀ = 0.
fn sign(x: f64) -> f64 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    }
}
