//! Keplerian radial-velocity curves.

use nalgebra::DMatrix;

use crate::elements::{clamp_eccentricity, mean_anomaly, OrbitalElements};
use crate::error::KeplerResult;
use crate::solver::KeplerSolver;

/// Radial velocity of the star at each time (m/s).
///
/// RV = K·(cos(ν + ω) + e·cos ω), with the true anomaly ν obtained from the
/// eccentric anomaly. Circular orbits skip the solver: RV = K·cos(M + ω).
///
/// # Arguments
/// * `times` - Observation times (days, same reference as Tp)
/// * `elements` - Orbit to evaluate
/// * `solver` - Kepler equation solver
///
/// # Examples
/// ```
/// use kepler::{rv_curve, KeplerSolver, OrbitalElements};
/// use units::{Time, Velocity};
///
/// let orbit = OrbitalElements::new(
///     Time::from_days(10.0),
///     Velocity::from_meters_per_sec(1.0),
///     0.0,
///     0.0,
///     Time::zero(),
/// )
/// .unwrap();
///
/// let rv = rv_curve(&[0.0, 5.0], &orbit, &KeplerSolver::default()).unwrap();
/// assert!((rv[0] - 1.0).abs() < 1e-12);
/// assert!((rv[1] + 1.0).abs() < 1e-12);
/// ```
pub fn rv_curve(
    times: &[f64],
    elements: &OrbitalElements,
    solver: &KeplerSolver,
) -> KeplerResult<Vec<f64>> {
    elements.validate()?;

    let period = elements.period.to_days();
    let tp = elements.time_of_periastron.to_days();
    let k = elements.semi_amplitude.to_meters_per_sec();
    let omega = elements.argument_of_periastron;

    if elements.eccentricity == 0.0 {
        return Ok(times
            .iter()
            .map(|&t| k * (mean_anomaly(t, period, tp) + omega).cos())
            .collect());
    }

    let e = clamp_eccentricity(elements.eccentricity);
    let anomalies: Vec<f64> = times.iter().map(|&t| mean_anomaly(t, period, tp)).collect();
    let ecc_anomaly = solver.solve_uniform(&anomalies, e)?;

    let shape = ((1.0 + e) / (1.0 - e)).sqrt();
    let e_cos_omega = e * omega.cos();

    Ok(ecc_anomaly
        .iter()
        .map(|big_e| {
            let nu = 2.0 * (shape * (big_e / 2.0).tan()).atan();
            k * ((nu + omega).cos() + e_cos_omega)
        })
        .collect())
}

/// One RV curve per orbit, stacked as rows of an `orbits × times` matrix.
pub fn rv_curves(
    times: &[f64],
    orbits: &[OrbitalElements],
    solver: &KeplerSolver,
) -> KeplerResult<DMatrix<f64>> {
    let mut flat = Vec::with_capacity(orbits.len() * times.len());
    for orbit in orbits {
        flat.extend(rv_curve(times, orbit, solver)?);
    }
    Ok(DMatrix::from_row_slice(orbits.len(), times.len(), &flat))
}
