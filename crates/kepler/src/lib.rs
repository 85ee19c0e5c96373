//! Keplerian orbits for radial-velocity synthesis.
//!
//! - [`KeplerSolver`]: Newton-Raphson solver for Kepler's equation with a hard
//!   iteration cap
//! - [`OrbitalElements`] / [`OrbitSpec`]: canonical elements and the phase
//!   conventions that reduce to them
//! - [`rv_curve`] / [`rv_curves`]: stellar reflex velocity for one orbit or a
//!   [`ParameterGrid`] of orbits

pub mod elements;
pub mod error;
pub mod grid;
pub mod rv;
pub mod solver;


pub use elements::{
    mean_anomaly, true_to_mean_anomaly, OrbitGeometry, OrbitSpec, OrbitalElements, Phase,
    DEFAULT_PERIASTRON_EPOCH, DEFAULT_REFERENCE_EPOCH, MAX_ECCENTRICITY,
};
pub use error::{KeplerError, KeplerResult};
pub use grid::ParameterGrid;
pub use rv::{rv_curve, rv_curves};
pub use solver::{KeplerSolver, SolverConfig, CONVERGENCE_TOLERANCE, DEFAULT_MAX_ITERATIONS};
