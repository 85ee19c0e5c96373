//! Typed physical quantities.
//!
//! Every quantity stores a single f64 in a fixed canonical unit (days, m/s,
//! Hz, Jupiter masses) and converts at the boundary.

pub mod frequency;
pub mod mass;
pub mod time;
pub mod velocity;

#[cfg(test)]
mod mass_test;

pub use frequency::{Frequency, MICROHERTZ};
pub use mass::{Mass, EARTH_MASS_G, JUPITER_MASS_G, SOLAR_MASS_G};
pub use time::{Time, HOURS_PER_DAY, SECONDS_PER_DAY};
pub use velocity::Velocity;
