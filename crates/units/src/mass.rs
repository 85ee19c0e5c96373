use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul};

/// Mass of the Sun in grams (1.98847 × 10³³ g)
pub const SOLAR_MASS_G: f64 = 1.98847e33;

/// Mass of the Earth in grams (5.972 × 10²⁷ g)
pub const EARTH_MASS_G: f64 = 5.972e27;

/// Mass of Jupiter in grams (1.898 × 10³⁰ g)
pub const JUPITER_MASS_G: f64 = 1.898e30;

/// A mass quantity using f64 precision.
///
/// Jupiter masses are the base unit, which is where RV-detected planet
/// minimum masses are usually quoted. Host stars are given in solar masses.
///
/// # Examples
///
/// ```rust
/// use units::Mass;
///
/// let jupiter = Mass::from_jupiter_masses(1.0);
/// let earths = jupiter.to_earth_masses();
/// assert!(earths > 317.0 && earths < 319.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Mass(f64); // Base unit: Jupiter masses

impl Mass {
    pub fn from_jupiter_masses(value: f64) -> Self {
        Self(value)
    }

    pub fn from_earth_masses(value: f64) -> Self {
        Self(value * EARTH_MASS_G / JUPITER_MASS_G)
    }

    pub fn from_solar_masses(value: f64) -> Self {
        Self(value * SOLAR_MASS_G / JUPITER_MASS_G)
    }

    pub fn to_jupiter_masses(&self) -> f64 {
        self.0
    }

    pub fn to_earth_masses(&self) -> f64 {
        self.0 * JUPITER_MASS_G / EARTH_MASS_G
    }

    pub fn to_solar_masses(&self) -> f64 {
        self.0 * JUPITER_MASS_G / SOLAR_MASS_G
    }
}

impl Add for Mass {
    type Output = Mass;

    fn add(self, rhs: Mass) -> Mass {
        Mass(self.0 + rhs.0)
    }
}

impl Mul<f64> for Mass {
    type Output = Mass;

    fn mul(self, rhs: f64) -> Mass {
        Mass(self.0 * rhs)
    }
}
