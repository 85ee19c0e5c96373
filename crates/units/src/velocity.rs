use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Neg, Sub};

const CM_PER_METER: f64 = 100.0;
const METERS_PER_KM: f64 = 1_000.0;

/// A velocity quantity. Base unit: m/s, the natural scale of stellar RVs.
///
/// # Examples
///
/// ```rust
/// use units::Velocity;
///
/// let k = Velocity::from_km_per_sec(0.0125);
/// assert!((k.to_meters_per_sec() - 12.5).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Velocity(f64); // Base unit: m/s

impl Velocity {
    pub fn zero() -> Self {
        Self(0.0)
    }

    pub fn from_meters_per_sec(value: f64) -> Self {
        Self(value)
    }

    pub fn from_km_per_sec(value: f64) -> Self {
        Self(value * METERS_PER_KM)
    }

    pub fn from_cm_per_sec(value: f64) -> Self {
        Self(value / CM_PER_METER)
    }

    pub fn to_meters_per_sec(&self) -> f64 {
        self.0
    }

    pub fn to_km_per_sec(&self) -> f64 {
        self.0 / METERS_PER_KM
    }

    pub fn to_cm_per_sec(&self) -> f64 {
        self.0 * CM_PER_METER
    }

    pub fn is_finite(&self) -> bool {
        self.0.is_finite()
    }
}

impl Add for Velocity {
    type Output = Velocity;

    fn add(self, rhs: Velocity) -> Velocity {
        Velocity(self.0 + rhs.0)
    }
}

impl Sub for Velocity {
    type Output = Velocity;

    fn sub(self, rhs: Velocity) -> Velocity {
        Velocity(self.0 - rhs.0)
    }
}

impl Neg for Velocity {
    type Output = Velocity;

    fn neg(self) -> Velocity {
        Velocity(-self.0)
    }
}

impl Mul<f64> for Velocity {
    type Output = Velocity;

    fn mul(self, rhs: f64) -> Velocity {
        Velocity(self.0 * rhs)
    }
}

impl Div<f64> for Velocity {
    type Output = Velocity;

    fn div(self, rhs: f64) -> Velocity {
        Velocity(self.0 / rhs)
    }
}
