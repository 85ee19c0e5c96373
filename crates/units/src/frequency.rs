use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

use crate::time::SECONDS_PER_DAY;

/// Hz per µHz
pub const MICROHERTZ: f64 = 1e-6;

/// A frequency quantity. Base unit: Hz.
///
/// Spectral models are written in Hz or µHz while observation times are in
/// days, so cycles per day is the other common entry point.
///
/// # Examples
///
/// ```rust
/// use units::Frequency;
///
/// let numax = Frequency::from_microhertz(3000.0);
/// assert!((numax.to_hertz() - 3.0e-3).abs() < 1e-15);
///
/// let daily = Frequency::from_per_day(1.0);
/// assert!((daily.to_hertz() - 1.0 / 86_400.0).abs() < 1e-18);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Frequency(f64); // Base unit: Hz

impl Frequency {
    pub fn from_hertz(value: f64) -> Self {
        Self(value)
    }

    pub fn from_microhertz(value: f64) -> Self {
        Self(value * MICROHERTZ)
    }

    /// Creates a frequency from cycles per day.
    pub fn from_per_day(value: f64) -> Self {
        Self(value / SECONDS_PER_DAY)
    }

    pub fn to_hertz(&self) -> f64 {
        self.0
    }

    pub fn to_microhertz(&self) -> f64 {
        self.0 / MICROHERTZ
    }

    pub fn to_per_day(&self) -> f64 {
        self.0 * SECONDS_PER_DAY
    }
}

impl Add for Frequency {
    type Output = Frequency;

    fn add(self, rhs: Frequency) -> Frequency {
        Frequency(self.0 + rhs.0)
    }
}

impl Sub for Frequency {
    type Output = Frequency;

    fn sub(self, rhs: Frequency) -> Frequency {
        Frequency(self.0 - rhs.0)
    }
}

impl Mul<f64> for Frequency {
    type Output = Frequency;

    fn mul(self, rhs: f64) -> Frequency {
        Frequency(self.0 * rhs)
    }
}

impl Div<f64> for Frequency {
    type Output = Frequency;

    fn div(self, rhs: f64) -> Frequency {
        Frequency(self.0 / rhs)
    }
}
