//! Parametric power spectral densities for stellar variability.
//!
//! Granulation follows a Harvey-like profile whose normalization makes the
//! PSD integrate to σ² over [0, ∞) for any shape exponent. Oscillations are a
//! Lorentzian or Gaussian envelope around ν_max, expressed per µHz.

use serde::{Deserialize, Serialize};
use std::f64::consts::{LN_2, PI, TAU};
use std::fmt;
use units::{Frequency, Time, Velocity, MICROHERTZ};

use crate::error::{SpectralError, SpectralResult};
use crate::grid::FrequencyGrid;

/// Unit of the power axis of a PSD
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUnit {
    /// (m/s)² / Hz
    PerHertz,
    /// (m/s)² / µHz
    PerMicrohertz,
}

impl PowerUnit {
    /// Factor applied to a synthesized series whose PSD was integrated against
    /// Hz bin widths: sqrt(Hz / unit).
    pub fn amplitude_correction(&self) -> f64 {
        match self {
            PowerUnit::PerHertz => 1.0,
            PowerUnit::PerMicrohertz => (1.0 / MICROHERTZ).sqrt(),
        }
    }
}

/// A power spectral density evaluated at frequencies in Hz
pub trait PowerSpectrum {
    /// Power at frequency `nu` (Hz), in [`PowerSpectrum::power_unit`] units
    fn density(&self, nu: f64) -> f64;

    fn power_unit(&self) -> PowerUnit {
        PowerUnit::PerHertz
    }

    /// Power at every bin of `grid`
    fn evaluate(&self, grid: &FrequencyGrid) -> Vec<f64> {
        (0..grid.len())
            .map(|i| self.density(grid.frequency(i)))
            .collect()
    }
}

/// Shape of the granulation profile 1 / (1 + (ν/b)^α)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "model", rename_all = "snake_case")]
pub enum GranulationShape {
    /// Harvey (1985), α = 2
    Harvey,
    /// Kallinger et al. (2014), α = 4
    #[default]
    Kallinger,
    /// Arbitrary exponent α > 1
    Custom { exponent: f64 },
}

impl GranulationShape {
    /// Parse a model tag. `"custom"` requires an exponent.
    pub fn from_tag(tag: &str, exponent: Option<f64>) -> SpectralResult<Self> {
        let shape = match tag.to_ascii_lowercase().as_str() {
            "harvey" => GranulationShape::Harvey,
            "kallinger" => GranulationShape::Kallinger,
            "custom" => GranulationShape::Custom {
                exponent: exponent.ok_or_else(|| {
                    SpectralError::Configuration(
                        "a custom granulation shape needs an explicit exponent".into(),
                    )
                })?,
            },
            other => {
                return Err(SpectralError::Configuration(format!(
                    "unknown granulation model '{other}' (expected harvey, kallinger or custom)"
                )))
            }
        };
        shape.validate()?;
        Ok(shape)
    }

    pub fn exponent(&self) -> f64 {
        match self {
            GranulationShape::Harvey => 2.0,
            GranulationShape::Kallinger => 4.0,
            GranulationShape::Custom { exponent } => *exponent,
        }
    }

    /// ζ = α·sin(π/α)/π, so that ∫₀^∞ ζ/b / (1 + (ν/b)^α) dν = 1
    pub fn normalization(&self) -> f64 {
        let alpha = self.exponent();
        alpha * (PI / alpha).sin() / PI
    }

    fn validate(&self) -> SpectralResult<()> {
        let alpha = self.exponent();
        if !(alpha.is_finite() && alpha > 1.0) {
            return Err(SpectralError::Configuration(format!(
                "granulation exponent must be finite and > 1, got {alpha}"
            )));
        }
        Ok(())
    }
}

impl fmt::Display for GranulationShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GranulationShape::Harvey => write!(f, "harvey"),
            GranulationShape::Kallinger => write!(f, "kallinger"),
            GranulationShape::Custom { exponent } => write!(f, "custom(α={exponent})"),
        }
    }
}

/// Granulation PSD: P(ν) = ζ·σ²/b / (1 + (ν/b)^α), b = 1/(2πτ)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GranulationPsd {
    pub sigma: Velocity,
    pub tau: Time,
    pub shape: GranulationShape,
}

impl GranulationPsd {
    pub fn new(sigma: Velocity, tau: Time, shape: GranulationShape) -> SpectralResult<Self> {
        let s = sigma.to_meters_per_sec();
        if !(s.is_finite() && s > 0.0) {
            return Err(SpectralError::Configuration(format!(
                "granulation amplitude must be positive, got {s} m/s"
            )));
        }
        let t = tau.to_seconds();
        if !(t.is_finite() && t > 0.0) {
            return Err(SpectralError::Configuration(format!(
                "granulation timescale must be positive, got {t} s"
            )));
        }
        shape.validate()?;
        Ok(Self { sigma, tau, shape })
    }

    /// Characteristic frequency b = 1/(2πτ) in Hz
    pub fn characteristic_frequency(&self) -> Frequency {
        Frequency::from_hertz(1.0 / (TAU * self.tau.to_seconds()))
    }
}

impl PowerSpectrum for GranulationPsd {
    fn density(&self, nu: f64) -> f64 {
        let b = self.characteristic_frequency().to_hertz();
        let variance = self.sigma.to_meters_per_sec().powi(2);
        let alpha = self.shape.exponent();
        (self.shape.normalization() * variance / b) / (1.0 + (nu / b).powf(alpha))
    }
}

/// Envelope of the p-mode power excess
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OscillationProfile {
    #[default]
    Lorentzian,
    Gaussian,
}

impl OscillationProfile {
    pub fn from_tag(tag: &str) -> SpectralResult<Self> {
        match tag.to_ascii_lowercase().as_str() {
            "lorentzian" => Ok(OscillationProfile::Lorentzian),
            "gaussian" => Ok(OscillationProfile::Gaussian),
            other => Err(SpectralError::Configuration(format!(
                "oscillation profile should be lorentzian or gaussian, got '{other}'"
            ))),
        }
    }
}

/// Oscillation PSD around ν_max, power per µHz.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OscillationPsd {
    /// Peak power density, (m/s)²/µHz
    pub amplitude: f64,
    pub width: Frequency,
    pub numax: Frequency,
    pub profile: OscillationProfile,
}

impl OscillationPsd {
    pub fn new(
        amplitude: f64,
        width: Frequency,
        numax: Frequency,
        profile: OscillationProfile,
    ) -> SpectralResult<Self> {
        if !(amplitude.is_finite() && amplitude > 0.0) {
            return Err(SpectralError::Configuration(format!(
                "oscillation amplitude must be positive, got {amplitude}"
            )));
        }
        let w = width.to_hertz();
        if !(w.is_finite() && w > 0.0) {
            return Err(SpectralError::Configuration(format!(
                "oscillation width must be positive, got {w} Hz"
            )));
        }
        let n = numax.to_hertz();
        if !(n.is_finite() && n > 0.0) {
            return Err(SpectralError::Configuration(format!(
                "numax must be positive, got {n} Hz"
            )));
        }
        Ok(Self {
            amplitude,
            width,
            numax,
            profile,
        })
    }
}

impl PowerSpectrum for OscillationPsd {
    fn density(&self, nu: f64) -> f64 {
        let width = self.width.to_hertz();
        let offset = nu - self.numax.to_hertz();
        match self.profile {
            OscillationProfile::Lorentzian => {
                self.amplitude * width.powi(2) / (offset.powi(2) + width.powi(2))
            }
            OscillationProfile::Gaussian => {
                self.amplitude * (-4.0 * LN_2 * offset.powi(2) / width.powi(2)).exp()
            }
        }
    }

    fn power_unit(&self) -> PowerUnit {
        PowerUnit::PerMicrohertz
    }
}
