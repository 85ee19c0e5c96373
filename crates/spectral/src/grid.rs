//! Uniform frequency grids.
//!
//! Synthesis needs a grid that spans from the longest period the data can
//! constrain (1/span) up to the Nyquist frequency of the densest sampling
//! (1/(2·min spacing)). The grid is built from the times so the Nyquist edge is
//! never undersampled.

use serde::{Deserialize, Serialize};
use tracing::debug;
use units::Frequency;

use crate::error::{SpectralError, SpectralResult};

/// Default oversampling of the natural resolution 1/span
pub const DEFAULT_SAMPLES_PER_PEAK: f64 = 5.0;

/// Grid construction knobs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrequencyGridConfig {
    /// Number of grid points per 1/span resolution element
    pub samples_per_peak: f64,
}

impl Default for FrequencyGridConfig {
    fn default() -> Self {
        Self {
            samples_per_peak: DEFAULT_SAMPLES_PER_PEAK,
        }
    }
}

/// An ascending, uniformly spaced, strictly positive frequency grid (Hz).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrequencyGrid {
    start: f64,
    step: f64,
    len: usize,
}

impl FrequencyGrid {
    /// Explicit grid: `start + i·step` for `i in 0..len`.
    pub fn new(start: Frequency, step: Frequency, len: usize) -> SpectralResult<Self> {
        let (start, step) = (start.to_hertz(), step.to_hertz());
        if !(start.is_finite() && start > 0.0) {
            return Err(SpectralError::InvalidGrid(format!(
                "first frequency must be positive, got {start} Hz"
            )));
        }
        if !(step.is_finite() && step > 0.0) {
            return Err(SpectralError::InvalidGrid(format!(
                "bin width must be positive, got {step} Hz"
            )));
        }
        if len == 0 {
            return Err(SpectralError::InvalidGrid("grid has no bins".into()));
        }
        Ok(Self { start, step, len })
    }

    /// Validate an explicit frequency array (Hz).
    pub fn from_frequencies(frequencies: &[f64]) -> SpectralResult<Self> {
        let start = *frequencies
            .first()
            .ok_or_else(|| SpectralError::InvalidGrid("grid has no bins".into()))?;
        if frequencies.len() == 1 {
            return Err(SpectralError::InvalidGrid(
                "bin width is undefined for a single frequency".into(),
            ));
        }
        let step = frequencies[1] - frequencies[0];
        let grid = Self::new(
            Frequency::from_hertz(start),
            Frequency::from_hertz(step),
            frequencies.len(),
        )?;

        let tolerance = 1e-6 * step;
        for (i, &f) in frequencies.iter().enumerate() {
            if (f - grid.frequency(i)).abs() > tolerance {
                return Err(SpectralError::InvalidGrid(format!(
                    "frequency {i} ({f} Hz) breaks the uniform spacing of {step} Hz"
                )));
            }
        }
        Ok(grid)
    }

    /// Grid adequate for synthesizing a series at `times` (days).
    ///
    /// Covers `1/span` to `1/(2·min spacing)` with step
    /// `1/(samples_per_peak·span)`, extended upward when needed so that the
    /// inverse transform (2 samples per bin) covers every requested time.
    pub fn for_times(times: &[f64], config: &FrequencyGridConfig) -> SpectralResult<Self> {
        if times.len() < 2 {
            return Err(SpectralError::DegenerateSeries(format!(
                "need at least two epochs, got {}",
                times.len()
            )));
        }
        if !(config.samples_per_peak.is_finite() && config.samples_per_peak > 0.0) {
            return Err(SpectralError::Configuration(format!(
                "samples_per_peak must be positive, got {}",
                config.samples_per_peak
            )));
        }

        let span = span(times)?;
        let min_spacing = min_spacing(times)?;

        let f_min = 1.0 / span;
        let f_max = 1.0 / (2.0 * min_spacing);
        let step = 1.0 / (config.samples_per_peak * span);

        let natural = if f_max > f_min {
            1 + ((f_max - f_min) / step).round() as usize
        } else {
            1
        };
        let required = times.len().div_ceil(2);
        let len = natural.max(required);

        debug!(
            n_times = times.len(),
            bins = len,
            f_min_per_day = f_min,
            f_max_per_day = f_max,
            "built frequency grid"
        );

        Self::new(
            Frequency::from_per_day(f_min),
            Frequency::from_per_day(step),
            len,
        )
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Bin width (Hz)
    pub fn bin_width(&self) -> f64 {
        self.step
    }

    /// Frequency of bin `i` (Hz)
    pub fn frequency(&self, i: usize) -> f64 {
        self.start + i as f64 * self.step
    }

    pub fn frequencies(&self) -> Vec<f64> {
        (0..self.len).map(|i| self.frequency(i)).collect()
    }

    pub fn min_frequency(&self) -> Frequency {
        Frequency::from_hertz(self.start)
    }

    pub fn max_frequency(&self) -> Frequency {
        Frequency::from_hertz(self.frequency(self.len - 1))
    }
}

/// max(t) − min(t) in days
pub fn span(times: &[f64]) -> SpectralResult<f64> {
    let (lo, hi) = times
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &t| {
            (lo.min(t), hi.max(t))
        });
    let span = hi - lo;
    if !(span.is_finite() && span > 0.0) {
        return Err(SpectralError::DegenerateSeries(format!(
            "time span must be positive and finite, got {span}"
        )));
    }
    Ok(span)
}

/// Smallest positive gap between sorted epochs, in days
pub fn min_spacing(times: &[f64]) -> SpectralResult<f64> {
    let mut sorted = times.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted
        .windows(2)
        .map(|w| w[1] - w[0])
        .filter(|&dt| dt > 0.0)
        .fold(None, |acc: Option<f64>, dt| Some(acc.map_or(dt, |a| a.min(dt))))
        .ok_or_else(|| SpectralError::DegenerateSeries("all epochs coincide".into()))
}
