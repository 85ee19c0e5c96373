//! Observation epochs shared by the components of a signal.

use std::path::Path;
use std::sync::Arc;

use crate::error::{SignalError, SignalResult};
use crate::rdb::read_rv_file;

/// An immutable set of observation times in days.
///
/// Cloning is cheap: the times live behind an `Arc`, so one context can be
/// attached to every node of a signal tree.
///
/// # Examples
///
/// ```
/// use signals::SamplingContext;
///
/// let sampling = SamplingContext::uniform(0.0, 30.0, 31).unwrap();
/// assert_eq!(sampling.nobs(), 31);
/// assert!((sampling.duration() - 30.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SamplingContext {
    times: Arc<[f64]>,
}

impl SamplingContext {
    pub fn new(times: Vec<f64>) -> SignalResult<Self> {
        if times.is_empty() {
            return Err(SignalError::config("sampling needs at least one epoch"));
        }
        if times.iter().any(|t| !t.is_finite()) {
            return Err(SignalError::config("sampling epochs must be finite"));
        }
        Ok(Self {
            times: times.into(),
        })
    }

    /// `count` evenly spaced epochs from `start` to `end` inclusive
    pub fn uniform(start: f64, end: f64, count: usize) -> SignalResult<Self> {
        if count < 2 || !(end > start) {
            return Err(SignalError::config(format!(
                "uniform sampling needs end > start and at least two epochs, \
                 got [{start}, {end}] with {count}"
            )));
        }
        let step = (end - start) / (count - 1) as f64;
        Self::new((0..count).map(|i| start + i as f64 * step).collect())
    }

    /// Epochs read from the first column of an RV file
    pub fn from_file(path: impl AsRef<Path>) -> SignalResult<Self> {
        let data = read_rv_file(path)?;
        Self::new(data.times)
    }

    pub fn times(&self) -> &[f64] {
        &self.times
    }

    pub fn shared(&self) -> Arc<[f64]> {
        Arc::clone(&self.times)
    }

    pub fn nobs(&self) -> usize {
        self.times.len()
    }

    /// max(t) − min(t)
    pub fn duration(&self) -> f64 {
        let (lo, hi) = self.bounds();
        hi - lo
    }

    /// Smallest positive gap between epochs, if any two differ
    pub fn min_spacing(&self) -> Option<f64> {
        spectral::min_spacing(&self.times).ok()
    }

    /// A dense uniform grid over the same span with at least
    /// `points_per_period` points per `min_period`.
    pub fn oversampled(&self, min_period: f64, points_per_period: usize) -> SignalResult<Self> {
        if !(min_period.is_finite() && min_period > 0.0) {
            return Err(SignalError::config(format!(
                "oversampling period must be positive, got {min_period}"
            )));
        }
        let (lo, hi) = self.bounds();
        let per_span = (points_per_period as f64 * (hi - lo) / min_period).ceil() as usize;
        Self::uniform(lo, hi, per_span.max(self.nobs()))
    }

    fn bounds(&self) -> (f64, f64) {
        self.times
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &t| {
                (lo.min(t), hi.max(t))
            })
    }
}
