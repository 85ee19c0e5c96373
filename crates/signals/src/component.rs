//! The capability shared by every signal generator.

use std::fmt;

use crate::composite::CompositeSignal;
use crate::error::{SignalError, SignalResult};
use crate::random_state::Draw;
use crate::samples::{Samples, TimeSeries};
use crate::sampling::SamplingContext;

/// A generator of RV values at given times.
///
/// Components are combined with `+` into a [`CompositeSignal`]. Each one
/// either receives explicit times or falls back to an attached
/// [`SamplingContext`].
///
/// # Examples
///
/// ```
/// use signals::{Offset, SignalComponent, Slope};
/// use units::Velocity;
///
/// let mut signal = Offset::new(Velocity::from_meters_per_sec(2.0)) + Slope::new(0.5);
/// let values = signal.sample(&[10.0, 12.0]).unwrap().values().unwrap();
/// assert_eq!(values, vec![2.0, 3.0]);
/// ```
pub trait SignalComponent: fmt::Display + Send {
    /// Evaluate at `times` (days).
    ///
    /// Stochastic components rewind their generator first under
    /// [`Draw::Replay`] and keep drawing under [`Draw::Advance`].
    fn sample_at(&mut self, times: &[f64], draw: Draw) -> SignalResult<Samples>;

    fn sampling(&self) -> Option<&SamplingContext>;

    fn set_sampling(&mut self, sampling: SamplingContext);

    /// Short label for legends
    fn condensed(&self) -> String {
        self.to_string()
    }

    fn as_composite(&self) -> Option<&CompositeSignal> {
        None
    }

    /// Shortest orbital period (days) among the planets in this signal
    fn shortest_period(&self) -> Option<f64> {
        None
    }

    /// Reproducible evaluation at `times`
    fn sample(&mut self, times: &[f64]) -> SignalResult<Samples> {
        self.sample_at(times, Draw::Replay)
    }

    /// Evaluate at the attached sampling context.
    fn sample_attached(&mut self, draw: Draw) -> SignalResult<TimeSeries> {
        let sampling = self.sampling().cloned().ok_or_else(|| {
            SignalError::MissingInput(format!(
                "{}: provide times or attach a sampling context",
                self.condensed()
            ))
        })?;
        let samples = self.sample_at(sampling.times(), draw)?;
        Ok(TimeSeries {
            times: sampling.shared(),
            samples,
        })
    }

    /// Evaluate at `times` when given, otherwise at the attached context
    fn sample_or_attached(&mut self, times: Option<&[f64]>, draw: Draw) -> SignalResult<Samples> {
        match times {
            Some(times) => self.sample_at(times, draw),
            None => self.sample_attached(draw).map(|series| series.samples),
        }
    }
}
