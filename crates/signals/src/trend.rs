//! Deterministic trends.

use std::fmt;
use units::Velocity;

use crate::component::SignalComponent;
use crate::error::SignalResult;
use crate::random_state::Draw;
use crate::samples::Samples;
use crate::sampling::SamplingContext;

/// A constant RV offset
#[derive(Debug, Clone, PartialEq)]
pub struct Offset {
    pub value: Velocity,
    sampling: Option<SamplingContext>,
}

impl Offset {
    pub fn new(value: Velocity) -> Self {
        Self {
            value,
            sampling: None,
        }
    }
}

impl SignalComponent for Offset {
    fn sample_at(&mut self, times: &[f64], _draw: Draw) -> SignalResult<Samples> {
        let value = self.value.to_meters_per_sec();
        Ok(Samples::from_values(vec![value; times.len()]))
    }

    fn sampling(&self) -> Option<&SamplingContext> {
        self.sampling.as_ref()
    }

    fn set_sampling(&mut self, sampling: SamplingContext) {
        self.sampling = Some(sampling);
    }
}

impl fmt::Display for Offset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Offset({:.2} m/s)", self.value.to_meters_per_sec())
    }
}

/// A linear RV drift, `slope · (t − t₀)` with t₀ the first requested time
#[derive(Debug, Clone, PartialEq)]
pub struct Slope {
    /// m/s per day
    pub slope: f64,
    sampling: Option<SamplingContext>,
}

impl Slope {
    pub fn new(slope: f64) -> Self {
        Self {
            slope,
            sampling: None,
        }
    }
}

impl SignalComponent for Slope {
    fn sample_at(&mut self, times: &[f64], _draw: Draw) -> SignalResult<Samples> {
        let Some(&t0) = times.first() else {
            return Ok(Samples::from_values(Vec::new()));
        };
        Ok(Samples::from_values(
            times.iter().map(|t| self.slope * (t - t0)).collect(),
        ))
    }

    fn sampling(&self) -> Option<&SamplingContext> {
        self.sampling.as_ref()
    }

    fn set_sampling(&mut self, sampling: SamplingContext) {
        self.sampling = Some(sampling);
    }
}

impl fmt::Display for Slope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Slope({:.2} m/s/day)", self.slope)
    }
}
