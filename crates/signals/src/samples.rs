//! Sampled signal values.

use nalgebra::DMatrix;
use std::sync::Arc;

use crate::error::{SignalError, SignalResult};

/// One row per realization, one column per time.
///
/// Most components produce a single row; a planet swept over a parameter grid
/// produces one row per (P, K, e) combination.
#[derive(Debug, Clone, PartialEq)]
pub struct Samples(DMatrix<f64>);

impl Samples {
    pub fn from_values(values: Vec<f64>) -> Self {
        let n = values.len();
        Self(DMatrix::from_row_slice(1, n, &values))
    }

    pub fn from_matrix(matrix: DMatrix<f64>) -> Self {
        Self(matrix)
    }

    /// Number of rows
    pub fn n_realizations(&self) -> usize {
        self.0.nrows()
    }

    /// Number of times
    pub fn len(&self) -> usize {
        self.0.ncols()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn row(&self, i: usize) -> Option<Vec<f64>> {
        (i < self.n_realizations()).then(|| self.0.row(i).iter().copied().collect())
    }

    /// The values of a single-row result
    pub fn values(&self) -> SignalResult<Vec<f64>> {
        match self.n_realizations() {
            1 => Ok(self.0.row(0).iter().copied().collect()),
            n => Err(SignalError::config(format!(
                "expected a single realization, got {n} rows"
            ))),
        }
    }

    pub fn matrix(&self) -> &DMatrix<f64> {
        &self.0
    }

    pub fn into_matrix(self) -> DMatrix<f64> {
        self.0
    }

    /// Elementwise sum, broadcasting a single row against a multi-row grid.
    pub fn add(&self, other: &Samples) -> SignalResult<Samples> {
        let (a, b) = (&self.0, &other.0);
        if a.ncols() != b.ncols() {
            return Err(SignalError::config(format!(
                "cannot add samples of length {} and {}",
                a.ncols(),
                b.ncols()
            )));
        }
        let cols = a.ncols();
        let sum = match (a.nrows(), b.nrows()) {
            (ra, rb) if ra == rb => a + b,
            (1, rb) => DMatrix::from_fn(rb, cols, |i, j| a[(0, j)] + b[(i, j)]),
            (ra, 1) => DMatrix::from_fn(ra, cols, |i, j| a[(i, j)] + b[(0, j)]),
            (ra, rb) => {
                return Err(SignalError::config(format!(
                    "cannot broadcast {ra} realizations against {rb}"
                )))
            }
        };
        Ok(Samples(sum))
    }
}

/// Samples together with the times they were evaluated at
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSeries {
    pub times: Arc<[f64]>,
    pub samples: Samples,
}
