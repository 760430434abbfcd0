//! Labelled feature matrix.

use ndarray::{concatenate, Array1, Array2, Axis};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::{DatasetError, Result};

/// A feature matrix with one boolean anomaly label per row.
///
/// Rows of `x` and entries of `y` always have the same count.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub name: String,
    pub x: Array2<f32>,
    pub y: Array1<bool>,
}

impl Dataset {
    /// Create a dataset, checking row alignment.
    pub fn new(name: &str, x: Array2<f32>, y: Array1<bool>) -> Result<Self> {
        if x.nrows() != y.len() {
            return Err(DatasetError::ShapeMismatch {
                expected: x.nrows(),
                got: y.len(),
            });
        }
        Ok(Self {
            name: name.to_string(),
            x,
            y,
        })
    }

    /// Build from row vectors. All rows must share one width.
    pub fn from_rows(name: &str, rows: Vec<Vec<f32>>, labels: Vec<bool>) -> Result<Self> {
        let n = rows.len();
        let d = rows.first().map_or(0, Vec::len);
        let mut flat = Vec::with_capacity(n * d);
        for row in rows {
            if row.len() != d {
                return Err(DatasetError::ShapeMismatch {
                    expected: d,
                    got: row.len(),
                });
            }
            flat.extend(row);
        }
        let x = Array2::from_shape_vec((n, d), flat)
            .map_err(|e| DatasetError::ParseError(e.to_string()))?;
        Self::new(name, x, Array1::from_vec(labels))
    }

    /// Stack `inliers` over `outliers`, labelling the latter anomalous.
    pub fn combine(name: &str, inliers: &Array2<f32>, outliers: &Array2<f32>) -> Result<Self> {
        if inliers.ncols() != outliers.ncols() {
            return Err(DatasetError::ShapeMismatch {
                expected: inliers.ncols(),
                got: outliers.ncols(),
            });
        }
        let x = concatenate(Axis(0), &[inliers.view(), outliers.view()])
            .map_err(|e| DatasetError::ParseError(e.to_string()))?;
        let y = (0..inliers.nrows())
            .map(|_| false)
            .chain((0..outliers.nrows()).map(|_| true))
            .collect();
        Self::new(name, x, y)
    }

    /// Apply one random row permutation to features and labels.
    pub fn shuffled<R: Rng + ?Sized>(self, rng: &mut R) -> Self {
        let mut order: Vec<usize> = (0..self.n_rows()).collect();
        order.shuffle(rng);
        Self {
            x: self.x.select(Axis(0), &order),
            y: self.y.select(Axis(0), &order),
            name: self.name,
        }
    }

    pub fn n_rows(&self) -> usize {
        self.x.nrows()
    }

    pub fn n_features(&self) -> usize {
        self.x.ncols()
    }

    pub fn n_anomalies(&self) -> usize {
        self.y.iter().filter(|&&v| v).count()
    }

    /// Fraction of rows labelled anomalous.
    pub fn contamination(&self) -> f64 {
        if self.y.is_empty() {
            return 0.0;
        }
        self.n_anomalies() as f64 / self.y.len() as f64
    }
}
