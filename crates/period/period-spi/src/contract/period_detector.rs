//! Trait for period detection

use crate::error::Result;

/// Estimates the dominant period of an evenly sampled series
pub trait PeriodDetector: Send + Sync {
    /// Dominant period in samples, or `None` when the series shows none
    fn detect(&self, values: &[f64]) -> Result<Option<usize>>;

    /// Detected period, falling back to 1 for aperiodic series
    fn period_or_default(&self, values: &[f64]) -> Result<usize> {
        Ok(self.detect(values)?.unwrap_or(1))
    }
}
