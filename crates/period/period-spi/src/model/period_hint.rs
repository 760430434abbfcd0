//! Candidate period from the periodogram

use serde::{Deserialize, Serialize};

/// Periodogram bin whose power cleared the significance threshold.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PeriodHint {
    /// Frequency bin `k`
    pub bin: usize,
    /// Period in samples, `n / k`
    pub period: f64,
    /// Periodogram power at `k`
    pub power: f64,
}

impl PeriodHint {
    pub fn new(bin: usize, n: usize, power: f64) -> Self {
        Self {
            bin,
            period: n as f64 / bin as f64,
            power,
        }
    }
}
