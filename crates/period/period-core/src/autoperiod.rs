//! Autoperiod: periodogram hints validated on the autocorrelation.
//!
//! Candidate periods come from periodogram bins whose power beats a
//! permutation-test threshold. A candidate is accepted when the ACF around it
//! forms a hill, and the ACF maximum inside that window is the reported period.

use period_spi::{PeriodDetector, PeriodError, PeriodHint, Result};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rayon::prelude::*;
use tracing::debug;

use crate::spectrum::{autocorrelation, forward_plan, is_constant, power_spectrum};

/// Shortest series that is analysed at all.
pub const MIN_LENGTH: usize = 8;

/// Minimum number of lags in an ACF search window.
const MIN_WINDOW: usize = 6;

/// Permutation-threshold period detector.
#[derive(Debug, Clone, PartialEq)]
pub struct Autoperiod {
    permutations: usize,
    confidence: f64,
    seed: u64,
}

impl Autoperiod {
    pub fn new() -> Self {
        Self {
            permutations: 100,
            confidence: 0.99,
            seed: 0,
        }
    }

    pub fn with_permutations(mut self, permutations: usize) -> Self {
        self.permutations = permutations;
        self
    }

    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = confidence;
        self
    }

    /// Base seed; permutation `i` shuffles with `seed + i`.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn permutations(&self) -> usize {
        self.permutations
    }

    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    fn validate(&self) -> Result<()> {
        if self.permutations == 0 {
            return Err(PeriodError::invalid("permutations", "must be at least 1"));
        }
        let c = self.confidence;
        if c.is_nan() || c <= 0.0 || c >= 1.0 {
            return Err(PeriodError::invalid("confidence", "must lie in (0, 1)"));
        }
        Ok(())
    }

    /// Power that a bin must exceed to count as a hint.
    pub fn threshold(&self, values: &[f64]) -> Result<f64> {
        self.validate()?;
        if !analysable(values)? {
            return Ok(f64::INFINITY);
        }
        Ok(self.permutation_threshold(values))
    }

    fn permutation_threshold(&self, values: &[f64]) -> f64 {
        let fft = forward_plan(values.len());
        let mut maxima: Vec<f64> = (0..self.permutations)
            .into_par_iter()
            .map(|i| {
                let mut rng = StdRng::seed_from_u64(self.seed.wrapping_add(i as u64));
                let mut shuffled = values.to_vec();
                shuffled.shuffle(&mut rng);
                power_spectrum(fft.as_ref(), &shuffled)
                    .into_iter()
                    .map(|(_, power)| power)
                    .fold(0.0, f64::max)
            })
            .collect();
        maxima.sort_by(f64::total_cmp);
        let rank = ((self.confidence * maxima.len() as f64) as usize).min(maxima.len() - 1);
        maxima[rank]
    }

    /// Significant periodogram bins, strongest first.
    pub fn hints(&self, values: &[f64]) -> Result<Vec<PeriodHint>> {
        self.validate()?;
        if !analysable(values)? {
            return Ok(Vec::new());
        }
        Ok(self.hints_unchecked(values))
    }

    fn hints_unchecked(&self, values: &[f64]) -> Vec<PeriodHint> {
        let n = values.len();
        let threshold = self.permutation_threshold(values);
        let fft = forward_plan(n);
        let half = n as f64 / 2.0;

        let mut hints: Vec<PeriodHint> = power_spectrum(fft.as_ref(), values)
            .into_iter()
            .filter(|&(_, power)| power > threshold)
            .map(|(bin, power)| PeriodHint::new(bin, n, power))
            .filter(|hint| hint.period > 2.0 && hint.period < half)
            .collect();
        hints.sort_by(|a, b| b.power.total_cmp(&a.power));
        debug!(n, threshold, hints = hints.len(), "periodogram hints");
        hints
    }
}

impl Default for Autoperiod {
    fn default() -> Self {
        Self::new()
    }
}

impl PeriodDetector for Autoperiod {
    fn detect(&self, values: &[f64]) -> Result<Option<usize>> {
        self.validate()?;
        if !analysable(values)? {
            return Ok(None);
        }

        let n = values.len();
        let hints = self.hints_unchecked(values);
        if hints.is_empty() {
            return Ok(None);
        }

        let max_lag = n / 2;
        let acf = autocorrelation(values, max_lag);
        for hint in &hints {
            let (lo, hi) = search_window(hint.bin, n);
            if let Some(period) = refine_on_hill(&acf, lo, hi) {
                debug!(bin = hint.bin, hint = hint.period, period, "validated hint");
                return Ok(Some(period));
            }
            debug!(bin = hint.bin, hint = hint.period, "rejected hint");
        }
        Ok(None)
    }
}

/// Period of `values`, or 1 when none is found.
pub fn dominant_period(values: &[f64]) -> Result<usize> {
    Autoperiod::default().period_or_default(values)
}

/// Rejects non-finite input; short or flat series are not analysable.
fn analysable(values: &[f64]) -> Result<bool> {
    if let Some(i) = values.iter().position(|v| !v.is_finite()) {
        return Err(PeriodError::InvalidInput(format!(
            "value at index {} is not finite",
            i
        )));
    }
    Ok(values.len() >= MIN_LENGTH && !is_constant(values))
}

/// ACF lag window for bin `k`: midpoints to the neighbouring bins' periods,
/// widened to [`MIN_WINDOW`] lags where the series allows.
fn search_window(k: usize, n: usize) -> (usize, usize) {
    let nf = n as f64;
    let period = nf / k as f64;
    let shorter = nf / (k + 1) as f64;
    let longer = if k > 1 { nf / (k - 1) as f64 } else { nf };
    let max_lag = n / 2;

    let mut lo = (((shorter + period) / 2.0).floor() as usize).max(1);
    let mut hi = (((period + longer) / 2.0).ceil() as usize).min(max_lag);
    lo = lo.min(hi);
    while hi + 1 < lo + MIN_WINDOW {
        let mut grew = false;
        if lo > 1 {
            lo -= 1;
            grew = true;
        }
        if hi < max_lag {
            hi += 1;
            grew = true;
        }
        if !grew {
            break;
        }
    }
    (lo, hi)
}

/// Least-squares line through `(xs, ys)`: slope and squared error.
fn fit_line(xs: &[f64], ys: &[f64]) -> (f64, f64) {
    let n = xs.len() as f64;
    let mx = xs.iter().sum::<f64>() / n;
    let my = ys.iter().sum::<f64>() / n;
    let sxx: f64 = xs.iter().map(|x| (x - mx).powi(2)).sum();
    let sxy: f64 = xs.iter().zip(ys).map(|(x, y)| (x - mx) * (y - my)).sum();
    let slope = if sxx > 0.0 { sxy / sxx } else { 0.0 };
    let sse = xs
        .iter()
        .zip(ys)
        .map(|(x, y)| (y - (my + slope * (x - mx))).powi(2))
        .sum();
    (slope, sse)
}

/// Split the ACF over `lo..=hi` into two lines; a rising then falling pair is a
/// hill and yields the lag of the ACF maximum.
fn refine_on_hill(acf: &[f64], lo: usize, hi: usize) -> Option<usize> {
    if hi >= acf.len() || hi < lo + 3 {
        return None;
    }
    let xs: Vec<f64> = (lo..=hi).map(|lag| lag as f64).collect();
    let ys = &acf[lo..=hi];

    let mut best: Option<(f64, f64, f64)> = None;
    for split in 2..=xs.len() - 2 {
        let (left_slope, left_err) = fit_line(&xs[..split], &ys[..split]);
        let (right_slope, right_err) = fit_line(&xs[split..], &ys[split..]);
        let err = left_err + right_err;
        if best.map_or(true, |(e, _, _)| err < e) {
            best = Some((err, left_slope, right_slope));
        }
    }

    let (_, left_slope, right_slope) = best?;
    if left_slope > 0.0 && right_slope < 0.0 {
        (lo..=hi).max_by(|&a, &b| acf[a].total_cmp(&acf[b]))
    } else {
        None
    }
}
