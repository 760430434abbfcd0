//! FFT-based periodogram and autocorrelation.

use std::sync::Arc;

use rustfft::num_complex::Complex;
use rustfft::{Fft, FftPlanner};

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// True when every value equals the first.
pub(crate) fn is_constant(values: &[f64]) -> bool {
    values.windows(2).all(|w| w[0] == w[1])
}

pub(crate) fn forward_plan(n: usize) -> Arc<dyn Fft<f64>> {
    FftPlanner::new().plan_fft_forward(n)
}

/// Power at bins `1..=n/2` using a prepared length-`n` plan.
pub(crate) fn power_spectrum(fft: &dyn Fft<f64>, values: &[f64]) -> Vec<(usize, f64)> {
    let n = values.len();
    let m = mean(values);
    let mut buffer: Vec<Complex<f64>> = values.iter().map(|&v| Complex::new(v - m, 0.0)).collect();
    fft.process(&mut buffer);
    (1..=n / 2)
        .map(|k| (k, buffer[k].norm_sqr() / n as f64))
        .collect()
}

/// Mean-removed periodogram as `(bin, power)` for `k = 1..=n/2`.
///
/// Bin `k` corresponds to a period of `n / k` samples.
pub fn periodogram(values: &[f64]) -> Vec<(usize, f64)> {
    if values.len() < 2 {
        return Vec::new();
    }
    let fft = forward_plan(values.len());
    power_spectrum(fft.as_ref(), values)
}

/// Autocorrelation for lags `0..=max_lag`, normalised so that lag 0 is 1.
///
/// Computed through a zero-padded FFT, so lags do not wrap around. `max_lag` is
/// capped at `n - 1`. A constant series correlates perfectly at every lag.
pub fn autocorrelation(values: &[f64], max_lag: usize) -> Vec<f64> {
    let n = values.len();
    if n == 0 {
        return Vec::new();
    }
    let max_lag = max_lag.min(n - 1);
    if is_constant(values) {
        return vec![1.0; max_lag + 1];
    }

    let size = (2 * n).next_power_of_two();
    let mut planner = FftPlanner::<f64>::new();
    let forward = planner.plan_fft_forward(size);
    let inverse = planner.plan_fft_inverse(size);

    let m = mean(values);
    let mut buffer = vec![Complex::new(0.0, 0.0); size];
    for (slot, &v) in buffer.iter_mut().zip(values) {
        *slot = Complex::new(v - m, 0.0);
    }
    forward.process(&mut buffer);
    for c in buffer.iter_mut() {
        *c = Complex::new(c.norm_sqr(), 0.0);
    }
    inverse.process(&mut buffer);

    let r0 = buffer[0].re;
    buffer[..=max_lag].iter().map(|c| c.re / r0).collect()
}
