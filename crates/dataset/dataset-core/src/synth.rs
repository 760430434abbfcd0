//! Synthetic point clouds and uniform background noise.
//!
//! The generators mirror the usual toy-data shapes: Gaussian blobs, concentric
//! circles, interleaved moons, an S curve and a swiss roll. All take an explicit
//! RNG so runs are reproducible under a seed.

use std::f64::consts::PI;

use dataset_spi::{DatasetError, Result};
use ndarray::{Array1, Array2, Axis};
use rand::Rng;
use rand_distr::{Distribution, Normal};

/// `n` evenly spaced values from `start` to `stop`.
fn linspace(start: f64, stop: f64, n: usize, endpoint: bool) -> Vec<f64> {
    if n == 0 {
        return Vec::new();
    }
    let divisor = if endpoint { n.saturating_sub(1).max(1) } else { n } as f64;
    let step = (stop - start) / divisor;
    (0..n).map(|i| start + step * i as f64).collect()
}

fn gaussian(std_dev: f64) -> Result<Normal<f64>> {
    Normal::new(0.0, std_dev)
        .map_err(|e| DatasetError::invalid("noise", e.to_string()))
}

/// Add isotropic Gaussian noise in place.
fn jitter<R: Rng + ?Sized>(x: &mut Array2<f64>, noise: f64, rng: &mut R) -> Result<()> {
    if noise < 0.0 || !noise.is_finite() {
        return Err(DatasetError::invalid("noise", "must be non-negative"));
    }
    if noise == 0.0 {
        return Ok(());
    }
    let dist = gaussian(noise)?;
    x.mapv_inplace(|v| v + dist.sample(rng));
    Ok(())
}

/// Isotropic Gaussian blobs.
///
/// Each centre receives `n / k` points, the first `n % k` centres one more.
pub fn make_blobs<R: Rng + ?Sized>(
    n: usize,
    centers: &[[f64; 2]],
    stds: &[f64],
    rng: &mut R,
) -> Result<Array2<f64>> {
    if centers.is_empty() {
        return Err(DatasetError::invalid("centers", "at least one centre required"));
    }
    if centers.len() != stds.len() {
        return Err(DatasetError::ShapeMismatch {
            expected: centers.len(),
            got: stds.len(),
        });
    }

    let k = centers.len();
    let mut x = Array2::zeros((n, 2));
    let mut row = 0;
    for (i, (center, &std_dev)) in centers.iter().zip(stds).enumerate() {
        let count = n / k + usize::from(i < n % k);
        let dist = gaussian(std_dev)?;
        for _ in 0..count {
            x[[row, 0]] = center[0] + dist.sample(rng);
            x[[row, 1]] = center[1] + dist.sample(rng);
            row += 1;
        }
    }
    Ok(x)
}

/// A large circle containing a smaller one scaled by `factor`.
pub fn make_circles<R: Rng + ?Sized>(
    n: usize,
    noise: f64,
    factor: f64,
    rng: &mut R,
) -> Result<Array2<f64>> {
    if !(0.0..1.0).contains(&factor) {
        return Err(DatasetError::invalid("factor", "must be in [0, 1)"));
    }
    let n_out = n / 2;
    let n_in = n - n_out;

    let mut x = Array2::zeros((n, 2));
    let outer = linspace(0.0, 2.0 * PI, n_out, false);
    let inner = linspace(0.0, 2.0 * PI, n_in, false);
    for (i, t) in outer.iter().enumerate() {
        x[[i, 0]] = t.cos();
        x[[i, 1]] = t.sin();
    }
    for (i, t) in inner.iter().enumerate() {
        x[[n_out + i, 0]] = factor * t.cos();
        x[[n_out + i, 1]] = factor * t.sin();
    }
    jitter(&mut x, noise, rng)?;
    Ok(x)
}

/// Two interleaving half circles.
pub fn make_moons<R: Rng + ?Sized>(n: usize, noise: f64, rng: &mut R) -> Result<Array2<f64>> {
    let n_out = n / 2;
    let n_in = n - n_out;

    let mut x = Array2::zeros((n, 2));
    for (i, t) in linspace(0.0, PI, n_out, true).iter().enumerate() {
        x[[i, 0]] = t.cos();
        x[[i, 1]] = t.sin();
    }
    for (i, t) in linspace(0.0, PI, n_in, true).iter().enumerate() {
        x[[n_out + i, 0]] = 1.0 - t.cos();
        x[[n_out + i, 1]] = 1.0 - t.sin() - 0.5;
    }
    jitter(&mut x, noise, rng)?;
    Ok(x)
}

/// Three-dimensional S curve.
pub fn make_s_curve<R: Rng + ?Sized>(n: usize, noise: f64, rng: &mut R) -> Result<Array2<f64>> {
    let mut x = Array2::zeros((n, 3));
    for mut row in x.axis_iter_mut(Axis(0)) {
        let t = 3.0 * PI * (rng.gen::<f64>() - 0.5);
        row[0] = t.sin();
        row[1] = 2.0 * rng.gen::<f64>();
        row[2] = t.signum() * (t.cos() - 1.0);
    }
    jitter(&mut x, noise, rng)?;
    Ok(x)
}

/// Three-dimensional swiss roll.
pub fn make_swiss_roll<R: Rng + ?Sized>(
    n: usize,
    noise: f64,
    rng: &mut R,
) -> Result<Array2<f64>> {
    let mut x = Array2::zeros((n, 3));
    for mut row in x.axis_iter_mut(Axis(0)) {
        let t = 1.5 * PI * (1.0 + 2.0 * rng.gen::<f64>());
        row[0] = t * t.cos();
        row[1] = 21.0 * rng.gen::<f64>();
        row[2] = t * t.sin();
    }
    jitter(&mut x, noise, rng)?;
    Ok(x)
}

/// Uniform points in the bounding box of `x0`, scaled by `factor` about its centre.
pub fn make_noise<R: Rng + ?Sized>(
    x0: &Array2<f64>,
    n1: usize,
    factor: f64,
    rng: &mut R,
) -> Result<Array2<f64>> {
    let d = x0.ncols();
    if n1 == 0 {
        return Ok(Array2::zeros((0, d)));
    }
    if x0.nrows() == 0 {
        return Err(DatasetError::NoData);
    }

    let lower: Array1<f64> = x0.fold_axis(Axis(0), f64::INFINITY, |a, &b| a.min(b));
    let upper: Array1<f64> = x0.fold_axis(Axis(0), f64::NEG_INFINITY, |a, &b| a.max(b));
    let range = &upper - &lower;
    let offset = &lower + &(0.5 * &range) - &(0.5 * factor * &range);
    let extent = factor * &range;

    let mut noise = Array2::zeros((n1, d));
    for mut row in noise.axis_iter_mut(Axis(0)) {
        for j in 0..d {
            row[j] = rng.gen::<f64>() * extent[j] + offset[j];
        }
    }
    Ok(noise)
}

/// Narrow to the on-disk feature type.
pub fn to_f32(x: &Array2<f64>) -> Array2<f32> {
    x.mapv(|v| v as f32)
}
