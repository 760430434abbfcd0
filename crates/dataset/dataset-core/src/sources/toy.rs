//! Synthetic toy geometries with uniform background noise.

use dataset_api::ToyConfig;
use dataset_spi::{Dataset, DatasetSource, Fetcher, Group, Result};
use ndarray::Array2;
use rand::Rng;
use tracing::debug;

use super::make_rng;
use crate::synth::{
    make_blobs, make_circles, make_moons, make_noise, make_s_curve, make_swiss_roll, to_f32,
};

/// Inlier shapes of the toy group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToyShape {
    Blobs,
    Circles,
    Moons,
    SCurve,
    SwissRoll,
}

impl ToyShape {
    pub const ALL: [ToyShape; 5] = [
        ToyShape::Blobs,
        ToyShape::Circles,
        ToyShape::Moons,
        ToyShape::SCurve,
        ToyShape::SwissRoll,
    ];

    /// Output file stem.
    pub fn name(&self) -> &'static str {
        match self {
            ToyShape::Blobs => "blobs",
            ToyShape::Circles => "circles",
            ToyShape::Moons => "moons",
            ToyShape::SCurve => "s-curve",
            ToyShape::SwissRoll => "swiss-roll",
        }
    }

    /// Sample `n` inliers.
    pub fn sample<R: Rng + ?Sized>(&self, n: usize, rng: &mut R) -> Result<Array2<f64>> {
        match self {
            ToyShape::Blobs => make_blobs(n, &[[-3.0, -13.0], [3.0, 3.0]], &[0.5, 1.5], rng),
            ToyShape::Circles => make_circles(n, 0.02, 0.5, rng),
            ToyShape::Moons => make_moons(n, 0.02, rng),
            ToyShape::SCurve => make_s_curve(n, 0.05, rng),
            ToyShape::SwissRoll => make_swiss_roll(n, 0.05, rng),
        }
    }
}

/// Every toy shape with `n_outliers` noise points, shuffled.
#[derive(Debug, Clone)]
pub struct ToySuite {
    config: ToyConfig,
    seed: Option<u64>,
}

impl ToySuite {
    pub fn new(config: ToyConfig, seed: Option<u64>) -> Self {
        Self { config, seed }
    }

    /// Build one shape's dataset.
    pub fn build_shape<R: Rng + ?Sized>(&self, shape: ToyShape, rng: &mut R) -> Result<Dataset> {
        let inliers = shape.sample(self.config.n_inliers, rng)?;
        let outliers = make_noise(
            &inliers,
            self.config.n_outliers,
            self.config.noise_factor,
            rng,
        )?;
        debug!(
            shape = shape.name(),
            inliers = inliers.nrows(),
            outliers = outliers.nrows(),
            "generated toy data"
        );
        let ds = Dataset::combine(shape.name(), &to_f32(&inliers), &to_f32(&outliers))?;
        Ok(ds.shuffled(rng))
    }
}

impl DatasetSource for ToySuite {
    fn name(&self) -> &str {
        "toy"
    }

    fn group(&self) -> Group {
        Group::Toy
    }

    fn build(&self, _fetcher: &dyn Fetcher) -> Result<Vec<Dataset>> {
        let mut rng = make_rng(self.seed);
        ToyShape::ALL
            .iter()
            .map(|&shape| self.build_shape(shape, &mut rng))
            .collect()
    }
}

/// Two dense blobs with a sparse pair of outlier blobs between them.
#[derive(Debug, Clone)]
pub struct TwoBlobs {
    pub n_inliers: usize,
    pub n_outliers: usize,
    seed: Option<u64>,
}

impl TwoBlobs {
    pub fn new(seed: Option<u64>) -> Self {
        Self {
            n_inliers: 10_000,
            n_outliers: 50,
            seed,
        }
    }
}

impl DatasetSource for TwoBlobs {
    fn name(&self) -> &str {
        "two_blobs"
    }

    fn group(&self) -> Group {
        Group::Examples
    }

    fn build(&self, _fetcher: &dyn Fetcher) -> Result<Vec<Dataset>> {
        let mut rng = make_rng(self.seed);
        let inliers = make_blobs(self.n_inliers, &[[0.0, 10.0], [10.0, 0.0]], &[1.0, 1.0], &mut rng)?;
        let outliers = make_blobs(self.n_outliers, &[[0.0, 0.0], [10.0, 10.0]], &[1.0, 1.0], &mut rng)?;
        let ds = Dataset::combine(self.name(), &to_f32(&inliers), &to_f32(&outliers))?;
        Ok(vec![ds.shuffled(&mut rng)])
    }
}
