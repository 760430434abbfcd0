//! NPZ persistence.
//!
//! Every dataset is written as `<root>/<group>/<name>.npz` holding two arrays:
//! `x.npy` (f32 features, C order) and `y.npy` (bool labels).

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use dataset_spi::{Dataset, DatasetError, DatasetSink, Group, Result};
use ndarray::{Array1, Array2};
use ndarray_npy::{NpzReader, NpzWriter};
use tracing::info;

const FEATURES: &str = "x.npy";
const LABELS: &str = "y.npy";

fn npz_err(e: impl std::fmt::Display) -> DatasetError {
    DatasetError::Archive(e.to_string())
}

/// Writes datasets as `.npz` files below a root directory.
#[derive(Debug, Clone)]
pub struct NpzStore {
    root: PathBuf,
}

impl NpzStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Target path for `name` in `group`.
    pub fn path_for(&self, group: Group, name: &str) -> PathBuf {
        self.root.join(group.dir_name()).join(format!("{}.npz", name))
    }
}

impl DatasetSink for NpzStore {
    fn save(&self, group: Group, dataset: &Dataset) -> Result<PathBuf> {
        let path = self.path_for(group, &dataset.name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let file = File::create(&path)?;
        let mut npz = NpzWriter::new(file);
        // standard layout so the arrays load as contiguous row-major data
        npz.add_array(FEATURES, &dataset.x.as_standard_layout())
            .map_err(npz_err)?;
        npz.add_array(LABELS, &dataset.y).map_err(npz_err)?;
        npz.finish().map_err(npz_err)?;

        info!(
            group = %group,
            name = %dataset.name,
            rows = dataset.n_rows(),
            features = dataset.n_features(),
            anomalies = dataset.n_anomalies(),
            path = %path.display(),
            "saved dataset"
        );
        Ok(path)
    }
}

/// Load a dataset written by [`NpzStore`]. The name is the file stem.
pub fn read_npz(path: &Path) -> Result<Dataset> {
    let file = File::open(path)?;
    let mut npz = NpzReader::new(file).map_err(npz_err)?;
    let x: Array2<f32> = npz.by_name(FEATURES).map_err(npz_err)?;
    let y: Array1<bool> = npz.by_name(LABELS).map_err(npz_err)?;
    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or_default();
    Dataset::new(name, x, y)
}
