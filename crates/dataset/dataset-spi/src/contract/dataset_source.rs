//! Source and sink contracts.

use std::path::{Path, PathBuf};

use crate::contract::Fetcher;
use crate::error::Result;
use crate::model::{Dataset, Group};

/// A producer of one or more labelled datasets.
pub trait DatasetSource {
    /// Source name.
    fn name(&self) -> &str;

    /// Output group the datasets belong to.
    fn group(&self) -> Group;

    /// Fetch or generate the datasets.
    fn build(&self, fetcher: &dyn Fetcher) -> Result<Vec<Dataset>>;
}

/// A producer that materialises a directory tree rather than arrays.
pub trait ArchiveSource {
    /// Source name.
    fn name(&self) -> &str;

    /// Output group whose directory receives the files.
    fn group(&self) -> Group;

    /// Unpack into `dest`, returning the written file paths.
    fn unpack(&self, fetcher: &dyn Fetcher, dest: &Path) -> Result<Vec<PathBuf>>;
}

/// Persists datasets.
pub trait DatasetSink {
    /// Save `dataset` under `group`, returning the written path.
    fn save(&self, group: Group, dataset: &Dataset) -> Result<PathBuf>;
}
