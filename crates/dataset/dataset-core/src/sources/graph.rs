//! Edge-stream archives shipped alongside the repository.

use std::fs;
use std::path::{Path, PathBuf};

use dataset_spi::{ArchiveSource, DatasetError, Fetcher, Group, Result};
use tracing::info;

use crate::archive::unpack_all;

/// Unpacks local zip archives (DARPA, Twitter) into the graph directory.
#[derive(Debug, Clone)]
pub struct GraphArchives {
    archives: Vec<PathBuf>,
}

impl GraphArchives {
    pub fn new(archives: Vec<PathBuf>) -> Self {
        Self { archives }
    }
}

impl ArchiveSource for GraphArchives {
    fn name(&self) -> &str {
        "graph"
    }

    fn group(&self) -> Group {
        Group::Graph
    }

    fn unpack(&self, _fetcher: &dyn Fetcher, dest: &Path) -> Result<Vec<PathBuf>> {
        fs::create_dir_all(dest)?;
        let mut written = Vec::new();
        for archive in &self.archives {
            let data = fs::read(archive).map_err(|e| {
                DatasetError::Archive(format!("{}: {}", archive.display(), e))
            })?;
            let files = unpack_all(&data, dest)?;
            info!(archive = %archive.display(), files = files.len(), "unpacked graph archive");
            written.extend(files);
        }
        Ok(written)
    }
}
