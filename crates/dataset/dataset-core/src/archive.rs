//! Zip archive extraction.

use std::fs::{self, File};
use std::io::{self, Cursor};
use std::path::{Component, Path, PathBuf};

use dataset_spi::{DatasetError, Result};
use tracing::debug;
use zip::ZipArchive;

fn archive_err(e: impl std::fmt::Display) -> DatasetError {
    DatasetError::Archive(e.to_string())
}

/// True when `path` stays below the directory it is joined onto.
fn is_contained(path: &Path) -> bool {
    !path.as_os_str().is_empty() && path.components().all(|c| matches!(c, Component::Normal(_)))
}

/// Drop the leading directory, as in `NAB-master/data/x.csv` -> `data/x.csv`.
pub fn strip_first_component(path: &Path) -> Option<PathBuf> {
    let mut components = path.components();
    components.next()?;
    let rest = components.as_path();
    if rest.as_os_str().is_empty() {
        None
    } else {
        Some(rest.to_path_buf())
    }
}

/// Extract selected entries of a zip archive below `dest`.
///
/// `map` receives each file entry's path and returns where it goes relative to
/// `dest`, or `None` to skip it. Returns the written file paths.
pub fn extract_zip<F>(data: &[u8], dest: &Path, map: F) -> Result<Vec<PathBuf>>
where
    F: Fn(&Path) -> Option<PathBuf>,
{
    let mut archive = ZipArchive::new(Cursor::new(data)).map_err(archive_err)?;
    let mut written = Vec::new();

    for i in 0..archive.len() {
        let mut entry = archive.by_index(i).map_err(archive_err)?;
        if entry.is_dir() {
            continue;
        }
        let name = entry
            .enclosed_name()
            .map(Path::to_path_buf)
            .ok_or_else(|| archive_err(format!("unsafe entry name: {}", entry.name())))?;
        let Some(relative) = map(&name) else {
            continue;
        };
        if !is_contained(&relative) {
            return Err(archive_err(format!(
                "entry escapes destination: {}",
                relative.display()
            )));
        }

        let target = dest.join(&relative);
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut out = File::create(&target)?;
        io::copy(&mut entry, &mut out)?;
        written.push(target);
    }

    debug!(dest = %dest.display(), files = written.len(), "extracted archive");
    Ok(written)
}

/// Extract every file entry of a zip archive below `dest`.
pub fn unpack_all(data: &[u8], dest: &Path) -> Result<Vec<PathBuf>> {
    extract_zip(data, dest, |p| Some(p.to_path_buf()))
}
