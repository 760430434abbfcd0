//! Numenta Anomaly Benchmark corpus and its label windows.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use dataset_spi::{ArchiveSource, DatasetError, Fetcher, Group, Result};
use serde::Deserialize;
use tracing::info;

use crate::archive::{extract_zip, strip_first_component};

/// Label file kept from the repository.
pub const WINDOWS_FILE: &str = "labels/combined_windows.json";

/// Anomaly windows keyed by `(class, name)`, each an inclusive `[start, end]`.
pub type Windows = HashMap<(String, String), Vec<[String; 2]>>;

/// Downloads the NAB repository archive and keeps the data and label windows.
#[derive(Debug, Clone)]
pub struct NabRepository {
    url: String,
}

impl NabRepository {
    pub fn new(url: &str) -> Self {
        Self {
            url: url.to_string(),
        }
    }
}

/// Where a repository entry lands below the NAB directory, if it is kept.
fn keep_entry(path: &Path) -> Option<PathBuf> {
    let relative = strip_first_component(path)?;
    if relative.starts_with("data") || relative == Path::new(WINDOWS_FILE) {
        Some(relative)
    } else {
        None
    }
}

impl ArchiveSource for NabRepository {
    fn name(&self) -> &str {
        "nab"
    }

    fn group(&self) -> Group {
        Group::Nab
    }

    fn unpack(&self, fetcher: &dyn Fetcher, dest: &Path) -> Result<Vec<PathBuf>> {
        match fs::remove_dir_all(dest) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
        let data = fetcher.fetch(&self.url)?;
        let files = extract_zip(&data, dest, keep_entry)?;
        if !dest.join(WINDOWS_FILE).exists() {
            return Err(DatasetError::Archive(format!(
                "{} missing from {}",
                WINDOWS_FILE, self.url
            )));
        }
        info!(dest = %dest.display(), files = files.len(), "unpacked NAB");
        Ok(files)
    }
}

/// Path of one series below the NAB directory.
pub fn series_path(root: &Path, class: &str, name: &str) -> PathBuf {
    root.join("data").join(class).join(format!("{name}.csv"))
}

/// Parse `combined_windows.json`.
pub fn load_windows(path: &Path) -> Result<Windows> {
    let text = fs::read_to_string(path)?;
    let raw: BTreeMap<String, Vec<[String; 2]>> =
        serde_json::from_str(&text).map_err(|e| DatasetError::ParseError(e.to_string()))?;

    let mut windows = HashMap::with_capacity(raw.len());
    for (id, spans) in raw {
        let (class, file) = id
            .split_once('/')
            .ok_or_else(|| DatasetError::ParseError(format!("bad series id: {id}")))?;
        let name = file.strip_suffix(".csv").unwrap_or(file);
        windows.insert((class.to_string(), name.to_string()), spans);
    }
    Ok(windows)
}

#[derive(Debug, Deserialize)]
struct Record {
    timestamp: String,
    value: f64,
}

/// Read a NAB series as `(timestamps, values)`.
pub fn load_series(path: &Path) -> Result<(Vec<String>, Vec<f64>)> {
    let mut reader = csv::Reader::from_path(path)
        .map_err(|e| DatasetError::ParseError(format!("{}: {}", path.display(), e)))?;
    let mut timestamps = Vec::new();
    let mut values = Vec::new();
    for record in reader.deserialize::<Record>() {
        let record = record.map_err(|e| DatasetError::ParseError(e.to_string()))?;
        timestamps.push(record.timestamp);
        values.push(record.value);
    }
    if values.is_empty() {
        return Err(DatasetError::NoData);
    }
    Ok((timestamps, values))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use zip::write::FileOptions;
    use zip::ZipWriter;

    struct Memory(Vec<u8>);

    impl Fetcher for Memory {
        fn name(&self) -> &str {
            "memory"
        }

        fn fetch(&self, _url: &str) -> Result<Vec<u8>> {
            Ok(self.0.clone())
        }
    }

    fn repo_zip(with_labels: bool) -> Vec<u8> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let mut entries = vec![
            ("NAB-master/README.md", "readme"),
            ("NAB-master/data/realTraffic/speed_1.csv", "timestamp,value\n2015-01-01 00:00:00,1.5\n"),
            ("NAB-master/labels/raw/raw_windows.json", "{}"),
        ];
        if with_labels {
            entries.push(("NAB-master/labels/combined_windows.json", "{}"));
        }
        for (name, body) in entries {
            writer.start_file(name, FileOptions::default()).unwrap();
            writer.write_all(body.as_bytes()).unwrap();
        }
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn test_keep_entry() {
        assert_eq!(
            keep_entry(Path::new("NAB-master/data/a/b.csv")),
            Some(PathBuf::from("data/a/b.csv"))
        );
        assert_eq!(
            keep_entry(Path::new("NAB-master/labels/combined_windows.json")),
            Some(PathBuf::from(WINDOWS_FILE))
        );
        assert_eq!(keep_entry(Path::new("NAB-master/labels/combined_labels.json")), None);
        assert_eq!(keep_entry(Path::new("NAB-master/scripts/run.py")), None);
        assert_eq!(keep_entry(Path::new("data")), None);
    }

    #[test]
    fn test_unpack_replaces_previous_tree() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("nab");
        fs::create_dir_all(&dest).unwrap();
        fs::write(dest.join("stale.txt"), "old").unwrap();

        let files = NabRepository::new("mem://nab")
            .unpack(&Memory(repo_zip(true)), &dest)
            .unwrap();

        assert_eq!(files.len(), 2);
        assert!(!dest.join("stale.txt").exists());
        assert!(dest.join("data/realTraffic/speed_1.csv").exists());
        assert!(dest.join(WINDOWS_FILE).exists());
        assert!(!dest.join("README.md").exists());
    }

    #[test]
    fn test_unpack_requires_windows() {
        let dir = tempfile::tempdir().unwrap();
        let result = NabRepository::new("mem://nab")
            .unpack(&Memory(repo_zip(false)), &dir.path().join("nab"));
        assert!(matches!(result, Err(DatasetError::Archive(_))));
    }

    #[test]
    fn test_load_windows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("combined_windows.json");
        fs::write(
            &path,
            r#"{
                "realTraffic/speed_1.csv": [["2015-01-01 00:00:00.000000", "2015-01-02 00:00:00.000000"]],
                "artificialNoAnomaly/art_flatline.csv": []
            }"#,
        )
        .unwrap();

        let windows = load_windows(&path).unwrap();
        assert_eq!(windows.len(), 2);
        let spans = &windows[&("realTraffic".to_string(), "speed_1".to_string())];
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0][0], "2015-01-01 00:00:00.000000");
        assert!(windows[&("artificialNoAnomaly".to_string(), "art_flatline".to_string())].is_empty());
    }

    #[test]
    fn test_load_windows_bad_id() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("w.json");
        fs::write(&path, r#"{"flat.csv": []}"#).unwrap();
        assert!(matches!(load_windows(&path), Err(DatasetError::ParseError(_))));
    }

    #[test]
    fn test_load_series() {
        let dir = tempfile::tempdir().unwrap();
        let path = series_path(dir.path(), "realTraffic", "speed_1");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(
            &path,
            "timestamp,value\n2015-01-01 00:00:00,1.5\n2015-01-01 00:05:00,2\n",
        )
        .unwrap();

        let (timestamps, values) = load_series(&path).unwrap();
        assert_eq!(timestamps, vec!["2015-01-01 00:00:00", "2015-01-01 00:05:00"]);
        assert_eq!(values, vec![1.5, 2.0]);
    }

    #[test]
    fn test_load_series_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.csv");
        fs::write(&path, "timestamp,value\n").unwrap();
        assert!(matches!(load_series(&path), Err(DatasetError::NoData)));
    }
}
