//! Group-by-group preparation run.

use std::path::PathBuf;

use dataset_api::PrepareConfig;
use dataset_spi::{ArchiveSource, DatasetSink, DatasetSource, Fetcher, Group, Result};
use serde::Serialize;
use tracing::{info, info_span};

use crate::fetch::HttpFetcher;
use crate::sources::graph::GraphArchives;
use crate::sources::nab::NabRepository;
use crate::sources::real::real_sources;
use crate::sources::toy::{ToySuite, TwoBlobs};
use crate::store::NpzStore;

/// One dataset written by a run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SavedDataset {
    pub group: Group,
    pub name: String,
    pub path: PathBuf,
    pub rows: usize,
    pub features: usize,
    pub anomalies: usize,
}

/// One directory populated from an archive.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnpackedDir {
    pub group: Group,
    pub source: String,
    pub path: PathBuf,
    pub files: usize,
}

/// Everything a run produced.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PrepareReport {
    pub datasets: Vec<SavedDataset>,
    pub directories: Vec<UnpackedDir>,
}

impl PrepareReport {
    pub fn is_empty(&self) -> bool {
        self.datasets.is_empty() && self.directories.is_empty()
    }
}

/// Runs the sources of each selected group and persists their output.
pub struct Preparer {
    config: PrepareConfig,
    fetcher: Box<dyn Fetcher>,
    sink: Box<dyn DatasetSink>,
}

impl Preparer {
    /// HTTP fetcher and NPZ store under the configured output root.
    pub fn new(config: PrepareConfig) -> Result<Self> {
        config.validate()?;
        let fetcher = HttpFetcher::new(&config.http)?;
        let sink = NpzStore::new(config.output_root.clone());
        Ok(Self::with_parts(config, Box::new(fetcher), Box::new(sink)))
    }

    pub fn with_parts(
        config: PrepareConfig,
        fetcher: Box<dyn Fetcher>,
        sink: Box<dyn DatasetSink>,
    ) -> Self {
        Self {
            config,
            fetcher,
            sink,
        }
    }

    pub fn config(&self) -> &PrepareConfig {
        &self.config
    }

    /// Run `groups` in canonical order; duplicates run once.
    pub fn run(&self, groups: &[Group]) -> Result<PrepareReport> {
        let mut report = PrepareReport::default();
        for group in Group::ALL.iter().copied().filter(|g| groups.contains(g)) {
            let span = info_span!("group", %group);
            let _enter = span.enter();
            info!(fetcher = self.fetcher.name(), "preparing");
            self.run_group(group, &mut report)?;
        }
        Ok(report)
    }

    fn run_group(&self, group: Group, report: &mut PrepareReport) -> Result<()> {
        let seed = self.config.seed;
        match group {
            Group::Real => {
                for source in real_sources(&self.config.sources) {
                    self.build_and_save(source.as_ref(), report)?;
                }
            }
            Group::Toy => {
                let suite = ToySuite::new(self.config.toy.clone(), seed);
                self.build_and_save(&suite, report)?;
            }
            Group::Examples => {
                let blobs = TwoBlobs::new(seed.map(|s| s.wrapping_add(1)));
                self.build_and_save(&blobs, report)?;
            }
            Group::Graph => {
                let archives = GraphArchives::new(self.config.graph.archives.clone());
                self.unpack(&archives, report)?;
            }
            Group::Nab => {
                let repo = NabRepository::new(&self.config.sources.nab_archive);
                self.unpack(&repo, report)?;
            }
        }
        Ok(())
    }

    fn build_and_save(&self, source: &dyn DatasetSource, report: &mut PrepareReport) -> Result<()> {
        let span = info_span!("source", name = source.name());
        let _enter = span.enter();
        let group = source.group();
        for dataset in source.build(self.fetcher.as_ref())? {
            let path = self.sink.save(group, &dataset)?;
            report.datasets.push(SavedDataset {
                group,
                name: dataset.name.clone(),
                path,
                rows: dataset.n_rows(),
                features: dataset.n_features(),
                anomalies: dataset.n_anomalies(),
            });
        }
        Ok(())
    }

    fn unpack(&self, source: &dyn ArchiveSource, report: &mut PrepareReport) -> Result<()> {
        let span = info_span!("source", name = source.name());
        let _enter = span.enter();
        let group = source.group();
        let dest = self.config.group_dir(group);
        let files = source.unpack(self.fetcher.as_ref(), &dest)?;
        report.directories.push(UnpackedDir {
            group,
            source: source.name().to_string(),
            path: dest,
            files: files.len(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dataset_api::PrepareConfigBuilder;
    use dataset_spi::{Dataset, DatasetError};
    use std::path::Path;
    use std::sync::{Arc, Mutex};

    struct Offline;

    impl Fetcher for Offline {
        fn name(&self) -> &str {
            "offline"
        }

        fn fetch(&self, url: &str) -> Result<Vec<u8>> {
            Err(DatasetError::RequestFailed(url.to_string()))
        }
    }

    #[derive(Clone, Default)]
    struct Recorder {
        saved: Arc<Mutex<Vec<(Group, String)>>>,
    }

    impl DatasetSink for Recorder {
        fn save(&self, group: Group, dataset: &Dataset) -> Result<PathBuf> {
            self.saved
                .lock()
                .unwrap()
                .push((group, dataset.name.clone()));
            Ok(Path::new("mem").join(&dataset.name))
        }
    }

    fn config(root: &Path) -> PrepareConfig {
        PrepareConfigBuilder::new()
            .output_root(root)
            .seed(3)
            .toy_sizes(50, 5)
            .build()
            .unwrap()
    }

    #[test]
    fn test_run_toy_and_examples_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let recorder = Recorder::default();
        let preparer = Preparer::with_parts(
            config(dir.path()),
            Box::new(Offline),
            Box::new(recorder.clone()),
        );

        let report = preparer
            .run(&[Group::Examples, Group::Toy, Group::Toy])
            .unwrap();

        let names: Vec<&str> = report.datasets.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["blobs", "circles", "moons", "s-curve", "swiss-roll", "two_blobs"]
        );
        assert_eq!(recorder.saved.lock().unwrap().len(), 6);
        assert_eq!(report.datasets[0].group, Group::Toy);
        assert_eq!(report.datasets[0].rows, 55);
        assert_eq!(report.datasets[0].anomalies, 5);
        assert_eq!(report.datasets[5].group, Group::Examples);
        assert!(report.directories.is_empty());
    }

    #[test]
    fn test_run_empty_selection() {
        let dir = tempfile::tempdir().unwrap();
        let preparer = Preparer::with_parts(
            config(dir.path()),
            Box::new(Offline),
            Box::new(NpzStore::new(dir.path())),
        );
        assert!(preparer.run(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_real_failure_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let preparer = Preparer::with_parts(
            config(dir.path()),
            Box::new(Offline),
            Box::new(NpzStore::new(dir.path())),
        );
        let result = preparer.run(&[Group::Real, Group::Toy]);
        assert!(matches!(result, Err(DatasetError::RequestFailed(_))));
        assert!(!dir.path().join("toy").exists());
    }

    #[test]
    fn test_report_serializes() {
        let report = PrepareReport {
            datasets: vec![SavedDataset {
                group: Group::Toy,
                name: "moons".into(),
                path: PathBuf::from("in/toy/moons.npz"),
                rows: 11,
                features: 2,
                anomalies: 1,
            }],
            directories: Vec::new(),
        };
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"group\":\"toy\""));
        assert!(json.contains("\"rows\":11"));
    }
}
