//! Preparation configuration types.

use std::path::{Path, PathBuf};

use dataset_spi::{DatasetError, Group, Result};
use serde::{Deserialize, Serialize};

/// Top-level configuration for a preparation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrepareConfig {
    /// Directory that receives one sub-directory per group
    #[serde(default = "default_output_root")]
    pub output_root: PathBuf,
    /// Seed for synthetic data and shuffling; entropy when absent
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub toy: ToyConfig,
    #[serde(default)]
    pub sources: SourceUrls,
    #[serde(default)]
    pub graph: GraphConfig,
}

/// HTTP client settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpConfig {
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Sizes of the synthetic toy datasets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToyConfig {
    #[serde(default = "default_n_inliers")]
    pub n_inliers: usize,
    #[serde(default = "default_n_outliers")]
    pub n_outliers: usize,
    /// Side length of the noise box relative to the data's bounding box
    #[serde(default = "default_noise_factor")]
    pub noise_factor: f64,
}

/// Remote locations of the real-world corpora.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceUrls {
    #[serde(default = "default_kddcup")]
    pub kddcup: String,
    #[serde(default = "default_covtype")]
    pub covtype: String,
    #[serde(default = "default_sat_trn")]
    pub sat_trn: String,
    #[serde(default = "default_sat_tst")]
    pub sat_tst: String,
    #[serde(default = "default_shuttle_trn")]
    pub shuttle_trn: String,
    #[serde(default = "default_shuttle_tst")]
    pub shuttle_tst: String,
    #[serde(default = "default_nab_archive")]
    pub nab_archive: String,
}

/// Local archives unpacked into the graph directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphConfig {
    #[serde(default = "default_graph_archives")]
    pub archives: Vec<PathBuf>,
}

// Default value functions
fn default_output_root() -> PathBuf { PathBuf::from("in") }
fn default_user_agent() -> String { format!("benchprep/{}", env!("CARGO_PKG_VERSION")) }
fn default_timeout_secs() -> u64 { 600 }
fn default_n_inliers() -> usize { 10_000 }
fn default_n_outliers() -> usize { 1_000 }
fn default_noise_factor() -> f64 { 1.5 }
fn default_kddcup() -> String {
    "http://kdd.ics.uci.edu/databases/kddcup99/kddcup.data.gz".to_string()
}
fn default_covtype() -> String {
    "https://archive.ics.uci.edu/ml/machine-learning-databases/covtype/covtype.data.gz".to_string()
}
fn default_sat_trn() -> String {
    "https://archive.ics.uci.edu/ml/machine-learning-databases/statlog/satimage/sat.trn".to_string()
}
fn default_sat_tst() -> String {
    "https://archive.ics.uci.edu/ml/machine-learning-databases/statlog/satimage/sat.tst".to_string()
}
fn default_shuttle_trn() -> String {
    "https://archive.ics.uci.edu/ml/machine-learning-databases/statlog/shuttle/shuttle.trn.Z"
        .to_string()
}
fn default_shuttle_tst() -> String {
    "https://archive.ics.uci.edu/ml/machine-learning-databases/statlog/shuttle/shuttle.tst"
        .to_string()
}
fn default_nab_archive() -> String {
    "https://github.com/numenta/NAB/archive/refs/heads/master.zip".to_string()
}
fn default_graph_archives() -> Vec<PathBuf> {
    vec![
        PathBuf::from("gen/data/darpa.csv.zip"),
        PathBuf::from("gen/data/twitter.zip"),
    ]
}

impl Default for PrepareConfig {
    fn default() -> Self {
        Self {
            output_root: default_output_root(),
            seed: None,
            http: HttpConfig::default(),
            toy: ToyConfig::default(),
            sources: SourceUrls::default(),
            graph: GraphConfig::default(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Default for ToyConfig {
    fn default() -> Self {
        Self {
            n_inliers: default_n_inliers(),
            n_outliers: default_n_outliers(),
            noise_factor: default_noise_factor(),
        }
    }
}

impl Default for SourceUrls {
    fn default() -> Self {
        Self {
            kddcup: default_kddcup(),
            covtype: default_covtype(),
            sat_trn: default_sat_trn(),
            sat_tst: default_sat_tst(),
            shuttle_trn: default_shuttle_trn(),
            shuttle_tst: default_shuttle_tst(),
            nab_archive: default_nab_archive(),
        }
    }
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            archives: default_graph_archives(),
        }
    }
}

impl PrepareConfig {
    /// Parse a TOML document.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| DatasetError::ConfigError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            DatasetError::ConfigError(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml(&content)
    }

    /// Load `path` when given, otherwise use defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    /// Check value domains.
    pub fn validate(&self) -> Result<()> {
        if self.toy.n_inliers == 0 {
            return Err(DatasetError::invalid("toy.n_inliers", "must be at least 1"));
        }
        let factor = self.toy.noise_factor;
        if !factor.is_finite() || factor <= 0.0 {
            return Err(DatasetError::invalid(
                "toy.noise_factor",
                "must be a positive finite number",
            ));
        }
        if self.http.timeout_secs == 0 {
            return Err(DatasetError::invalid("http.timeout_secs", "must be at least 1"));
        }
        Ok(())
    }

    /// Output directory for `group`.
    pub fn group_dir(&self, group: Group) -> PathBuf {
        self.output_root.join(group.dir_name())
    }
}

/// Builder for [`PrepareConfig`].
#[derive(Debug, Default)]
pub struct PrepareConfigBuilder {
    base: PrepareConfig,
}

impl PrepareConfigBuilder {
    /// Start from defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing configuration.
    pub fn from_config(base: PrepareConfig) -> Self {
        Self { base }
    }

    pub fn output_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.base.output_root = root.into();
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.base.seed = Some(seed);
        self
    }

    pub fn toy_sizes(mut self, n_inliers: usize, n_outliers: usize) -> Self {
        self.base.toy.n_inliers = n_inliers;
        self.base.toy.n_outliers = n_outliers;
        self
    }

    pub fn noise_factor(mut self, factor: f64) -> Self {
        self.base.toy.noise_factor = factor;
        self
    }

    pub fn sources(mut self, sources: SourceUrls) -> Self {
        self.base.sources = sources;
        self
    }

    pub fn graph_archives(mut self, archives: Vec<PathBuf>) -> Self {
        self.base.graph.archives = archives;
        self
    }

    /// Validate and return the configuration.
    pub fn build(self) -> Result<PrepareConfig> {
        self.base.validate()?;
        Ok(self.base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = PrepareConfig::default();
        assert_eq!(config.output_root, PathBuf::from("in"));
        assert_eq!(config.toy.n_inliers, 10_000);
        assert_eq!(config.toy.n_outliers, 1_000);
        assert_eq!(config.toy.noise_factor, 1.5);
        assert!(config.seed.is_none());
        assert!(config.sources.kddcup.ends_with("kddcup.data.gz"));
        assert_eq!(config.graph.archives.len(), 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config = PrepareConfig::from_toml("").unwrap();
        assert_eq!(config, PrepareConfig::default());
    }

    #[test]
    fn test_partial_toml() {
        let config = PrepareConfig::from_toml(
            r#"
            output_root = "out"
            seed = 42

            [toy]
            n_outliers = 10
            "#,
        )
        .unwrap();
        assert_eq!(config.output_root, PathBuf::from("out"));
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.toy.n_outliers, 10);
        assert_eq!(config.toy.n_inliers, 10_000);
        assert_eq!(config.sources, SourceUrls::default());
    }

    #[test]
    fn test_invalid_toml() {
        let result = PrepareConfig::from_toml("output_root = [");
        assert!(matches!(result, Err(DatasetError::ConfigError(_))));
    }

    #[test]
    fn test_toml_validation_runs() {
        let result = PrepareConfig::from_toml("[toy]\nnoise_factor = -1.0\n");
        assert!(matches!(result, Err(DatasetError::InvalidParameter { .. })));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[http]\ntimeout_secs = 5").unwrap();
        let config = PrepareConfig::load(file.path()).unwrap();
        assert_eq!(config.http.timeout_secs, 5);
    }

    #[test]
    fn test_load_missing_file() {
        let result = PrepareConfig::load(Path::new("/definitely/not/here.toml"));
        assert!(matches!(result, Err(DatasetError::ConfigError(_))));
    }

    #[test]
    fn test_load_or_default_none() {
        let config = PrepareConfig::load_or_default(None).unwrap();
        assert_eq!(config, PrepareConfig::default());
    }

    #[test]
    fn test_group_dir() {
        let config = PrepareConfigBuilder::new().output_root("data").build().unwrap();
        assert_eq!(config.group_dir(Group::Toy), PathBuf::from("data/toy"));
        assert_eq!(config.group_dir(Group::Nab), PathBuf::from("data/nab"));
    }

    #[test]
    fn test_builder_overrides() {
        let config = PrepareConfigBuilder::new()
            .seed(3)
            .toy_sizes(100, 10)
            .noise_factor(2.0)
            .graph_archives(vec![])
            .build()
            .unwrap();
        assert_eq!(config.seed, Some(3));
        assert_eq!(config.toy.n_inliers, 100);
        assert_eq!(config.toy.n_outliers, 10);
        assert_eq!(config.toy.noise_factor, 2.0);
        assert!(config.graph.archives.is_empty());
    }

    #[test]
    fn test_builder_rejects_zero_inliers() {
        let result = PrepareConfigBuilder::new().toy_sizes(0, 10).build();
        assert!(result.is_err());
    }

    #[test]
    fn test_builder_rejects_nan_factor() {
        let result = PrepareConfigBuilder::new().noise_factor(f64::NAN).build();
        assert!(result.is_err());
    }

    #[test]
    fn test_roundtrip_through_toml() {
        let config = PrepareConfigBuilder::new().seed(9).build().unwrap();
        let text = toml::to_string(&config).unwrap();
        assert_eq!(PrepareConfig::from_toml(&text).unwrap(), config);
    }
}
