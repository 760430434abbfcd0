//! Fetcher implementations.

use std::path::{Path, PathBuf};
use std::time::Duration;

use dataset_api::HttpConfig;
use dataset_spi::{DatasetError, Fetcher, Result};
use tracing::debug;

/// Blocking HTTP(S) fetcher.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    /// Build a client from the HTTP section of the configuration.
    pub fn new(config: &HttpConfig) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| DatasetError::RequestFailed(e.to_string()))?;
        Ok(Self { client })
    }
}

impl Fetcher for HttpFetcher {
    fn name(&self) -> &str {
        "http"
    }

    fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        debug!(url, "downloading");
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| DatasetError::RequestFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DatasetError::RequestFailed(format!("{} returned {}", url, status)));
        }

        let body = response
            .bytes()
            .map_err(|e| DatasetError::RequestFailed(e.to_string()))?;
        debug!(url, bytes = body.len(), "downloaded");
        Ok(body.to_vec())
    }
}

/// Reads `file://` URLs and plain paths from disk.
///
/// Relative paths resolve against `base` when one is set.
#[derive(Debug, Clone, Default)]
pub struct FileFetcher {
    base: Option<PathBuf>,
}

impl FileFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base(base: impl Into<PathBuf>) -> Self {
        Self {
            base: Some(base.into()),
        }
    }

    fn resolve(&self, url: &str) -> PathBuf {
        let raw = Path::new(url.strip_prefix("file://").unwrap_or(url));
        match &self.base {
            Some(base) if raw.is_relative() => base.join(raw),
            _ => raw.to_path_buf(),
        }
    }
}

impl Fetcher for FileFetcher {
    fn name(&self) -> &str {
        "file"
    }

    fn fetch(&self, url: &str) -> Result<Vec<u8>> {
        let path = self.resolve(url);
        std::fs::read(&path).map_err(|e| {
            DatasetError::RequestFailed(format!("{}: {}", path.display(), e))
        })
    }
}
