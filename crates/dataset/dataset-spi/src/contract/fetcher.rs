//! Byte retrieval contract.

use crate::error::Result;

/// Retrieves the raw bytes behind a URL.
///
/// Network access lives behind this trait so sources can be driven from disk
/// or from memory.
pub trait Fetcher: Send + Sync {
    /// Fetcher name, used in log output.
    fn name(&self) -> &str;

    /// Fetch the full body at `url`.
    fn fetch(&self, url: &str) -> Result<Vec<u8>>;
}
