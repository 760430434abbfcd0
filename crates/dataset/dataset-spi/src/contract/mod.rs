//! Contracts implemented by fetchers, sources and sinks.

mod dataset_source;
mod fetcher;

pub use dataset_source::{ArchiveSource, DatasetSink, DatasetSource};
pub use fetcher::Fetcher;
