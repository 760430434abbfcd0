//! Dataset Service Provider Interface
//!
//! Defines the dataset model, error types and the contracts implemented by
//! fetchers, sources and sinks.

pub mod contract;
pub mod error;
pub mod model;

// Re-export all public items at crate root for convenience
pub use contract::{ArchiveSource, DatasetSink, DatasetSource, Fetcher};
pub use error::{DatasetError, Result};
pub use model::{Dataset, Group, LabelRule};
