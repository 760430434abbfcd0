//! Dataset Facade
//!
//! High-level API for benchmark dataset preparation. Re-exports the model and
//! contracts, the configuration layer and every implementation.

pub use dataset_api::*;
pub use dataset_core::*;
pub use dataset_spi::*;

// Source types at the root for convenience
pub use dataset_core::sources::graph::GraphArchives;
pub use dataset_core::sources::nab::{load_series, load_windows, NabRepository};
pub use dataset_core::sources::real::{real_sources, KddCup, UciTable};
pub use dataset_core::sources::toy::{ToyShape, ToySuite, TwoBlobs};
