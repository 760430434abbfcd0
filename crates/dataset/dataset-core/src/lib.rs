//! Dataset Core
//!
//! Implementations behind the dataset contracts: fetchers, decoders, table
//! parsers, synthetic generators, the NPZ store, every data source and the
//! [`Preparer`] pipeline that ties them together.

pub mod archive;
pub mod decompress;
pub mod fetch;
pub mod pipeline;
pub mod sources;
pub mod store;
pub mod synth;
pub mod table;

pub use fetch::{FileFetcher, HttpFetcher};
pub use pipeline::{PrepareReport, Preparer, SavedDataset, UnpackedDir};
pub use store::{read_npz, NpzStore};
