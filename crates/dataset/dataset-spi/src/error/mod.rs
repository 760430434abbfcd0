//! Error types for dataset preparation.

mod dataset_error;

pub use dataset_error::{DatasetError, Result};
