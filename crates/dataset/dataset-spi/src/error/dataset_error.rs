//! Dataset error types.

use thiserror::Error;

/// Errors raised while fetching, decoding, building or saving datasets.
#[derive(Debug, Error)]
pub enum DatasetError {
    /// HTTP request failed
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Compressed payload could not be decoded
    #[error("Decompression error: {0}")]
    Decompress(String),

    /// Archive could not be read or unpacked
    #[error("Archive error: {0}")]
    Archive(String),

    /// Tabular or JSON content could not be parsed
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Feature and label arrays disagree in shape
    #[error("Shape mismatch: expected {expected}, got {got}")]
    ShapeMismatch { expected: usize, got: usize },

    /// A parameter is outside its valid domain
    #[error("Invalid parameter: {name} - {reason}")]
    InvalidParameter { name: String, reason: String },

    /// Configuration could not be loaded or is inconsistent
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// A source produced no rows
    #[error("No data returned")]
    NoData,

    /// Filesystem failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl DatasetError {
    /// Shorthand for [`DatasetError::InvalidParameter`].
    pub fn invalid(name: &str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type for dataset operations.
pub type Result<T> = std::result::Result<T, DatasetError>;
