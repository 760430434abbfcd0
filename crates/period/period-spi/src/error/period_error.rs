//! Period detection error types

use thiserror::Error;

/// Errors that can occur while estimating a period
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PeriodError {
    /// Input series cannot be analysed
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Invalid parameter value
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter { name: String, reason: String },
}

impl PeriodError {
    pub fn invalid(name: &str, reason: &str) -> Self {
        PeriodError::InvalidParameter {
            name: name.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Result type alias for period operations
pub type Result<T> = std::result::Result<T, PeriodError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_message() {
        let error = PeriodError::InvalidInput("value 3 is NaN".to_string());
        assert_eq!(error.to_string(), "Invalid input: value 3 is NaN");
    }

    #[test]
    fn test_invalid_parameter_message() {
        let error = PeriodError::invalid("confidence", "must lie in (0, 1)");
        assert_eq!(
            error.to_string(),
            "Invalid parameter 'confidence': must lie in (0, 1)"
        );
    }

    #[test]
    fn test_error_is_std_error() {
        fn assert_error<E: std::error::Error>(_: &E) {}
        assert_error(&PeriodError::InvalidInput(String::new()));
    }
}
