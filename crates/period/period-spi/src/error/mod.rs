//! Error types for period detection.

mod period_error;

pub use period_error::{PeriodError, Result};
