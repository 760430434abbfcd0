//! Period Service Provider Interface
//!
//! Defines the period detection contract shared by detectors and callers.

pub mod contract;
pub mod error;
pub mod model;

// Re-export all public items at crate root for convenience
pub use contract::PeriodDetector;
pub use error::{PeriodError, Result};
pub use model::PeriodHint;
