//! Period Facade
//!
//! Re-exports the period detection contract and its implementations.

pub use period_core::*;
pub use period_spi::*;

// Re-export core modules for direct access
pub use period_core::{autoperiod, spectrum};
