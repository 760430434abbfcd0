//! Period Core
//!
//! Spectral and autocorrelation tools plus the [`Autoperiod`] detector.

pub mod autoperiod;
pub mod spectrum;

pub use autoperiod::{dominant_period, Autoperiod};
pub use spectrum::{autocorrelation, periodogram};
