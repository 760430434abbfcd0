//! Contracts for period detection.

mod period_detector;

pub use period_detector::PeriodDetector;
