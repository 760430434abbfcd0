//! Period detection model types.

mod period_hint;

pub use period_hint::PeriodHint;
