//! Rainfall sheets: one row per station and month, with 31 day columns.

pub mod normalizer;
pub mod ranking;

pub use normalizer::{coerce_rainfall, parse_period_label, RainfallLoad, RainfallMonth};
