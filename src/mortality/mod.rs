//! Yearly death-certificate exports (SIM), restricted to the metropolitan region.

pub mod normalizer;

pub use normalizer::{parse_death_date, repair_encoding, MortalityLoad};
