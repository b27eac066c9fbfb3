//! Raw inputs handed to the pipeline. The core never discovers files itself; it
//! receives a [`SourceSet`] listing what is available and what is missing.

pub mod data_dir;
pub mod error;
pub mod raw_table;

use std::collections::BTreeMap;

/// Character encoding of a source's bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceEncoding {
    Utf8,
    /// Mortality exports are read as latin-1.
    Latin1,
}

/// The full content of one CSV file plus a label used in warnings and errors.
#[derive(Debug, Clone, PartialEq)]
pub struct RawSource {
    pub label: String,
    pub bytes: Vec<u8>,
    pub encoding: SourceEncoding,
}

impl RawSource {
    pub fn new(
        label: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
        encoding: SourceEncoding,
    ) -> Self {
        Self {
            label: label.into(),
            bytes: bytes.into(),
            encoding,
        }
    }

    pub fn utf8(label: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self::new(label, bytes, SourceEncoding::Utf8)
    }

    pub fn latin1(label: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self::new(label, bytes, SourceEncoding::Latin1)
    }
}

/// Manifest of raw inputs for one pipeline run.
///
/// Rainfall sources are kept in insertion order; that order decides which row
/// wins when two sheets report the same station and month. Mortality sources
/// are keyed by year, and the years present are the "available years".
#[derive(Debug, Clone, Default)]
pub struct SourceSet {
    rainfall: Vec<RawSource>,
    missing_rainfall: Vec<String>,
    mortality: BTreeMap<i32, RawSource>,
}

impl SourceSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rainfall(mut self, source: RawSource) -> Self {
        self.rainfall.push(source);
        self
    }

    /// Records a rainfall sheet that was expected but could not be found.
    pub fn with_missing_rainfall(mut self, label: impl Into<String>) -> Self {
        self.missing_rainfall.push(label.into());
        self
    }

    /// A later source for the same year replaces the earlier one.
    pub fn with_mortality_year(mut self, year: i32, source: RawSource) -> Self {
        self.mortality.insert(year, source);
        self
    }

    pub fn rainfall(&self) -> &[RawSource] {
        &self.rainfall
    }

    pub fn missing_rainfall(&self) -> &[String] {
        &self.missing_rainfall
    }

    pub fn mortality(&self) -> &BTreeMap<i32, RawSource> {
        &self.mortality
    }

    pub fn available_years(&self) -> Vec<i32> {
        self.mortality.keys().copied().collect()
    }

    pub(crate) fn into_parts(self) -> (Vec<RawSource>, Vec<String>, BTreeMap<i32, RawSource>) {
        (self.rainfall, self.missing_rainfall, self.mortality)
    }
}
