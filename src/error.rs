use crate::sources::error::SourceError;
use crate::types::period::YearMonth;
use chrono::NaiveDate;
use polars::error::PolarsError;
use thiserror::Error;

/// A raw value that could not be coerced while normalizing a source row.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("Failed to parse {field} value '{value}': {reason}")]
pub struct ParseError {
    /// Name of the source column the value came from.
    pub field: &'static str,
    /// The offending raw text, untouched.
    pub value: String,
    pub reason: String,
}

impl ParseError {
    pub(crate) fn new(field: &'static str, value: &str, reason: impl Into<String>) -> Self {
        Self {
            field,
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

/// A caller-supplied parameter failed a format or range check.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("Invalid {field} '{value}': {reason}")]
pub struct ValidationError {
    pub field: &'static str,
    pub value: String,
    pub reason: String,
}

impl ValidationError {
    pub(crate) fn new(
        field: &'static str,
        value: impl ToString,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            field,
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

/// A structurally valid request matched nothing, or nothing could be loaded at all.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DataUnavailable {
    #[error("No mortality source year is available")]
    NoMortalityYears,

    #[error("No rainfall source is available")]
    NoRainfallSources,

    #[error("No deaths recorded in the metropolitan region on {0}")]
    NoDeathsOnDate(NaiveDate),

    #[error("No deaths recorded for {municipality} on {date}")]
    NoDeathsForMunicipality {
        municipality: String,
        date: NaiveDate,
    },

    #[error("No rainfall measurements for period {0}")]
    NoRainfallForPeriod(YearMonth),
}

/// Non-fatal lookup misses. These are logged, never returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LookupError {
    #[error("'{value}' has no entry in the {table} alias table, passing through")]
    Alias { table: &'static str, value: String },

    #[error("Cause code '{0}' has no catalog description")]
    Cause(String),
}

#[derive(Debug, Error)]
pub enum ChuvasError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    DataUnavailable(#[from] DataUnavailable),

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error("Failed processing DataFrame: {0}")]
    DataFrameProcessing(#[from] PolarsError),

    // Covers errors joining the blocking normalizer tasks
    #[error("Background task failed to complete")]
    TaskJoin(#[from] tokio::task::JoinError),
}
