use serde::Serialize;
use std::fmt;

/// Something the loader skipped without failing the run.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LoadWarning {
    /// A mortality year in the configured span had no source.
    MissingMortalityYear { year: i32 },
    /// A rainfall sheet listed in the configuration had no source.
    MissingRainfallSource { label: String },
    /// A source existed but could not be decoded, or lacked a required column.
    UnreadableSource { label: String, reason: String },
    /// A single row failed to normalize. `row` is 0-based, header excluded.
    SkippedRow {
        label: String,
        row: usize,
        reason: String,
    },
}

impl fmt::Display for LoadWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadWarning::MissingMortalityYear { year } => {
                write!(f, "mortality source for {year} is missing")
            }
            LoadWarning::MissingRainfallSource { label } => {
                write!(f, "rainfall source '{label}' is missing")
            }
            LoadWarning::UnreadableSource { label, reason } => {
                write!(f, "source '{label}' skipped: {reason}")
            }
            LoadWarning::SkippedRow { label, row, reason } => {
                write!(f, "row {row} of '{label}' skipped: {reason}")
            }
        }
    }
}
