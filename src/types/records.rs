//! Row types produced by the normalizers and the reconciliation join.

use crate::types::period::YearMonth;
use crate::types::sex::Sex;
use chrono::{Datelike, NaiveDate};
use serde::Serialize;

/// One death from the mortality files, restricted to the metropolitan region.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MortalityRecord {
    /// `NUMERODO` when the source carries it, otherwise `<source>#<row>`.
    pub death_id: String,
    /// `None` when `DTOBITO` was not a valid `DDMMYYYY` date.
    pub date: Option<NaiveDate>,
    pub state: String,
    /// Six-digit IBGE municipality code (prefix of `CODMUNOCOR`).
    pub ibge_code: String,
    /// Canonical name derived from `ibge_code`. This is the join key.
    pub municipality: String,
    /// `ocor_MUNNOME` after encoding repair and alias correction.
    pub raw_municipality_name: String,
    pub sex: Sex,
    pub age_years: Option<u32>,
    /// Basic cause of death (`CAUSABAS`), e.g. `W540`.
    pub cause_code: String,
}

impl MortalityRecord {
    /// Join key: period of the death date.
    pub fn period(&self) -> Option<YearMonth> {
        self.date.map(YearMonth::of)
    }

    /// Join key: day of month of the death date.
    pub fn day(&self) -> Option<u32> {
        self.date.map(|d| d.day())
    }
}

/// One station's rainfall for one day, after the wide sheet has been reshaped.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RainfallObservation {
    /// Canonical station (municipality) name.
    pub station: String,
    pub period: YearMonth,
    /// 1..=31, taken from the day column the value came from.
    pub day: u32,
    /// Non-negative; blank cells become `0.0`.
    pub rainfall_mm: f64,
    /// Month total reported on the sheet. Diagnostic only.
    pub accumulated_mm: f64,
}

/// A mortality record with the rainfall measured at its municipality that day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReconciledRecord {
    pub death: MortalityRecord,
    /// `None` means no measurement exists, which is not the same as `Some(0.0)`.
    pub rainfall_mm: Option<f64>,
    /// Month total of the matching sheet row, when matched.
    pub accumulated_mm: Option<f64>,
}

impl ReconciledRecord {
    pub fn municipality(&self) -> &str {
        &self.death.municipality
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.death.date
    }

    pub fn cause_code(&self) -> &str {
        &self.death.cause_code
    }
}
