//! Output shapes handed to renderers and transports. They carry numbers only,
//! never pixels or markup.

use crate::catalog::municipality::LatLon;
use crate::types::period::YearMonth;
use chrono::NaiveDate;
use serde::Serialize;

/// Deaths from one cause code on the queried date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CauseCount {
    /// The full cause code as recorded, e.g. `W540`.
    pub code: String,
    pub deaths: usize,
    /// Catalog description of the code's three-character prefix.
    pub description: String,
}

/// One row of the region-wide table for the queried date.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MunicipalityComparison {
    pub municipality: String,
    pub deaths: usize,
    /// Mean over measured days only; `0.0` when none of the deaths had a measurement.
    pub average_rain_mm: f64,
    /// Whether this row is the municipality the report was requested for.
    pub selected: bool,
}

/// Aggregate comparison of external-cause deaths and rainfall for one date.
///
/// Municipalities with no deaths on the date are absent from
/// [`ComparisonReport::region_comparison`], not listed with zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonReport {
    pub date: NaiveDate,
    /// Canonical name of the requested municipality, if one was requested.
    pub city: Option<String>,
    pub total_deaths: usize,
    /// Most frequent causes, descending by count, at most `top_n` entries.
    pub causes: Vec<CauseCount>,
    /// Sorted, de-duplicated descriptions of every cause present, not only the top-N.
    pub cause_descriptions: Vec<String>,
    pub average_rain_mm: f64,
    /// In catalog order.
    pub region_comparison: Vec<MunicipalityComparison>,
}

/// A station's accumulated rainfall for a month, ranked against the others.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedCityRainfall {
    /// 1-based.
    pub rank: usize,
    /// Station name as written on the sheet.
    pub station: String,
    /// Station name after alias resolution.
    pub municipality: String,
    pub period: YearMonth,
    pub accumulated_mm: f64,
    pub selected: bool,
}

/// Which window a map marker's numbers were computed over.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "scope", content = "period", rename_all = "lowercase")]
pub enum MarkerScope {
    Day,
    /// The municipality had no deaths on the date, so the whole month was used.
    Month(YearMonth),
}

/// Per-municipality numbers for an interactive map popup.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapMarker {
    pub municipality: String,
    pub location: LatLon,
    pub date: NaiveDate,
    pub deaths: usize,
    pub average_rain_mm: f64,
    pub scope: MarkerScope,
}
