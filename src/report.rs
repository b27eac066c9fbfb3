//! Read-only queries over reconciled records. Nothing here renders or does I/O.

use crate::catalog::alias::{MUNICIPALITY_ALIASES, STATION_ALIASES};
use crate::catalog::cause::CauseCatalog;
use crate::catalog::municipality::MunicipalityCatalog;
use crate::error::{ChuvasError, DataUnavailable, ValidationError};
use crate::types::period::{parse_iso_date, YearMonth};
use crate::types::records::ReconciledRecord;
use crate::types::report::{
    CauseCount, ComparisonReport, MapMarker, MarkerScope, MunicipalityComparison,
};
use std::collections::{BTreeMap, BTreeSet};

/// Mean of the measured values only. No measurement at all gives `0.0`.
fn mean_rainfall<'a>(records: impl IntoIterator<Item = &'a ReconciledRecord>) -> f64 {
    let (sum, count) = records
        .into_iter()
        .filter_map(|r| r.rainfall_mm)
        .fold((0.0, 0usize), |(sum, count), mm| (sum + mm, count + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

/// Canonical spelling of a caller-supplied municipality name.
fn canonical_city(city: &str) -> String {
    let name = STATION_ALIASES.resolve(MUNICIPALITY_ALIASES.resolve(city.trim()));
    match MunicipalityCatalog.by_name(name) {
        Some(municipality) => municipality.name.to_string(),
        None => name.to_string(),
    }
}

fn is_city(record: &ReconciledRecord, city: &str) -> bool {
    record.municipality().to_lowercase() == city.to_lowercase()
}

fn rank_causes(records: &[&ReconciledRecord], top_n: usize) -> Vec<CauseCount> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for record in records {
        *counts.entry(record.cause_code()).or_default() += 1;
    }

    // BTreeMap order is code ascending, and the sort is stable, so ties stay that way.
    let mut ranked: Vec<(&str, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.truncate(top_n);

    let catalog = CauseCatalog;
    ranked
        .into_iter()
        .map(|(code, deaths)| CauseCount {
            code: code.to_string(),
            deaths,
            description: catalog.describe(code),
        })
        .collect()
}

/// Compares deaths and rainfall across the region on one date.
///
/// `date` is `YYYY-MM-DD`. With `city`, the totals, causes and average cover
/// that municipality only; the region table always covers every municipality
/// with at least one death on the date, flagging the requested one.
pub fn build_report(
    records: &[ReconciledRecord],
    date: &str,
    city: Option<&str>,
    top_n: usize,
) -> Result<ComparisonReport, ChuvasError> {
    let date = parse_iso_date("date", date)?;
    if top_n == 0 {
        return Err(ValidationError::new("top_n", top_n, "must be at least 1").into());
    }

    let catalog = MunicipalityCatalog;
    let on_date: Vec<&ReconciledRecord> = records
        .iter()
        .filter(|r| r.date() == Some(date) && catalog.contains_name(r.municipality()))
        .collect();
    if on_date.is_empty() {
        return Err(DataUnavailable::NoDeathsOnDate(date).into());
    }

    let city = city.map(canonical_city);
    let selection: Vec<&ReconciledRecord> = match &city {
        Some(name) => {
            let subset: Vec<_> = on_date.iter().copied().filter(|r| is_city(r, name)).collect();
            if subset.is_empty() {
                return Err(DataUnavailable::NoDeathsForMunicipality {
                    municipality: name.clone(),
                    date,
                }
                .into());
            }
            subset
        }
        None => on_date.clone(),
    };

    let cause_catalog = CauseCatalog;
    let cause_descriptions: BTreeSet<String> = selection
        .iter()
        .map(|r| cause_catalog.describe(r.cause_code()))
        .collect();

    let region_comparison = catalog
        .all()
        .iter()
        .filter_map(|municipality| {
            let group: Vec<&ReconciledRecord> = on_date
                .iter()
                .copied()
                .filter(|r| r.municipality() == municipality.name)
                .collect();
            if group.is_empty() {
                return None;
            }
            Some(MunicipalityComparison {
                municipality: municipality.name.to_string(),
                deaths: group.len(),
                average_rain_mm: mean_rainfall(group.iter().copied()),
                selected: city
                    .as_deref()
                    .is_some_and(|c| c.to_lowercase() == municipality.name.to_lowercase()),
            })
        })
        .collect();

    Ok(ComparisonReport {
        date,
        total_deaths: selection.len(),
        causes: rank_causes(&selection, top_n),
        cause_descriptions: cause_descriptions.into_iter().collect(),
        average_rain_mm: mean_rainfall(selection.iter().copied()),
        region_comparison,
        city,
    })
}

/// Numbers for one map marker per region municipality.
///
/// A municipality without deaths on `date` falls back to its whole month,
/// and its marker says so.
pub fn map_markers(
    records: &[ReconciledRecord],
    date: &str,
) -> Result<Vec<MapMarker>, ChuvasError> {
    let date = parse_iso_date("date", date)?;
    let period = YearMonth::of(date);

    let markers = MunicipalityCatalog
        .all()
        .iter()
        .map(|municipality| {
            let of_municipality =
                move || records.iter().filter(move |r| r.municipality() == municipality.name);
            let on_date: Vec<&ReconciledRecord> =
                of_municipality().filter(|r| r.date() == Some(date)).collect();

            let (group, scope) = if on_date.is_empty() {
                let in_month: Vec<&ReconciledRecord> = of_municipality()
                    .filter(|r| r.death.period() == Some(period))
                    .collect();
                (in_month, MarkerScope::Month(period))
            } else {
                (on_date, MarkerScope::Day)
            };

            MapMarker {
                municipality: municipality.name.to_string(),
                location: municipality.location,
                date,
                deaths: group.len(),
                average_rain_mm: mean_rainfall(group.iter().copied()),
                scope,
            }
        })
        .collect();
    Ok(markers)
}
