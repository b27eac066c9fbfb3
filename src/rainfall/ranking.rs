use crate::catalog::alias::{MUNICIPALITY_ALIASES, STATION_ALIASES};
use crate::error::{ChuvasError, DataUnavailable, ValidationError};
use crate::rainfall::normalizer::RainfallMonth;
use crate::types::period::YearMonth;
use crate::types::report::RankedCityRainfall;
use log::info;
use polars::prelude::*;
use std::collections::HashSet;

const COL_STATION: &str = "station";
const COL_MUNICIPALITY: &str = "municipality";
const COL_PERIOD: &str = "period";
const COL_ACCUMULATED: &str = "accumulated_mm";

/// Builds the frame the ranking query runs over.
///
/// Rows repeating a (period, reported station) already seen are dropped, so
/// the earlier sheet wins.
fn ranking_frame(months: &[RainfallMonth]) -> PolarsResult<DataFrame> {
    let mut seen = HashSet::new();
    let unique: Vec<&RainfallMonth> = months
        .iter()
        .filter(|m| seen.insert((m.period, m.raw_station.as_str())))
        .collect();

    polars::df!(
        COL_STATION => unique.iter().map(|m| m.raw_station.as_str()).collect::<Vec<_>>(),
        COL_MUNICIPALITY => unique.iter().map(|m| m.station.as_str()).collect::<Vec<_>>(),
        COL_PERIOD => unique.iter().map(|m| m.period.to_string()).collect::<Vec<_>>(),
        COL_ACCUMULATED => unique.iter().map(|m| m.accumulated_mm).collect::<Vec<_>>()
    )
}

/// Ranks the stations of one month by accumulated rainfall, wettest first.
///
/// Equal totals keep sheet order. `city`, when given, does not filter; it
/// marks the entries whose municipality matches it (case-insensitive, after
/// alias resolution).
pub fn rank_monthly_rainfall(
    months: &[RainfallMonth],
    period: YearMonth,
    city: Option<&str>,
    top_n: usize,
) -> Result<Vec<RankedCityRainfall>, ChuvasError> {
    if top_n == 0 {
        return Err(ValidationError::new("top_n", top_n, "must be at least 1").into());
    }

    let ranked = ranking_frame(months)?
        .lazy()
        .filter(col(COL_PERIOD).eq(lit(period.to_string())))
        .sort_by_exprs(
            [col(COL_ACCUMULATED)],
            SortMultipleOptions::default()
                .with_order_descending(true)
                .with_maintain_order(true),
        )
        .limit(IdxSize::try_from(top_n).unwrap_or(IdxSize::MAX))
        .collect()?;

    if ranked.height() == 0 {
        return Err(DataUnavailable::NoRainfallForPeriod(period).into());
    }

    let selected = city.map(|c| {
        let name = MUNICIPALITY_ALIASES.resolve(c.trim());
        STATION_ALIASES.resolve(name).to_lowercase()
    });

    let stations = ranked.column(COL_STATION)?.str()?;
    let municipalities = ranked.column(COL_MUNICIPALITY)?.str()?;
    let accumulated = ranked.column(COL_ACCUMULATED)?.f64()?;

    let entries: Vec<RankedCityRainfall> = stations
        .into_iter()
        .zip(municipalities)
        .zip(accumulated)
        .enumerate()
        .map(|(idx, ((station, municipality), accumulated_mm))| {
            let station = station.unwrap_or_default().to_string();
            let municipality = municipality.unwrap_or_default().to_string();
            let is_selected = selected
                .as_deref()
                .is_some_and(|s| s == municipality.to_lowercase() || s == station.to_lowercase());
            RankedCityRainfall {
                rank: idx + 1,
                station,
                municipality,
                period,
                accumulated_mm: accumulated_mm.unwrap_or(0.0),
                selected: is_selected,
            }
        })
        .collect();

    info!("Ranked {} stations for {}", entries.len(), period);
    Ok(entries)
}
