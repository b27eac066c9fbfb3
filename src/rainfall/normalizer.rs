use crate::catalog::alias::STATION_ALIASES;
use crate::error::{DataUnavailable, ParseError};
use crate::sources::error::SourceError;
use crate::sources::raw_table::{RawTable, TextColumn};
use crate::sources::RawSource;
use crate::types::period::YearMonth;
use crate::types::records::RainfallObservation;
use crate::types::warning::LoadWarning;
use log::{info, warn};
use std::collections::HashSet;

const COL_STATION: &str = "Posto";
const COL_PERIOD: &str = "Mês/Ano";
const COL_ACCUMULATED: &str = "Acumulado";

const DAY_COLUMNS: [&str; 31] = [
    "1", "2", "3", "4", "5", "6", "7", "8", "9", "10", "11", "12", "13", "14", "15", "16", "17",
    "18", "19", "20", "21", "22", "23", "24", "25", "26", "27", "28", "29", "30", "31",
];

/// Portuguese month abbreviations as they appear on the sheets (`jan./2018`).
const MONTH_LABELS: [(&str, u32); 12] = [
    ("jan", 1),
    ("fev", 2),
    ("mar", 3),
    ("abr", 4),
    ("mai", 5),
    ("jun", 6),
    ("jul", 7),
    ("ago", 8),
    ("set", 9),
    ("out", 10),
    ("nov", 11),
    ("dez", 12),
];

/// One sheet row after coercion, still in wide form.
#[derive(Debug, Clone, PartialEq)]
pub struct RainfallMonth {
    /// Station name as written on the sheet.
    pub raw_station: String,
    /// Station name after alias resolution.
    pub station: String,
    pub period: YearMonth,
    /// `(day, mm)` for every day column the sheet carries, in day order.
    pub days: Vec<(u32, f64)>,
    pub accumulated_mm: f64,
}

/// Everything the rainfall side contributes to a dataset.
#[derive(Debug, Clone, Default)]
pub struct RainfallLoad {
    /// Every parsed row, in source order, duplicates included.
    pub months: Vec<RainfallMonth>,
    /// Long form of the deduplicated rows.
    pub observations: Vec<RainfallObservation>,
    pub warnings: Vec<LoadWarning>,
}

/// Translates a sheet period label into a [`YearMonth`].
///
/// Accepts the abbreviated form (`jan./2018`, `Fev/2019`) and the numeric
/// form (`03/2020`).
///
/// # Examples
///
/// ```
/// use chuvas::parse_period_label;
///
/// assert_eq!(parse_period_label("jun./2025").unwrap().to_string(), "06/2025");
/// assert_eq!(parse_period_label("11/2019").unwrap().to_string(), "11/2019");
/// assert!(parse_period_label("junho de 2025").is_err());
/// ```
pub fn parse_period_label(raw: &str) -> Result<YearMonth, ParseError> {
    let (month_part, year_part) = raw
        .trim()
        .split_once('/')
        .ok_or_else(|| ParseError::new(COL_PERIOD, raw, "expected <month>/<year>"))?;

    let month_part = month_part.trim().trim_end_matches('.').to_lowercase();
    let month = match MONTH_LABELS.iter().find(|(label, _)| *label == month_part) {
        Some((_, number)) => *number,
        None if is_digits(&month_part) && month_part.len() <= 2 => month_part
            .parse::<u32>()
            .map_err(|e| ParseError::new(COL_PERIOD, raw, e.to_string()))?,
        None => {
            return Err(ParseError::new(
                COL_PERIOD,
                raw,
                format!("unknown month '{month_part}'"),
            ))
        }
    };

    let year_part = year_part.trim();
    if year_part.len() != 4 || !is_digits(year_part) {
        return Err(ParseError::new(COL_PERIOD, raw, "year must have four digits"));
    }
    let year = year_part
        .parse::<i32>()
        .map_err(|e| ParseError::new(COL_PERIOD, raw, e.to_string()))?;

    YearMonth::new(year, month)
        .ok_or_else(|| ParseError::new(COL_PERIOD, raw, format!("month {month} is out of range")))
}

/// Coerces a sheet cell into millimetres.
///
/// Only digits and the decimal comma survive; a blank result is `0.0`.
/// Dots are dropped along with everything else, so `1.234,5` reads as `1234.5`.
///
/// # Examples
///
/// ```
/// use chuvas::coerce_rainfall;
///
/// assert_eq!(coerce_rainfall("1", "12,5").unwrap(), 12.5);
/// assert_eq!(coerce_rainfall("1", " - ").unwrap(), 0.0);
/// assert!(coerce_rainfall("1", "1,2,3").is_err());
/// ```
pub fn coerce_rainfall(field: &'static str, raw: &str) -> Result<f64, ParseError> {
    let kept: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == ',')
        .map(|c| if c == ',' { '.' } else { c })
        .collect();

    if kept.is_empty() {
        return Ok(0.0);
    }
    kept.parse::<f64>()
        .map_err(|_| ParseError::new(field, raw, format!("'{kept}' is not a number")))
}

fn is_digits(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|c| c.is_ascii_digit())
}

/// Parses every rainfall sheet and reshapes the result to long form.
///
/// Sheets are read in the given order, which is also the first-wins order
/// for duplicate (period, station) rows. A sheet that cannot be decoded is
/// skipped with a warning, as is any row that fails to coerce. When no sheet
/// can be decoded at all the load fails with
/// [`DataUnavailable::NoRainfallSources`].
pub fn normalize_rainfall(
    sources: &[RawSource],
    missing: &[String],
) -> Result<RainfallLoad, DataUnavailable> {
    let mut load = RainfallLoad::default();

    for label in missing {
        load.warnings.push(LoadWarning::MissingRainfallSource {
            label: label.clone(),
        });
    }
    if sources.is_empty() {
        return Err(DataUnavailable::NoRainfallSources);
    }

    let mut readable = 0usize;
    for source in sources {
        let parsed = RawTable::from_source(source)
            .and_then(|table| parse_sheet(&table, &mut load.warnings));
        match parsed {
            Ok(months) => {
                readable += 1;
                load.months.extend(months);
            }
            Err(e) => load.warnings.push(LoadWarning::UnreadableSource {
                label: source.label.clone(),
                reason: e.to_string(),
            }),
        }
    }
    if readable == 0 {
        for warning in &load.warnings {
            warn!("{warning}");
        }
        return Err(DataUnavailable::NoRainfallSources);
    }

    let unique = dedupe_first_wins(&load.months);
    info!(
        "Parsed {} rainfall rows, {} after de-duplication",
        load.months.len(),
        unique.len()
    );
    load.observations = reshape(unique);

    for warning in &load.warnings {
        warn!("{warning}");
    }
    Ok(load)
}

struct SheetColumns<'a> {
    station: TextColumn<'a>,
    period: TextColumn<'a>,
    accumulated: TextColumn<'a>,
    days: Vec<(u32, &'static str, TextColumn<'a>)>,
}

fn parse_sheet(
    table: &RawTable,
    warnings: &mut Vec<LoadWarning>,
) -> Result<Vec<RainfallMonth>, SourceError> {
    let mut days = Vec::with_capacity(DAY_COLUMNS.len());
    for (idx, name) in DAY_COLUMNS.iter().enumerate() {
        if let Some(column) = table.optional_text_column(name)? {
            days.push((idx as u32 + 1, *name, column));
        }
    }
    let columns = SheetColumns {
        station: table.text_column(COL_STATION)?,
        period: table.text_column(COL_PERIOD)?,
        accumulated: table.text_column(COL_ACCUMULATED)?,
        days,
    };

    let mut months = Vec::with_capacity(table.height());
    for row in 0..table.height() {
        match parse_row(&columns, row) {
            Ok(month) => months.push(month),
            Err(e) => warnings.push(LoadWarning::SkippedRow {
                label: table.label().to_string(),
                row,
                reason: e.to_string(),
            }),
        }
    }
    Ok(months)
}

fn parse_row(columns: &SheetColumns<'_>, row: usize) -> Result<RainfallMonth, ParseError> {
    let raw_station = columns.station.text(row).trim();
    if raw_station.is_empty() {
        return Err(ParseError::new(COL_STATION, raw_station, "station name is blank"));
    }
    let period = parse_period_label(columns.period.text(row))?;

    let mut days = Vec::with_capacity(columns.days.len());
    for (day, name, column) in &columns.days {
        days.push((*day, coerce_rainfall(*name, column.text(row))?));
    }

    Ok(RainfallMonth {
        raw_station: raw_station.to_string(),
        station: STATION_ALIASES.resolve(raw_station).to_string(),
        period,
        days,
        accumulated_mm: coerce_rainfall(COL_ACCUMULATED, columns.accumulated.text(row))?,
    })
}

/// Keeps the first row seen for each (period, canonical station).
pub fn dedupe_first_wins(months: &[RainfallMonth]) -> Vec<&RainfallMonth> {
    let mut seen = HashSet::new();
    months
        .iter()
        .filter(|m| seen.insert((m.period, m.station.as_str())))
        .collect()
}

/// Wide to long: one observation per (row, day column).
pub fn reshape<'a>(
    months: impl IntoIterator<Item = &'a RainfallMonth>,
) -> Vec<RainfallObservation> {
    months
        .into_iter()
        .flat_map(|month| {
            month
                .days
                .iter()
                .filter(|(day, _)| (1..=31).contains(day))
                .map(move |&(day, rainfall_mm)| RainfallObservation {
                    station: month.station.clone(),
                    period: month.period,
                    day,
                    rainfall_mm,
                    accumulated_mm: month.accumulated_mm,
                })
        })
        .collect()
}
