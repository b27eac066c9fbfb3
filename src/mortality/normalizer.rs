use crate::catalog::alias::MUNICIPALITY_ALIASES;
use crate::catalog::municipality::MunicipalityCatalog;
use crate::error::DataUnavailable;
use crate::sources::error::SourceError;
use crate::sources::raw_table::RawTable;
use crate::sources::RawSource;
use crate::types::records::MortalityRecord;
use crate::types::sex::Sex;
use crate::types::warning::LoadWarning;
use chrono::NaiveDate;
use log::{debug, info, warn};
use std::collections::BTreeMap;
use std::ops::RangeInclusive;

const COL_DATE: &str = "DTOBITO";
const COL_NAME: &str = "ocor_MUNNOME";
const COL_CODE: &str = "CODMUNOCOR";
const COL_STATE: &str = "ocor_SIGLA_UF";
const COL_SEX: &str = "SEXO";
const COL_CAUSE: &str = "CAUSABAS";
const COL_AGE: &str = "idade_obito_anos";
const COL_DEATH_ID: &str = "NUMERODO";

const DATE_DIGITS: usize = 8;

/// Everything the mortality side contributes to a dataset.
#[derive(Debug, Clone, Default)]
pub struct MortalityLoad {
    /// Region deaths, ordered by source year then row.
    pub records: Vec<MortalityRecord>,
    /// Years whose source was decoded.
    pub years: Vec<i32>,
    pub warnings: Vec<LoadWarning>,
}

/// Parses a `DTOBITO` value (`DDMMYYYY`).
///
/// Values that lost their leading zero to a numeric export are padded back
/// to eight digits first. Anything else that is not a real calendar date is
/// `None`.
///
/// # Examples
///
/// ```
/// use chuvas::parse_death_date;
/// use chrono::NaiveDate;
///
/// assert_eq!(parse_death_date("01052022"), NaiveDate::from_ymd_opt(2022, 5, 1));
/// assert_eq!(parse_death_date("1052022"), NaiveDate::from_ymd_opt(2022, 5, 1));
/// assert_eq!(parse_death_date("31022022"), None);
/// assert_eq!(parse_death_date("2022-05-01"), None);
/// ```
pub fn parse_death_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() || raw.len() > DATE_DIGITS || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let padded = format!("{raw:0>width$}", width = DATE_DIGITS);
    NaiveDate::parse_from_str(&padded, "%d%m%Y").ok()
}

/// Undoes one round of double encoding.
///
/// The exports hold UTF-8 names that were read as latin-1. Each char in the
/// latin-1 range is taken back as a byte and the bytes are decoded as UTF-8,
/// dropping any sequence that is not valid.
///
/// # Examples
///
/// ```
/// use chuvas::repair_encoding;
///
/// assert_eq!(repair_encoding("AraÃ§oiaba"), "Araçoiaba");
/// assert_eq!(repair_encoding("Recife"), "Recife");
/// ```
pub fn repair_encoding(raw: &str) -> String {
    let mut bytes = Vec::with_capacity(raw.len());
    for c in raw.chars() {
        match u8::try_from(c) {
            Ok(b) => bytes.push(b),
            Err(_) => {
                let mut buf = [0u8; 4];
                bytes.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
            }
        }
    }

    let mut repaired = String::with_capacity(bytes.len());
    for chunk in bytes.utf8_chunks() {
        repaired.push_str(chunk.valid());
    }
    repaired
}

fn parse_age(raw: Option<&str>) -> Option<u32> {
    let raw = raw?.trim();
    raw.parse::<u32>().ok().or_else(|| {
        raw.parse::<f64>()
            .ok()
            .filter(|age| age.is_finite() && *age >= 0.0)
            .map(|age| age.trunc() as u32)
    })
}

/// Merges every available year, keeping the deaths recorded in the target
/// state at one of the region's municipalities.
///
/// Sources outside `years` are ignored. Years inside it without a source, or
/// with one that cannot be decoded, are reported as warnings; the call only
/// fails when no year could be read.
pub fn normalize_mortality(
    sources: &BTreeMap<i32, RawSource>,
    years: RangeInclusive<i32>,
    target_state: &str,
) -> Result<MortalityLoad, DataUnavailable> {
    let mut load = MortalityLoad::default();

    for year in years.clone() {
        if !sources.contains_key(&year) {
            load.warnings.push(LoadWarning::MissingMortalityYear { year });
        }
    }
    for (year, source) in sources.range(years) {
        match RawTable::from_source(source).and_then(|table| parse_year(&table, target_state)) {
            Ok(records) => {
                info!("Kept {} region deaths from {} ({year})", records.len(), source.label);
                load.records.extend(records);
                load.years.push(*year);
            }
            Err(e) => load.warnings.push(LoadWarning::UnreadableSource {
                label: source.label.clone(),
                reason: e.to_string(),
            }),
        }
    }

    for warning in &load.warnings {
        warn!("{warning}");
    }
    if load.years.is_empty() {
        return Err(DataUnavailable::NoMortalityYears);
    }
    Ok(load)
}

fn parse_year(table: &RawTable, target_state: &str) -> Result<Vec<MortalityRecord>, SourceError> {
    let dates = table.text_column(COL_DATE)?;
    let names = table.text_column(COL_NAME)?;
    let codes = table.text_column(COL_CODE)?;
    let states = table.text_column(COL_STATE)?;
    let sexes = table.text_column(COL_SEX)?;
    let causes = table.text_column(COL_CAUSE)?;
    let ages = table.optional_text_column(COL_AGE)?;
    let death_ids = table.optional_text_column(COL_DEATH_ID)?;

    let catalog = MunicipalityCatalog;
    let mut records = Vec::new();
    let mut invalid_dates = 0usize;

    for row in 0..table.height() {
        if states.text(row).trim() != target_state {
            continue;
        }
        let code: String = codes.text(row).trim().chars().take(6).collect();
        let Some(municipality) = catalog.by_code(&code) else {
            continue;
        };

        let date = parse_death_date(dates.text(row));
        if date.is_none() {
            invalid_dates += 1;
        }
        let repaired = repair_encoding(names.text(row).trim());
        let death_id = death_ids
            .and_then(|ids| ids.get(row))
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| format!("{}#{row}", table.label()));

        records.push(MortalityRecord {
            death_id,
            date,
            state: target_state.to_string(),
            ibge_code: code,
            municipality: municipality.name.to_string(),
            raw_municipality_name: MUNICIPALITY_ALIASES.resolve(&repaired).to_string(),
            sex: Sex::from_code(sexes.text(row)),
            age_years: parse_age(ages.and_then(|a| a.get(row))),
            cause_code: causes.text(row).trim().to_string(),
        });
    }

    if invalid_dates > 0 {
        debug!(
            "{invalid_dates} region deaths in {} have no valid date",
            table.label()
        );
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{mortality_file, DeathRow};
    use chrono::{Datelike, Days};

    #[test]
    fn test_eight_digit_dates_round_trip() {
        let start = NaiveDate::from_ymd_opt(2016, 1, 1).unwrap();
        for offset in 0..3000 {
            let date = start + Days::new(offset);
            let raw = date.format("%d%m%Y").to_string();
            assert_eq!(parse_death_date(&raw), Some(date), "{raw}");
        }
    }

    #[test]
    fn test_other_shapes_have_no_date() {
        let shapes = [
            "",
            "   ",
            "2022-05-01",
            "01/05/2022",
            "010520221",
            "abcdefgh",
            "00052022",
            "29022023",
        ];
        for raw in shapes {
            assert_eq!(parse_death_date(raw), None, "{raw}");
        }
    }

    #[test]
    fn test_repair_handles_every_garbled_region_name() {
        assert_eq!(repair_encoding("SÃ£o LourenÃ§o da Mata"), "São Lourenço da Mata");
        assert_eq!(repair_encoding("JaboatÃ£o dos Guararapes"), "Jaboatão dos Guararapes");
        assert_eq!(repair_encoding("Ilha de ItamaracÃ¡"), "Ilha de Itamaracá");
        // A lone latin-1 byte is not valid UTF-8 and is dropped.
        assert_eq!(repair_encoding("Ara\u{e7}oiaba"), "Araoiaba");
    }

    #[test]
    fn test_age_parsing() {
        assert_eq!(parse_age(Some("30")), Some(30));
        assert_eq!(parse_age(Some("41.0")), Some(41));
        assert_eq!(parse_age(Some("")), None);
        assert_eq!(parse_age(Some("-2")), None);
        assert_eq!(parse_age(None), None);
    }

    #[test]
    fn test_keeps_region_deaths_in_target_state() -> Result<(), Box<dyn std::error::Error>> {
        let rows = [
            DeathRow { id: "1", age: "30", ..DeathRow::default() },
            DeathRow { name: "AraÃ§oiaba", code: "2601052", sex: "2", ..DeathRow::default() },
            DeathRow { id: "3", name: "Caruaru", code: "2604106", ..DeathRow::default() },
            DeathRow { id: "4", state: "PB", ..DeathRow::default() },
            DeathRow { id: "5", date: "99999999", cause: "X599", sex: "7", ..DeathRow::default() },
        ];
        let sources = BTreeMap::from([(2022, mortality_file("deaths-2022", &rows))]);
        let load = normalize_mortality(&sources, 2022..=2022, "PE")?;

        assert_eq!(load.years, vec![2022]);
        assert!(load.warnings.is_empty());
        assert_eq!(load.records.len(), 3);

        let recife = &load.records[0];
        assert_eq!(recife.death_id, "1");
        assert_eq!(recife.ibge_code, "261160");
        assert_eq!(recife.municipality, "Recife");
        assert_eq!(recife.sex, Sex::Male);
        assert_eq!(recife.age_years, Some(30));
        assert_eq!(recife.period().map(|p| p.to_string()), Some("05/2022".to_string()));
        assert_eq!(recife.day(), Some(1));

        let aracoiaba = &load.records[1];
        assert_eq!(aracoiaba.death_id, "deaths-2022#1");
        assert_eq!(aracoiaba.municipality, "Araçoiaba");
        assert_eq!(aracoiaba.raw_municipality_name, "Araçoiaba");
        assert_eq!(aracoiaba.sex, Sex::Female);

        let undated = &load.records[2];
        assert_eq!(undated.date, None);
        assert_eq!(undated.period(), None);
        assert_eq!(undated.day(), None);
        assert_eq!(undated.sex, Sex::Unknown);
        assert_eq!(undated.cause_code, "X599");
        Ok(())
    }

    #[test]
    fn test_code_derived_name_wins_over_source_name() -> Result<(), Box<dyn std::error::Error>> {
        let rows = [DeathRow {
            name: "Ilha de ItamaracÃ¡",
            code: "260760",
            ..DeathRow::default()
        }];
        let sources = BTreeMap::from([(2020, mortality_file("deaths-2020", &rows))]);
        let load = normalize_mortality(&sources, 2020..=2020, "PE")?;
        assert_eq!(load.records[0].municipality, "Itamaracá");
        assert_eq!(load.records[0].raw_municipality_name, "Itamaracá");
        Ok(())
    }

    #[test]
    fn test_missing_years_are_warnings() -> Result<(), Box<dyn std::error::Error>> {
        let rows = [DeathRow::default()];
        let sources = BTreeMap::from([
            (2019, mortality_file("deaths-2019", &rows)),
            (2030, mortality_file("deaths-2030", &rows)),
        ]);
        let load = normalize_mortality(&sources, 2018..=2020, "PE")?;

        assert_eq!(load.years, vec![2019]);
        assert_eq!(load.records.len(), 1);
        assert_eq!(load.records[0].date.map(|d| d.year()), Some(2022));
        assert_eq!(
            load.warnings,
            vec![
                LoadWarning::MissingMortalityYear { year: 2018 },
                LoadWarning::MissingMortalityYear { year: 2020 },
            ]
        );
        Ok(())
    }

    #[test]
    fn test_no_years_in_span_is_unavailable() {
        let deaths = mortality_file("deaths-2030", &[DeathRow::default()]);
        let sources = BTreeMap::from([(2030, deaths)]);
        let err = normalize_mortality(&sources, 2018..=2023, "PE").unwrap_err();
        assert_eq!(err, DataUnavailable::NoMortalityYears);
        assert_eq!(
            normalize_mortality(&BTreeMap::new(), 2018..=2023, "PE").unwrap_err(),
            DataUnavailable::NoMortalityYears
        );
    }

    #[test]
    fn test_file_without_required_column_is_unreadable() -> Result<(), Box<dyn std::error::Error>> {
        let sources = BTreeMap::from([
            (2021, RawSource::latin1("broken", "DTOBITO,SEXO\n01012021,1\n")),
            (2022, mortality_file("deaths-2022", &[DeathRow::default()])),
        ]);
        let load = normalize_mortality(&sources, 2021..=2022, "PE")?;
        assert_eq!(load.years, vec![2022]);
        assert_eq!(load.records.len(), 1);
        assert!(matches!(
            &load.warnings[..],
            [LoadWarning::UnreadableSource { label, .. }] if label == "broken"
        ));
        Ok(())
    }
}
