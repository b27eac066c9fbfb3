//! CSV fixtures shared by the unit tests.

use crate::sources::{RawSource, SourceSet};
use crate::types::records::{MortalityRecord, ReconciledRecord};
use crate::types::sex::Sex;
use chrono::NaiveDate;

pub const RAINFALL_HEADER: &str = "Posto,Mês/Ano,\
    1,2,3,4,5,6,7,8,9,10,11,12,13,14,15,16,17,18,19,20,21,22,23,24,25,26,27,28,29,30,31,\
    Acumulado\n";

pub const MORTALITY_HEADER: &str =
    "NUMERODO,DTOBITO,ocor_MUNNOME,CODMUNOCOR,ocor_SIGLA_UF,SEXO,CAUSABAS,idade_obito_anos\n";

fn quoted(cell: &str) -> String {
    if cell.is_empty() {
        String::new()
    } else {
        format!("\"{cell}\"")
    }
}

/// One sheet line with all 31 day columns; days not listed are blank.
pub fn rainfall_row(
    station: &str,
    period: &str,
    days: &[(u32, &str)],
    accumulated: &str,
) -> String {
    let mut cells = vec![quoted(station), quoted(period)];
    for day in 1..=31 {
        let value = days
            .iter()
            .find(|(d, _)| *d == day)
            .map(|(_, v)| *v)
            .unwrap_or("");
        cells.push(quoted(value));
    }
    cells.push(quoted(accumulated));
    format!("{}\n", cells.join(","))
}

pub fn rainfall_sheet(rows: &[String]) -> String {
    let mut sheet = RAINFALL_HEADER.to_string();
    for row in rows {
        sheet.push_str(row);
    }
    sheet
}

/// One mortality line. Defaults describe a male death in Recife.
#[derive(Debug, Clone, Copy)]
pub struct DeathRow {
    pub id: &'static str,
    pub date: &'static str,
    pub name: &'static str,
    pub code: &'static str,
    pub state: &'static str,
    pub sex: &'static str,
    pub cause: &'static str,
    pub age: &'static str,
}

impl Default for DeathRow {
    fn default() -> Self {
        Self {
            id: "",
            date: "01052022",
            name: "Recife",
            code: "2611606",
            state: "PE",
            sex: "1",
            cause: "W540",
            age: "",
        }
    }
}

impl DeathRow {
    pub fn csv(&self) -> String {
        format!(
            "{},{},\"{}\",{},{},{},{},{}\n",
            self.id, self.date, self.name, self.code, self.state, self.sex, self.cause, self.age
        )
    }
}

/// A mortality file as the exports store it: UTF-8 text read as latin-1.
pub fn mortality_file(label: &str, rows: &[DeathRow]) -> RawSource {
    let mut text = MORTALITY_HEADER.to_string();
    for row in rows {
        text.push_str(&row.csv());
    }
    RawSource::latin1(label, text.into_bytes())
}

/// A small region-wide data drop around 2022-05-01.
///
/// On that date Recife has three W deaths (all on 10.0 mm) and Olinda one
/// (3.0 mm). Jaboatão has a non-W death only. Year 2021 has no file.
pub fn sample_sources() -> SourceSet {
    let sheet_a = rainfall_sheet(&[
        rainfall_row("Recife (Várzea)", "mai./2022", &[(1, "10,0"), (2, "4,0")], "120,5"),
        rainfall_row("Olinda", "mai./2022", &[(1, "3,0")], "80,0"),
        rainfall_row("Jaboatão (Cidade da Copa) - PCD", "mai./2022", &[(1, "0,0")], "200,0"),
        rainfall_row("Recife (Codecipe / Santo Amaro)", "mai./2022", &[(1, "99,0")], "150,0"),
    ]);
    let sheet_b = rainfall_sheet(&[
        rainfall_row("Recife (Várzea)", "mai./2022", &[(1, "55,0")], "999,0"),
        rainfall_row("Paulista", "jun./2022", &[(1, "1,0")], "10,0"),
    ]);

    let deaths = [
        DeathRow {
            id: "1",
            age: "30",
            ..DeathRow::default()
        },
        DeathRow {
            id: "2",
            sex: "2",
            ..DeathRow::default()
        },
        DeathRow {
            id: "3",
            cause: "W069",
            ..DeathRow::default()
        },
        DeathRow {
            id: "4",
            name: "Olinda",
            code: "2609600",
            sex: "2",
            cause: "W780",
            ..DeathRow::default()
        },
        DeathRow {
            id: "5",
            name: "JaboatÃ£o dos Guararapes",
            code: "2607901",
            cause: "X599",
            ..DeathRow::default()
        },
        DeathRow {
            id: "6",
            date: "02052022",
            ..DeathRow::default()
        },
        DeathRow {
            id: "7",
            name: "Caruaru",
            code: "2604106",
            ..DeathRow::default()
        },
        DeathRow {
            id: "8",
            state: "PB",
            ..DeathRow::default()
        },
        DeathRow {
            id: "9",
            date: "32132022",
            ..DeathRow::default()
        },
        DeathRow {
            id: "10",
            date: "15052022",
            name: "Moreno",
            code: "2609402",
            cause: "W190",
            ..DeathRow::default()
        },
    ];

    SourceSet::new()
        .with_rainfall(RawSource::utf8("sheet-a", sheet_a))
        .with_rainfall(RawSource::utf8("sheet-b", sheet_b))
        .with_mortality_year(2022, mortality_file("deaths-2022", &deaths))
}

/// A reconciled record built directly, bypassing the normalizers.
pub fn reconciled(
    municipality: &str,
    date: &str,
    cause: &str,
    rainfall_mm: Option<f64>,
) -> ReconciledRecord {
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").ok();
    ReconciledRecord {
        death: MortalityRecord {
            death_id: format!("{municipality}-{cause}"),
            date,
            state: "PE".to_string(),
            ibge_code: String::new(),
            municipality: municipality.to_string(),
            raw_municipality_name: municipality.to_string(),
            sex: Sex::Unknown,
            age_years: None,
            cause_code: cause.to_string(),
        },
        rainfall_mm,
        accumulated_mm: rainfall_mm,
    }
}
