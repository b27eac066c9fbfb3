//! Pipeline settings. Every field has a default matching the published
//! datasets, so `ChuvasConfig::default()` is what most callers want.

use crate::error::ValidationError;
use bon::Builder;
use std::ops::RangeInclusive;

/// Settings for loading and querying.
///
/// # Examples
///
/// ```
/// use chuvas::ChuvasConfig;
///
/// let config = ChuvasConfig::builder()
///     .first_year(2020)
///     .last_year(2022)
///     .report_top_n(5)
///     .build();
/// assert!(config.validate().is_ok());
/// assert_eq!(config.years().count(), 3);
/// assert_eq!(config.target_state, "PE");
/// ```
#[derive(Debug, Clone, PartialEq, Builder)]
pub struct ChuvasConfig {
    /// State abbreviation (`ocor_SIGLA_UF`) deaths must be recorded in.
    #[builder(into, default = "PE".to_owned())]
    pub target_state: String,

    /// First mortality year expected in the source manifest.
    #[builder(default = 2018)]
    pub first_year: i32,

    /// Last mortality year expected, inclusive.
    #[builder(default = 2023)]
    pub last_year: i32,

    /// Leading character of the cause codes kept after the join.
    #[builder(default = 'W')]
    pub cause_family: char,

    #[builder(default = 10)]
    pub report_top_n: usize,

    #[builder(default = 15)]
    pub ranking_top_n: usize,

    /// Rainfall sheets relative to the data directory, in first-wins order.
    #[builder(default = vec![
        "Chuvas/Chuvas18-21.csv".to_owned(),
        "Chuvas/Chuvas21-25.csv".to_owned(),
    ])]
    pub rainfall_files: Vec<String>,

    /// Mortality file path relative to the data directory; `{year}` is substituted.
    #[builder(into, default = "MortalidadeBrasil/ETLSIM.DORES_PE_{year}_t.csv".to_owned())]
    pub mortality_file_pattern: String,
}

impl Default for ChuvasConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl ChuvasConfig {
    pub fn years(&self) -> RangeInclusive<i32> {
        self.first_year..=self.last_year
    }

    pub fn mortality_file(&self, year: i32) -> String {
        self.mortality_file_pattern.replace("{year}", &year.to_string())
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.last_year < self.first_year {
            return Err(ValidationError::new(
                "last_year",
                self.last_year,
                format!("must not be before first_year ({})", self.first_year),
            ));
        }
        if self.report_top_n == 0 {
            return Err(ValidationError::new("report_top_n", 0, "must be at least 1"));
        }
        if self.ranking_top_n == 0 {
            return Err(ValidationError::new("ranking_top_n", 0, "must be at least 1"));
        }
        Ok(())
    }
}
