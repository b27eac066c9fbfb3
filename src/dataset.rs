//! The immutable product of one pipeline run.

use crate::config::ChuvasConfig;
use crate::error::ChuvasError;
use crate::mortality::normalizer::normalize_mortality;
use crate::rainfall::normalizer::{normalize_rainfall, RainfallMonth};
use crate::rainfall::ranking::rank_monthly_rainfall;
use crate::reconcile::reconcile;
use crate::report::{build_report, map_markers};
use crate::sources::SourceSet;
use crate::types::period::YearMonth;
use crate::types::records::ReconciledRecord;
use crate::types::report::{ComparisonReport, MapMarker, RankedCityRainfall};
use crate::types::warning::LoadWarning;
use log::info;
use tokio::task;

/// Reconciled deaths plus the rainfall rows the ranking needs.
///
/// A `Dataset` is never modified after [`Dataset::load`] returns. Picking up
/// new sources means loading a new one.
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Vec<ReconciledRecord>,
    rainfall_months: Vec<RainfallMonth>,
    observation_count: usize,
    years: Vec<i32>,
    warnings: Vec<LoadWarning>,
}

impl Dataset {
    /// Runs the full pipeline over `sources`.
    ///
    /// Both dataset families are normalized at the same time on the blocking
    /// pool, then joined and filtered to `config.cause_family`.
    ///
    /// # Errors
    ///
    /// Returns [`ChuvasError::Validation`] for an invalid `config` and
    /// [`ChuvasError::DataUnavailable`] when there is no rainfall source or no
    /// readable mortality year. Everything smaller ends up in
    /// [`Dataset::warnings`].
    pub async fn load(sources: SourceSet, config: &ChuvasConfig) -> Result<Self, ChuvasError> {
        config.validate()?;
        let (rainfall, missing_rainfall, mortality) = sources.into_parts();
        let years = config.years();
        let target_state = config.target_state.clone();

        let rainfall_task =
            task::spawn_blocking(move || normalize_rainfall(&rainfall, &missing_rainfall));
        let mortality_task =
            task::spawn_blocking(move || normalize_mortality(&mortality, years, &target_state));
        let (rainfall, mortality) = tokio::try_join!(rainfall_task, mortality_task)?;
        let (rainfall, mortality) = (rainfall?, mortality?);

        let observation_count = rainfall.observations.len();
        let cause_family = config.cause_family;
        let observations = rainfall.observations;
        let records =
            task::spawn_blocking(move || reconcile(mortality.records, &observations, cause_family))
                .await?;

        let mut warnings = rainfall.warnings;
        warnings.extend(mortality.warnings);

        info!(
            "Dataset ready: {} reconciled records, {} rainfall observations, years {:?}, {} warnings",
            records.len(),
            observation_count,
            mortality.years,
            warnings.len()
        );
        Ok(Self {
            records,
            rainfall_months: rainfall.months,
            observation_count,
            years: mortality.years,
            warnings,
        })
    }

    pub fn records(&self) -> &[ReconciledRecord] {
        &self.records
    }

    /// Parsed sheet rows in source order, duplicates included.
    pub fn rainfall_months(&self) -> &[RainfallMonth] {
        &self.rainfall_months
    }

    /// Number of long-form rainfall observations the join ran against.
    pub fn observation_count(&self) -> usize {
        self.observation_count
    }

    /// Mortality years that were actually loaded.
    pub fn years(&self) -> &[i32] {
        &self.years
    }

    pub fn warnings(&self) -> &[LoadWarning] {
        &self.warnings
    }

    /// See [`build_report`].
    pub fn report(
        &self,
        date: &str,
        city: Option<&str>,
        top_n: usize,
    ) -> Result<ComparisonReport, ChuvasError> {
        build_report(&self.records, date, city, top_n)
    }

    /// Ranks stations by accumulated rainfall for `month_year` (`MM/YYYY`).
    pub fn monthly_ranking(
        &self,
        month_year: &str,
        city: Option<&str>,
        top_n: usize,
    ) -> Result<Vec<RankedCityRainfall>, ChuvasError> {
        let period: YearMonth = month_year.parse()?;
        rank_monthly_rainfall(&self.rainfall_months, period, city, top_n)
    }

    /// See [`map_markers`].
    pub fn map_markers(&self, date: &str) -> Result<Vec<MapMarker>, ChuvasError> {
        map_markers(&self.records, date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DataUnavailable;
    use crate::sources::RawSource;
    use crate::test_support::{
        mortality_file, rainfall_row, rainfall_sheet, sample_sources, DeathRow,
    };

    fn sample_config() -> ChuvasConfig {
        ChuvasConfig::builder().first_year(2021).last_year(2022).build()
    }

    #[tokio::test]
    async fn test_load_joins_and_filters() -> Result<(), Box<dyn std::error::Error>> {
        let dataset = Dataset::load(sample_sources(), &sample_config()).await?;

        assert_eq!(dataset.years(), [2022]);
        // Recife x3, Olinda, Recife on the 2nd, undated Recife, Moreno.
        assert_eq!(dataset.records().len(), 7);
        assert!(dataset.records().iter().all(|r| r.cause_code().starts_with('W')));
        assert_eq!(dataset.rainfall_months().len(), 6);
        // Three canonical stations in May (Recife deduplicated) and Paulista in June.
        assert_eq!(dataset.observation_count(), 4 * 31);
        assert_eq!(
            dataset.warnings(),
            [LoadWarning::MissingMortalityYear { year: 2021 }]
        );

        let rain: Vec<_> = dataset
            .records()
            .iter()
            .map(|r| (r.death.death_id.as_str(), r.rainfall_mm))
            .collect();
        assert_eq!(
            rain,
            [
                ("1", Some(10.0)),
                ("2", Some(10.0)),
                ("3", Some(10.0)),
                ("4", Some(3.0)),
                ("6", Some(4.0)),
                ("9", None),
                ("10", None),
            ]
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_queries_run_against_snapshot() -> Result<(), Box<dyn std::error::Error>> {
        let dataset = Dataset::load(sample_sources(), &sample_config()).await?;

        let report = dataset.report("2022-05-01", Some("Recife"), 10)?;
        assert_eq!(report.total_deaths, 3);
        assert_eq!(report.average_rain_mm, 10.0);
        assert_eq!(report.region_comparison.len(), 2);

        let ranking = dataset.monthly_ranking("05/2022", Some("Recife"), 15)?;
        let stations: Vec<_> = ranking.iter().map(|r| r.station.as_str()).collect();
        assert_eq!(
            stations,
            [
                "Jaboatão (Cidade da Copa) - PCD",
                "Recife (Codecipe / Santo Amaro)",
                "Recife (Várzea)",
                "Olinda",
            ]
        );
        assert_eq!(ranking[2].accumulated_mm, 120.5);
        assert_eq!(ranking.iter().filter(|r| r.selected).count(), 2);

        let markers = dataset.map_markers("2022-05-15")?;
        let moreno = markers.iter().find(|m| m.municipality == "Moreno").unwrap();
        assert_eq!(moreno.deaths, 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_bad_period_is_validation_error() -> Result<(), Box<dyn std::error::Error>> {
        let dataset = Dataset::load(sample_sources(), &sample_config()).await?;
        for period in ["2022-05", "5/2022", "13/2022", "mai./2022"] {
            match dataset.monthly_ranking(period, None, 15) {
                Err(ChuvasError::Validation(err)) => assert_eq!(err.field, "period"),
                other => panic!("unexpected {other:?} for {period}"),
            }
        }
        Ok(())
    }

    #[tokio::test]
    async fn test_missing_families_fail_the_load() {
        let only_rain = SourceSet::new().with_rainfall(RawSource::utf8(
            "sheet",
            rainfall_sheet(&[rainfall_row("Recife", "mai./2022", &[], "0")]),
        ));
        match Dataset::load(only_rain, &sample_config()).await {
            Err(ChuvasError::DataUnavailable(DataUnavailable::NoMortalityYears)) => {}
            other => panic!("unexpected {other:?}"),
        }

        let only_deaths = SourceSet::new()
            .with_missing_rainfall("Chuvas/Chuvas18-21.csv")
            .with_mortality_year(2022, mortality_file("deaths", &[DeathRow::default()]));
        match Dataset::load(only_deaths, &sample_config()).await {
            Err(ChuvasError::DataUnavailable(DataUnavailable::NoRainfallSources)) => {}
            other => panic!("unexpected {other:?}"),
        }

        let unreadable_rain = SourceSet::new()
            .with_rainfall(RawSource::utf8("a", "Posto,1\nRecife,2\n"))
            .with_rainfall(RawSource::utf8("b", "Posto,1\nOlinda,2\n"))
            .with_mortality_year(2022, mortality_file("deaths", &[DeathRow::default()]));
        match Dataset::load(unreadable_rain, &sample_config()).await {
            Err(ChuvasError::DataUnavailable(DataUnavailable::NoRainfallSources)) => {}
            other => panic!("unexpected {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_invalid_config_is_rejected() {
        let config = ChuvasConfig::builder().first_year(2023).last_year(2018).build();
        match Dataset::load(sample_sources(), &config).await {
            Err(ChuvasError::Validation(err)) => assert_eq!(err.field, "last_year"),
            other => panic!("unexpected {other:?}"),
        }
    }
}
