//! The main entry point: a long-lived client holding the current dataset
//! snapshot and answering queries against it.

use crate::config::ChuvasConfig;
use crate::dataset::Dataset;
use crate::error::ChuvasError;
use crate::sources::data_dir::DataDirectory;
use crate::sources::SourceSet;
use crate::types::report::{ComparisonReport, MapMarker, RankedCityRainfall};
use crate::types::warning::LoadWarning;
use bon::bon;
use log::info;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Client over one loaded [`Dataset`].
///
/// The dataset is held behind an `Arc` that queries clone, so a query never
/// holds the lock while it computes. [`Chuvas::reload`] builds the new
/// dataset first and only then swaps it in, so readers see either the old
/// snapshot or the new one.
///
/// # Examples
///
/// ```no_run
/// # use chuvas::{Chuvas, ChuvasConfig, ChuvasError};
/// # #[tokio::main]
/// # async fn main() -> Result<(), ChuvasError> {
/// let client = Chuvas::from_data_dir("./data", ChuvasConfig::default()).await?;
/// let report = client
///     .report()
///     .date("2022-05-01")
///     .city("Recife")
///     .call()
///     .await?;
/// println!("{} deaths, {:.2} mm on average", report.total_deaths, report.average_rain_mm);
/// # Ok(())
/// # }
/// ```
pub struct Chuvas {
    config: ChuvasConfig,
    dataset: RwLock<Arc<Dataset>>,
}

#[bon]
impl Chuvas {
    /// Loads a dataset from an in-memory source manifest.
    pub async fn from_sources(
        sources: SourceSet,
        config: ChuvasConfig,
    ) -> Result<Self, ChuvasError> {
        let dataset = Dataset::load(sources, &config).await?;
        Ok(Self {
            config,
            dataset: RwLock::new(Arc::new(dataset)),
        })
    }

    /// Reads the configured files under `root`, then loads them.
    pub async fn from_data_dir(
        root: impl AsRef<Path>,
        config: ChuvasConfig,
    ) -> Result<Self, ChuvasError> {
        let sources = DataDirectory::new(root).read_sources(&config).await?;
        Self::from_sources(sources, config).await
    }

    pub fn config(&self) -> &ChuvasConfig {
        &self.config
    }

    /// The current snapshot. It stays valid after a reload.
    pub async fn snapshot(&self) -> Arc<Dataset> {
        self.dataset.read().await.clone()
    }

    /// Warnings recorded while loading the current snapshot.
    pub async fn warnings(&self) -> Vec<LoadWarning> {
        self.snapshot().await.warnings().to_vec()
    }

    /// Replaces the snapshot with one built from `sources`.
    ///
    /// On error the current snapshot is left in place.
    pub async fn reload(&self, sources: SourceSet) -> Result<Arc<Dataset>, ChuvasError> {
        let fresh = Arc::new(Dataset::load(sources, &self.config).await?);
        let mut guard = self.dataset.write().await;
        *guard = fresh.clone();
        info!("Dataset snapshot replaced ({} records)", fresh.records().len());
        Ok(fresh)
    }

    /// Re-reads `root` and replaces the snapshot.
    pub async fn reload_data_dir(
        &self,
        root: impl AsRef<Path>,
    ) -> Result<Arc<Dataset>, ChuvasError> {
        let sources = DataDirectory::new(root).read_sources(&self.config).await?;
        self.reload(sources).await
    }

    /// Builds the comparison report for one date.
    ///
    /// # Arguments
    ///
    /// * `.date(&str)`: **Required.** `YYYY-MM-DD`.
    /// * `.city(&str)`: Optional. Restricts totals, causes and average to one municipality.
    /// * `.top_n(usize)`: Optional. Number of causes to list. Defaults to `report_top_n`
    ///   from the config.
    ///
    /// # Errors
    ///
    /// [`ChuvasError::Validation`] for a malformed date or a zero `top_n`;
    /// [`ChuvasError::DataUnavailable`] when nothing matches.
    #[builder]
    pub async fn report(
        &self,
        date: &str,
        city: Option<&str>,
        top_n: Option<usize>,
    ) -> Result<ComparisonReport, ChuvasError> {
        let top_n = top_n.unwrap_or(self.config.report_top_n);
        self.snapshot().await.report(date, city, top_n)
    }

    /// Ranks rain stations by accumulated rainfall for one month.
    ///
    /// # Arguments
    ///
    /// * `.month_year(&str)`: **Required.** `MM/YYYY`.
    /// * `.city(&str)`: Optional. Flags the matching entries; it does not filter.
    /// * `.top_n(usize)`: Optional. Defaults to `ranking_top_n` from the config.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use chuvas::{Chuvas, ChuvasConfig, ChuvasError};
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), ChuvasError> {
    /// let client = Chuvas::from_data_dir("./data", ChuvasConfig::default()).await?;
    /// let ranking = client
    ///     .query_by_month_city()
    ///     .month_year("06/2025")
    ///     .city("Olinda")
    ///     .call()
    ///     .await?;
    /// for entry in ranking {
    ///     println!("{:>2}. {} {:.1} mm", entry.rank, entry.station, entry.accumulated_mm);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    #[builder]
    pub async fn query_by_month_city(
        &self,
        month_year: &str,
        city: Option<&str>,
        top_n: Option<usize>,
    ) -> Result<Vec<RankedCityRainfall>, ChuvasError> {
        let top_n = top_n.unwrap_or(self.config.ranking_top_n);
        self.snapshot().await.monthly_ranking(month_year, city, top_n)
    }

    /// One marker per region municipality for `.date(&str)` (`YYYY-MM-DD`).
    #[builder]
    pub async fn map_markers(&self, date: &str) -> Result<Vec<MapMarker>, ChuvasError> {
        self.snapshot().await.map_markers(date)
    }
}
