mod catalog;
mod chuvas;
mod config;
mod dataset;
mod error;
mod mortality;
mod rainfall;
mod reconcile;
mod report;
mod sources;
mod types;

#[cfg(test)]
mod test_support;

pub use chuvas::Chuvas;
pub use config::ChuvasConfig;
pub use dataset::Dataset;
pub use error::{ChuvasError, DataUnavailable, LookupError, ParseError, ValidationError};

pub use catalog::alias::{AliasTable, MUNICIPALITY_ALIASES, STATION_ALIASES};
pub use catalog::cause::{CauseCatalog, DESCRIPTION_NOT_FOUND};
pub use catalog::municipality::{LatLon, Municipality, MunicipalityCatalog, RMR_MUNICIPALITIES};

pub use sources::data_dir::DataDirectory;
pub use sources::error::SourceError;
pub use sources::raw_table::{RawTable, TextColumn};
pub use sources::{RawSource, SourceEncoding, SourceSet};

pub use mortality::normalizer::normalize_mortality;
pub use mortality::{parse_death_date, repair_encoding, MortalityLoad};
pub use rainfall::normalizer::{dedupe_first_wins, normalize_rainfall, reshape};
pub use rainfall::ranking::rank_monthly_rainfall;
pub use rainfall::{coerce_rainfall, parse_period_label, RainfallLoad, RainfallMonth};
pub use reconcile::{join, reconcile, retain_cause_family};
pub use report::{build_report, map_markers};

pub use types::period::{parse_iso_date, YearMonth};
pub use types::records::{MortalityRecord, RainfallObservation, ReconciledRecord};
pub use types::report::{
    CauseCount, ComparisonReport, MapMarker, MarkerScope, MunicipalityComparison,
    RankedCityRainfall,
};
pub use types::sex::Sex;
pub use types::warning::LoadWarning;
