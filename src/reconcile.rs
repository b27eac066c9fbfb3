//! Left join of deaths onto rainfall, followed by the cause-family filter.

use crate::types::period::YearMonth;
use crate::types::records::{MortalityRecord, RainfallObservation, ReconciledRecord};
use log::info;
use std::collections::HashMap;

type JoinKey<'a> = (&'a str, YearMonth, u32);

/// Attaches to each death the rainfall its municipality measured that day.
///
/// Every death is kept. Deaths without a date, or without a matching
/// observation, carry `None`. Observations are expected to be unique per
/// key; if not, the first one wins.
pub fn join(
    deaths: Vec<MortalityRecord>,
    observations: &[RainfallObservation],
) -> Vec<ReconciledRecord> {
    let mut index: HashMap<JoinKey<'_>, &RainfallObservation> =
        HashMap::with_capacity(observations.len());
    for observation in observations {
        index
            .entry((observation.station.as_str(), observation.period, observation.day))
            .or_insert(observation);
    }

    let mut matched = 0usize;
    let reconciled: Vec<ReconciledRecord> = deaths
        .into_iter()
        .map(|death| {
            let hit = death
                .period()
                .zip(death.day())
                .and_then(|(period, day)| index.get(&(death.municipality.as_str(), period, day)))
                .map(|o| (o.rainfall_mm, o.accumulated_mm));
            if hit.is_some() {
                matched += 1;
            }
            ReconciledRecord {
                rainfall_mm: hit.map(|(mm, _)| mm),
                accumulated_mm: hit.map(|(_, total)| total),
                death,
            }
        })
        .collect();

    info!(
        "Joined {} deaths to rainfall, {matched} with a measurement",
        reconciled.len()
    );
    reconciled
}

/// Keeps the records whose cause code starts with `family`.
pub fn retain_cause_family(records: Vec<ReconciledRecord>, family: char) -> Vec<ReconciledRecord> {
    let before = records.len();
    let kept: Vec<ReconciledRecord> = records
        .into_iter()
        .filter(|r| r.cause_code().starts_with(family))
        .collect();
    info!(
        "Cause family '{family}' filter kept {} of {before} records",
        kept.len()
    );
    kept
}

/// Join, then filter. The join itself never looks at causes.
pub fn reconcile(
    deaths: Vec<MortalityRecord>,
    observations: &[RainfallObservation],
    family: char,
) -> Vec<ReconciledRecord> {
    retain_cause_family(join(deaths, observations), family)
}
