//! Derived per-borough metrics.

use crate::logs::{log_success, log_warning};
use crate::models::{BoroughProfile, CensusRecord};

/// Share of `part` in `total`.
///
/// A zero total is a degenerate ratio and yields `None`, as does a missing
/// operand.
pub fn share(part: Option<f64>, total: Option<f64>) -> Option<f64> {
    match (part, total) {
        (Some(p), Some(t)) if t != 0.0 => Some(p / t),
        _ => None,
    }
}

/// Whole people per square mile: `floor(population / area)`.
pub fn density(population: Option<f64>, area: Option<f64>) -> Option<i64> {
    share(population, area).map(|d| d.floor() as i64)
}

/// Add `womfirm_percent` and `pop_persqmi` to every record.
pub fn engineer_features(records: Vec<CensusRecord>) -> Vec<BoroughProfile> {
    let profiles: Vec<BoroughProfile> = records
        .into_iter()
        .map(|record| {
            let borough = record.borough.key();

            if record.allfirms == Some(0.0) {
                log_warning(format!("{}: no firms, women-owned share undefined", borough));
            }
            if record.area == Some(0.0) {
                log_warning(format!("{}: zero land area, density undefined", borough));
            }

            BoroughProfile {
                womfirm_percent: share(record.womenfirms, record.allfirms),
                pop_persqmi: density(record.population, record.area),
                record,
            }
        })
        .collect();

    log_success(format!("Derived metrics for {} boroughs", profiles.len()));
    profiles
}
