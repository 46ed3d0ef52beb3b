//! Symbol stripping and numeric conversion of the selected metrics.

use serde_json::Value;

use super::operations::{apply_all, Operation};
use crate::error::NormalizeError;
use crate::logs::{log_success, log_warning};
use crate::models::{CensusRecord, Feature, SelectedRow};

/// Cleaning chain for a feature.
///
/// Percentages lose a trailing `%` and become fractions, income loses a
/// leading `$`. A missing symbol is not an error.
pub fn operations_for(feature: Feature) -> Vec<Operation> {
    let mut ops = vec![Operation::Trim];
    match feature {
        Feature::PercFemale | Feature::PercBroadband => {
            ops.push(Operation::StripSuffix { value: "%".into() });
            ops.push(Operation::ToNumber);
            ops.push(Operation::Divide { by: 100.0 });
        }
        Feature::IncomeDol => {
            ops.push(Operation::StripPrefix { value: "$".into() });
            ops.push(Operation::ToNumber);
        }
        _ => ops.push(Operation::ToNumber),
    }
    ops
}

/// Convert every selected row to numbers.
pub fn normalize(rows: &[SelectedRow]) -> Result<Vec<CensusRecord>, NormalizeError> {
    let chains: Vec<(Feature, Vec<Operation>)> = Feature::ALL
        .into_iter()
        .map(|f| (f, operations_for(f)))
        .collect();

    let mut records = Vec::with_capacity(rows.len());
    let mut missing = 0;

    for row in rows {
        let mut record = CensusRecord::for_borough(row.borough);

        for (feature, ops) in &chains {
            let raw = row.get(*feature);
            let cleaned = apply_all(ops, raw.map(Value::from).unwrap_or(Value::Null));

            let value = match cleaned {
                Value::Null => None,
                Value::Number(n) => n.as_f64(),
                _ => {
                    return Err(NormalizeError::InvalidNumber {
                        column: feature.short_name().to_string(),
                        borough: row.borough.key().to_string(),
                        value: raw.unwrap_or_default().to_string(),
                    })
                }
            };

            if let Some(v) = value {
                if feature.is_percent() && !(0.0..=1.0).contains(&v) {
                    return Err(NormalizeError::OutOfRange {
                        column: feature.short_name().to_string(),
                        borough: row.borough.key().to_string(),
                        value: v,
                    });
                }
            } else {
                missing += 1;
            }

            record.set(*feature, value);
        }

        records.push(record);
    }

    if missing > 0 {
        log_warning(format!("{} metric values are missing", missing));
    }
    log_success(format!("Normalized {} boroughs", records.len()));

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Borough;

    fn selected(borough: Borough, values: [&str; 7]) -> SelectedRow {
        SelectedRow {
            borough,
            values: values.map(|v| Some(v.to_string()).filter(|s| !s.is_empty())),
        }
    }

    #[test]
    fn test_normalize_manhattan() {
        let rows = vec![selected(
            Borough::Manhattan,
            ["1,628,706", "52.5%", "84.5%", "$82,459", "105,000", "255,000", "22.83"],
        )];
        let records = normalize(&rows).unwrap();
        let m = &records[0];

        assert_eq!(m.borough, Borough::Manhattan);
        assert_eq!(m.population, Some(1_628_706.0));
        assert_eq!(m.perc_female, Some(0.525));
        assert_eq!(m.perc_broadband, Some(0.845));
        assert_eq!(m.income_dol, Some(82_459.0));
        assert_eq!(m.area, Some(22.83));
    }

    #[test]
    fn test_missing_symbols_pass_through() {
        let rows = vec![selected(
            Borough::Queens,
            ["2,278,906", "51.5", "80%", "64,509", "1", "2", "108.53"],
        )];
        let records = normalize(&rows).unwrap();
        assert_eq!(records[0].perc_female, Some(0.515));
        assert_eq!(records[0].income_dol, Some(64_509.0));
    }

    #[test]
    fn test_flags_and_blanks_are_missing() {
        let rows = vec![selected(
            Borough::Bronx,
            ["1,432,132", "52.8%", "", "$38,467", "S", "X", "42.10"],
        )];
        let records = normalize(&rows).unwrap();
        assert_eq!(records[0].perc_broadband, None);
        assert_eq!(records[0].womenfirms, None);
        assert_eq!(records[0].allfirms, None);
    }

    #[test]
    fn test_percent_fraction_range() {
        let rows: Vec<SelectedRow> = ["0%", "100%", "37.25%"]
            .iter()
            .map(|&p| selected(Borough::Nyc, ["1", p, p, "$1", "1", "1", "1"]))
            .collect();
        for record in normalize(&rows).unwrap() {
            let v = record.perc_female.unwrap();
            assert!((0.0..=1.0).contains(&v));
        }
    }

    #[test]
    fn test_out_of_range_percent_rejected() {
        let rows = vec![selected(Borough::Nyc, ["1", "152%", "1%", "$1", "1", "1", "1"])];
        let err = normalize(&rows).unwrap_err();
        assert!(matches!(
            err,
            NormalizeError::OutOfRange { ref column, .. } if column == "perc_female"
        ));
    }

    #[test]
    fn test_garbage_is_invalid_number() {
        let rows = vec![selected(
            Borough::StatenIsland,
            ["about 476k", "51.3%", "1%", "$1", "1", "1", "1"],
        )];
        match normalize(&rows).unwrap_err() {
            NormalizeError::InvalidNumber { column, borough, value } => {
                assert_eq!(column, "population");
                assert_eq!(borough, "staten_island");
                assert_eq!(value, "about 476k");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_non_finite_text_is_invalid_number() {
        let cases = [
            (["NaN", "52%", "80%", "$1", "1", "2", "3"], "population", "NaN"),
            (["1", "inf%", "80%", "$1", "1", "2", "3"], "perc_female", "inf%"),
            (["1", "52%", "80%", "$1e999", "1", "2", "3"], "income_dol", "$1e999"),
        ];

        for (values, expected_column, expected_value) in cases {
            let rows = vec![selected(Borough::Bronx, values)];
            match normalize(&rows).unwrap_err() {
                NormalizeError::InvalidNumber { column, value, .. } => {
                    assert_eq!(column, expected_column);
                    assert_eq!(value, expected_value);
                }
                other => panic!("unexpected error: {other}"),
            }
        }
    }
}
