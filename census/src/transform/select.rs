//! Projection of the reshaped table onto the seven report metrics.

use crate::error::SelectError;
use crate::logs::log_success;
use crate::models::{CensusTable, Feature, SelectedRow};

/// Project the seven [`Feature`] columns, in order, under their short names.
///
/// All labels are checked before anything is projected; the first absent
/// one (in [`Feature::ALL`] order) is reported.
pub fn select_features(table: &CensusTable) -> Result<Vec<SelectedRow>, SelectError> {
    let mut indices = [0usize; 7];
    for (slot, feature) in indices.iter_mut().zip(Feature::ALL) {
        *slot = table
            .attribute_index(feature.source_label())
            .ok_or_else(|| SelectError::MissingColumn(feature.source_label().to_string()))?;
    }

    let rows = table
        .boroughs
        .iter()
        .zip(&table.cells)
        .map(|(&borough, cells)| SelectedRow {
            borough,
            values: indices.map(|idx| cells.get(idx).cloned().flatten()),
        })
        .collect();

    log_success(format!(
        "Selected {}",
        Feature::ALL.map(|f| f.short_name()).join(", ")
    ));

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Borough;

    fn table_with(labels: &[&str]) -> CensusTable {
        let mut table = CensusTable::new();
        table.push_attribute("Persons under 5 years, percent", vec![Some("6.5%".into()); 6]);
        for (i, label) in labels.iter().enumerate() {
            let values = Borough::ALL
                .iter()
                .map(|b| Some(format!("{}-{}", i, b.key())))
                .collect();
            table.push_attribute(*label, values);
        }
        table
    }

    #[test]
    fn test_select_in_feature_order() {
        let mut labels: Vec<&str> = Feature::ALL.iter().map(|f| f.source_label()).collect();
        labels.reverse();
        let rows = select_features(&table_with(&labels)).unwrap();

        assert_eq!(rows.len(), 6);
        assert_eq!(rows[0].borough, Borough::Nyc);
        assert_eq!(rows[5].borough, Borough::StatenIsland);
        // Area was pushed first after the filler column
        assert_eq!(rows[3].get(Feature::Area), Some("0-manhattan"));
        assert_eq!(rows[3].get(Feature::Population), Some("6-manhattan"));
    }

    #[test]
    fn test_missing_column_is_named() {
        let labels: Vec<&str> = Feature::ALL
            .iter()
            .filter(|f| **f != Feature::AllFirms)
            .map(|f| f.source_label())
            .collect();

        let err = select_features(&table_with(&labels)).unwrap_err();
        let SelectError::MissingColumn(name) = err;
        assert_eq!(name, "All firms, 2012");
    }

    #[test]
    fn test_empty_cells_stay_missing() {
        let labels: Vec<&str> = Feature::ALL.iter().map(|f| f.source_label()).collect();
        let mut table = table_with(&labels);
        let idx = table.attribute_index("Women-owned firms, 2012").unwrap();
        table.cells[2][idx] = None;

        let rows = select_features(&table).unwrap();
        assert_eq!(rows[2].get(Feature::WomenFirms), None);
        assert_eq!(rows[1].get(Feature::WomenFirms), Some("4-bronx"));
    }
}
