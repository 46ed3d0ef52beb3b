//! Domain models for the census reporting pipeline.
//!
//! This module contains the data structures that flow between stages:
//!
//! - [`Borough`] - The six fixed rows of every reshaped table
//! - [`Feature`] - The seven metrics selected for the report
//! - [`CensusTable`] - Reshaped form (one row per borough)
//! - [`SelectedRow`] - Feature form (seven raw cells per borough)
//! - [`CensusRecord`] - Normalized form (numbers)
//! - [`BoroughProfile`] - Engineered form (with derived metrics)

use serde::{Deserialize, Serialize};

// =============================================================================
// Borough
// =============================================================================

/// A row of the reshaped census table.
///
/// Variant order is the canonical left-to-right order of the export and
/// the order of every chart.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Borough {
    /// New York City as a whole.
    Nyc,
    Bronx,
    Brooklyn,
    Manhattan,
    Queens,
    StatenIsland,
}

impl Borough {
    /// All boroughs in canonical order.
    pub const ALL: [Borough; 6] = [
        Borough::Nyc,
        Borough::Bronx,
        Borough::Brooklyn,
        Borough::Manhattan,
        Borough::Queens,
        Borough::StatenIsland,
    ];

    /// Short row identifier.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Nyc => "nyc",
            Self::Bronx => "bronx",
            Self::Brooklyn => "brooklyn",
            Self::Manhattan => "manhattan",
            Self::Queens => "queens",
            Self::StatenIsland => "staten_island",
        }
    }

    /// Label drawn on the chart x-axis.
    pub fn chart_label(&self) -> &'static str {
        match self {
            Self::Nyc => "NYC (All Boroughs)",
            Self::Bronx => "Bronx",
            Self::Brooklyn => "Brooklyn",
            Self::Manhattan => "Manhattan",
            Self::Queens => "Queens",
            Self::StatenIsland => "Staten Island",
        }
    }

    /// Short label the export carries in this borough's column header.
    ///
    /// `Richmond County (Staten Island Borough), New York` reduces to
    /// `staten island`. The city-wide column has no parenthesized part and
    /// is matched on its leading text instead.
    pub fn header_label(&self) -> &'static str {
        match self {
            Self::Nyc => "new york city",
            Self::Bronx => "bronx",
            Self::Brooklyn => "brooklyn",
            Self::Manhattan => "manhattan",
            Self::Queens => "queens",
            Self::StatenIsland => "staten island",
        }
    }
}

impl std::fmt::Display for Borough {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

// =============================================================================
// Feature
// =============================================================================

/// One of the seven metrics the report is built from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    Population,
    PercFemale,
    PercBroadband,
    IncomeDol,
    WomenFirms,
    AllFirms,
    Area,
}

impl Feature {
    /// All features in projection order.
    pub const ALL: [Feature; 7] = [
        Feature::Population,
        Feature::PercFemale,
        Feature::PercBroadband,
        Feature::IncomeDol,
        Feature::WomenFirms,
        Feature::AllFirms,
        Feature::Area,
    ];

    /// Attribute label as it appears in the export (after trimming).
    pub fn source_label(&self) -> &'static str {
        match self {
            Self::Population => "Population estimates, July 1, 2018,  (V2018)",
            Self::PercFemale => "Female persons, percent",
            Self::PercBroadband => {
                "Households with a broadband Internet subscription, percent, 2014-2018"
            }
            Self::IncomeDol => "Median household income (in 2018 dollars), 2014-2018",
            Self::WomenFirms => "Women-owned firms, 2012",
            Self::AllFirms => "All firms, 2012",
            Self::Area => "Land area in square miles, 2010",
        }
    }

    /// Short identifier used after selection.
    pub fn short_name(&self) -> &'static str {
        match self {
            Self::Population => "population",
            Self::PercFemale => "perc_female",
            Self::PercBroadband => "perc_broadband",
            Self::IncomeDol => "income_dol",
            Self::WomenFirms => "womenfirms",
            Self::AllFirms => "allfirms",
            Self::Area => "area",
        }
    }

    /// Whether the raw value is a percentage to be scaled to a fraction.
    pub fn is_percent(&self) -> bool {
        matches!(self, Self::PercFemale | Self::PercBroadband)
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

// =============================================================================
// Reshaped table
// =============================================================================

/// Census data with one row per borough and one column per attribute.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CensusTable {
    /// Row labels, always [`Borough::ALL`] in order.
    pub boroughs: Vec<Borough>,
    /// Attribute labels (column headers).
    pub attributes: Vec<String>,
    /// Row-major cells; `None` for empty cells.
    pub cells: Vec<Vec<Option<String>>>,
}

impl CensusTable {
    /// Create an empty table with the canonical rows.
    pub fn new() -> Self {
        Self {
            boroughs: Borough::ALL.to_vec(),
            attributes: Vec::new(),
            cells: vec![Vec::new(); Borough::ALL.len()],
        }
    }

    /// Append an attribute column. `values` is aligned to `boroughs`.
    pub fn push_attribute(&mut self, label: impl Into<String>, values: Vec<Option<String>>) {
        self.attributes.push(label.into());
        for (row, value) in self.cells.iter_mut().zip(values) {
            row.push(value);
        }
    }

    /// Position of an attribute column.
    pub fn attribute_index(&self, label: &str) -> Option<usize> {
        self.attributes.iter().position(|a| a == label)
    }

    /// Cells of one attribute, aligned to `boroughs`.
    pub fn column(&self, label: &str) -> Option<Vec<Option<&str>>> {
        let idx = self.attribute_index(label)?;
        Some(
            self.cells
                .iter()
                .map(|row| row.get(idx).and_then(|c| c.as_deref()))
                .collect(),
        )
    }

    /// Number of attribute columns.
    pub fn width(&self) -> usize {
        self.attributes.len()
    }
}

impl Default for CensusTable {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Selected / normalized / engineered rows
// =============================================================================

/// The seven raw cells of one borough, in [`Feature::ALL`] order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SelectedRow {
    pub borough: Borough,
    pub values: [Option<String>; 7],
}

impl SelectedRow {
    /// Raw cell for a feature.
    pub fn get(&self, feature: Feature) -> Option<&str> {
        self.values[feature.index()].as_deref()
    }
}

/// Numeric metrics of one borough.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CensusRecord {
    pub borough: Borough,
    pub population: Option<f64>,
    /// Fraction in [0, 1].
    pub perc_female: Option<f64>,
    /// Fraction in [0, 1].
    pub perc_broadband: Option<f64>,
    /// Median household income in dollars.
    pub income_dol: Option<f64>,
    pub womenfirms: Option<f64>,
    pub allfirms: Option<f64>,
    /// Land area in square miles.
    pub area: Option<f64>,
}

impl CensusRecord {
    /// Empty record for a borough.
    pub fn for_borough(borough: Borough) -> Self {
        Self {
            borough,
            population: None,
            perc_female: None,
            perc_broadband: None,
            income_dol: None,
            womenfirms: None,
            allfirms: None,
            area: None,
        }
    }

    /// Numeric value of a feature.
    pub fn get(&self, feature: Feature) -> Option<f64> {
        match feature {
            Feature::Population => self.population,
            Feature::PercFemale => self.perc_female,
            Feature::PercBroadband => self.perc_broadband,
            Feature::IncomeDol => self.income_dol,
            Feature::WomenFirms => self.womenfirms,
            Feature::AllFirms => self.allfirms,
            Feature::Area => self.area,
        }
    }

    /// Set the numeric value of a feature.
    pub fn set(&mut self, feature: Feature, value: Option<f64>) {
        let slot = match feature {
            Feature::Population => &mut self.population,
            Feature::PercFemale => &mut self.perc_female,
            Feature::PercBroadband => &mut self.perc_broadband,
            Feature::IncomeDol => &mut self.income_dol,
            Feature::WomenFirms => &mut self.womenfirms,
            Feature::AllFirms => &mut self.allfirms,
            Feature::Area => &mut self.area,
        };
        *slot = value;
    }
}

/// A normalized record plus the derived metrics.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BoroughProfile {
    #[serde(flatten)]
    pub record: CensusRecord,
    /// Share of firms owned by women; `None` when undefined.
    pub womfirm_percent: Option<f64>,
    /// Whole people per square mile.
    pub pop_persqmi: Option<i64>,
}

impl BoroughProfile {
    pub fn borough(&self) -> Borough {
        self.record.borough
    }
}

// =============================================================================
// Tests
// =============================================================================
