//! Wide-to-tidy reshaping.
//!
//! The export carries one column per borough:
//!
//! ```text
//! Fact | Fact Note | New York city, New York | Value Note for ... | Bronx County (Bronx Borough), New York | ...
//! ```
//!
//! After dropping the value notes the remaining eight columns are mapped by
//! position (label, annotation, six boroughs) and transposed so that every
//! borough becomes a row and every fact becomes a column.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ReshapeError;
use crate::logs::{log_info, log_warning};
use crate::models::{Borough, CensusTable};
use crate::parser::RawTable;

/// Label column, annotation column, then one column per borough.
pub const EXPECTED_COLUMNS: usize = 2 + Borough::ALL.len();

/// Attributes need at least this many non-empty borough values to be kept.
pub const MIN_NON_EMPTY: usize = 2;

const VALUE_NOTE_PREFIX: &str = "value note";

/// Exactly one non-nested parenthesized group.
static HEADER_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^()]*\(([^()]*)\)[^()]*$").expect("Invalid header pattern")
});

/// How borough column headers are checked against their position.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum HeaderPolicy {
    /// Every borough header must name the borough at its position.
    #[default]
    Strict,
    /// Trust the column order; mismatches are only logged.
    Positional,
}

/// Whether a header names an annotation ("Value Note for ...") column.
pub fn is_value_note(header: &str) -> bool {
    header
        .trim_start()
        .get(..VALUE_NOTE_PREFIX.len())
        .map(|prefix| prefix.eq_ignore_ascii_case(VALUE_NOTE_PREFIX))
        .unwrap_or(false)
}

/// Reduce a compound header to its short label.
///
/// `Kings County (Brooklyn Borough), New York` becomes `brooklyn`: the text
/// inside the parentheses, lower-cased, without its last word. Headers that
/// do not contain exactly one `(...)` group yield `None`.
pub fn short_label(header: &str) -> Option<String> {
    let caps = HEADER_PATTERN.captures(header.trim())?;
    let inner = caps.get(1)?.as_str().trim().to_lowercase();
    if inner.is_empty() {
        return None;
    }

    let label = match inner.rsplit_once(' ') {
        Some((head, _)) => head.trim_end().to_string(),
        None => inner,
    };
    Some(label)
}

/// Whether a column header names the given borough.
pub fn header_matches(header: &str, borough: Borough) -> bool {
    match short_label(header) {
        Some(label) => label == borough.header_label(),
        None => {
            borough == Borough::Nyc
                && !header.contains('(')
                && header.trim().to_lowercase().starts_with(borough.header_label())
        }
    }
}

/// Turn the wide export into a table with one row per borough.
pub fn reshape(raw: &RawTable, policy: HeaderPolicy) -> Result<CensusTable, ReshapeError> {
    let kept: Vec<usize> = raw
        .headers
        .iter()
        .enumerate()
        .filter(|(_, h)| !is_value_note(h))
        .map(|(i, _)| i)
        .collect();

    log_info(format!(
        "Dropped {} value note columns",
        raw.headers.len() - kept.len()
    ));

    if kept.len() != EXPECTED_COLUMNS {
        return Err(ReshapeError::ColumnCount {
            expected: EXPECTED_COLUMNS,
            found: kept.len(),
        });
    }

    let label_col = kept[0];
    let borough_cols = &kept[2..];

    for (&col, borough) in borough_cols.iter().zip(Borough::ALL) {
        let header = &raw.headers[col];
        if header_matches(header, borough) {
            continue;
        }
        match policy {
            HeaderPolicy::Strict => {
                return Err(ReshapeError::MalformedHeader {
                    position: col,
                    header: header.clone(),
                    expected: borough.key().to_string(),
                });
            }
            HeaderPolicy::Positional => log_warning(format!(
                "Header '{}' mapped to '{}' by position",
                header,
                borough.key()
            )),
        }
    }

    let mut table = CensusTable::new();
    let mut unlabeled = 0;
    let mut sparse = 0;

    for row in &raw.rows {
        let label = cell(row, label_col);
        let values: Vec<Option<String>> = borough_cols
            .iter()
            .map(|&col| Some(cell(row, col)).filter(|v| !v.is_empty()).map(String::from))
            .collect();

        if label.is_empty() {
            if values.iter().any(Option::is_some) {
                unlabeled += 1;
            }
            continue;
        }

        if values.iter().flatten().count() < MIN_NON_EMPTY {
            sparse += 1;
            continue;
        }

        table.push_attribute(label, values);
    }

    if unlabeled > 0 {
        log_warning(format!("Dropped {} unlabeled rows with values", unlabeled));
    }
    log_info(format!(
        "Kept {} attributes, dropped {} with fewer than {} values",
        table.width(),
        sparse,
        MIN_NON_EMPTY
    ));

    Ok(table)
}

fn cell(row: &[String], col: usize) -> &str {
    row.get(col).map(|c| c.trim()).unwrap_or("")
}
