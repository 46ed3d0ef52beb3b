//! High-level pipeline API.
//!
//! Combines every stage: loading, reshaping, feature selection,
//! normalization, feature engineering and chart rendering. Each stage takes
//! the previous stage's output by reference or value and returns a new one.
//!
//! # Example
//!
//! ```rust,ignore
//! use census::{run_report, PipelineOptions};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let summary = run_report(&PipelineOptions::default())?;
//!     println!("Wrote {} charts", summary.charts.len());
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::engineer::engineer_features;
use super::normalize::normalize;
use super::reshape::{reshape, HeaderPolicy};
use super::select::select_features;
use crate::error::PipelineResult;
use crate::logs::{log_info, log_info_indent, log_success};
use crate::models::{Borough, BoroughProfile};
use crate::parser::{load_census_file, RawTable};
use crate::report::{render_all, standard_charts, ChartStyle};

/// Export file name used when no input is given.
pub const DEFAULT_INPUT: &str = "NYC Census Jan-09-2020.csv";

/// Options for the reporting pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineOptions {
    /// Census export to read
    pub input: PathBuf,

    /// Directory charts are written to
    pub output_dir: PathBuf,

    /// How borough column headers are validated
    pub header_policy: HeaderPolicy,

    /// Chart appearance
    pub chart: ChartStyle,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            output_dir: PathBuf::from("."),
            header_policy: HeaderPolicy::Strict,
            chart: ChartStyle::default(),
        }
    }
}

/// Export file information
#[derive(Debug, Clone, Serialize)]
pub struct CsvInfo {
    pub encoding: String,
    pub delimiter: char,
    pub columns: usize,
    pub row_count: usize,
}

impl CsvInfo {
    fn of(raw: &RawTable) -> Self {
        Self {
            encoding: raw.encoding.clone(),
            delimiter: raw.delimiter,
            columns: raw.headers.len(),
            row_count: raw.rows.len(),
        }
    }
}

/// Engineered census data, ready to chart
#[derive(Debug, Clone, Serialize)]
pub struct CensusReport {
    /// One profile per borough, in canonical order
    pub profiles: Vec<BoroughProfile>,

    /// Number of attributes kept after reshaping
    pub attribute_count: usize,

    /// Export metadata
    pub csv_info: CsvInfo,
}

/// Result of a complete run
#[derive(Debug, Clone, Serialize)]
pub struct ReportSummary {
    pub report: CensusReport,

    /// Chart files written, in rendering order
    pub charts: Vec<PathBuf>,
}

/// Run loading through feature engineering on the configured input.
pub fn prepare_census(options: &PipelineOptions) -> PipelineResult<CensusReport> {
    log_info(format!("📖 Reading {}", options.input.display()));
    let raw = load_census_file(&options.input)?;
    prepare_raw(&raw, options.header_policy)
}

/// Run reshaping through feature engineering on an already loaded export.
pub fn prepare_raw(raw: &RawTable, policy: HeaderPolicy) -> PipelineResult<CensusReport> {
    let csv_info = CsvInfo::of(raw);
    log_success(format!("Detected encoding: {}", csv_info.encoding));
    log_success(format!("Detected separator: '{}'", format_delimiter(csv_info.delimiter)));
    log_success(format!("Read {} rows x {} columns", csv_info.row_count, csv_info.columns));

    log_info("🔄 Reshaping to one row per borough...");
    let table = reshape(raw, policy)?;
    let attribute_count = table.width();

    log_info("🎯 Selecting report metrics...");
    let selected = select_features(&table)?;

    log_info("🧹 Normalizing values...");
    let records = normalize(&selected)?;

    log_info("➕ Deriving metrics...");
    let profiles = engineer_features(records);
    for profile in &profiles {
        log_info_indent(describe(profile), 1);
    }

    Ok(CensusReport {
        profiles,
        attribute_count,
        csv_info,
    })
}

/// Run the whole pipeline and write the four standard charts.
pub fn run_report(options: &PipelineOptions) -> PipelineResult<ReportSummary> {
    let report = prepare_census(options)?;

    log_info(format!("📊 Rendering charts into {}", options.output_dir.display()));
    let specs = standard_charts(&report.profiles);
    let charts = render_all(&specs, &Borough::ALL, &options.output_dir, &options.chart)?;
    log_success(format!("{} charts written", charts.len()));

    Ok(ReportSummary { report, charts })
}

/// Format delimiter for display
fn format_delimiter(d: char) -> String {
    match d {
        '\t' => "TAB".to_string(),
        c => c.to_string(),
    }
}

fn describe(profile: &BoroughProfile) -> String {
    let fmt = |v: Option<f64>| v.map(|v| format!("{:.3}", v)).unwrap_or_else(|| "-".into());
    format!(
        "{}: density {}, women-owned share {}",
        profile.borough().key(),
        profile
            .pop_persqmi
            .map(|d| d.to_string())
            .unwrap_or_else(|| "-".into()),
        fmt(profile.womfirm_percent)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{PipelineError, SelectError};
    use crate::logs::{drain, LOG_BROADCASTER};
    use crate::parser::parse_str;
    use crate::transform::fixtures::{census_csv, census_csv_without};

    #[test]
    fn test_default_options() {
        let opts = PipelineOptions::default();
        assert_eq!(opts.input, PathBuf::from("NYC Census Jan-09-2020.csv"));
        assert_eq!(opts.output_dir, PathBuf::from("."));
        assert_eq!(opts.header_policy, HeaderPolicy::Strict);
    }

    #[test]
    fn test_prepare_raw_end_to_end() {
        let raw = parse_str(&census_csv(), ',', "utf-8").unwrap();
        let report = prepare_raw(&raw, HeaderPolicy::Strict).unwrap();

        let order: Vec<Borough> = report.profiles.iter().map(|p| p.borough()).collect();
        assert_eq!(order, Borough::ALL.to_vec());

        let manhattan = &report.profiles[3];
        assert_eq!(manhattan.record.perc_female, Some(0.525));
        assert_eq!(manhattan.pop_persqmi, Some(71_340));
        assert_eq!(manhattan.record.income_dol, Some(82_459.0));

        // Staten Island has no firm counts in the fixture
        assert_eq!(report.profiles[5].womfirm_percent, None);

        for p in &report.profiles {
            for v in [p.record.perc_female, p.record.perc_broadband].into_iter().flatten() {
                assert!((0.0..=1.0).contains(&v));
            }
        }
    }

    #[test]
    fn test_missing_feature_surfaces_name() {
        let csv = census_csv_without("Land area in square miles, 2010");
        let raw = parse_str(&csv, ',', "utf-8").unwrap();
        let err = prepare_raw(&raw, HeaderPolicy::Strict).unwrap_err();
        match err {
            PipelineError::Select(SelectError::MissingColumn(name)) => {
                assert_eq!(name, "Land area in square miles, 2010")
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_input_file() {
        let opts = PipelineOptions {
            input: PathBuf::from("no/such/census.csv"),
            ..PipelineOptions::default()
        };
        assert!(matches!(prepare_census(&opts), Err(PipelineError::Load(_))));
    }

    #[test]
    fn test_run_report_writes_charts() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("census.csv");
        std::fs::write(&input, census_csv()).unwrap();

        let opts = PipelineOptions {
            input,
            output_dir: dir.path().join("charts"),
            header_policy: HeaderPolicy::Strict,
            chart: ChartStyle {
                width: 500,
                height: 300,
                ..ChartStyle::default()
            },
        };

        let mut logs = LOG_BROADCASTER.subscribe();
        let summary = run_report(&opts).unwrap();

        assert_eq!(summary.charts.len(), 4);
        assert!(opts.output_dir.join("Homes with Broadband.png").is_file());
        assert!(opts.output_dir.join("Women per Square Mile.png").is_file());

        let messages: Vec<String> = drain(&mut logs).into_iter().map(|e| e.message).collect();
        assert!(messages.iter().any(|m| m.contains("4 charts written")));
    }
}
