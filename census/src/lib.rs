//! # Borough Census - NYC QuickFacts borough comparison
//!
//! Reads the U.S. Census QuickFacts export for New York City and its five
//! boroughs, derives per-borough metrics and renders bar charts comparing
//! them.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   CSV File  │────▶│   Parser    │────▶│  Transform  │────▶│  Engineer   │────▶│   Report    │
//! │  (wide fmt) │     │  (auto-enc) │     │ (tidy + num)│     │  (ratios)   │     │   (PNGs)    │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use census::{run_report, PipelineOptions};
//!
//! fn main() {
//!     let summary = run_report(&PipelineOptions::default()).unwrap();
//!     println!("Wrote {} charts", summary.charts.len());
//! }
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Hierarchical error types
//! - [`models`] - Domain models (Borough, Feature, CensusRecord)
//! - [`parser`] - CSV loading with auto-detection
//! - [`transform`] - Reshaping, normalization, derived metrics and pipeline
//! - [`report`] - Bar chart rendering
//! - [`logs`] - Progress log broadcasting

// Core modules
pub mod error;
pub mod logs;
pub mod models;

// Loading
pub mod parser;

// Transformation
pub mod transform;

// Charts
pub mod report;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{
    LoadError,
    NormalizeError,
    PipelineError,
    ReportError,
    ReshapeError,
    SelectError,
};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{
    Borough,
    BoroughProfile,
    CensusRecord,
    CensusTable,
    Feature,
    SelectedRow,
};

// =============================================================================
// Re-exports - CSV Loading
// =============================================================================

pub use parser::{
    decode_content,
    detect_delimiter,
    detect_encoding,
    load_census_file,
    parse_bytes_auto,
    parse_str,
    RawTable,
};

// =============================================================================
// Re-exports - Transformation stages
// =============================================================================

pub use transform::{
    engineer_features,
    normalize,
    reshape,
    select_features,
    HeaderPolicy,
    Operation,
};

// =============================================================================
// Re-exports - Pipeline
// =============================================================================

pub use transform::pipeline::{
    prepare_census,
    prepare_raw,
    run_report,
    CensusReport,
    CsvInfo,
    PipelineOptions,
    ReportSummary,
};

// =============================================================================
// Re-exports - Report
// =============================================================================

pub use report::{render_all, render_bar_chart, standard_charts, ChartSpec, ChartStyle};
