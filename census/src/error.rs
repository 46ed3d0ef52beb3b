//! Error types for the census reporting pipeline.
//!
//! One error enum per stage:
//!
//! - [`LoadError`] - reading and parsing the export
//! - [`ReshapeError`] - header layout and transposition
//! - [`SelectError`] - projection of the seven metrics
//! - [`NormalizeError`] - symbol stripping and number parsing
//! - [`ReportError`] - chart rendering
//! - [`PipelineError`] - top-level orchestration
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across stage boundaries.

use std::path::PathBuf;
use thiserror::Error;

// =============================================================================
// Loading Errors
// =============================================================================

/// Errors while reading the census export.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The input path does not exist.
    #[error("File not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    /// Content could not be decoded.
    #[error("Failed to decode content: {0}")]
    Encoding(String),

    /// Malformed delimited text.
    #[error("Invalid CSV at line {line}: {message}")]
    ParseError { line: u64, message: String },

    /// Empty file.
    #[error("CSV file is empty")]
    EmptyFile,

    /// Header row is blank.
    #[error("No headers found in CSV")]
    NoHeaders,
}

// =============================================================================
// Reshaping Errors
// =============================================================================

/// Errors while turning the wide export into one row per borough.
#[derive(Debug, Error)]
pub enum ReshapeError {
    /// Wrong number of columns once value notes are dropped.
    #[error("Expected {expected} columns after dropping value notes, found {found}")]
    ColumnCount { expected: usize, found: usize },

    /// A borough column header does not name the borough at its position.
    /// `position` is the zero-based column index in the file.
    #[error("Column {position} header '{header}' does not match borough '{expected}'")]
    MalformedHeader {
        position: usize,
        header: String,
        expected: String,
    },
}

// =============================================================================
// Selection Errors
// =============================================================================

/// Errors while projecting the reshaped table onto the report metrics.
#[derive(Debug, Error)]
pub enum SelectError {
    /// Required attribute absent after reshaping.
    #[error("Missing column: {0}")]
    MissingColumn(String),
}

// =============================================================================
// Normalization Errors
// =============================================================================

/// Errors while converting raw cells to numbers.
#[derive(Debug, Error)]
pub enum NormalizeError {
    /// Cell is neither empty, a census flag, nor a number.
    #[error("Invalid number for '{column}' ({borough}): '{value}'")]
    InvalidNumber {
        column: String,
        borough: String,
        value: String,
    },

    /// Percentage outside [0, 1] after scaling.
    #[error("Value {value} for '{column}' ({borough}) is not a fraction in [0, 1]")]
    OutOfRange {
        column: String,
        borough: String,
        value: f64,
    },
}

// =============================================================================
// Report Errors
// =============================================================================

/// Errors while rendering charts.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Title cannot be used as a file name.
    #[error("Invalid chart title: '{0}'")]
    InvalidTitle(String),

    /// Series length differs from the borough list.
    #[error("Series has {found} values for {expected} boroughs")]
    LengthMismatch { expected: usize, found: usize },

    /// Drawing backend failure.
    #[error("Drawing failed: {0}")]
    Drawing(String),

    /// Output directory error.
    #[error("Report IO error: {0}")]
    Io(#[from] std::io::Error),
}

// =============================================================================
// Pipeline Errors (top-level)
// =============================================================================

/// Top-level pipeline orchestration errors.
///
/// This is the error type returned by [`crate::transform::pipeline::run_report`].
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Loading error.
    #[error("Load error: {0}")]
    Load(#[from] LoadError),

    /// Reshaping error.
    #[error("Reshape error: {0}")]
    Reshape(#[from] ReshapeError),

    /// Selection error.
    #[error("Selection error: {0}")]
    Select(#[from] SelectError),

    /// Normalization error.
    #[error("Normalize error: {0}")]
    Normalize(#[from] NormalizeError),

    /// Report error.
    #[error("Report error: {0}")]
    Report(#[from] ReportError),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for loading.
pub type LoadResult<T> = Result<T, LoadError>;

/// Result type for reporting.
pub type ReportResult<T> = Result<T, ReportError>;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;
