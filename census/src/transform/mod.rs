//! Transformation module.
//!
//! This module turns the raw export into per-borough metrics:
//! - Reshape: wide export to one row per borough
//! - Select: projection onto the report metrics
//! - Operations / Normalize: symbol stripping and numeric conversion
//! - Engineer: derived ratios
//! - Pipeline: all stages end to end

pub mod engineer;
pub mod normalize;
pub mod operations;
pub mod pipeline;
pub mod reshape;
pub mod select;

#[cfg(test)]
pub(crate) mod fixtures;

pub use engineer::{density, engineer_features, share};
pub use normalize::{normalize, operations_for};
pub use operations::{apply_all, Operation, CENSUS_FLAGS};
pub use pipeline::*;
pub use reshape::{reshape, HeaderPolicy};
pub use select::select_features;
