//! Bar chart rendering.
//!
//! Each chart compares one series across the boroughs and is saved as
//! `<title>.png`. Existing files are overwritten.
//!
//! ```text
//! ChartSpec { title, y_label, values } ──▶ render_bar_chart ──▶ <out_dir>/<title>.png
//! ```

use std::path::{Path, PathBuf};

use plotters::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{ReportError, ReportResult};
use crate::logs::log_success;
use crate::models::{Borough, BoroughProfile};
use crate::transform::engineer::share;

/// Chart titles of the standard report, in rendering order.
pub const WOMEN_PER_SQ_MI: &str = "Women per Square Mile";
pub const MEDIAN_INCOME: &str = "Median Annual Income (in dollars)";
pub const FEMALE_FIRMS_PER_SQ_MI: &str = "Female-Owned Firms per Square Mile";
pub const HOMES_WITH_BROADBAND: &str = "Homes with Broadband";

/// Visual settings shared by every chart
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChartStyle {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Bar colour as RGB
    pub bar_color: (u8, u8, u8),
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 600,
            bar_color: (0x04, 0x22, 0x63),
        }
    }
}

/// One chart: a titled series aligned to the borough order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChartSpec {
    pub title: String,
    pub y_label: String,
    /// One value per borough; `None` draws no bar
    pub values: Vec<Option<f64>>,
}

impl ChartSpec {
    pub fn new(
        title: impl Into<String>,
        y_label: impl Into<String>,
        values: Vec<Option<f64>>,
    ) -> Self {
        Self {
            title: title.into(),
            y_label: y_label.into(),
            values,
        }
    }
}

/// The four charts of the standard report.
pub fn standard_charts(profiles: &[BoroughProfile]) -> Vec<ChartSpec> {
    vec![
        ChartSpec::new(
            WOMEN_PER_SQ_MI,
            "Number of Women",
            series(profiles, |p| Some(p.record.perc_female? * p.pop_persqmi? as f64)),
        ),
        ChartSpec::new(MEDIAN_INCOME, "Income", series(profiles, |p| p.record.income_dol)),
        ChartSpec::new(
            FEMALE_FIRMS_PER_SQ_MI,
            "Firms",
            series(profiles, |p| share(p.record.womenfirms, p.record.area)),
        ),
        ChartSpec::new(
            HOMES_WITH_BROADBAND,
            "Percentage of Homes",
            series(profiles, |p| p.record.perc_broadband.map(|v| v * 100.0)),
        ),
    ]
}

fn series(
    profiles: &[BoroughProfile],
    metric: impl Fn(&BoroughProfile) -> Option<f64>,
) -> Vec<Option<f64>> {
    profiles.iter().map(metric).collect()
}

/// File a chart with this title is written to.
pub fn chart_path(out_dir: &Path, title: &str) -> ReportResult<PathBuf> {
    let trimmed = title.trim();
    if trimmed.is_empty()
        || trimmed == "."
        || trimmed == ".."
        || title.contains(['/', '\\'])
    {
        return Err(ReportError::InvalidTitle(title.to_string()));
    }
    Ok(out_dir.join(format!("{}.png", title)))
}

/// Render a vertical bar chart with one bar per borough.
///
/// Boroughs are drawn left to right in the order given.
pub fn render_bar_chart(
    spec: &ChartSpec,
    boroughs: &[Borough],
    out_dir: &Path,
    style: &ChartStyle,
) -> ReportResult<PathBuf> {
    if spec.values.len() != boroughs.len() || boroughs.is_empty() {
        return Err(ReportError::LengthMismatch {
            expected: boroughs.len(),
            found: spec.values.len(),
        });
    }

    let path = chart_path(out_dir, &spec.title)?;
    std::fs::create_dir_all(out_dir)?;

    let labels: Vec<&str> = boroughs.iter().map(|b| b.chart_label()).collect();
    let (y_min, y_max) = value_range(&spec.values);
    let (r, g, b) = style.bar_color;
    let bar_color = RGBColor(r, g, b);

    let root = BitMapBackend::new(&path, (style.width, style.height)).into_drawing_area();
    root.fill(&WHITE).map_err(drawing)?;

    let last = boroughs.len() as i32 - 1;
    let mut chart = ChartBuilder::on(&root)
        .caption(&spec.title, ("sans-serif", 28))
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(90)
        .build_cartesian_2d((0..last).into_segmented(), y_min..y_max)
        .map_err(drawing)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc("Borough")
        .y_desc(spec.y_label.as_str())
        .axis_desc_style(("sans-serif", 18))
        .x_labels(labels.len())
        .x_label_formatter(&|v| match v {
            SegmentValue::CenterOf(i) => labels
                .get(*i as usize)
                .map(|l| l.to_string())
                .unwrap_or_default(),
            _ => String::new(),
        })
        .y_label_formatter(&|v| format_tick(*v))
        .draw()
        .map_err(drawing)?;

    chart
        .draw_series(
            Histogram::vertical(&chart)
                .style(bar_color.filled())
                .margin(15)
                .data(
                    spec.values
                        .iter()
                        .enumerate()
                        .filter_map(|(i, v)| v.map(|v| (i as i32, v))),
                ),
        )
        .map_err(drawing)?;

    root.present().map_err(drawing)?;
    drop(chart);
    drop(root);

    log_success(format!("Saved chart {}", path.display()));
    Ok(path)
}

/// Render several charts into the same directory.
pub fn render_all(
    specs: &[ChartSpec],
    boroughs: &[Borough],
    out_dir: &Path,
    style: &ChartStyle,
) -> ReportResult<Vec<PathBuf>> {
    specs
        .iter()
        .map(|spec| render_bar_chart(spec, boroughs, out_dir, style))
        .collect()
}

/// Y-axis label text: whole numbers with thousands separators above 1000,
/// otherwise up to two decimals.
pub fn format_tick(value: f64) -> String {
    if value.abs() >= 1000.0 {
        let rounded = value.round() as i64;
        let digits = rounded.unsigned_abs().to_string();
        let mut grouped = String::new();
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(c);
        }
        if rounded < 0 {
            format!("-{}", grouped)
        } else {
            grouped
        }
    } else {
        let text = format!("{:.2}", value);
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

/// Axis range covering zero and every value with some headroom.
fn value_range(values: &[Option<f64>]) -> (f64, f64) {
    let present = values.iter().flatten().copied().filter(|v| v.is_finite());
    let (min, max) = present.fold((0.0f64, 0.0f64), |(lo, hi), v| (lo.min(v), hi.max(v)));

    let upper = if max > 0.0 { max * 1.1 } else { 1.0 };
    let lower = if min < 0.0 { min * 1.1 } else { 0.0 };
    (lower, upper)
}

fn drawing<E: std::fmt::Display>(err: E) -> ReportError {
    ReportError::Drawing(err.to_string())
}
