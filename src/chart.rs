use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::db::curves::PricingRow;

/// Colors cycled over the first bond's series.
const PALETTE: [&str; 6] = [
    "#636efa", "#00cc96", "#ab63fa", "#ffa15a", "#19d3f3", "#ff6692",
];

/// The second bond's series are drawn in a single contrasting color with a
/// larger marker so the two inputs are distinguishable at a glance.
const COMPARE_COLOR: &str = "#ef553b";

const HIGHLIGHT_COLOR: &str = "#ffd700";

const BASE_MARKER_SIZE: u32 = 8;
const COMPARE_MARKER_SIZE: u32 = 12;
const HIGHLIGHT_MARKER_SIZE: u32 = 12;

/// One scatter series: parallel x/y vectors plus draw attributes.
#[derive(Debug, Clone, Serialize)]
pub struct Series {
    pub name: String,
    pub color: String,
    pub marker_size: u32,
    pub x: Vec<NaiveDate>,
    pub y: Vec<f64>,
}

/// A chart point the operator clicked, held in session state until a
/// different point is clicked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectedPoint {
    pub x: NaiveDate,
    pub y: f64,
    pub label: String,
}

/// The full chart specification returned to the page renderer.
#[derive(Debug, Clone, Serialize)]
pub struct ChartSpec {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub series: Vec<Series>,
    pub highlight: Option<Series>,
}

/// Build the comparison chart: one series per distinct ISIN in each query
/// result, plus an optional highlight marker for the session selection.
///
/// An empty result simply contributes no series, so an unknown identifier
/// renders as a sparse (or empty) chart rather than an error.
pub fn comparison_chart(
    isin1: &str,
    rows1: &[PricingRow],
    isin2: &str,
    rows2: &[PricingRow],
    selection: Option<&SelectedPoint>,
) -> ChartSpec {
    let mut series = group_into_series(rows1, BASE_MARKER_SIZE, |i| {
        PALETTE[i % PALETTE.len()].to_string()
    });
    series.extend(group_into_series(rows2, COMPARE_MARKER_SIZE, |_| {
        COMPARE_COLOR.to_string()
    }));

    let highlight = selection.map(|p| Series {
        name: format!("Selected Point: {}", p.label),
        color: HIGHLIGHT_COLOR.to_string(),
        marker_size: HIGHLIGHT_MARKER_SIZE,
        x: vec![p.x],
        y: vec![p.y],
    });

    ChartSpec {
        title: format!("Yield Curve Comparison: {isin1} vs {isin2}"),
        x_label: "Maturity Date".to_string(),
        y_label: "Yield to Maturity".to_string(),
        series,
        highlight,
    }
}

/// Group rows into one series per distinct ISIN, preserving first-seen order.
fn group_into_series(
    rows: &[PricingRow],
    marker_size: u32,
    color_for: impl Fn(usize) -> String,
) -> Vec<Series> {
    let mut series: Vec<Series> = Vec::new();
    for row in rows {
        let idx = match series.iter().position(|s| s.name == row.isin) {
            Some(i) => i,
            None => {
                series.push(Series {
                    name: row.isin.clone(),
                    color: color_for(series.len()),
                    marker_size,
                    x: Vec::new(),
                    y: Vec::new(),
                });
                series.len() - 1
            }
        };
        series[idx].x.push(row.maturity_date);
        series[idx].y.push(row.yield_to_maturity);
    }
    series
}
