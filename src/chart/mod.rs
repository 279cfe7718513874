//! SVG chart rendering for the dashboard and the exported report.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use svg::{
    node::element::{Circle, Group, Line, Path, Rectangle, Text},
    Document,
};
use thiserror::Error;

use crate::errors::BudgetError;

pub const CHART_WIDTH: u32 = 900;
pub const CHART_HEIGHT: u32 = 420;

const MARGIN: f64 = 20.0;
const LEGEND_X: f64 = 460.0;
const LEGEND_ROW: f64 = 28.0;
const SWATCH: f64 = 16.0;
const FONT: &str = "Poppins, Arial, sans-serif";

/// Chart style chosen by the user; independent of the data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    #[default]
    Pie,
    Bar,
}

impl ChartKind {
    pub fn toggled(self) -> Self {
        match self {
            ChartKind::Pie => ChartKind::Bar,
            ChartKind::Bar => ChartKind::Pie,
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ChartKind::Pie => "pie",
            ChartKind::Bar => "bar",
        })
    }
}

impl FromStr for ChartKind {
    type Err = BudgetError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "pie" => Ok(ChartKind::Pie),
            "bar" => Ok(ChartKind::Bar),
            other => Err(BudgetError::validation(format!(
                "unknown chart kind `{}` (use pie or bar)",
                other
            ))),
        }
    }
}

/// One labelled value with its fill color.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub label: String,
    pub value: f64,
    pub color: String,
}

#[derive(Debug, Error, PartialEq)]
pub enum ChartError {
    #[error("nothing to chart")]
    Empty,
    #[error("invalid value for `{0}`")]
    InvalidValue(String),
    #[error("chart image has no area")]
    Degenerate,
}

/// A rendered chart with fixed pixel dimensions.
#[derive(Debug, Clone)]
pub struct ChartImage {
    pub kind: ChartKind,
    pub width: u32,
    pub height: u32,
    pub document: Document,
}

impl ChartImage {
    /// Checks the snapshot is usable before embedding it elsewhere.
    pub fn validate(&self) -> Result<(), ChartError> {
        if self.width == 0 || self.height == 0 {
            Err(ChartError::Degenerate)
        } else {
            Ok(())
        }
    }

    pub fn to_svg_string(&self) -> String {
        self.document.to_string()
    }
}

pub fn render_chart(kind: ChartKind, series: &[ChartSeries]) -> Result<ChartImage, ChartError> {
    if let Some(bad) = series.iter().find(|s| !s.value.is_finite() || s.value < 0.0) {
        return Err(ChartError::InvalidValue(bad.label.clone()));
    }
    let total: f64 = series.iter().map(|s| s.value).sum();
    if series.is_empty() || total <= 0.0 {
        return Err(ChartError::Empty);
    }

    let body = match kind {
        ChartKind::Pie => pie(series, total),
        ChartKind::Bar => bar(series),
    };
    let document = Document::new()
        .set("xmlns", "http://www.w3.org/2000/svg")
        .set("width", CHART_WIDTH)
        .set("height", CHART_HEIGHT)
        .set("viewBox", (0, 0, CHART_WIDTH, CHART_HEIGHT))
        .add(body);

    Ok(ChartImage {
        kind,
        width: CHART_WIDTH,
        height: CHART_HEIGHT,
        document,
    })
}

fn pie(series: &[ChartSeries], total: f64) -> Group {
    let height = CHART_HEIGHT as f64;
    let radius = height / 2.0 - MARGIN;
    let (cx, cy) = (MARGIN + radius, height / 2.0);

    let mut group = Group::new();
    let visible: Vec<&ChartSeries> = series.iter().filter(|s| s.value > 0.0).collect();
    if let [only] = visible.as_slice() {
        group = group.add(
            Circle::new()
                .set("cx", cx)
                .set("cy", cy)
                .set("r", radius)
                .set("fill", only.color.as_str())
                .set("stroke", "#fff")
                .set("stroke-width", 2),
        );
    } else {
        let mut angle = -90.0_f64;
        for slice in &visible {
            let sweep = slice.value / total * 360.0;
            group = group.add(
                Path::new()
                    .set("d", arc_path(cx, cy, radius, angle, angle + sweep))
                    .set("fill", slice.color.as_str())
                    .set("stroke", "#fff")
                    .set("stroke-width", 2),
            );
            angle += sweep;
        }
    }

    group.add(legend(series, total))
}

fn arc_path(cx: f64, cy: f64, r: f64, start_deg: f64, end_deg: f64) -> String {
    let point = |deg: f64| {
        let rad = deg.to_radians();
        (cx + r * rad.cos(), cy + r * rad.sin())
    };
    let (x1, y1) = point(start_deg);
    let (x2, y2) = point(end_deg);
    let large_arc = if end_deg - start_deg > 180.0 { 1 } else { 0 };
    format!(
        "M {:.2} {:.2} L {:.2} {:.2} A {:.2} {:.2} 0 {} 1 {:.2} {:.2} Z",
        cx, cy, x1, y1, r, r, large_arc, x2, y2
    )
}

fn legend(series: &[ChartSeries], total: f64) -> Group {
    let mut group = Group::new();
    for (row, item) in series.iter().enumerate() {
        let y = MARGIN + row as f64 * LEGEND_ROW;
        let pct = item.value / total * 100.0;
        group = group
            .add(
                Rectangle::new()
                    .set("x", LEGEND_X)
                    .set("y", y)
                    .set("width", SWATCH)
                    .set("height", SWATCH)
                    .set("rx", 3)
                    .set("fill", item.color.as_str()),
            )
            .add(label(
                LEGEND_X + SWATCH + 10.0,
                y + SWATCH - 3.0,
                14,
                format!("{} ({:.1}%)", item.label, pct),
            ));
    }
    group
}

fn bar(series: &[ChartSeries]) -> Group {
    let (width, height) = (CHART_WIDTH as f64, CHART_HEIGHT as f64);
    let left = MARGIN + 50.0;
    let bottom = height - MARGIN - 24.0;
    let plot_width = width - left - MARGIN;
    let plot_height = bottom - MARGIN;
    let max = series.iter().map(|s| s.value).fold(0.0_f64, f64::max);
    let slot = plot_width / series.len() as f64;
    let bar_width = slot * 0.6;

    let mut group = Group::new()
        .add(axis(left, MARGIN, left, bottom))
        .add(axis(left, bottom, width - MARGIN, bottom))
        .add(label(MARGIN, MARGIN + 12.0, 12, format!("{:.0}", max.ceil())))
        .add(label(left - 16.0, bottom, 12, "0".to_string()));

    for (index, item) in series.iter().enumerate() {
        let bar_height = if max > 0.0 {
            item.value / max * plot_height
        } else {
            0.0
        };
        let x = left + index as f64 * slot + (slot - bar_width) / 2.0;
        group = group
            .add(
                Rectangle::new()
                    .set("x", x)
                    .set("y", bottom - bar_height)
                    .set("width", bar_width)
                    .set("height", bar_height)
                    .set("fill", item.color.as_str()),
            )
            .add(label(x, bottom + 18.0, 14, item.label.clone()));
    }
    group
}

fn axis(x1: f64, y1: f64, x2: f64, y2: f64) -> Line {
    Line::new()
        .set("x1", x1)
        .set("y1", y1)
        .set("x2", x2)
        .set("y2", y2)
        .set("stroke", "#64748B")
        .set("stroke-width", 1)
}

fn label(x: f64, y: f64, size: u32, content: String) -> Text {
    Text::new()
        .set("x", x)
        .set("y", y)
        .set("font-family", FONT)
        .set("font-size", size)
        .set("fill", "#111")
        .add(svg::node::Text::new(escape_text(&content)))
}

/// Escapes XML special characters; text nodes are written verbatim.
pub fn escape_text(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}
