//! Lays a [`ReportDocument`] out on a fixed-size canvas.

use svg::{
    node::element::{Group, Line, Rectangle, Text},
    Document,
};
use thiserror::Error;

use crate::chart::escape_text;
use crate::report::document::{ReportDocument, REPORT_TITLE};

/// Largest canvas edge, in pixels, that rasterization accepts.
pub const MAX_CANVAS_EDGE: u32 = 32_767;

const FONT: &str = "Poppins, Arial, sans-serif";
const ACCENT: &str = "#0c7a4a";
const MUTED: &str = "#666";
const RULE: &str = "#eee";
const INK: &str = "#111";

const HEADER_HEIGHT: f64 = 64.0;
const BOX_GAP: f64 = 12.0;
const BOX_HEIGHT: f64 = 84.0;
const SECTION_TITLE: f64 = 26.0;
const ROW_HEIGHT: f64 = 34.0;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RasterError {
    #[error("report canvas {width}x{height} exceeds the {MAX_CANVAS_EDGE}px limit")]
    TooLarge { width: u32, height: u32 },
    #[error("report canvas has no area")]
    Empty,
}

/// The captured report: an SVG document with fixed pixel dimensions.
#[derive(Debug, Clone)]
pub struct Raster {
    pub width: u32,
    pub height: u32,
    pub document: Document,
}

pub trait Rasterizer {
    fn rasterize(&self, document: &ReportDocument) -> Result<Raster, RasterError>;
}

/// Draws the report at a fixed logical width, then scales it up.
#[derive(Debug, Clone, Copy)]
pub struct SvgRasterizer {
    pub logical_width: f64,
    pub padding: f64,
    pub scale: f64,
}

impl Default for SvgRasterizer {
    fn default() -> Self {
        Self {
            logical_width: 900.0,
            padding: 24.0,
            scale: 1.4,
        }
    }
}

impl Rasterizer for SvgRasterizer {
    fn rasterize(&self, document: &ReportDocument) -> Result<Raster, RasterError> {
        let (body, logical_height) = self.layout(document);
        let width = (self.logical_width * self.scale).round() as u32;
        let height = (logical_height * self.scale).ceil() as u32;
        if width == 0 || height == 0 {
            return Err(RasterError::Empty);
        }
        if width > MAX_CANVAS_EDGE || height > MAX_CANVAS_EDGE {
            return Err(RasterError::TooLarge { width, height });
        }

        let canvas = Document::new()
            .set("xmlns", "http://www.w3.org/2000/svg")
            .set("width", width)
            .set("height", height)
            .set("viewBox", (0.0, 0.0, self.logical_width, logical_height))
            .add(
                Rectangle::new()
                    .set("width", self.logical_width)
                    .set("height", logical_height)
                    .set("fill", "#ffffff"),
            )
            .add(body);

        tracing::debug!(width, height, "report rasterized");
        Ok(Raster {
            width,
            height,
            document: canvas,
        })
    }
}

impl SvgRasterizer {
    /// Returns the drawn body and the logical height it occupies.
    fn layout(&self, doc: &ReportDocument) -> (Group, f64) {
        let left = self.padding;
        let right = self.logical_width - self.padding;
        let content_width = right - left;
        let mut y = self.padding;
        let mut group = Group::new().set("font-family", FONT);

        // Header
        group = group
            .add(text(left, y + 26.0, 24, ACCENT, REPORT_TITLE).set("font-weight", 700))
            .add(text(
                left,
                y + 52.0,
                14,
                MUTED,
                &format!("Generated: {}", doc.generated_at.format("%Y-%m-%d %H:%M:%S")),
            ))
            .add(
                text(right, y + 26.0, 20, INK, &doc.money(doc.all_time_total))
                    .set("font-weight", 700)
                    .set("text-anchor", "end"),
            )
            .add(text(right, y + 52.0, 14, MUTED, "Total expenses").set("text-anchor", "end"));
        y += HEADER_HEIGHT + 14.0;
        group = group.add(rule(left, right, y));
        y += 14.0;

        // Summary boxes
        let count = doc.figures.len().max(1) as f64;
        let box_width = (content_width - BOX_GAP * (count - 1.0)) / count;
        for (index, figure) in doc.figures.iter().enumerate() {
            let x = left + index as f64 * (box_width + BOX_GAP);
            group = group
                .add(
                    Rectangle::new()
                        .set("x", x)
                        .set("y", y)
                        .set("width", box_width)
                        .set("height", BOX_HEIGHT)
                        .set("rx", 10)
                        .set("fill", figure.colors.0),
                )
                .add(
                    Rectangle::new()
                        .set("x", x)
                        .set("y", y + BOX_HEIGHT - 6.0)
                        .set("width", box_width)
                        .set("height", 6)
                        .set("fill", figure.colors.1),
                )
                .add(text(x + 12.0, y + 22.0, 13, "#fff", figure.title))
                .add(
                    text(x + 12.0, y + 48.0, 18, "#fff", &doc.money(figure.amount))
                        .set("font-weight", 700),
                )
                .add(text(x + 12.0, y + 70.0, 12, "#fff", figure.hint));
        }
        y += BOX_HEIGHT + 18.0;

        if let Some(chart) = &doc.chart {
            group = group.add(section_title(left, y, "Expenses distribution"));
            y += SECTION_TITLE;
            let chart_height = content_width * chart.height as f64 / chart.width as f64;
            group = group.add(
                chart
                    .document
                    .clone()
                    .set("x", left)
                    .set("y", y)
                    .set("width", content_width)
                    .set("height", chart_height),
            );
            y += chart_height + 18.0;
        }

        // Category table, both columns right-aligned.
        let name_edge = left + content_width / 2.0 - 8.0;
        let total_edge = right - 8.0;
        group = group.add(section_title(left, y, "Category details"));
        y += SECTION_TITLE;
        group = group
            .add(
                text(name_edge, y + 22.0, 14, INK, "Category")
                    .set("font-weight", 700)
                    .set("text-anchor", "end"),
            )
            .add(
                text(total_edge, y + 22.0, 14, INK, "Total")
                    .set("font-weight", 700)
                    .set("text-anchor", "end"),
            );
        y += ROW_HEIGHT;
        group = group.add(rule(left, right, y));
        for row in &doc.rows {
            group = group
                .add(text(name_edge, y + 22.0, 14, INK, &row.name).set("text-anchor", "end"))
                .add(
                    text(total_edge, y + 22.0, 14, INK, &doc.money(row.total))
                        .set("font-weight", 700)
                        .set("text-anchor", "end"),
                );
            y += ROW_HEIGHT;
            group = group.add(rule(left, right, y).set("stroke-dasharray", "4 4"));
        }

        // Footer
        y += 18.0;
        group = group.add(rule(left, right, y));
        y += 30.0;
        group = group
            .add(text(
                left,
                y,
                14,
                MUTED,
                &format!(
                    "Generated by BudgetWise — {}",
                    doc.generated_at.format("%Y-%m-%d")
                ),
            ))
            .add(
                text(
                    right,
                    y,
                    14,
                    INK,
                    &format!("Number of expenses: {}", doc.expense_count),
                )
                .set("font-weight", 700)
                .set("text-anchor", "end"),
            );
        y += 12.0 + self.padding;

        (group, y)
    }
}

fn text(x: f64, y: f64, size: u32, fill: &str, content: &str) -> Text {
    Text::new()
        .set("x", x)
        .set("y", y)
        .set("font-size", size)
        .set("fill", fill)
        .add(svg::node::Text::new(escape_text(content)))
}

fn section_title(x: f64, y: f64, title: &str) -> Text {
    text(x, y + 16.0, 15, INK, title).set("font-weight", 700)
}

fn rule(x1: f64, x2: f64, y: f64) -> Line {
    Line::new()
        .set("x1", x1)
        .set("y1", y)
        .set("x2", x2)
        .set("y2", y)
        .set("stroke", RULE)
        .set("stroke-width", 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::services::CategoryTotal;
    use crate::core::state::AppState;
    use crate::currency::CurrencyFormat;
    use crate::domain::DEFAULT_COLOR;
    use chrono::NaiveDate;

    fn document() -> ReportDocument {
        let now = NaiveDate::from_ymd_opt(2024, 6, 15)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap();
        ReportDocument::build(&AppState::default(), now, &CurrencyFormat::default())
    }

    #[test]
    fn canvas_is_scaled_from_logical_width() {
        let raster = SvgRasterizer::default().rasterize(&document()).unwrap();
        assert_eq!(raster.width, 1260);
        assert!(raster.height > 0);
        let markup = raster.document.to_string();
        assert!(markup.contains("BudgetWise — Expense Report"));
        assert!(markup.contains("Number of expenses: 0"));
    }

    #[test]
    fn each_category_adds_a_row() {
        let empty = SvgRasterizer::default().rasterize(&document()).unwrap();
        let mut doc = document();
        doc.rows = (0..10)
            .map(|i| CategoryTotal {
                name: format!("Row {}", i),
                total: 1.0,
                color: DEFAULT_COLOR.into(),
            })
            .collect();
        let taller = SvgRasterizer::default().rasterize(&doc).unwrap();
        let expected = (10.0 * ROW_HEIGHT * 1.4) as u32;
        assert!(taller.height.abs_diff(empty.height) <= expected + 1);
        assert!(taller.height > empty.height);
    }

    #[test]
    fn oversized_canvas_is_rejected() {
        let mut doc = document();
        doc.rows = (0..1000)
            .map(|i| CategoryTotal {
                name: format!("Row {}", i),
                total: 1.0,
                color: DEFAULT_COLOR.into(),
            })
            .collect();
        let err = SvgRasterizer::default().rasterize(&doc).unwrap_err();
        assert!(matches!(err, RasterError::TooLarge { width: 1260, .. }));
    }
}
