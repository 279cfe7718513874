//! Splits a tall raster into printable A4 pages.

use svg::{node::element::SVG, Document};

use crate::report::document::REPORT_TITLE;
use crate::report::raster::Raster;

/// Page geometry in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageLayout {
    pub width: f64,
    pub height: f64,
    pub margin: f64,
}

impl PageLayout {
    /// A4 portrait with 24pt margins.
    pub const A4: PageLayout = PageLayout {
        width: 595.28,
        height: 841.89,
        margin: 24.0,
    };

    pub fn image_width(&self) -> f64 {
        self.width - self.margin * 2.0
    }

    pub fn usable_height(&self) -> f64 {
        self.height - self.margin * 2.0
    }
}

impl Default for PageLayout {
    fn default() -> Self {
        Self::A4
    }
}

/// A horizontal band of the raster and where it lands on its page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSlice {
    /// First raster row of the band.
    pub source_y: u32,
    pub source_height: u32,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Cuts a `raster_width` x `raster_height` canvas into page-sized bands.
///
/// The image is scaled to the page's inner width. When it fits the inner
/// height a single slice covers it; otherwise bands of
/// `floor(usable_height * raster_width / image_width)` rows are cut, the last
/// one shorter.
pub fn paginate(raster_width: u32, raster_height: u32, layout: &PageLayout) -> Vec<PageSlice> {
    if raster_width == 0 || raster_height == 0 {
        return Vec::new();
    }
    let image_width = layout.image_width();
    let ratio = raster_width as f64 / raster_height as f64;
    let image_height = image_width / ratio;

    if image_height <= layout.usable_height() {
        return vec![PageSlice {
            source_y: 0,
            source_height: raster_height,
            x: layout.margin,
            y: layout.margin,
            width: image_width,
            height: image_height,
        }];
    }

    let px_per_pt = raster_width as f64 / image_width;
    let band = ((layout.usable_height() * px_per_pt).floor() as u32).max(1);
    let mut slices = Vec::new();
    let mut source_y = 0;
    while source_y < raster_height {
        let source_height = band.min(raster_height - source_y);
        slices.push(PageSlice {
            source_y,
            source_height,
            x: layout.margin,
            y: layout.margin,
            width: image_width,
            height: source_height as f64 / px_per_pt,
        });
        source_y += source_height;
    }
    slices
}

/// Draws one page: the raster band clipped through a nested viewport.
pub fn render_page(raster: &Raster, slice: &PageSlice, layout: &PageLayout) -> Document {
    let viewport = SVG::new()
        .set("x", slice.x)
        .set("y", slice.y)
        .set("width", slice.width)
        .set("height", slice.height)
        .set(
            "viewBox",
            (0, slice.source_y, raster.width, slice.source_height),
        )
        .set("preserveAspectRatio", "xMinYMin meet")
        .add(raster.document.clone().set("x", 0).set("y", 0));

    Document::new()
        .set("xmlns", "http://www.w3.org/2000/svg")
        .set("width", format!("{}pt", layout.width))
        .set("height", format!("{}pt", layout.height))
        .set("viewBox", (0.0, 0.0, layout.width, layout.height))
        .add(viewport)
}

/// Printable HTML with one page per slice, separated by page breaks.
pub fn compose_html(raster: &Raster, slices: &[PageSlice], layout: &PageLayout) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str(&format!("<title>{}</title>\n", REPORT_TITLE));
    html.push_str(&format!(
        "<style>@page {{ size: A4 portrait; margin: 0; }} \
         body {{ margin: 0; }} \
         .page {{ width: {w}pt; height: {h}pt; page-break-after: always; }} \
         .page:last-child {{ page-break-after: auto; }}</style>\n",
        w = layout.width,
        h = layout.height
    ));
    html.push_str("</head>\n<body>\n");
    for (index, slice) in slices.iter().enumerate() {
        html.push_str(&format!(
            "<div class=\"page\" data-page=\"{}\">\n{}\n</div>\n",
            index + 1,
            render_page(raster, slice, layout)
        ));
    }
    html.push_str("</body>\n</html>\n");
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_canvas_fits_one_page() {
        let slices = paginate(1260, 1000, &PageLayout::A4);
        assert_eq!(slices.len(), 1);
        let only = slices[0];
        assert_eq!(only.source_height, 1000);
        assert!((only.width - 547.28).abs() < 1e-9);
        assert!((only.height - 547.28 * 1000.0 / 1260.0).abs() < 1e-9);
        assert_eq!((only.x, only.y), (24.0, 24.0));
    }

    #[test]
    fn tall_canvas_is_cut_into_bands() {
        let layout = PageLayout::A4;
        let slices = paginate(1260, 5000, &layout);
        let heights: Vec<u32> = slices.iter().map(|s| s.source_height).collect();
        assert_eq!(heights, vec![1827, 1827, 1346]);
        assert_eq!(slices[1].source_y, 1827);
        assert_eq!(heights.iter().sum::<u32>(), 5000);
        for slice in &slices {
            assert!(slice.height <= layout.usable_height() + 1e-9);
            let aspect = slice.width / slice.height;
            let source_aspect = 1260.0 / slice.source_height as f64;
            assert!((aspect - source_aspect).abs() < 1e-9);
        }
    }

    #[test]
    fn degenerate_canvas_has_no_pages() {
        assert!(paginate(0, 100, &PageLayout::A4).is_empty());
        assert!(paginate(100, 0, &PageLayout::A4).is_empty());
    }

    #[test]
    fn html_has_one_page_per_slice() {
        let raster = Raster {
            width: 1260,
            height: 5000,
            document: Document::new().set("width", 1260).set("height", 5000),
        };
        let slices = paginate(raster.width, raster.height, &PageLayout::A4);
        let html = compose_html(&raster, &slices, &PageLayout::A4);
        assert_eq!(html.matches("class=\"page\"").count(), 3);
        assert!(html.contains("viewBox=\"0 1827 1260 1827\""));
        assert!(html.contains("page-break-after: always"));
    }
}
