use colored::Colorize;

use crate::core::model::resolve_category_or_fallback;
use crate::domain::{parse_hex_color, Category, DEFAULT_COLOR};

const BAR_GLYPH: &str = "█";

fn rgb_or_default(color: &str) -> (u8, u8, u8) {
    parse_hex_color(color)
        .or_else(|| parse_hex_color(DEFAULT_COLOR))
        .unwrap_or((148, 163, 184))
}

pub fn heading(title: &str) -> String {
    format!("=== {} ===", title).bold().to_string()
}

pub fn muted(text: &str) -> String {
    text.dimmed().to_string()
}

/// Two-cell block painted in `color`.
pub fn swatch(color: &str) -> String {
    let (r, g, b) = rgb_or_default(color);
    "■■".truecolor(r, g, b).to_string()
}

/// Category name painted in its category color. Names without a category
/// borrow the color of the catch-all (last) category.
pub fn badge(categories: &[Category], name: &str) -> String {
    let color = resolve_category_or_fallback(categories, name)
        .map(|category| category.color.as_str())
        .unwrap_or(DEFAULT_COLOR);
    let (r, g, b) = rgb_or_default(color);
    name.truecolor(r, g, b).bold().to_string()
}

/// Horizontal bar proportional to `value / max`, at most `width` cells.
pub fn bar(value: f64, max: f64, width: usize, color: &str) -> String {
    let cells = if max > 0.0 && value.is_finite() {
        ((value / max) * width as f64).round().clamp(0.0, width as f64) as usize
    } else {
        0
    };
    let cells = if value > 0.0 { cells.max(1) } else { cells };
    let (r, g, b) = rgb_or_default(color);
    BAR_GLYPH.repeat(cells).truecolor(r, g, b).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::table::visible_width;

    #[test]
    fn bars_scale_to_the_largest_value() {
        assert_eq!(visible_width(&bar(10.0, 10.0, 20, "#FF6B6B")), 20);
        assert_eq!(visible_width(&bar(5.0, 10.0, 20, "#FF6B6B")), 10);
        assert_eq!(visible_width(&bar(0.01, 10.0, 20, "#FF6B6B")), 1);
        assert_eq!(visible_width(&bar(0.0, 0.0, 20, "#FF6B6B")), 0);
    }

    #[test]
    fn badge_keeps_the_name_text() {
        let categories = crate::domain::default_categories();
        assert!(badge(&categories, "Groceries").contains("Groceries"));
        assert_eq!(visible_width(&swatch("not-a-color")), 2);
    }
}
