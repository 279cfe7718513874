//! Money formatting for page output and reports.

use serde::{Deserialize, Serialize};

/// Locale-aware currency formatting preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyFormat {
    pub code: String,
    pub decimal_separator: char,
    pub grouping_separator: char,
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self::for_locale("en-US", "USD")
    }
}

impl CurrencyFormat {
    /// Builds separators from a BCP 47 tag; unknown tags use en-US rules.
    pub fn for_locale(language_tag: &str, code: &str) -> Self {
        let (decimal_separator, grouping_separator) = match language_tag {
            "de-DE" | "es-ES" | "it-IT" | "pt-BR" | "nl-NL" => (',', '.'),
            "fr-FR" => (',', ' '),
            "de-CH" => ('.', '\''),
            _ => ('.', ','),
        };
        Self {
            code: code.trim().to_uppercase(),
            decimal_separator,
            grouping_separator,
        }
    }

    /// `$1,234.50`; negatives as `-$5.00`.
    pub fn format(&self, amount: f64) -> String {
        let amount = if amount.is_finite() { amount } else { 0.0 };
        let precision = minor_units_for(&self.code);
        let body = format_number(self, amount.abs(), precision);
        let symbol = symbol_for(&self.code);
        let sign = if amount < 0.0 && body.chars().any(|c| c.is_ascii_digit() && c != '0') {
            "-"
        } else {
            ""
        };
        if symbol.chars().all(char::is_alphabetic) {
            format!("{}{} {}", sign, symbol, body)
        } else {
            format!("{}{}{}", sign, symbol, body)
        }
    }
}

pub fn symbol_for(code: &str) -> String {
    match code {
        "USD" => "$".into(),
        "EUR" => "€".into(),
        "GBP" => "£".into(),
        "JPY" => "¥".into(),
        "AUD" => "A$".into(),
        _ => code.into(),
    }
}

pub fn minor_units_for(code: &str) -> usize {
    match code {
        "JPY" => 0,
        "KWD" | "BHD" => 3,
        _ => 2,
    }
}

pub fn format_number(format: &CurrencyFormat, value: f64, precision: usize) -> String {
    let body = format!("{:.*}", precision, value);
    let (int_part, frac_part) = match body.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (body.as_str(), None),
    };
    let grouped = group_digits(int_part, format.grouping_separator);
    match frac_part {
        Some(frac) => format!("{}{}{}", grouped, format.decimal_separator, frac),
        None => grouped,
    }
}

fn group_digits(digits: &str, separator: char) -> String {
    let mut grouped = String::new();
    for (count, ch) in digits.chars().rev().enumerate() {
        if count != 0 && count % 3 == 0 {
            grouped.insert(0, separator);
        }
        grouped.insert(0, ch);
    }
    grouped
}

/// Percentage with one decimal, e.g. `75.0%`.
pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", if value.is_finite() { value } else { 0.0 })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_us_dollars() {
        let usd = CurrencyFormat::default();
        assert_eq!(usd.format(12.5), "$12.50");
        assert_eq!(usd.format(1234567.891), "$1,234,567.89");
        assert_eq!(usd.format(0.0), "$0.00");
        assert_eq!(usd.format(-5.0), "-$5.00");
        assert_eq!(usd.format(f64::NAN), "$0.00");
    }

    #[test]
    fn respects_locale_separators() {
        let eur = CurrencyFormat::for_locale("de-DE", "eur");
        assert_eq!(eur.format(1234.5), "€1.234,50");
        let chf = CurrencyFormat::for_locale("de-CH", "CHF");
        assert_eq!(chf.format(1000.0), "CHF 1'000.00");
        let yen = CurrencyFormat::for_locale("en-US", "JPY");
        assert_eq!(yen.format(1500.0), "¥1,500");
    }

    #[test]
    fn percent_has_one_decimal() {
        assert_eq!(format_percent(75.0), "75.0%");
        assert_eq!(format_percent(33.333), "33.3%");
    }
}
