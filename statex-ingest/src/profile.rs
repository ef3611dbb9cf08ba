//! Parsing profiles: one per statement format variant.
//!
//! A profile picks the parsing strategy, its field layout, the exclusion
//! markers of the classifier and the currency-inference policy. Profiles
//! deserialize from the `[[profiles]]` tables of the CLI config.

use serde::{Deserialize, Serialize};
use statex_core::Currency;

use crate::normalize::NumberFormat;
use crate::source::TextLayout;

pub const COUNTRY_COLUMN: &str = "country-column";
pub const TRAILING_LABEL: &str = "trailing-label";
pub const FIXED_COLUMNS: &str = "fixed-columns";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    #[serde(default)]
    pub summary: String,
    pub strategy: ParsingStrategy,
    /// Tokens that drop an otherwise valid candidate line
    #[serde(default)]
    pub exclusion_markers: Vec<String>,
    /// Recognized operation markers; lines with any other marker are skipped
    #[serde(default = "default_operation_types")]
    pub operation_types: Vec<String>,
    #[serde(default)]
    pub currency_inference: CurrencyInference,
    #[serde(default)]
    pub number_format: NumberFormat,
}

/// How candidate lines are cut into fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ParsingStrategy {
    /// Whitespace-tolerant grammar over free-flowing text
    Tokenized(TokenizedLayout),
    /// Fixed character offsets over column-aligned text
    Positional(ColumnLayout),
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TokenizedLayout {
    /// Expect a two-letter country code before the operation marker
    #[serde(default)]
    pub country_column: bool,
}

/// Policy for layouts that carry no currency column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CurrencyInference {
    /// Guess from a label right before the amount (best-effort)
    TrailingLabel,
    /// Leave the currency unspecified
    #[default]
    Disabled,
}

/// Character range `[start, end)`; `end = None` runs to the end of the line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    #[serde(default)]
    pub end: Option<usize>,
}

impl Span {
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end: Some(end) }
    }

    pub const fn open(start: usize) -> Self {
        Self { start, end: None }
    }

    /// Slice `line` by characters, so multi-byte letters do not shift columns.
    /// Ranges past the end of the line yield an empty string.
    pub fn slice<'a>(&self, line: &'a str) -> &'a str {
        let byte_at = |chars: usize| line.char_indices().nth(chars).map(|(i, _)| i).unwrap_or(line.len());
        let start = byte_at(self.start);
        let end = match self.end {
            Some(end) if end > self.start => byte_at(end),
            Some(_) => start,
            None => line.len(),
        };
        &line[start..end]
    }
}

/// Column offsets of a fixed-width statement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnLayout {
    pub posting_date: Span,
    pub transaction_date: Span,
    pub description: Span,
    pub operation_type: Span,
    pub first_amount: Span,
    pub second_amount: Span,
    /// Only lines whose operation column contains this marker are kept
    pub retain_marker: String,
    pub first_currency: Currency,
    pub second_currency: Currency,
}

impl Default for ColumnLayout {
    fn default() -> Self {
        Self {
            posting_date: Span::new(0, 5),
            transaction_date: Span::new(5, 14),
            description: Span::new(14, 63),
            operation_type: Span::new(63, 80),
            first_amount: Span::new(80, 95),
            second_amount: Span::open(95),
            retain_marker: "CONSUMO".to_string(),
            first_currency: Currency::Pen,
            second_currency: Currency::Usd,
        }
    }
}

fn default_operation_types() -> Vec<String> {
    ["CONSUMO", "PAGO", "SERVICIO"].map(String::from).to_vec()
}

impl Profile {
    /// Tokenized lines with a country column; payment acknowledgments excluded
    pub fn country_column() -> Self {
        Self {
            name: COUNTRY_COLUMN.to_string(),
            summary: "tokenized, country code before the operation marker, PAGO lines excluded".to_string(),
            strategy: ParsingStrategy::Tokenized(TokenizedLayout { country_column: true }),
            exclusion_markers: vec!["PAGO".to_string()],
            operation_types: default_operation_types(),
            currency_inference: CurrencyInference::Disabled,
            number_format: NumberFormat::default(),
        }
    }

    /// Tokenized lines without a country column; currency guessed from a trailing label
    pub fn trailing_label() -> Self {
        Self {
            name: TRAILING_LABEL.to_string(),
            summary: "tokenized, no country column, USD when a label precedes the amount".to_string(),
            strategy: ParsingStrategy::Tokenized(TokenizedLayout { country_column: false }),
            exclusion_markers: Vec::new(),
            operation_types: default_operation_types(),
            currency_inference: CurrencyInference::TrailingLabel,
            number_format: NumberFormat::default(),
        }
    }

    /// Layout-preserved text with soles and dollars columns; consumption only
    pub fn fixed_columns() -> Self {
        Self {
            name: FIXED_COLUMNS.to_string(),
            summary: "positional, PEN and USD amount columns, CONSUMO lines only".to_string(),
            strategy: ParsingStrategy::Positional(ColumnLayout::default()),
            exclusion_markers: Vec::new(),
            operation_types: default_operation_types(),
            currency_inference: CurrencyInference::Disabled,
            number_format: NumberFormat::default(),
        }
    }

    pub fn builtin() -> Vec<Profile> {
        vec![Self::country_column(), Self::trailing_label(), Self::fixed_columns()]
    }

    /// Look a profile up by name; configured profiles shadow built-in ones.
    pub fn find(name: &str, configured: &[Profile]) -> Option<Profile> {
        configured
            .iter()
            .find(|p| p.name == name)
            .cloned()
            .or_else(|| Self::builtin().into_iter().find(|p| p.name == name))
    }

    /// Text layout the strategy depends on, if any
    pub fn required_layout(&self) -> Option<TextLayout> {
        match self.strategy {
            ParsingStrategy::Tokenized(_) => None,
            ParsingStrategy::Positional(_) => Some(TextLayout::FixedColumns),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_slices_by_chars() {
        let line = "15EneÑANDU";
        assert_eq!(Span::new(0, 5).slice(line), "15Ene");
        assert_eq!(Span::new(5, 8).slice(line), "ÑAN");
        assert_eq!(Span::open(8).slice(line), "DU");
        assert_eq!(Span::new(20, 30).slice(line), "");
        assert_eq!(Span::open(40).slice(line), "");
    }

    #[test]
    fn test_find_prefers_configured() {
        let mut custom = Profile::country_column();
        custom.exclusion_markers.clear();

        let found = Profile::find(COUNTRY_COLUMN, &[custom.clone()]).unwrap();
        assert_eq!(found, custom);
        assert_eq!(Profile::find(FIXED_COLUMNS, &[]).unwrap(), Profile::fixed_columns());
        assert!(Profile::find("missing", &[]).is_none());
    }

    #[test]
    fn test_profile_from_toml() {
        let src = r#"
name = "bbva-usd"
exclusion_markers = ["ABONO"]
currency_inference = "trailing_label"

[strategy]
kind = "tokenized"

[number_format]
decimal = ","
thousands = "."
"#;
        let profile: Profile = toml::from_str(src).unwrap();
        assert_eq!(profile.strategy, ParsingStrategy::Tokenized(TokenizedLayout { country_column: false }));
        assert_eq!(profile.operation_types, default_operation_types());
        assert_eq!(profile.currency_inference, CurrencyInference::TrailingLabel);
        assert_eq!(profile.number_format, NumberFormat::continental());
        assert_eq!(profile.required_layout(), None);
    }

    #[test]
    fn test_positional_profile_partial_override() {
        let src = r#"
name = "narrow"
[strategy]
kind = "positional"
retain_marker = "CARGO"
first_amount = { start = 70, end = 85 }
"#;
        let profile: Profile = toml::from_str(src).unwrap();
        let ParsingStrategy::Positional(layout) = &profile.strategy else {
            panic!("expected positional strategy");
        };
        assert_eq!(layout.retain_marker, "CARGO");
        assert_eq!(layout.first_amount, Span::new(70, 85));
        assert_eq!(layout.description, Span::new(14, 63));
        assert_eq!(profile.required_layout(), Some(TextLayout::FixedColumns));
    }
}
