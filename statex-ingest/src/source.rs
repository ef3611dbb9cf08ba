//! Text source adapters.
//!
//! A `TextSource` turns document bytes (plus an optional password) into one
//! newline-segmented text blob, or a typed failure. It also reports whether
//! the text keeps the fixed-width column alignment of the rendered page,
//! which the positional parser depends on.

use serde::{Deserialize, Serialize};
use statex_core::ExtractError;

/// Layout guarantee of the text a source produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextLayout {
    /// Tokens in reading order; column offsets are meaningless
    Flowing,
    /// Characters keep the page's column alignment
    FixedColumns,
}

pub trait TextSource {
    /// Extract the full text. Failures never carry partial text.
    fn extract(&self, bytes: &[u8], password: Option<&str>) -> Result<String, ExtractError>;

    /// Layout guarantee of `extract`'s output
    fn layout(&self) -> TextLayout;

    fn name(&self) -> &'static str;
}

/// Run a source, logging the outcome.
pub fn extract_text(source: &dyn TextSource, bytes: &[u8], password: Option<&str>) -> Result<String, ExtractError> {
    match source.extract(bytes, password) {
        Ok(text) => {
            log::info!(
                "{}: extracted {} lines ({:?} layout)",
                source.name(),
                text.lines().count(),
                source.layout()
            );
            Ok(text)
        }
        Err(e) => {
            log::warn!("{}: extraction failed: {e}", source.name());
            Err(e)
        }
    }
}

/// Already-extracted text (e.g. a `pdftotext` dump saved to disk)
#[derive(Debug, Clone, Copy)]
pub struct PlainTextSource {
    layout: TextLayout,
}

impl PlainTextSource {
    pub fn new(layout: TextLayout) -> Self {
        Self { layout }
    }
}

impl TextSource for PlainTextSource {
    fn extract(&self, bytes: &[u8], _password: Option<&str>) -> Result<String, ExtractError> {
        Ok(String::from_utf8_lossy(bytes).into_owned())
    }

    fn layout(&self) -> TextLayout {
        self.layout
    }

    fn name(&self) -> &'static str {
        "plain-text"
    }
}

/// Treat `Some("")` the same as no password at all.
pub(crate) fn effective_password(password: Option<&str>) -> Option<&str> {
    password.filter(|p| !p.is_empty())
}
