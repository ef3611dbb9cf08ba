//! Field normalization: amounts, day-month tokens and currency inference

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use statex_core::Currency;
use std::str::FromStr;
use thiserror::Error;

/// Currency symbols a statement may print in front of an amount, longest first.
const CURRENCY_PREFIXES: &[&str] = &["S/.", "S/", "US$", "USD", "PEN", "$"];

/// Separator convention of the numbers on a statement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NumberFormat {
    pub decimal: char,
    pub thousands: char,
}

impl Default for NumberFormat {
    /// `1,250.00`
    fn default() -> Self {
        Self {
            decimal: '.',
            thousands: ',',
        }
    }
}

impl NumberFormat {
    /// `1.250,00`
    pub fn continental() -> Self {
        Self {
            decimal: ',',
            thousands: '.',
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    #[error("malformed amount: {0:?}")]
    Malformed(String),
}

/// Parse a statement amount into a signed decimal.
///
/// An empty (or whitespace-only) field is zero, not an error.
pub fn normalize_amount(raw: &str, format: NumberFormat) -> Result<Decimal, AmountError> {
    let s = raw.trim();
    if s.is_empty() {
        return Ok(Decimal::ZERO);
    }

    let (outer, rest) = split_sign(s);
    let rest = strip_currency_prefix(rest).trim_start();

    // "S/ -45.50" carries its sign after the symbol; only one sign is allowed
    let (inner, rest) = split_sign(rest);
    let negative = match (outer, inner) {
        (Some(_), Some(_)) => return Err(AmountError::Malformed(raw.to_string())),
        (Some(neg), None) | (None, Some(neg)) => neg,
        (None, None) => false,
    };

    let cleaned: String = rest
        .chars()
        .filter(|c| *c != format.thousands)
        .map(|c| if c == format.decimal { '.' } else { c })
        .collect();

    if !is_plain_number(&cleaned) {
        return Err(AmountError::Malformed(raw.to_string()));
    }

    let value = Decimal::from_str(&cleaned).map_err(|_| AmountError::Malformed(raw.to_string()))?;
    Ok(if negative { -value } else { value })
}

/// Leading sign, if any: `Some(true)` for minus.
fn split_sign(s: &str) -> (Option<bool>, &str) {
    if let Some(rest) = s.strip_prefix('-') {
        (Some(true), rest.trim_start())
    } else if let Some(rest) = s.strip_prefix('+') {
        (Some(false), rest.trim_start())
    } else {
        (None, s)
    }
}

fn strip_currency_prefix(s: &str) -> &str {
    CURRENCY_PREFIXES
        .iter()
        .find_map(|prefix| s.strip_prefix(prefix))
        .unwrap_or(s)
}

fn is_plain_number(s: &str) -> bool {
    let mut digits = 0;
    let mut points = 0;
    for c in s.chars() {
        match c {
            '0'..='9' => digits += 1,
            '.' => points += 1,
            _ => return false,
        }
    }
    digits > 0 && points <= 1
}

/// Trim a day-month token and check its shape: two digits, three letters.
pub fn normalize_day_month(raw: &str) -> Option<String> {
    let token = raw.trim();
    let bytes = token.as_bytes();
    let well_formed = bytes.len() == 5
        && bytes[..2].iter().all(u8::is_ascii_digit)
        && bytes[2..].iter().all(u8::is_ascii_alphabetic);
    well_formed.then(|| token.to_string())
}

/// Best-effort currency guess for layouts without a currency column.
///
/// A bare alphabetic label sitting right before the final amount (and
/// distinct from the operation marker) is read as a currency name when it
/// is one (`PEN`, `SOLES`, `USD`, ...); any other label means dollars.
/// Lines without such a label are read as soles.
pub fn infer_currency_from_trailing_label(line: &str, operation_type: &str) -> Currency {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let [.., label, amount] = tokens.as_slice() else {
        return Currency::Pen;
    };

    let amount_like = amount.chars().any(|c| c.is_ascii_digit());
    let bare_label = label.chars().all(char::is_alphabetic) && !label.eq_ignore_ascii_case(operation_type);
    if !(amount_like && bare_label) {
        return Currency::Pen;
    }

    match label.parse::<Currency>() {
        Ok(Currency::Pen) => Currency::Pen,
        _ => Currency::Usd,
    }
}
