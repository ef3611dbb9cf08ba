//! Transaction record types produced by the extraction pipeline

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::currency::{Currency, Money};

/// One normalized statement line
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TransactionRecord {
    /// Day + month token the bank posted the line on (e.g. "15Jan")
    pub posting_date: String,
    /// Day + month token the purchase happened on
    pub transaction_date: String,
    /// Merchant / operation label, trimmed at the edges only
    pub description: String,
    /// Two uppercase letters, when the layout carries a country column
    pub country_code: Option<String>,
    /// Operation marker (CONSUMO, PAGO, ...)
    pub operation_type: String,
    /// Signed amount; negative means credit/reversal
    pub amount: Decimal,
    pub currency: Currency,
    /// Second amount column of dual-currency layouts
    pub secondary: Option<Money>,
}

impl TransactionRecord {
    /// Create a new single-amount record
    pub fn new(
        posting_date: impl Into<String>,
        transaction_date: impl Into<String>,
        description: impl Into<String>,
        operation_type: impl Into<String>,
        amount: Decimal,
        currency: Currency,
    ) -> Self {
        Self {
            posting_date: posting_date.into(),
            transaction_date: transaction_date.into(),
            description: description.into(),
            country_code: None,
            operation_type: operation_type.into(),
            amount,
            currency,
            secondary: None,
        }
    }

    pub fn with_country(mut self, country_code: impl Into<String>) -> Self {
        self.country_code = Some(country_code.into());
        self
    }

    pub fn with_secondary(mut self, secondary: Money) -> Self {
        self.secondary = Some(secondary);
        self
    }

    /// Amount recorded for `currency`, if this record carries one.
    ///
    /// Dual-column records report both columns, including an explicit zero.
    pub fn amount_in(&self, currency: Currency) -> Option<Decimal> {
        if self.currency == currency {
            return Some(self.amount);
        }
        self.secondary
            .filter(|m| m.currency == currency)
            .map(|m| m.amount)
    }

    /// Every currency this record carries, primary first
    pub fn currencies(&self) -> impl Iterator<Item = Currency> + '_ {
        std::iter::once(self.currency).chain(self.secondary.map(|m| m.currency))
    }

    /// Posting date resolved against a statement year
    pub fn posting_day(&self, year: i32) -> Option<NaiveDate> {
        day_month_to_date(&self.posting_date, year)
    }

    /// Transaction date resolved against a statement year
    pub fn transaction_day(&self, year: i32) -> Option<NaiveDate> {
        day_month_to_date(&self.transaction_date, year)
    }
}

/// Resolve a "DDMon" token such as "15Jan" or "03Dic".
///
/// Rows only carry day and month, so the year comes from the statement.
pub fn day_month_to_date(token: &str, year: i32) -> Option<NaiveDate> {
    let token = token.trim();
    if token.len() != 5 || !token.is_char_boundary(2) {
        return None;
    }
    let (day_str, month_str) = token.split_at(2);
    let day: u32 = day_str.parse().ok()?;

    let month = match month_str.to_ascii_lowercase().as_str() {
        "jan" | "ene" => 1,
        "feb" => 2,
        "mar" => 3,
        "apr" | "abr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "aug" | "ago" => 8,
        "sep" | "set" => 9,
        "oct" => 10,
        "nov" => 11,
        "dec" | "dic" => 12,
        _ => return None,
    };

    NaiveDate::from_ymd_opt(year, month, day)
}
