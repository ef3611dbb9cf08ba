//! Currencies that appear on the supported statements

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Currency of a transaction amount
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Currency {
    /// Peruvian sol
    #[serde(rename = "PEN")]
    Pen,
    /// US dollar
    #[serde(rename = "USD")]
    Usd,
    /// No currency column and no inference applied
    #[serde(rename = "unspecified")]
    Unspecified,
}

impl Currency {
    /// ISO-style code, empty for `Unspecified`
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Pen => "PEN",
            Currency::Usd => "USD",
            Currency::Unspecified => "",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Currency::Unspecified => f.write_str("unspecified"),
            other => f.write_str(other.code()),
        }
    }
}

impl FromStr for Currency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PEN" | "S/" | "S/." | "SOLES" => Ok(Currency::Pen),
            "USD" | "$" | "US$" | "DOLARES" => Ok(Currency::Usd),
            "" | "UNSPECIFIED" => Ok(Currency::Unspecified),
            other => Err(format!("unknown currency: {other}")),
        }
    }
}

/// An amount tagged with its currency
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Money {
    pub currency: Currency,
    pub amount: Decimal,
}

impl Money {
    pub fn new(currency: Currency, amount: Decimal) -> Self {
        Self { currency, amount }
    }
}
