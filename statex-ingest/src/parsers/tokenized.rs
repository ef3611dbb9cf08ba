//! Tokenized parser for free-flowing statement text.
//!
//! Expected rows (country column variant):
//!   15Jan16Jan  COFFEE SHOP LIMA   PE CONSUMO  45.50
//!   17Jan 18Jan NETFLIX.COM        US CONSUMO  -12.90
//!
//! Without a country column an extra currency label may precede the amount:
//!   20Jan 21Jan AMAZON MKTPLACE    CONSUMO USD 19.99

use regex::{Captures, Regex};
use statex_core::{Currency, TransactionRecord};

use crate::error::ProfileError;
use crate::normalize::{NumberFormat, infer_currency_from_trailing_label, normalize_amount, normalize_day_month};
use crate::parsers::{LineOutcome, MissReason};
use crate::profile::{CurrencyInference, Profile, TokenizedLayout};

#[derive(Debug, Clone)]
pub struct TokenizedParser {
    txn_re: Regex,
    /// Same grammar without the currency label, tried when the label
    /// swallowed an operation marker
    unlabeled_re: Option<Regex>,
    operation_types: Vec<String>,
    country_column: bool,
    currency_inference: CurrencyInference,
    number_format: NumberFormat,
}

impl TokenizedParser {
    pub fn new(layout: &TokenizedLayout, profile: &Profile) -> Result<Self, ProfileError> {
        if profile.operation_types.is_empty() {
            return Err(ProfileError::NoOperationTypes(profile.name.clone()));
        }

        let mut ops: Vec<&str> = profile.operation_types.iter().map(String::as_str).collect();
        ops.sort_by_key(|op| std::cmp::Reverse(op.len()));
        let ops = ops.iter().map(|op| regex::escape(op)).collect::<Vec<_>>().join("|");

        let compile = |middle: String| {
            let pattern = [
                r"^(?P<post>\d{2}[A-Za-z]{3})\s*",
                r"(?P<trans>\d{2}[A-Za-z]{3})\s+",
                r"(?P<desc>\S.*?)",
                middle.as_str(),
                r"\s+(?P<amount>[-+]?(?:S/\.?|US\$|\$)?\s?[-+]?\d[\d.,]*)\s*$",
            ]
            .concat();
            Regex::new(&pattern).map_err(|source| ProfileError::Grammar {
                profile: profile.name.clone(),
                source,
            })
        };

        let (txn_re, unlabeled_re) = if layout.country_column {
            (compile(format!(r"\s+(?P<country>[A-Z]{{2}})\s+(?P<op>{ops})"))?, None)
        } else {
            (
                compile(format!(r"\s+(?P<op>{ops})(?:\s+(?P<label>[A-Za-z]+))?"))?,
                Some(compile(format!(r"\s+(?P<op>{ops})"))?),
            )
        };

        Ok(Self {
            txn_re,
            unlabeled_re,
            operation_types: profile.operation_types.clone(),
            country_column: layout.country_column,
            currency_inference: profile.currency_inference,
            number_format: profile.number_format,
        })
    }

    pub fn parse_line(&self, line: &str) -> LineOutcome {
        let caps = match self.txn_re.captures(line) {
            // "LUZ DEL SUR SERVICIO CONSUMO 120.00": the marker is CONSUMO
            Some(caps) if self.label_is_operation(&caps) => {
                self.unlabeled_re.as_ref().and_then(|re| re.captures(line))
            }
            other => other,
        };
        let Some(caps) = caps else {
            return LineOutcome::Miss(MissReason::GrammarMismatch);
        };

        let (Some(posting_date), Some(transaction_date)) =
            (normalize_day_month(&caps["post"]), normalize_day_month(&caps["trans"]))
        else {
            return LineOutcome::Miss(MissReason::MalformedDate(line.to_string()));
        };

        let description = caps["desc"].trim();
        if description.is_empty() {
            return LineOutcome::Miss(MissReason::EmptyDescription);
        }

        let amount = match normalize_amount(&caps["amount"], self.number_format) {
            Ok(a) => a,
            Err(_) => return LineOutcome::Miss(MissReason::MalformedAmount(caps["amount"].to_string())),
        };

        let operation_type = caps["op"].trim();
        let currency = self.currency_for(line, operation_type);

        let mut record =
            TransactionRecord::new(posting_date, transaction_date, description, operation_type, amount, currency);
        if let Some(country) = caps.name("country") {
            record = record.with_country(country.as_str());
        }
        LineOutcome::Parsed(record)
    }

    fn label_is_operation(&self, caps: &Captures<'_>) -> bool {
        caps.name("label")
            .is_some_and(|label| self.operation_types.iter().any(|op| op == label.as_str()))
    }

    fn currency_for(&self, line: &str, operation_type: &str) -> Currency {
        if self.country_column {
            return Currency::Unspecified;
        }
        match self.currency_inference {
            CurrencyInference::TrailingLabel => infer_currency_from_trailing_label(line, operation_type),
            CurrencyInference::Disabled => Currency::Unspecified,
        }
    }
}
