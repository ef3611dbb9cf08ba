//! Positional parser for layout-preserved statement text.
//!
//! Expected rows (default offsets):
//!   0    5        14                                               63               80             95
//!   15Ene16Ene    PLAZA VEA SAN ISIDRO                             CONSUMO          1,250.00
//!   18Ene19Ene    AMAZON.COM                                       CONSUMO                         19.99

use statex_core::{Money, TransactionRecord};

use crate::normalize::{NumberFormat, normalize_amount, normalize_day_month};
use crate::parsers::{LineOutcome, MissReason};
use crate::profile::ColumnLayout;

#[derive(Debug, Clone)]
pub struct PositionalParser {
    layout: ColumnLayout,
    number_format: NumberFormat,
}

impl PositionalParser {
    pub fn new(layout: &ColumnLayout, number_format: NumberFormat) -> Self {
        Self {
            layout: layout.clone(),
            number_format,
        }
    }

    pub fn parse_line(&self, line: &str) -> LineOutcome {
        let l = &self.layout;

        let operation_type = l.operation_type.slice(line).trim();
        if !operation_type.contains(l.retain_marker.as_str()) {
            return LineOutcome::Filtered;
        }

        let posting_raw = l.posting_date.slice(line);
        let transaction_raw = l.transaction_date.slice(line);
        let (Some(posting_date), Some(transaction_date)) =
            (normalize_day_month(posting_raw), normalize_day_month(transaction_raw))
        else {
            return LineOutcome::Miss(MissReason::MalformedDate(format!("{posting_raw}{transaction_raw}")));
        };

        let description = l.description.slice(line).trim();
        if description.is_empty() {
            return LineOutcome::Miss(MissReason::EmptyDescription);
        }

        let first_raw = l.first_amount.slice(line);
        let second_raw = l.second_amount.slice(line);
        let (first, second) = match (
            normalize_amount(first_raw, self.number_format),
            normalize_amount(second_raw, self.number_format),
        ) {
            (Ok(first), Ok(second)) => (first, second),
            (Err(_), _) => return LineOutcome::Miss(MissReason::MalformedAmount(first_raw.trim().to_string())),
            (_, Err(_)) => return LineOutcome::Miss(MissReason::MalformedAmount(second_raw.trim().to_string())),
        };

        let record = TransactionRecord::new(
            posting_date,
            transaction_date,
            description,
            operation_type,
            first,
            l.first_currency,
        )
        .with_secondary(Money::new(l.second_currency, second));

        LineOutcome::Parsed(record)
    }
}
