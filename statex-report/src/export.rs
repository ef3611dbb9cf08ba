//! CSV export of a record set. The column set follows the active profile.

use statex_core::{Currency, TransactionRecord};
use statex_ingest::{ParsingStrategy, Profile};
use std::io;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportLayout {
    /// Posting Date, Transaction Date, Description, Country, Type, Amount
    CountryColumn,
    /// Posting Date, Transaction Date, Description, Type, Amount, Currency
    CurrencyColumn,
    /// Posting Date, Transaction Date, Description, Type, Amount <first>, Amount <second>
    DualAmount { first: Currency, second: Currency },
}

impl ExportLayout {
    pub fn for_profile(profile: &Profile) -> Self {
        match &profile.strategy {
            ParsingStrategy::Tokenized(layout) if layout.country_column => ExportLayout::CountryColumn,
            ParsingStrategy::Tokenized(_) => ExportLayout::CurrencyColumn,
            ParsingStrategy::Positional(columns) => ExportLayout::DualAmount {
                first: columns.first_currency,
                second: columns.second_currency,
            },
        }
    }

    pub fn headers(&self) -> Vec<String> {
        let mut headers: Vec<String> = ["Posting Date", "Transaction Date", "Description"]
            .map(String::from)
            .to_vec();
        match self {
            ExportLayout::CountryColumn => {
                headers.extend(["Country", "Type", "Amount"].map(String::from));
            }
            ExportLayout::CurrencyColumn => {
                headers.extend(["Type", "Amount", "Currency"].map(String::from));
            }
            ExportLayout::DualAmount { first, second } => {
                headers.push("Type".to_string());
                headers.push(format!("Amount {}", first.code()));
                headers.push(format!("Amount {}", second.code()));
            }
        }
        headers
    }

    fn row(&self, r: &TransactionRecord) -> Vec<String> {
        let mut row = vec![
            r.posting_date.clone(),
            r.transaction_date.clone(),
            r.description.clone(),
        ];
        match self {
            ExportLayout::CountryColumn => {
                row.push(r.country_code.clone().unwrap_or_default());
                row.push(r.operation_type.clone());
                row.push(r.amount.to_string());
            }
            ExportLayout::CurrencyColumn => {
                row.push(r.operation_type.clone());
                row.push(r.amount.to_string());
                row.push(r.currency.code().to_string());
            }
            ExportLayout::DualAmount { first, second } => {
                row.push(r.operation_type.clone());
                for currency in [first, second] {
                    row.push(r.amount_in(*currency).unwrap_or_default().to_string());
                }
            }
        }
        row
    }
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("writing CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("flushing CSV: {0}")]
    Io(#[from] io::Error),
    #[error("CSV output is not UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Write header + one row per record, no index column.
pub fn write_csv<W: io::Write>(writer: W, records: &[TransactionRecord], layout: ExportLayout) -> Result<(), ExportError> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(layout.headers())?;
    for r in records {
        wtr.write_record(layout.row(r))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Render the export as a UTF-8 string
pub fn export_csv(records: &[TransactionRecord], layout: ExportLayout) -> Result<String, ExportError> {
    let mut buf = Vec::new();
    write_csv(&mut buf, records, layout)?;
    Ok(String::from_utf8(buf)?)
}
