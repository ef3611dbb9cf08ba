//! statex-report: description rankings and CSV export

pub mod aggregate;
pub mod export;

pub use aggregate::{AggregateRow, CurrencyPartition, DEFAULT_TOP_N, aggregate_top, aggregate_top_by_currency, positive_only};
pub use export::{ExportError, ExportLayout, export_csv, write_csv};
