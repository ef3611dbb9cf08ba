//! statex-core: record types shared by the extraction pipeline and reporting

pub mod currency;
pub mod error;
pub mod record;
pub mod record_set;

pub use currency::{Currency, Money};
pub use error::{DecryptionError, ExtractError};
pub use record::{TransactionRecord, day_month_to_date};
pub use record_set::TransactionRecordSet;
