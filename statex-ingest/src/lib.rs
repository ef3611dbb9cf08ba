//! statex-ingest: text sources, line classification and the two statement
//! parsing strategies.

pub mod classify;
pub mod error;
pub mod normalize;
pub mod parse;
pub mod parsers;
pub mod pdf;
pub mod pipeline;
pub mod profile;
pub mod source;

pub use error::{PipelineError, ProfileError};
pub use normalize::{NumberFormat, infer_currency_from_trailing_label, normalize_amount};
pub use parse::{ParseOutcome, parse_transactions};
pub use pdf::{LopdfSource, PdftotextSource};
pub use pipeline::run_pipeline;
pub use profile::{ColumnLayout, CurrencyInference, ParsingStrategy, Profile, Span, TokenizedLayout};
pub use source::{PlainTextSource, TextLayout, TextSource, extract_text};
