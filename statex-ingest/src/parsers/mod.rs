//! Line parsers for the two text-layout guarantees

pub mod positional;
pub mod tokenized;

use statex_core::TransactionRecord;

pub use positional::PositionalParser;
pub use tokenized::TokenizedParser;

/// What a parser made of one candidate line
#[derive(Debug, Clone, PartialEq)]
pub enum LineOutcome {
    Parsed(TransactionRecord),
    /// The line looked like a transaction but had no complete field tuple
    Miss(MissReason),
    /// Complete line outside the strategy's scope (e.g. a payment in positional mode)
    Filtered,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MissReason {
    GrammarMismatch,
    MalformedAmount(String),
    MalformedDate(String),
    EmptyDescription,
}
