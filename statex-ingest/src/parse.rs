//! Strategy dispatch: classify the text, then hand every candidate line to
//! the parser the profile selects.

use serde::Serialize;
use statex_core::TransactionRecordSet;

use crate::classify::classify_lines;
use crate::error::ProfileError;
use crate::parsers::{LineOutcome, PositionalParser, TokenizedParser};
use crate::profile::{ParsingStrategy, Profile};

/// Records plus the yield counters of one parse
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ParseOutcome {
    pub records: TransactionRecordSet,
    /// Lines that passed the classifier
    pub candidates: usize,
    /// Candidate lines without a complete field tuple
    pub misses: usize,
    /// Complete lines outside the strategy's scope
    pub filtered: usize,
}

impl ParseOutcome {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

enum Strategy {
    Tokenized(TokenizedParser),
    Positional(PositionalParser),
}

impl Strategy {
    fn for_profile(profile: &Profile) -> Result<Self, ProfileError> {
        Ok(match &profile.strategy {
            ParsingStrategy::Tokenized(layout) => Strategy::Tokenized(TokenizedParser::new(layout, profile)?),
            ParsingStrategy::Positional(layout) => {
                Strategy::Positional(PositionalParser::new(layout, profile.number_format))
            }
        })
    }

    fn parse_line(&self, line: &str) -> LineOutcome {
        match self {
            Strategy::Tokenized(p) => p.parse_line(line),
            Strategy::Positional(p) => p.parse_line(line),
        }
    }
}

/// Parse extracted statement text into transaction records.
///
/// Lines that fail extraction are skipped and only show up in `misses`.
pub fn parse_transactions(text: &str, profile: &Profile) -> Result<ParseOutcome, ProfileError> {
    let strategy = Strategy::for_profile(profile)?;
    let lines = classify_lines(text, &profile.exclusion_markers);

    let mut out = ParseOutcome {
        candidates: lines.len(),
        ..ParseOutcome::default()
    };

    for (i, line) in lines.iter().enumerate() {
        match strategy.parse_line(line) {
            LineOutcome::Parsed(record) => out.records.push(record),
            LineOutcome::Miss(reason) => {
                out.misses += 1;
                log::debug!("{}: candidate {} skipped ({reason:?}): {line}", profile.name, i + 1);
            }
            LineOutcome::Filtered => out.filtered += 1,
        }
    }

    log::info!(
        "{}: {} records from {} candidate lines ({} skipped, {} filtered)",
        profile.name,
        out.records.len(),
        out.candidates,
        out.misses,
        out.filtered
    );
    Ok(out)
}
