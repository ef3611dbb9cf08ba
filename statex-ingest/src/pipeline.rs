//! End-to-end run for one document: extract, classify, parse.

use crate::error::PipelineError;
use crate::parse::{ParseOutcome, parse_transactions};
use crate::profile::Profile;
use crate::source::{TextSource, extract_text};

/// Run the pipeline for one document.
///
/// Decryption failures stop the run before any line is classified. A run
/// that yields no records is reported as `EmptyResult`, never as success.
pub fn run_pipeline(
    source: &dyn TextSource,
    bytes: &[u8],
    password: Option<&str>,
    profile: &Profile,
) -> Result<ParseOutcome, PipelineError> {
    if let Some(required) = profile.required_layout() {
        if source.layout() != required {
            return Err(PipelineError::LayoutUnavailable {
                profile: profile.name.clone(),
                source_name: source.name(),
                required,
                actual: source.layout(),
            });
        }
    }

    let text = extract_text(source, bytes, password)?;
    let outcome = parse_transactions(&text, profile)?;

    if outcome.is_empty() {
        return Err(PipelineError::EmptyResult {
            candidates: outcome.candidates,
            misses: outcome.misses,
        });
    }
    Ok(outcome)
}
