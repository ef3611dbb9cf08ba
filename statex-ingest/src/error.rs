use statex_core::{DecryptionError, ExtractError};
use thiserror::Error;

use crate::source::TextLayout;

/// A profile that cannot be turned into a parser
#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("profile {0:?} lists no operation types")]
    NoOperationTypes(String),
    #[error("profile {profile:?} produced an invalid grammar: {source}")]
    Grammar {
        profile: String,
        #[source]
        source: regex::Error,
    },
}

/// Request-level outcome that is not a usable record set
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Decryption(DecryptionError),
    #[error(transparent)]
    Extract(ExtractError),
    #[error("profile {profile:?} needs {required:?} text but {source_name} yields {actual:?}")]
    LayoutUnavailable {
        profile: String,
        source_name: &'static str,
        required: TextLayout,
        actual: TextLayout,
    },
    #[error(transparent)]
    Profile(#[from] ProfileError),
    #[error("no transactions extracted ({candidates} candidate lines, {misses} unparsed); check the password or file format")]
    EmptyResult { candidates: usize, misses: usize },
}

impl From<ExtractError> for PipelineError {
    fn from(e: ExtractError) -> Self {
        match e {
            ExtractError::Decryption(d) => PipelineError::Decryption(d),
            other => PipelineError::Extract(other),
        }
    }
}
