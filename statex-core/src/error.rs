//! Errors surfaced by text extraction

use thiserror::Error;

/// The document is encrypted and could not be opened
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DecryptionError {
    #[error("document is password-protected; please provide a password")]
    NoPasswordGiven,
    #[error("incorrect password")]
    WrongPassword,
}

/// Failure of a text source; never accompanied by partial text
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    #[error(transparent)]
    Decryption(#[from] DecryptionError),
    #[error("unreadable document: {0}")]
    Unreadable(String),
    #[error("text extraction tool failed: {0}")]
    Tool(String),
}
