//! Tokenizer and text-source error module.

use thiserror::Error;

/// Errors raised by the tokenizer and its text-source collaborator.
#[derive(Error, Debug)]
pub enum TokenizeError {
    /// The configured stop-word file could not be read.
    #[error("failed to read stop-word file: {0}")]
    StopWordFile(#[from] std::io::Error),

    /// The requested document could not be fetched by a text source.
    #[error("text source could not fetch document: {0}")]
    FetchFailed(String),
}

/// Result type for tokenizer and text-source operations.
pub type TokenizeResult<T> = Result<T, TokenizeError>;
