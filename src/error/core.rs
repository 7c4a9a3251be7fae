//! Core index error module.
//!
//! Errors raised by the posting-list pool, the compressed trie, the
//! indexer, and the query engine — the error kinds enumerated by the
//! core's error-handling design.

use thiserror::Error;

/// Errors that can occur in the core indexing and query engine.
#[derive(Error, Debug)]
pub enum CoreError {
    /// A posting-list handle was out of range or pointed at a free slot.
    #[error("bad posting-list handle: {0}")]
    BadHandle(usize),

    /// A structural invariant of the compressed trie was violated.
    #[error("corrupt trie: {0}")]
    CorruptTrie(String),

    /// Only one of the posting-list file / trie file was present at load.
    #[error("corrupt session: posting-list file and trie file must both exist, or neither")]
    CorruptPair,

    /// A file write or rename failed during persistence.
    #[error("failed to persist index: {0}")]
    PersistIoError(#[from] std::io::Error),

    /// The query engine could not fetch a document's text for rescoring.
    #[error("document unavailable for rescoring: {0}")]
    DocumentUnavailable(String),

    /// An empty word was passed to the indexer.
    #[error("malformed input: empty word")]
    MalformedInput,

    /// A document exceeded the configured size limit and was rejected
    /// before tokenization.
    #[error("document {0} too large to index: {1} bytes")]
    DocumentTooLarge(String, usize),
}

/// Result type for core indexing and query operations.
pub type CoreResult<T> = Result<T, CoreError>;
