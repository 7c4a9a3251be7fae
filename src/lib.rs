//! Mauka Search Index Library
//!
//! An in-process inverted-index search engine over a finite corpus of
//! text documents: a compressed (radix) trie over word tokens paired
//! with an external posting-list pool, with ANY/ALL ranked retrieval.
//!
//! # Architecture
//!
//! - [`data_structures::posting_list_pool`] — the external posting-list
//!   pool, a growable array of `DocId` sets addressed by stable handles.
//! - [`data_structures::compressed_trie`] — the radix trie mapping words
//!   to posting-list handles.
//! - [`indexer`] — feeds tokenized words into the trie and pool.
//! - [`query`] — ANY/ALL retrieval over the trie and pool.
//! - [`session`] — owns the CT/PLP pair, audit stream, and stop-words
//!   for one process lifetime.

pub mod config;
pub mod data_structures;
pub mod error;
pub mod indexer;
pub mod query;
pub mod session;
pub mod text_source;
pub mod tokenize;

#[cfg(test)]
pub(crate) mod tests;

/// Version information for the Mauka search index.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library initialization: installs a tracing-backed error reporter.
pub fn init() -> error::MaukaResult<error::ErrorReporting> {
    Ok(error::ErrorReporting::new(std::sync::Arc::new(
        error::TracingErrorReporter,
    )))
}
