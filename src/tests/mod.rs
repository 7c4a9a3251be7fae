//! Shared test infrastructure for the Mauka search index.
//!
//! Each component keeps its own `#[cfg(test)] mod tests` alongside its
//! implementation; this module holds what's shared across them: config
//! and error module tests that don't fit naturally next to a single
//! `impl` block, plus fixtures and proptest strategies.


pub use test_utils::{
    create_test_dir, doc_id_strategy, document_words_strategy, word_strategy, TestFixture,
};
