//! Session: owns the compressed trie, posting-list pool, build-info audit
//! stream, and stop-word set for one process lifetime.
//!
//! The source this was distilled from keeps the audit file handle and the
//! stop-word list as process-wide globals; here they are fields on this
//! struct instead, opened in a scoped manner with a guaranteed close on
//! all exits (see DESIGN.md).

use std::fs::{File, OpenOptions};
use std::io::BufWriter;
use std::path::Path;

use crate::config::IndexConfig;
use crate::data_structures::{CompressedTrie, DocId, PostingListPool};
use crate::error::core::{CoreError, CoreResult};
use crate::indexer;
use crate::query::{self, QueryMode};
use crate::text_source::TextSource;
use crate::tokenize::{self, StopWords};

/// Owns a session's index state and its collaborators.
pub struct Session {
    trie: CompressedTrie,
    plp: PostingListPool,
    audit: BufWriter<File>,
    stop_words: StopWords,
    config: IndexConfig,
}

impl Session {
    /// Bootstraps a session from `config`: if the posting-list file is
    /// absent or empty/whitespace, starts with an empty trie and pool;
    /// otherwise loads both files, refusing to start if only one exists.
    pub fn bootstrap(config: IndexConfig) -> CoreResult<Self> {
        let posting_list_path = config.paths.posting_list_path();
        let trie_path = config.paths.trie_path();

        let posting_list_exists = posting_list_path.exists();
        let trie_exists = trie_path.exists();

        let posting_list_is_empty = !posting_list_exists
            || std::fs::read_to_string(&posting_list_path)
                .map(|s| s.trim().is_empty())
                .unwrap_or(true);

        let (trie, plp) = if posting_list_is_empty {
            (CompressedTrie::new(), PostingListPool::new())
        } else if trie_exists {
            (
                CompressedTrie::load(&trie_path)?,
                PostingListPool::load(&posting_list_path)?,
            )
        } else {
            return Err(CoreError::CorruptPair);
        };

        if let Some(parent) = config.paths.index_dir.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::create_dir_all(&config.paths.index_dir)?;

        let audit_path = config.paths.audit_log_path();
        let audit_file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&audit_path)?;

        let stop_words = match &config.paths.stop_words_file {
            Some(path) => StopWords::load(path).unwrap_or_default(),
            None => StopWords::default(),
        };

        Ok(Self {
            trie,
            plp,
            audit: BufWriter::new(audit_file),
            stop_words,
            config,
        })
    }

    /// Tokenizes `text` per the session's configured limits and stop-words.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        tokenize::tokenize(text, &self.stop_words, self.config.limits.tokenizer.max_word_len)
    }

    /// Indexes `doc_id`'s already-tokenized `words`, then persists the
    /// trie and pool atomically (one temp-file-then-rename per file).
    pub fn index_document(&mut self, doc_id: &DocId, words: &[String]) -> CoreResult<()> {
        indexer::build(&mut self.trie, &mut self.plp, &mut self.audit, doc_id, words)?;
        self.persist()
    }

    /// Tokenizes and indexes `doc_id`'s raw `text`, rejecting it before
    /// tokenization if it exceeds the configured document-size limit.
    pub fn index_text(&mut self, doc_id: &DocId, text: &str) -> CoreResult<()> {
        let max_document_bytes = self.config.limits.tokenizer.max_document_bytes;
        if text.len() > max_document_bytes {
            return Err(CoreError::DocumentTooLarge(doc_id.clone(), text.len()));
        }
        let words = self.tokenize(text);
        self.index_document(doc_id, &words)
    }

    /// Writes the trie and posting-list pool to their configured paths.
    pub fn persist(&self) -> CoreResult<()> {
        self.plp.save(&self.config.paths.posting_list_path())?;
        self.trie.save(&self.config.paths.trie_path())?;
        Ok(())
    }

    /// Runs a query in the given mode against this session's index.
    pub fn search(
        &mut self,
        text_source: &dyn TextSource,
        words: &[String],
        mode: QueryMode,
    ) -> CoreResult<Vec<DocId>> {
        query::search(
            &mut self.trie,
            &self.plp,
            text_source,
            &self.stop_words,
            self.config.limits.tokenizer.max_word_len,
            words,
            mode,
        )
    }

    /// The configuration this session was bootstrapped with.
    pub fn config(&self) -> &IndexConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config(dir: &Path) -> IndexConfig {
        let mut config = IndexConfig::default();
        config.paths.index_dir = dir.to_path_buf();
        config.paths.documents_dir = dir.to_path_buf();
        config
    }

    #[test]
    fn bootstrap_starts_empty_when_no_files_exist() {
        let dir = tempfile::tempdir().unwrap();
        let session = Session::bootstrap(test_config(dir.path())).unwrap();
        assert_eq!(session.plp.size(), 0);
    }

    #[test]
    fn bootstrap_refuses_a_corrupt_pair() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());
        std::fs::create_dir_all(&config.paths.index_dir).unwrap();
        std::fs::write(config.paths.posting_list_path(), "d1\n").unwrap();

        let err = Session::bootstrap(config).unwrap_err();
        assert!(matches!(err, CoreError::CorruptPair));
    }

    #[test]
    fn index_then_reload_preserves_postings() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());

        {
            let mut session = Session::bootstrap(config.clone()).unwrap();
            session
                .index_document(&"d1".to_string(), &["car".to_string()])
                .unwrap();
        }

        let mut session = Session::bootstrap(config).unwrap();
        assert!(session.trie.lookup("car").is_some());
    }

    #[test]
    fn index_text_rejects_documents_over_the_configured_size_limit() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = test_config(dir.path());
        config.limits.tokenizer.max_document_bytes = 8;
        let mut session = Session::bootstrap(config).unwrap();

        let err = session
            .index_text(&"d1".to_string(), "this text is well over the limit")
            .unwrap_err();
        assert!(matches!(err, CoreError::DocumentTooLarge(_, _)));
        assert!(session.trie.lookup("this").is_none());
    }

    #[test]
    fn index_text_tokenizes_and_indexes_documents_within_the_limit() {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(dir.path());
        let mut session = Session::bootstrap(config).unwrap();

        session.index_text(&"d1".to_string(), "red car").unwrap();
        assert!(session.trie.lookup("red").is_some());
        assert!(session.trie.lookup("car").is_some());
    }
}
