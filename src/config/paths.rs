//! Filesystem layout configuration module.
//!
//! Defines where a session's persisted index pair, audit log, document
//! corpus, and stop-word list live on disk.

use super::ConfigResult;
use super::Validate;
use crate::error::config::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Filesystem paths used by a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory containing the text documents to be indexed.
    pub documents_dir: PathBuf,

    /// Directory where the posting-list pool and trie files are persisted.
    pub index_dir: PathBuf,

    /// File name (within `index_dir`) of the posting-list pool.
    pub posting_list_file: String,

    /// File name (within `index_dir`) of the compressed trie.
    pub trie_file: String,

    /// File name (within `index_dir`) of the build-info audit stream.
    pub audit_log_file: String,

    /// Optional path to a newline-delimited stop-word file. When absent,
    /// the tokenizer falls back to its built-in default list.
    pub stop_words_file: Option<PathBuf>,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            documents_dir: PathBuf::from("./documents"),
            index_dir: PathBuf::from("./index_data"),
            posting_list_file: "posting_list_pool.dat".to_string(),
            trie_file: "compressed_trie.dat".to_string(),
            audit_log_file: "build_info.log".to_string(),
            stop_words_file: None,
        }
    }
}

impl PathsConfig {
    /// Full path to the posting-list pool file.
    pub fn posting_list_path(&self) -> PathBuf {
        self.index_dir.join(&self.posting_list_file)
    }

    /// Full path to the compressed trie file.
    pub fn trie_path(&self) -> PathBuf {
        self.index_dir.join(&self.trie_file)
    }

    /// Full path to the build-info audit log.
    pub fn audit_log_path(&self) -> PathBuf {
        self.index_dir.join(&self.audit_log_file)
    }
}

impl Validate for PathsConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.posting_list_file.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "posting_list_file cannot be empty".to_string(),
            ));
        }

        if self.trie_file.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "trie_file cannot be empty".to_string(),
            ));
        }

        if self.audit_log_file.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "audit_log_file cannot be empty".to_string(),
            ));
        }

        if self.posting_list_file == self.trie_file {
            return Err(ConfigError::ValidationError(
                "posting_list_file and trie_file must differ".to_string(),
            ));
        }

        Ok(())
    }
}
