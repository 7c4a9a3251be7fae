//! Index-domain limits configuration module.
//!
//! Defines bounds the tokenizer and indexer enforce on word length and
//! document size, replacing the teacher's network/memory resource limits
//! with limits relevant to an in-process inverted index.

use super::{ConfigResult, Validate};
use crate::error::config::ConfigError;
use serde::{Deserialize, Serialize};

/// Resource limits for tokenization and indexing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitsConfig {
    /// Tokenizer-specific limits.
    pub tokenizer: TokenizerLimits,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            tokenizer: TokenizerLimits::default(),
        }
    }
}

impl Validate for LimitsConfig {
    fn validate(&self) -> ConfigResult<()> {
        self.tokenizer.validate()
    }
}

/// Limits enforced by the tokenizer and indexer on a per-word basis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenizerLimits {
    /// Words longer than this many bytes are dropped during tokenization,
    /// per the trie's word-length bound.
    pub max_word_len: usize,

    /// Documents larger than this many bytes are rejected before
    /// tokenization to bound memory use on a single-threaded session.
    pub max_document_bytes: usize,
}

impl Default for TokenizerLimits {
    fn default() -> Self {
        Self {
            max_word_len: 256,
            max_document_bytes: 50 * 1024 * 1024, // 50 MiB
        }
    }
}

impl Validate for TokenizerLimits {
    fn validate(&self) -> ConfigResult<()> {
        if self.max_word_len == 0 {
            return Err(ConfigError::ValidationError(
                "max_word_len must be greater than 0".to_string(),
            ));
        }

        if self.max_document_bytes == 0 {
            return Err(ConfigError::ValidationError(
                "max_document_bytes must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}
