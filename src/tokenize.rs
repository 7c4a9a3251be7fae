//! Tokenizer and stop-word filtering.
//!
//! Supplies the word tokenizer and stop-word filter shared by the indexer
//! and the query engine's ALL-mode rescoring pass, so both use the exact
//! same deterministic, pure function to turn document text into words.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::error::tokenize::TokenizeResult;

/// A small built-in stop-word list used when no stop-word file is
/// configured, so the crate is usable without any external data file.
const DEFAULT_STOP_WORDS: &[&str] = &[
    "a", "an", "and", "are", "as", "at", "be", "by", "for", "from", "has", "he", "in", "is",
    "it", "its", "of", "on", "that", "the", "to", "was", "were", "will", "with",
];

/// The stop-word set consulted by the tokenizer.
#[derive(Debug, Clone)]
pub struct StopWords {
    words: HashSet<String>,
}

impl Default for StopWords {
    fn default() -> Self {
        Self {
            words: DEFAULT_STOP_WORDS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl StopWords {
    /// Loads a newline-delimited stop-word file, one word per line.
    pub fn load(path: &Path) -> TokenizeResult<Self> {
        let contents = fs::read_to_string(path)?;
        let words = contents
            .split_whitespace()
            .map(|w| w.trim_matches(',').to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();
        Ok(Self { words })
    }

    /// Whether `word` (already lowercased) should be filtered out.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }
}

/// Tokenizes `text` into lowercased alphanumeric runs, dropping any word
/// present in `stop_words` or longer than `max_word_len` bytes.
///
/// Mirrors the regex `(\w+|\d+)` scan of the source this was distilled
/// from, restricted to ASCII since indexed words are ASCII alphanumeric.
pub fn tokenize(text: &str, stop_words: &StopWords, max_word_len: usize) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();

    let mut flush = |current: &mut String, words: &mut Vec<String>| {
        if current.is_empty() {
            return;
        }
        let word = std::mem::take(current);
        if word.len() <= max_word_len && !stop_words.contains(&word) {
            words.push(word);
        }
    };

    for ch in text.chars() {
        if ch.is_ascii_alphanumeric() {
            current.push(ch.to_ascii_lowercase());
        } else {
            flush(&mut current, &mut words);
        }
    }
    flush(&mut current, &mut words);

    words
}
