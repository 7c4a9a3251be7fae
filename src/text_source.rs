//! Text Source collaborator: fetches a document's plain text by its
//! `DocId`, for the query engine's ALL-mode rescoring pass.

use std::fs;
use std::path::{Path, PathBuf};

use crate::data_structures::DocId;
use crate::error::tokenize::TokenizeError;

/// Fetches the plain text of a document, given the identifier used to
/// index it. The core assumes this identifier is reachable by the same
/// `DocId` used at index time.
pub trait TextSource {
    /// Returns the plain text of `doc`, stripped of markup if any.
    fn fetch(&self, doc: &DocId) -> Result<String, TokenizeError>;
}

/// Reads documents as files relative to a configured directory, with a
/// minimal HTML tag-stripping pass so `.html` files can be indexed
/// without a full HTML parser.
#[derive(Debug, Clone)]
pub struct FilesystemTextSource {
    documents_dir: PathBuf,
}

impl FilesystemTextSource {
    /// Creates a text source rooted at `documents_dir`.
    pub fn new(documents_dir: impl Into<PathBuf>) -> Self {
        Self {
            documents_dir: documents_dir.into(),
        }
    }
}

impl TextSource for FilesystemTextSource {
    fn fetch(&self, doc: &DocId) -> Result<String, TokenizeError> {
        let path = resolve(&self.documents_dir, doc);
        let raw = fs::read_to_string(&path)
            .map_err(|_| TokenizeError::FetchFailed(doc.clone()))?;

        if is_html(&path) {
            Ok(strip_tags(&raw))
        } else {
            Ok(raw)
        }
    }
}

fn resolve(documents_dir: &Path, doc: &DocId) -> PathBuf {
    let doc_path = Path::new(doc);
    if doc_path.is_absolute() {
        doc_path.to_path_buf()
    } else {
        documents_dir.join(doc_path)
    }
}

fn is_html(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("html") | Some("htm")
    )
}

/// Strips HTML tags with a simple scanner: text outside `<...>` is kept
/// verbatim. Not a spec-compliant HTML parser, only enough to let the
/// tokenizer see readable words from a small local corpus.
fn strip_tags(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut in_tag = false;
    for ch in html.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    out
}
