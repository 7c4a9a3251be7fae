//! Data structures underlying the Mauka search index: the external
//! posting-list pool and the compressed trie built atop it.

use std::path::{Path, PathBuf};

pub mod compressed_trie;
pub mod posting_list_pool;

pub use compressed_trie::{CompressedTrie, NodeId};
pub use posting_list_pool::{DocId, Handle, PostingListPool};

/// Derives a sibling temp-file path for crash-consistent persistence:
/// callers write to the returned path, then rename it over `path`.
pub(crate) fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("index")
        .to_string();
    name.push_str(".tmp");
    path.with_file_name(name)
}
