//! Indexer: feeds tokenized words into the compressed trie and posting-list
//! pool, appending one line per word to the build-info audit stream.

use std::io::Write;

use hashbrown::HashSet;

use crate::data_structures::{CompressedTrie, DocId, PostingListPool};
use crate::error::core::CoreResult;

/// Inserts each word of `words` into `trie`, appending `doc_id` to the
/// addressed posting list, and writes one build-info audit line per word
/// to `audit`. Duplicate words within `words` are permitted.
pub fn build(
    trie: &mut CompressedTrie,
    plp: &mut PostingListPool,
    audit: &mut impl Write,
    doc_id: &DocId,
    words: &[String],
) -> CoreResult<()> {
    for word in words {
        let (handle, created) = trie.insert_or_locate(word, doc_id, plp)?;

        if created {
            writeln!(audit, "'{word}'(in {doc_id}) -> trie")?;
        } else {
            plp.add(handle, doc_id.clone())?;
            let docs = plp.at(handle)?;
            writeln!(
                audit,
                "trie: '{word}'(in {doc_id}) found in OL: {}",
                format_doc_set(docs)
            )?;
        }
    }

    audit.flush()?;
    Ok(())
}

fn format_doc_set(docs: &HashSet<DocId>) -> String {
    let mut sorted: Vec<&DocId> = docs.iter().collect();
    sorted.sort();
    let joined = sorted
        .iter()
        .map(|d| format!("'{d}'"))
        .collect::<Vec<_>>()
        .join(", ");
    format!("{{{joined}}}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_is_idempotent_on_repeated_calls() {
        let mut trie = CompressedTrie::new();
        let mut plp = PostingListPool::new();
        let mut audit: Vec<u8> = Vec::new();
        let doc = "d1".to_string();
        let words = vec!["go".to_string(), "go".to_string()];

        build(&mut trie, &mut plp, &mut audit, &doc, &words).unwrap();
        build(&mut trie, &mut plp, &mut audit, &"d2".to_string(), &words).unwrap();

        let (handle, _) = trie.insert_or_locate("go", &doc, &mut plp).unwrap();
        let set = plp.at(handle).unwrap();
        assert_eq!(set.len(), 2);
        assert!(set.contains("d1"));
        assert!(set.contains("d2"));
    }

    #[test]
    fn rejects_empty_word() {
        let mut trie = CompressedTrie::new();
        let mut plp = PostingListPool::new();
        let mut audit: Vec<u8> = Vec::new();
        let err = build(
            &mut trie,
            &mut plp,
            &mut audit,
            &"d1".to_string(),
            &["".to_string()],
        )
        .unwrap_err();
        assert!(matches!(err, crate::error::core::CoreError::MalformedInput));
    }
}
