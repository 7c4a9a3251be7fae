//! Query Engine: ANY (union, ranked by accumulated rank) and ALL
//! (intersection, rescored by the max-rank query word) retrieval modes.

use std::collections::HashMap;

use crate::data_structures::{CompressedTrie, DocId, PostingListPool};
use crate::error::core::{CoreError, CoreResult};
use crate::text_source::TextSource;
use crate::tokenize::{tokenize, StopWords};

/// Retrieval mode requested by a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryMode {
    /// Union of postings, ranked by accumulated rank.
    Any,
    /// Intersection of postings, rescored by the max-rank query word.
    All,
}

/// Runs a query against `trie`/`plp`. `words` must already be lowercased
/// and stop-word filtered by the caller (the CLI driver does this before
/// calling in).
pub fn search(
    trie: &mut CompressedTrie,
    plp: &PostingListPool,
    text_source: &dyn TextSource,
    stop_words: &StopWords,
    max_word_len: usize,
    words: &[String],
    mode: QueryMode,
) -> CoreResult<Vec<DocId>> {
    match mode {
        QueryMode::Any => search_any(trie, plp, words),
        QueryMode::All => search_all(trie, plp, text_source, stop_words, max_word_len, words),
    }
}

fn search_any(
    trie: &mut CompressedTrie,
    plp: &PostingListPool,
    words: &[String],
) -> CoreResult<Vec<DocId>> {
    let mut order: Vec<DocId> = Vec::new();
    let mut score: HashMap<DocId, u64> = HashMap::new();

    for word in words {
        let Some((handle, rank)) = trie.lookup(word) else {
            continue;
        };

        // A posting set has no defined iteration order; visit it sorted
        // so ties are broken deterministically rather than by hash order.
        let mut docs: Vec<&DocId> = plp.at(handle)?.iter().collect();
        docs.sort();

        for doc in docs {
            if !score.contains_key(doc) {
                order.push(doc.clone());
            }
            *score.entry(doc.clone()).or_insert(0) += rank;
        }
    }

    order.sort_by(|a, b| score[b].cmp(&score[a]));
    Ok(order)
}

fn search_all(
    trie: &mut CompressedTrie,
    plp: &PostingListPool,
    text_source: &dyn TextSource,
    stop_words: &StopWords,
    max_word_len: usize,
    words: &[String],
) -> CoreResult<Vec<DocId>> {
    let mut intersection: Option<hashbrown::HashSet<DocId>> = None;
    let mut max_rank = 0u64;
    let mut max_rank_word: Option<&str> = None;

    for word in words {
        let Some((handle, rank)) = trie.lookup(word) else {
            return Ok(Vec::new());
        };

        if rank > max_rank {
            max_rank = rank;
            max_rank_word = Some(word.as_str());
        }

        let postings = plp.at(handle)?;
        intersection = Some(match intersection {
            None => postings.clone(),
            Some(existing) => existing.intersection(postings).cloned().collect(),
        });
    }

    let intersection = match intersection {
        Some(set) if !set.is_empty() => set,
        _ => return Ok(Vec::new()),
    };

    let max_rank_word = max_rank_word.unwrap_or("");

    let mut counts: Vec<(DocId, usize)> = Vec::new();
    for doc in &intersection {
        let text = text_source
            .fetch(doc)
            .map_err(|_| CoreError::DocumentUnavailable(doc.clone()))?;
        let doc_words = tokenize(&text, stop_words, max_word_len);
        let count = doc_words.iter().filter(|w| w.as_str() == max_rank_word).count();
        counts.push((doc.clone(), count));
    }

    // Docs come out of a HashSet with no defined order; break ties on the
    // DocId itself for a stable, reproducible ordering.
    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    Ok(counts.into_iter().map(|(doc, _)| doc).collect())
}
