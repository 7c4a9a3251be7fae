//! Compressed (radix) trie over word tokens.
//!
//! Leaves (external nodes) hold a posting-list handle and a search-time
//! rank counter; internal nodes carry no payload and dispatch to children
//! by the first byte of their edge label. Insertion performs in-place
//! edge splitting so parent pointers never need rewriting; the node being
//! split keeps its arena slot and identity.

mod node;

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

pub use node::NodeId;
use node::TrieNode;

use crate::data_structures::posting_list_pool::{DocId, Handle, PostingListPool};
use crate::data_structures::tmp_path;
use crate::error::core::{CoreError, CoreResult};

const TERMINATOR: u8 = b'*';

/// Radix tree over word strings, backed by a `Vec<TrieNode>` slab.
#[derive(Debug)]
pub struct CompressedTrie {
    nodes: Vec<TrieNode>,
}

impl Default for CompressedTrie {
    fn default() -> Self {
        Self::new()
    }
}

impl CompressedTrie {
    const ROOT: NodeId = NodeId(0);

    /// Creates an empty trie containing only the persistent root.
    pub fn new() -> Self {
        Self {
            nodes: vec![TrieNode::root()],
        }
    }

    /// Number of nodes currently in the arena, root included.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn push_node(&mut self, node: TrieNode) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Ensures `word` is present in the trie, allocating a posting-list
    /// slot for `doc` when the word is newly inserted. Returns the
    /// external node's handle and whether it was newly created.
    pub fn insert_or_locate(
        &mut self,
        word: &str,
        doc: &DocId,
        plp: &mut PostingListPool,
    ) -> CoreResult<(Handle, bool)> {
        if word.is_empty() {
            return Err(CoreError::MalformedInput);
        }
        self.insert_at(Self::ROOT, word.as_bytes(), doc, plp)
    }

    fn insert_at(
        &mut self,
        node_id: NodeId,
        word: &[u8],
        doc: &DocId,
        plp: &mut PostingListPool,
    ) -> CoreResult<(Handle, bool)> {
        let nk = self.nodes[node_id.0 as usize].key.clone().into_bytes();
        let i = common_prefix_len(word, &nk);

        if word.len() == i {
            if i < nk.len() {
                return self.split_suffix(node_id, &nk, i, "*", doc, plp);
            }
            return self.exact_match(node_id, doc, plp);
        }

        if nk.len() == i {
            return self.extend_past_node(node_id, word, i, doc, plp);
        }

        if i > 0 {
            let word_suffix = std::str::from_utf8(&word[i..])
                .map_err(|_| CoreError::CorruptTrie("non-utf8 word suffix".to_string()))?;
            return self.split_suffix(node_id, &nk, i, word_suffix, doc, plp);
        }

        // i == 0: only legal at the root.
        if node_id.0 != Self::ROOT.0 {
            return Err(CoreError::CorruptTrie(
                "zero common prefix at a non-root node".to_string(),
            ));
        }

        let first = word[0];
        if let Some(&child_id) = self.nodes[node_id.0 as usize].children.get(&first) {
            return self.insert_at(child_id, word, doc, plp);
        }

        let new_handle = plp.allocate(doc.clone());
        let key = String::from_utf8(word.to_vec())
            .map_err(|_| CoreError::CorruptTrie("non-utf8 word".to_string()))?;
        let new_id = self.push_node(TrieNode::external(key, new_handle));
        self.nodes[node_id.0 as usize].children.insert(first, new_id);
        Ok((new_handle, true))
    }

    /// Case 1: `word == nk`. Exact match at `node_id`.
    fn exact_match(
        &mut self,
        node_id: NodeId,
        doc: &DocId,
        plp: &mut PostingListPool,
    ) -> CoreResult<(Handle, bool)> {
        let node = &self.nodes[node_id.0 as usize];
        if node.is_external {
            let handle = node
                .handle
                .ok_or_else(|| CoreError::CorruptTrie("external node missing handle".to_string()))?;
            return Ok((handle, false));
        }

        if let Some(&tc_id) = node.children.get(&TERMINATOR) {
            let handle = self.nodes[tc_id.0 as usize].handle.ok_or_else(|| {
                CoreError::CorruptTrie("terminating child missing handle".to_string())
            })?;
            return Ok((handle, false));
        }

        let new_handle = plp.allocate(doc.clone());
        let tc_id = self.push_node(TrieNode::external("*".to_string(), new_handle));
        self.nodes[node_id.0 as usize]
            .children
            .insert(TERMINATOR, tc_id);
        Ok((new_handle, true))
    }

    /// Case 3: `nk` is a proper prefix of `word`. Descends into a
    /// matching child, or splits an external node, or appends a new
    /// external child of an internal node.
    fn extend_past_node(
        &mut self,
        node_id: NodeId,
        word: &[u8],
        i: usize,
        doc: &DocId,
        plp: &mut PostingListPool,
    ) -> CoreResult<(Handle, bool)> {
        let residual = &word[i..];
        let next_byte = residual[0];
        let node = &self.nodes[node_id.0 as usize];

        if !node.is_external {
            if let Some(&child_id) = node.children.get(&next_byte) {
                return self.insert_at(child_id, residual, doc, plp);
            }

            let new_handle = plp.allocate(doc.clone());
            let key = String::from_utf8(residual.to_vec())
                .map_err(|_| CoreError::CorruptTrie("non-utf8 word suffix".to_string()))?;
            let new_id = self.push_node(TrieNode::external(key, new_handle));
            self.nodes[node_id.0 as usize]
                .children
                .insert(next_byte, new_id);
            return Ok((new_handle, true));
        }

        // External node: split into a terminating child (inheriting this
        // node's handle) and a new external child for the residual.
        let handle = node
            .handle
            .ok_or_else(|| CoreError::CorruptTrie("external node missing handle".to_string()))?;
        let a_id = self.push_node(TrieNode::external("*".to_string(), handle));

        let new_handle = plp.allocate(doc.clone());
        let key = String::from_utf8(residual.to_vec())
            .map_err(|_| CoreError::CorruptTrie("non-utf8 word suffix".to_string()))?;
        let b_id = self.push_node(TrieNode::external(key, new_handle));

        let node = &mut self.nodes[node_id.0 as usize];
        node.is_external = false;
        node.handle = None;
        node.children.clear();
        node.children.insert(TERMINATOR, a_id);
        node.children.insert(next_byte, b_id);

        Ok((new_handle, true))
    }

    /// Cases 2 and 4: splits `node_id` at common-prefix length `i`,
    /// moving its current role onto a new sibling `S` carrying `nk[i..]`
    /// and adding a new external child `T` keyed by `term_key`.
    fn split_suffix(
        &mut self,
        node_id: NodeId,
        nk: &[u8],
        i: usize,
        term_key: &str,
        doc: &DocId,
        plp: &mut PostingListPool,
    ) -> CoreResult<(Handle, bool)> {
        let node = &self.nodes[node_id.0 as usize];
        let is_external = node.is_external;
        let handle = node.handle;
        let children = node.children.clone();

        let suffix_key = String::from_utf8(nk[i..].to_vec())
            .map_err(|_| CoreError::CorruptTrie("non-utf8 node key".to_string()))?;
        let suffix_first_byte = nk[i];

        let sfx_id = if is_external {
            let handle = handle
                .ok_or_else(|| CoreError::CorruptTrie("external node missing handle".to_string()))?;
            self.push_node(TrieNode::external(suffix_key, handle))
        } else {
            let mut n = TrieNode::internal(suffix_key);
            n.children = children;
            self.push_node(n)
        };

        let new_handle = plp.allocate(doc.clone());
        let term_id = self.push_node(TrieNode::external(term_key.to_string(), new_handle));
        let term_first_byte = term_key.as_bytes()[0];

        let prefix_key = String::from_utf8(nk[..i].to_vec())
            .map_err(|_| CoreError::CorruptTrie("non-utf8 node key".to_string()))?;

        let node = &mut self.nodes[node_id.0 as usize];
        node.key = prefix_key;
        node.is_external = false;
        node.handle = None;
        node.children.clear();
        node.children.insert(suffix_first_byte, sfx_id);
        node.children.insert(term_first_byte, term_id);

        Ok((new_handle, true))
    }

    /// Exact-match lookup of a whole word. Increments the rank of the
    /// located external node and returns `(handle, rank)`.
    pub fn lookup(&mut self, word: &str) -> Option<(Handle, u64)> {
        if word.is_empty() {
            return None;
        }
        let word = word.as_bytes();
        let first = word[0];
        let child_id = *self.nodes[Self::ROOT.0 as usize].children.get(&first)?;
        self.lookup_at(child_id, word)
    }

    fn lookup_at(&mut self, node_id: NodeId, word: &[u8]) -> Option<(Handle, u64)> {
        let nk = self.nodes[node_id.0 as usize].key.clone().into_bytes();

        if nk == [TERMINATOR] {
            let node = &mut self.nodes[node_id.0 as usize];
            node.rank += 1;
            return Some((node.handle?, node.rank));
        }

        if word == nk.as_slice() {
            if self.nodes[node_id.0 as usize].is_external {
                let node = &mut self.nodes[node_id.0 as usize];
                node.rank += 1;
                return Some((node.handle?, node.rank));
            }
            let tc_id = *self.nodes[node_id.0 as usize].children.get(&TERMINATOR)?;
            return self.lookup_at(tc_id, word);
        }

        if word.len() <= nk.len() {
            return None;
        }

        if word[..nk.len()] != nk[..] {
            return None;
        }

        let residual = &word[nk.len()..];
        let child_id = *self.nodes[node_id.0 as usize].children.get(&residual[0])?;
        self.lookup_at(child_id, residual)
    }

    /// Persists the trie to `path` via temp-file-then-rename, as a
    /// pre-order walk: each node writes `{external?, key, handle-or(-1),
    /// rank, child-count}` followed by its children.
    pub fn save(&self, path: &Path) -> CoreResult<()> {
        let tmp = tmp_path(path);
        {
            let mut writer = BufWriter::new(File::create(&tmp)?);
            self.write_node(Self::ROOT, &mut writer)?;
            writer.flush()?;
        }
        std::fs::rename(&tmp, path)?;
        Ok(())
    }

    fn write_node<W: Write>(&self, node_id: NodeId, w: &mut W) -> CoreResult<()> {
        let node = &self.nodes[node_id.0 as usize];
        w.write_all(&[node.is_external as u8])?;

        let key_bytes = node.key.as_bytes();
        w.write_all(&(key_bytes.len() as u32).to_le_bytes())?;
        w.write_all(key_bytes)?;

        let handle_val: i64 = node.handle.map(|h| h as i64).unwrap_or(-1);
        w.write_all(&handle_val.to_le_bytes())?;
        w.write_all(&node.rank.to_le_bytes())?;
        w.write_all(&(node.children.len() as u32).to_le_bytes())?;

        for &child_id in node.children.values() {
            self.write_node(child_id, w)?;
        }

        Ok(())
    }

    /// Loads a trie previously written by `save`.
    pub fn load(path: &Path) -> CoreResult<Self> {
        let mut reader = BufReader::new(File::open(path)?);
        let mut trie = Self { nodes: Vec::new() };
        trie.read_node(&mut reader)?;
        Ok(trie)
    }

    fn read_node<R: Read>(&mut self, r: &mut R) -> CoreResult<NodeId> {
        let mut flag = [0u8; 1];
        r.read_exact(&mut flag)?;
        let is_external = flag[0] != 0;

        let mut len_buf = [0u8; 4];
        r.read_exact(&mut len_buf)?;
        let key_len = u32::from_le_bytes(len_buf) as usize;
        let mut key_buf = vec![0u8; key_len];
        r.read_exact(&mut key_buf)?;
        let key = String::from_utf8(key_buf)
            .map_err(|_| CoreError::CorruptTrie("non-utf8 key in trie file".to_string()))?;

        let mut handle_buf = [0u8; 8];
        r.read_exact(&mut handle_buf)?;
        let handle_val = i64::from_le_bytes(handle_buf);
        let handle = if handle_val < 0 {
            None
        } else {
            Some(handle_val as Handle)
        };

        let mut rank_buf = [0u8; 8];
        r.read_exact(&mut rank_buf)?;
        let rank = u64::from_le_bytes(rank_buf);

        let mut count_buf = [0u8; 4];
        r.read_exact(&mut count_buf)?;
        let child_count = u32::from_le_bytes(count_buf);

        let node_id = NodeId(self.nodes.len() as u32);
        self.nodes.push(TrieNode {
            key,
            children: Default::default(),
            is_external,
            handle,
            rank,
        });

        for _ in 0..child_count {
            let child_id = self.read_node(r)?;
            let first_byte = self.nodes[child_id.0 as usize].key.as_bytes()[0];
            self.nodes[node_id.0 as usize]
                .children
                .insert(first_byte, child_id);
        }

        Ok(node_id)
    }
}

/// Length of the common byte prefix of `a` and `b`.
fn common_prefix_len(a: &[u8], b: &[u8]) -> usize {
    a.iter().zip(b.iter()).take_while(|(x, y)| x == y).count()
}

#[cfg(test)]
impl CompressedTrie {
    /// Number of external (leaf) nodes in the arena.
    fn external_node_count(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_external).count()
    }

    /// True iff every child's key starts with the byte it's keyed under
    /// in its parent's child map (the disjointness invariant is actually
    /// enforced by construction, since `children: HashMap<u8, NodeId>`
    /// cannot hold two entries for the same first byte — this checks
    /// the map and the node keys agree, not just that the map compiles).
    fn children_are_disjoint(&self) -> bool {
        self.nodes.iter().all(|n| {
            n.children.iter().all(|(&first, &child_id)| {
                let child_key = self.nodes[child_id.0 as usize].key.as_bytes();
                child_key.first() == Some(&first)
            })
        })
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::tests::test_utils::{doc_id_strategy, word_strategy};
    use proptest::collection::vec as pvec;
    use proptest::prelude::*;
    use std::collections::HashSet as StdHashSet;

    proptest! {
        /// Invariant 1 + 2: external node count tracks distinct words,
        /// and every internal node's children stay pairwise disjoint
        /// on their first key byte, across an arbitrary insert sequence.
        #[test]
        fn uniqueness_and_child_disjointness_hold(
            pairs in pvec((doc_id_strategy(), word_strategy()), 0..60)
        ) {
            let mut trie = CompressedTrie::new();
            let mut plp = PostingListPool::new();
            let mut distinct_words: StdHashSet<String> = StdHashSet::new();

            for (doc, word) in &pairs {
                trie.insert_or_locate(word, doc, &mut plp).unwrap();
                distinct_words.insert(word.clone());
            }

            prop_assert_eq!(trie.external_node_count(), distinct_words.len());
            prop_assert!(trie.children_are_disjoint());
        }

        /// Invariant 5: indexing the same (doc_id, words) twice yields
        /// the same posting sets (not multisets) and the same trie shape.
        #[test]
        fn reindexing_is_idempotent(
            doc in doc_id_strategy(),
            words in proptest::collection::vec(word_strategy(), 1..20)
        ) {
            let mut trie = CompressedTrie::new();
            let mut plp = PostingListPool::new();

            let mut handles_first = Vec::new();
            for word in &words {
                let (handle, created) = trie.insert_or_locate(word, &doc, &mut plp).unwrap();
                if !created {
                    plp.add(handle, doc.clone()).unwrap();
                }
                handles_first.push(handle);
            }
            let node_count_after_first = trie.node_count();
            let posting_sets_first: Vec<StdHashSet<String>> = handles_first
                .iter()
                .map(|&h| plp.at(h).unwrap().iter().cloned().collect())
                .collect();

            let mut handles_second = Vec::new();
            for word in &words {
                let (handle, created) = trie.insert_or_locate(word, &doc, &mut plp).unwrap();
                if !created {
                    plp.add(handle, doc.clone()).unwrap();
                }
                handles_second.push(handle);
            }
            let posting_sets_second: Vec<StdHashSet<String>> = handles_second
                .iter()
                .map(|&h| plp.at(h).unwrap().iter().cloned().collect())
                .collect();

            prop_assert_eq!(handles_first, handles_second);
            prop_assert_eq!(posting_sets_first, posting_sets_second);
            prop_assert_eq!(trie.node_count(), node_count_after_first);
        }

        /// Invariant 7: a successful lookup strictly increases the
        /// target external node's rank by exactly 1; a failed lookup
        /// leaves every rank untouched.
        #[test]
        fn rank_monotonicity_holds(
            doc in doc_id_strategy(),
            words in pvec(word_strategy(), 1..10),
            miss in word_strategy(),
        ) {
            let mut trie = CompressedTrie::new();
            let mut plp = PostingListPool::new();
            for word in &words {
                trie.insert_or_locate(word, &doc, &mut plp).unwrap();
            }

            // Each successful lookup advances its word's rank by exactly 1.
            for word in &words {
                let before = trie.lookup(word).unwrap().1;
                let after = trie.lookup(word).unwrap().1;
                prop_assert_eq!(after, before + 1);
            }

            // A failed lookup of a word that was never indexed leaves
            // every previously-indexed word's rank untouched.
            let distinct_words: StdHashSet<&String> = words.iter().collect();
            if !distinct_words.contains(&miss) {
                let ranks_before: Vec<(String, u64)> = distinct_words
                    .iter()
                    .map(|w| ((*w).clone(), trie.lookup(w).unwrap().1))
                    .collect();

                prop_assert!(trie.lookup(&miss).is_none());

                // Every word was looked up exactly once since the
                // snapshot above, so each rank must have advanced by
                // exactly 1 across the (no-op) `miss` lookup.
                for (word, before) in &ranks_before {
                    let after = trie.lookup(word).unwrap().1;
                    prop_assert_eq!(after, before + 1);
                }
            }
        }
    }
}
