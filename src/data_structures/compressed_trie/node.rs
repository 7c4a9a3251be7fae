//! Node representation for the compressed trie.
//!
//! Nodes live in a slab (`Vec<TrieNode>`) owned by the trie; children are
//! referenced by `NodeId`, a plain arena index, rather than `Rc`/`Arc`
//! pointers — there are no concurrent writers to guard against.

use hashbrown::HashMap;

use crate::data_structures::posting_list_pool::Handle;

/// Arena index identifying a node within a `CompressedTrie`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

/// A single node of the compressed trie.
///
/// Internal nodes have two or more children and no payload; external
/// nodes carry a PLP handle and a rank counter and have no children.
#[derive(Debug, Clone)]
pub struct TrieNode {
    /// Edge label leading to this node. The root's key is the sentinel `*`.
    pub key: String,
    /// Children keyed by the first byte of their edge label.
    pub children: HashMap<u8, NodeId>,
    /// Whether this node is external (holds a PLP handle).
    pub is_external: bool,
    /// PLP handle; present only on external nodes.
    pub handle: Option<Handle>,
    /// Search-time rank counter, incremented on each successful lookup.
    pub rank: u64,
}

impl TrieNode {
    /// Creates the persistent root node: internal, no payload, key `*`.
    pub fn root() -> Self {
        Self {
            key: "*".to_string(),
            children: HashMap::new(),
            is_external: false,
            handle: None,
            rank: 0,
        }
    }

    /// Creates an external node with the given key and handle.
    pub fn external(key: String, handle: Handle) -> Self {
        Self {
            key,
            children: HashMap::new(),
            is_external: true,
            handle: Some(handle),
            rank: 0,
        }
    }

    /// Creates an internal node with the given key and no children.
    pub fn internal(key: String) -> Self {
        Self {
            key,
            children: HashMap::new(),
            is_external: false,
            handle: None,
            rank: 0,
        }
    }
}
