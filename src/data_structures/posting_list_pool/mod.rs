// Copyright (c) 2025 Mauka MCP Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Posting-List Pool: an indexable array of document-ID sets with a
//! free-slot list, persisted as a line-oriented text file.
//!
//! Slots are never compacted and freeing is not exposed; the free-slot
//! list is populated only by blank lines encountered at `load` time and
//! is drained by `allocate`.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use hashbrown::HashSet;

use crate::data_structures::tmp_path;
use crate::error::core::{CoreError, CoreResult};

/// Opaque identifier of a document, supplied by external collaborators.
pub type DocId = String;

/// Stable integer index into the posting-list pool.
pub type Handle = usize;

/// A growable pool of posting lists addressed by stable `Handle`s.
#[derive(Debug, Default)]
pub struct PostingListPool {
    slots: Vec<Option<HashSet<DocId>>>,
    free: Vec<usize>,
}

impl PostingListPool {
    /// Creates an empty pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the posting set addressed by `handle`.
    pub fn at(&self, handle: Handle) -> CoreResult<&HashSet<DocId>> {
        self.slots
            .get(handle)
            .and_then(|slot| slot.as_ref())
            .ok_or(CoreError::BadHandle(handle))
    }

    /// Allocates a fresh slot containing exactly `{doc}`, reusing a free
    /// slot if one is available. `O(1)` amortized.
    pub fn allocate(&mut self, doc: DocId) -> Handle {
        let mut set = HashSet::new();
        set.insert(doc);

        if let Some(idx) = self.free.pop() {
            self.slots[idx] = Some(set);
            idx
        } else {
            self.slots.push(Some(set));
            self.slots.len() - 1
        }
    }

    /// Adds `doc` to the slot addressed by `handle`. Idempotent.
    pub fn add(&mut self, handle: Handle, doc: DocId) -> CoreResult<()> {
        let slot = self
            .slots
            .get_mut(handle)
            .and_then(|slot| slot.as_mut())
            .ok_or(CoreError::BadHandle(handle))?;
        slot.insert(doc);
        Ok(())
    }

    /// Number of slots, including free ones.
    pub fn size(&self) -> usize {
        self.slots.len()
    }

    /// Persists the pool to `path` via a temp-file-then-rename, one line
    /// per slot in order; free slots are written as blank lines.
    pub fn save(&self, path: &Path) -> CoreResult<()> {
        let tmp = tmp_path(path);
        {
            let mut writer = BufWriter::new(File::create(&tmp)?);
            for slot in &self.slots {
                match slot {
                    Some(docs) => {
                        let joined = docs.iter().cloned().collect::<Vec<_>>().join(",");
                        writeln!(writer, "{joined}")?;
                    }
                    None => writeln!(writer)?,
                }
            }
            writer.flush()?;
        }
        std::fs::rename(&tmp, path)?;
        Ok(())
    }

    /// Loads a pool from `path`; blank lines populate the free-slot list,
    /// non-blank lines are parsed as comma-separated `DocId`s.
    pub fn load(path: &Path) -> CoreResult<Self> {
        let reader = BufReader::new(File::open(path)?);
        let mut slots = Vec::new();
        let mut free = Vec::new();

        for (idx, line) in reader.lines().enumerate() {
            let line = line?;
            let trimmed = line.trim();
            if trimmed.is_empty() {
                free.push(idx);
                slots.push(None);
            } else {
                let docs: HashSet<DocId> = trimmed.split(',').map(str::to_string).collect();
                slots.push(Some(docs));
            }
        }

        Ok(Self { slots, free })
    }
}
