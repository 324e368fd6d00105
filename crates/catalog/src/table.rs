//! Running-total tables
//!
//! Maps a dense global handle to `(kind, local index, offset)` in
//! O(log entries). One entry can stand for thousands of handles (an array
//! group or a matrix), so the search runs over entries, never over handles.
//!
//! Entries are laid out back to back: entry `i` covers
//! `entries[i].start..entries[i + 1].start`, and the last entry ends at
//! `total`. Empty entries are legal and are never the result of a lookup.

use sil_core::{Error, Handle, Result};

/// One table entry: the first handle it covers, its kind and local index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableEntry<K> {
    /// Running total before this entry (its first handle)
    pub start: Handle,
    /// Backing store kind
    pub kind: K,
    /// Index into the backing store
    pub local_index: usize,
}

/// Result of resolving a handle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolved<K> {
    /// Backing store kind
    pub kind: K,
    /// Index into the backing store
    pub local_index: usize,
    /// Position of the handle within its entry
    pub offset: usize,
}

/// Monotonic running-total table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunningTotalTable<K> {
    entries: Vec<TableEntry<K>>,
    /// Sentinel: total number of handles allocated
    total: usize,
}

impl<K> Default for RunningTotalTable<K> {
    fn default() -> Self {
        RunningTotalTable {
            entries: Vec::new(),
            total: 0,
        }
    }
}

impl<K: Copy> RunningTotalTable<K> {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of handles covered
    pub fn total(&self) -> usize {
        self.total
    }

    /// Number of entries (not handles)
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Handles still available before the total would overflow
    pub fn remaining(&self) -> usize {
        usize::MAX - self.total
    }

    /// Fail unless `count` more handles fit
    pub fn check_capacity(&self, count: usize) -> Result<()> {
        if count > self.remaining() {
            return Err(Error::InvalidOperation(format!(
                "cannot reserve {} handles, {} left",
                count,
                self.remaining()
            )));
        }
        Ok(())
    }

    /// Append an entry covering `count` handles
    ///
    /// Returns the first handle of the new entry. The table is unchanged
    /// when `count` does not fit.
    pub fn push(&mut self, kind: K, local_index: usize, count: usize) -> Result<Handle> {
        self.check_capacity(count)?;
        let start = self.total;
        self.entries.push(TableEntry {
            start,
            kind,
            local_index,
        });
        self.total += count;
        Ok(start)
    }

    /// Entries in handle order
    pub fn entries(&self) -> &[TableEntry<K>] {
        &self.entries
    }

    /// Entries with their handle span, in handle order
    pub fn spans(&self) -> impl Iterator<Item = (std::ops::Range<Handle>, &TableEntry<K>)> + '_ {
        self.entries.iter().enumerate().map(move |(i, entry)| {
            let end = self
                .entries
                .get(i + 1)
                .map_or(self.total, |next| next.start);
            (entry.start..end, entry)
        })
    }

    /// Resolve a global handle
    ///
    /// Among entries sharing a start, the last one is the only one that can
    /// be non-empty, and `partition_point` lands on it.
    pub fn resolve(&self, handle: Handle) -> Result<Resolved<K>> {
        if handle >= self.total {
            return Err(Error::out_of_range(handle, self.total));
        }
        let idx = self.entries.partition_point(|entry| entry.start <= handle);
        // handle < total guarantees at least one entry starts at or before it
        let entry = &self.entries[idx - 1];
        Ok(Resolved {
            kind: entry.kind,
            local_index: entry.local_index,
            offset: handle - entry.start,
        })
    }
}
