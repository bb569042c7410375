//! Table model: one fully-loaded configuration snapshot
//!
//! An ordered sequence of entries in file order. Duplicate parameters are
//! retained; lookup returns the first match, shadowing later duplicates.

use crate::models::entry::Entry;

/// An insertion-ordered collection of configuration entries.
///
/// A `Table` is the unit of replacement for the store: a reload builds a
/// fresh table and swaps it in whole. Entries are never mutated in place
/// after parsing; `push` only appends.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    entries: Vec<Entry>,
}

impl Table {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry, preserving file order. Duplicates are kept.
    pub fn push(&mut self, entry: Entry) {
        self.entries.push(entry);
    }

    /// First-match lookup, ignoring ASCII case in the parameter name.
    ///
    /// Returns `None` when the key is absent; returns `Some(None)` when the
    /// key exists as a bare entry without a value.
    pub fn get(&self, key: &str) -> Option<Option<&str>> {
        self.entries
            .iter()
            .find(|e| e.matches(key))
            .map(|e| e.value.as_deref())
    }

    /// Whether any entry matches `key` (same matching rule as `get`).
    pub fn has(&self, key: &str) -> bool {
        self.entries.iter().any(|e| e.matches(key))
    }

    /// Number of entries, duplicates included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the table holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// An independent, owned copy of all entries in file order.
    pub fn to_vec(&self) -> Vec<Entry> {
        self.entries.clone()
    }
}

impl FromIterator<Entry> for Table {
    fn from_iter<I: IntoIterator<Item = Entry>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
