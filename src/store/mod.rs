//! Configuration store and reload transaction
//!
//! The [`Store`] owns the live [`Table`] and replaces it atomically from
//! the caller's point of view: a reload parses a candidate table, installs
//! it, runs the caller's validator against the installed store, and either
//! commits the candidate or reinstates the previous table unchanged. No
//! caller ever observes a partially-parsed or partially-validated table.

pub mod global;

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{info, warn};

use crate::models::{Entry, Table};
use crate::parser::{self, ParseError};

/// Error produced by a failed reload. All variants leave the previous
/// table fully intact and operative.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("cannot open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    #[error("validation rejected {path}: {message}")]
    Validation { path: PathBuf, message: String },
}

/// The in-memory configuration store.
///
/// Lookups run against the live table; `reload` swaps the whole table in a
/// single transaction. The store itself is not synchronized; a threaded
/// host wraps it in a lock (see [`global`]) or hands each component its
/// own reference.
#[derive(Debug, Default)]
pub struct Store {
    table: Table,
}

impl Store {
    /// Create a store with an empty live table.
    pub fn new() -> Self {
        Self::default()
    }

    /// First-match, case-insensitive lookup against the live table.
    ///
    /// `None` when the key is absent; `Some(None)` for a bare key.
    pub fn get(&self, key: &str) -> Option<Option<&str>> {
        self.table.get(key)
    }

    /// Whether the live table contains `key` (same matching rule as `get`).
    pub fn has(&self, key: &str) -> bool {
        self.table.has(key)
    }

    /// Append a programmatic override to the live table.
    ///
    /// No deduplication: an earlier entry with the same parameter keeps
    /// shadowing this one on lookup.
    pub fn set(&mut self, parameter: impl Into<String>, value: Option<&str>) {
        self.table
            .push(Entry::new(parameter, value.map(str::to_string)));
    }

    /// An independent, owned copy of the live table's entries.
    ///
    /// Safe to enumerate after any number of later reloads.
    pub fn snapshot(&self) -> Vec<Entry> {
        self.table.to_vec()
    }

    /// Number of entries in the live table.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// True when the live table holds no entries.
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Replace the live table from `path` without validation.
    pub fn reload(&mut self, path: impl AsRef<Path>) -> Result<(), StoreError> {
        self.reload_with(path, |_| Ok(()))
    }

    /// Replace the live table from `path`, validated by `validate`.
    ///
    /// The transaction: open the file, parse a candidate table, install the
    /// candidate, then invoke `validate` on the store so the validator sees
    /// the candidate through the same lookup surface as every other caller
    /// (it may cross-reference keys via `get`/`has`). If the validator
    /// returns an error message, the candidate is discarded and the
    /// previous table is reinstated.
    pub fn reload_with<F>(&mut self, path: impl AsRef<Path>, validate: F) -> Result<(), StoreError>
    where
        F: FnOnce(&Store) -> Result<(), String>,
    {
        let path = path.as_ref();

        let file = File::open(path).map_err(|source| {
            warn!(path = %path.display(), error = %source, "reload failed to open source");
            StoreError::Open {
                path: path.to_path_buf(),
                source,
            }
        })?;

        let candidate = parser::parse_reader(BufReader::new(file)).map_err(|source| {
            warn!(path = %path.display(), error = %source, "reload failed to parse source");
            StoreError::Parse {
                path: path.to_path_buf(),
                source,
            }
        })?;

        // Install before validating; roll back if the validator objects.
        let previous = std::mem::replace(&mut self.table, candidate);

        if let Err(message) = validate(self) {
            self.table = previous;
            warn!(path = %path.display(), %message, "reload rejected by validator, previous configuration kept");
            return Err(StoreError::Validation {
                path: path.to_path_buf(),
                message,
            });
        }

        info!(path = %path.display(), entries = self.table.len(), "configuration reloaded");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn config_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("failed to create temp config");
        file.write_all(contents.as_bytes())
            .expect("failed to write temp config");
        file
    }

    #[test]
    fn test_reload_replaces_live_table() {
        let first = config_file("a = 1\n");
        let second = config_file("b = 2\n");

        let mut store = Store::new();
        store.reload(first.path()).unwrap();
        assert_eq!(store.get("a"), Some(Some("1")));

        store.reload(second.path()).unwrap();
        assert_eq!(store.get("a"), None);
        assert_eq!(store.get("b"), Some(Some("2")));
    }

    #[test]
    fn test_open_failure_keeps_previous_table() {
        let first = config_file("a = 1\n");
        let mut store = Store::new();
        store.reload(first.path()).unwrap();

        let err = store.reload("/nonexistent/confkit.conf").unwrap_err();
        assert!(matches!(err, StoreError::Open { .. }));
        assert_eq!(store.get("a"), Some(Some("1")));
    }

    #[test]
    fn test_validator_rejection_rolls_back() {
        let first = config_file("a = 1\n");
        let second = config_file("b = 2\n");

        let mut store = Store::new();
        store.reload(first.path()).unwrap();

        let err = store
            .reload_with(second.path(), |s| {
                // The validator sees the candidate already installed.
                assert_eq!(s.get("b"), Some(Some("2")));
                assert_eq!(s.get("a"), None);
                Err("b is not allowed".to_string())
            })
            .unwrap_err();

        assert!(matches!(err, StoreError::Validation { .. }));
        assert!(err.to_string().contains("b is not allowed"));
        assert_eq!(store.get("a"), Some(Some("1")));
        assert_eq!(store.get("b"), None);
    }

    #[test]
    fn test_validator_acceptance_commits() {
        let second = config_file("b = 2\n");
        let mut store = Store::new();
        store.set("a", Some("1"));

        store
            .reload_with(second.path(), |s| {
                if s.has("b") {
                    Ok(())
                } else {
                    Err("missing b".to_string())
                }
            })
            .unwrap();

        assert_eq!(store.get("a"), None);
        assert_eq!(store.get("b"), Some(Some("2")));
    }

    #[test]
    fn test_set_appends_and_is_shadowed_by_earlier_entries() {
        let mut store = Store::new();
        store.set("key", Some("first"));
        store.set("key", Some("second"));
        store.set("bare", None);

        assert_eq!(store.get("key"), Some(Some("first")));
        assert_eq!(store.get("bare"), Some(None));
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_snapshot_survives_reload() {
        let first = config_file("a = 1\n");
        let second = config_file("b = 2\n");

        let mut store = Store::new();
        store.reload(first.path()).unwrap();
        let snapshot = store.snapshot();

        store.reload(second.path()).unwrap();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].parameter, "a");
        assert_eq!(snapshot[0].value.as_deref(), Some("1"));
    }
}
