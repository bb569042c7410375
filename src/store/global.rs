//! Process-wide store for drop-in use at the application's outermost layer
//!
//! The explicit [`Store`] object is the primary API; components should
//! receive their store by reference. This module exists for hosts that want
//! the original handle-free surface: one live table reachable from
//! anywhere, guarded by a reader-writer lock so lookups never observe a
//! half-swapped table.

use std::path::Path;
use std::sync::{OnceLock, RwLock};

use crate::models::Entry;
use crate::store::{Store, StoreError};

static STORE: OnceLock<RwLock<Store>> = OnceLock::new();

fn store() -> &'static RwLock<Store> {
    STORE.get_or_init(|| RwLock::new(Store::new()))
}

/// First-match, case-insensitive lookup against the global live table.
pub fn get(key: &str) -> Option<Option<String>> {
    let guard = store().read().unwrap_or_else(|e| e.into_inner());
    guard.get(key).map(|v| v.map(str::to_string))
}

/// Whether the global live table contains `key`.
pub fn has(key: &str) -> bool {
    let guard = store().read().unwrap_or_else(|e| e.into_inner());
    guard.has(key)
}

/// Append a programmatic override to the global live table.
pub fn set(parameter: impl Into<String>, value: Option<&str>) {
    let mut guard = store().write().unwrap_or_else(|e| e.into_inner());
    guard.set(parameter, value);
}

/// An independent copy of the global live table's entries.
pub fn snapshot() -> Vec<Entry> {
    let guard = store().read().unwrap_or_else(|e| e.into_inner());
    guard.snapshot()
}

/// Reload the global store from `path` without validation.
///
/// The write lock is held for the whole transaction, so concurrent lookups
/// block briefly and then observe either the old or the new table, never
/// an intermediate state.
pub fn reload(path: impl AsRef<Path>) -> Result<(), StoreError> {
    let mut guard = store().write().unwrap_or_else(|e| e.into_inner());
    guard.reload(path)
}

/// Reload the global store from `path`, validated by `validate`.
///
/// The validator runs with the candidate installed and the write lock held;
/// it must use the `&Store` it is given rather than this module's free
/// functions, which would deadlock on the same lock.
pub fn reload_with<F>(path: impl AsRef<Path>, validate: F) -> Result<(), StoreError>
where
    F: FnOnce(&Store) -> Result<(), String>,
{
    let mut guard = store().write().unwrap_or_else(|e| e.into_inner());
    guard.reload_with(path, validate)
}
