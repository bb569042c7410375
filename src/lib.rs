//! confkit - Reloadable line-oriented configuration store
//!
//! confkit loads a line-oriented `key = value` file into an in-memory
//! table, serves case-insensitive point lookups, and replaces the whole
//! table atomically at runtime: a failed reload (unreadable file, read
//! error, or a rejected validation) leaves the previous configuration
//! fully intact.

pub mod cli;
pub mod logging;
pub mod models;
pub mod parser;
pub mod store;

pub use models::{Entry, Table};
pub use parser::ParseError;
pub use store::{global, Store, StoreError};

/// Result type alias for confkit operations
pub type Result<T> = anyhow::Result<T>;
