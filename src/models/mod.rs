//! Data model for the confkit configuration store

pub mod entry;
pub mod table;

pub use entry::*;
pub use table::*;
