//! Entry model for the configuration store
//!
//! Represents a single parsed (parameter, value) pair from a configuration file

use serde::Serialize;

/// A single configuration entry: a parameter name and its optional value.
///
/// The value is `None` for bare keys, i.e. lines that name a parameter
/// without assigning anything to it (`flag` on a line of its own, or
/// `flag =` with nothing after the equals sign).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entry {
    /// Parameter name as written in the file (never empty)
    pub parameter: String,

    /// Assigned value, `None` for bare keys
    pub value: Option<String>,
}

impl Entry {
    /// Create a new entry.
    pub fn new(parameter: impl Into<String>, value: Option<String>) -> Self {
        Self {
            parameter: parameter.into(),
            value,
        }
    }

    /// Whether this entry's parameter matches `key`, ignoring ASCII case.
    pub fn matches(&self, key: &str) -> bool {
        self.parameter.eq_ignore_ascii_case(key)
    }
}
