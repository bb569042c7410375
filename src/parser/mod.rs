//! Line-oriented configuration parser
//!
//! Turns a text stream into an insertion-ordered [`Table`] of
//! (parameter, optional value) pairs. The format is deliberately lenient:
//!
//! ```text
//! # full-line comment
//! key = value
//! key=value
//! key value          # no '=' after the key -> bare key, no value
//! key = "with spaces"
//! key = value   # inline comment stripped
//! ```
//!
//! Malformed lines never abort the parse; they degrade to a key with an
//! empty or odd-looking value. Parsing fails only when the underlying
//! reader fails.
//!
//! Known quirk, kept for compatibility: inline comments are stripped at the
//! LAST `#` found anywhere on the line, so a `#` inside a quoted value also
//! starts a comment and truncates the value.

use std::io::BufRead;

use thiserror::Error;
use tracing::debug;

use crate::models::{Entry, Table};

/// Characters that end a parameter name.
const KEY_TERMINATORS: &[char] = &[' ', '\t', '\r', '\n', '='];

/// Error produced while reading configuration text.
///
/// Syntax never produces an error; only the reader can fail.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("read error at line {line}: {source}")]
    Read {
        line: usize,
        #[source]
        source: std::io::Error,
    },
}

/// Parse configuration text from a buffered reader into a [`Table`].
pub fn parse_reader<R: BufRead>(mut reader: R) -> Result<Table, ParseError> {
    let mut table = Table::new();
    let mut buf = String::new();
    let mut line = 0usize;

    loop {
        line += 1;
        buf.clear();
        let read = reader
            .read_line(&mut buf)
            .map_err(|source| ParseError::Read { line, source })?;
        if read == 0 {
            break;
        }
        if let Some(entry) = parse_line(&buf) {
            table.push(entry);
        }
    }

    debug!(entries = table.len(), "parsed configuration");
    Ok(table)
}

/// Parse configuration text already held in memory.
///
/// Infallible: with no reader involved there is nothing left to fail.
pub fn parse_str(input: &str) -> Table {
    let mut table = Table::new();
    for raw in input.split_inclusive('\n') {
        if let Some(entry) = parse_line(raw) {
            table.push(entry);
        }
    }
    table
}

/// Parse one raw line into an entry, or `None` for blank and comment lines.
fn parse_line(raw: &str) -> Option<Entry> {
    // Locate the first non-whitespace character; blank lines carry nothing.
    let key_start = raw.find(|c: char| !is_space(c))?;
    if raw[key_start..].starts_with('#') {
        return None;
    }

    // Inline comment: truncate at the last '#' anywhere on the line. This
    // intentionally applies inside quoted values as well (inherited quirk).
    let line = match raw.rfind('#') {
        Some(pos) => &raw[..pos],
        None => raw,
    };
    let rest = &line[key_start..];

    // The key ends at the first whitespace or '='.
    let (parameter, value) = match rest.find(KEY_TERMINATORS) {
        None => (rest, None),
        Some(end) => {
            let parameter = &rest[..end];
            let after = &rest[end..];
            if after.starts_with('=') {
                (parameter, extract_value(&after[1..]))
            } else {
                // Whitespace terminator: the value starts after the next
                // '=' on the line, if there is one.
                match after.find('=') {
                    Some(eq) => (parameter, extract_value(&after[eq + 1..])),
                    None => (parameter, None),
                }
            }
        }
    };

    if parameter.is_empty() {
        return None;
    }
    Some(Entry::new(parameter, value))
}

/// Trim and unquote the raw text after the '='.
///
/// Leading whitespace is discarded; trailing `\r`, `\n`, tab and space are
/// stripped repeatedly; one surrounding pair of matching quotes is removed
/// when the trimmed value is at least two characters. A value that is blank
/// after trimming counts as absent.
fn extract_value(raw: &str) -> Option<String> {
    let start = raw.find(|c: char| !is_space(c))?;
    let trimmed = raw[start..].trim_end_matches(is_space);

    let bytes = trimmed.as_bytes();
    if bytes.len() >= 2 {
        let (first, last) = (bytes[0], bytes[bytes.len() - 1]);
        if first == last && (first == b'"' || first == b'\'') {
            return Some(trimmed[1..trimmed.len() - 1].to_string());
        }
    }
    Some(trimmed.to_string())
}

fn is_space(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n')
}
