//! Integration tests for the process-wide store wrapper
//!
//! This file owns its test binary, so the global table is not shared with
//! any other test target. The tests still run in one sequence over shared
//! state, so everything lives in a single #[test].

use confkit::global;
use std::io::Write;
use tempfile::NamedTempFile;

fn config_file(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("failed to create fixture file");
    file.write_all(contents.as_bytes())
        .expect("failed to write fixture file");
    file
}

#[test]
fn test_global_reload_lookup_and_rollback() {
    let first = config_file("listen = 0.0.0.0\nport = 9000\n");
    let second = config_file("port = 9001\n");

    global::reload(first.path()).unwrap();
    assert_eq!(global::get("LISTEN"), Some(Some("0.0.0.0".to_string())));
    assert!(global::has("port"));

    // Failed validation keeps the first file's table live.
    let err = global::reload_with(second.path(), |s| {
        if s.has("listen") {
            Ok(())
        } else {
            Err("listen address is required".to_string())
        }
    })
    .unwrap_err();
    assert!(err.to_string().contains("listen address is required"));
    assert_eq!(global::get("port"), Some(Some("9000".to_string())));

    // Unreadable path leaves it untouched as well.
    global::reload("/nonexistent/confkit.conf").unwrap_err();
    assert_eq!(global::get("listen"), Some(Some("0.0.0.0".to_string())));

    // Programmatic override appends and is visible to lookups.
    global::set("extra", Some("added"));
    assert_eq!(global::get("extra"), Some(Some("added".to_string())));

    let snapshot = global::snapshot();
    assert_eq!(snapshot.len(), 3);
    assert_eq!(snapshot[0].parameter, "listen");

    // Successful reload finally swaps the table.
    global::reload(second.path()).unwrap();
    assert_eq!(global::get("port"), Some(Some("9001".to_string())));
    assert_eq!(global::get("listen"), None);
    assert_eq!(global::get("extra"), None);

    // The earlier snapshot still describes the old table.
    assert_eq!(snapshot[1].value.as_deref(), Some("9000"));
}
