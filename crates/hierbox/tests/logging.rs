//! Tests for logging initialisation
//!
//! Only one global subscriber can be installed per process, so most calls
//! here may fail with "already initialised"; they must never panic.

use hierbox::core::logging::{init_logging, resolve_format, LogFormat};
use hierbox::hierarchy::{Hierarchy, HierarchyRenderer};
use std::str::FromStr;

#[test]
fn test_log_format_parsing() {
    assert_eq!(LogFormat::from_str("compact").unwrap(), LogFormat::Compact);
    assert_eq!(LogFormat::from_str("Pretty").unwrap(), LogFormat::Pretty);
    assert_eq!(LogFormat::from_str("json").unwrap(), LogFormat::Json);
    assert!(LogFormat::from_str("").is_err());
}

#[test]
fn test_default_format_is_compact() {
    if std::env::var("HIERBOX_LOG_FORMAT").is_err() {
        assert_eq!(resolve_format(None).unwrap(), LogFormat::Compact);
    }
}

#[test]
fn test_init_logging_with_levels() {
    for level in ["trace", "debug", "info", "warn", "error", "off"] {
        let _ = init_logging(Some(level), Some("compact"));
    }
}

#[test]
fn test_init_logging_with_formats() {
    for format in LogFormat::variants() {
        let _ = init_logging(Some("info"), Some(format));
    }
}

#[test]
fn test_init_logging_invalid_format() {
    let result = init_logging(Some("info"), Some("invalid_format"));
    assert!(result.is_err());
}

#[test]
fn test_layout_runs_with_tracing_enabled() {
    let _ = init_logging(Some("trace"), Some("json"));
    let tree = Hierarchy::new().with_child(
        "root",
        Hierarchy::new().with_leaf("a").with_child("b", Hierarchy::new().with_leaf("c")),
    );
    let list = HierarchyRenderer::default().draw_list(&tree).unwrap();
    assert_eq!(list.boxes().count(), 4);
}
