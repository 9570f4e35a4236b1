//! End-to-end tests of the hierbox binary
//!
//! Output goes to a pipe, so `--color auto` must never emit escape codes.

use std::fs;
use std::io::Write;
use std::process::{Command, Output, Stdio};
use tempfile::tempdir;

const TREE: &str = r#"{"root": {"child1": {}, "child2": {"child2a": {}, "child2b": {}}, "child3": {}}}"#;

fn hierbox(args: &[&str], stdin: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_hierbox"))
        .args(args)
        .env_remove("NO_COLOR")
        .env_remove("HIERBOX_LOG_LEVEL")
        .env_remove("HIERBOX_LOG_FORMAT")
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn hierbox");
    child
        .stdin
        .take()
        .expect("stdin")
        .write_all(stdin.as_bytes())
        .expect("write stdin");
    child.wait_with_output().expect("wait for hierbox")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn render_svg_from_stdin() {
    let output = hierbox(&["render"], TREE);
    assert!(output.status.success());
    let svg = stdout(&output);
    assert!(svg.starts_with("<svg"));
    assert!(svg.trim_end().ends_with("</svg>"));
    assert!(svg.contains("child2b"));
}

#[test]
fn render_ascii_to_pipe_has_no_escape_codes() {
    let output = hierbox(&["render", "--format", "ascii"], TREE);
    assert!(output.status.success());
    let text = stdout(&output);
    assert!(text.contains("child1"));
    assert!(!text.contains('\x1b'));
}

#[test]
fn render_ascii_color_always() {
    let output = hierbox(
        &["render", "--format", "ascii", "--color", "always"],
        TREE,
    );
    assert!(output.status.success());
    assert!(stdout(&output).contains('\x1b'));
}

#[test]
fn render_writes_output_file() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("tree.json");
    let target = dir.path().join("tree.svg");
    fs::write(&input, TREE).unwrap();

    let output = hierbox(
        &[
            "render",
            "-i",
            input.to_str().unwrap(),
            "-o",
            target.to_str().unwrap(),
            "--compact",
            "--ct",
            "1",
        ],
        "",
    );
    assert!(output.status.success());
    let svg = fs::read_to_string(&target).unwrap();
    assert!(svg.contains("data-mode=\"staggered\""));
}

#[test]
fn stats_json() {
    let output = hierbox(&["stats", "--json"], TREE);
    assert!(output.status.success());
    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(value["nodes"], 6);
    assert_eq!(value["leaves"], 4);
}

#[test]
fn validate_reports_bad_input() {
    let output = hierbox(&["validate"], "{\"root\": ");
    assert!(!output.status.success());
    assert!(stdout(&output).contains("✗ Invalid hierarchy"));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Error:"));
}

#[test]
fn validate_accepts_good_input() {
    let output = hierbox(&["validate"], TREE);
    assert!(output.status.success());
    assert!(stdout(&output).contains("✓ Valid hierarchy: 6 nodes, depth 3"));
}

#[test]
fn palettes_lists_every_palette() {
    let output = hierbox(&["palettes"], "");
    assert!(output.status.success());
    let text = stdout(&output);
    for name in ["blue", "maroon", "pink", "green", "orange", "purple", "grey"] {
        assert!(text.contains(name), "missing {name}");
    }
}
