//! Integration tests for the dagedit CLI
//!
//! These tests run the actual binary against graph documents on disk and
//! verify output and exit codes.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Get the binary to test
fn dagedit_cmd() -> Command {
    Command::cargo_bin("dagedit").unwrap()
}

fn write_doc(dir: &TempDir, name: &str, yaml: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, yaml).unwrap();
    path
}

const VALID_CHAIN: &str = r#"
nodes:
  - id: a
    label: Start
  - id: b
    label: Middle
  - id: c
    label: End
edges:
  - source: a
    target: b
  - source: b
    target: c
"#;

const CYCLE: &str = r#"
nodes:
  - id: a
    label: A
  - id: b
    label: B
  - id: c
    label: C
edges:
  - source: a
    target: b
  - source: b
    target: c
  - source: c
    target: a
"#;

#[test]
fn test_help_flag() {
    dagedit_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "validate and auto-layout graph documents",
        ));
}

// ============================================================================
// Validate command
// ============================================================================

#[test]
fn test_validate_valid_chain() {
    let dir = TempDir::new().unwrap();
    let file = write_doc(&dir, "chain.yaml", VALID_CHAIN);

    dagedit_cmd()
        .args(["validate", file.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("Valid DAG"));
}

#[test]
fn test_validate_cycle_fails_with_reason() {
    let dir = TempDir::new().unwrap();
    let file = write_doc(&dir, "cycle.yaml", CYCLE);

    dagedit_cmd()
        .args(["validate", file.to_str().unwrap()])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Cycle detected in DAG."));
}

#[test]
fn test_validate_isolated_node() {
    let dir = TempDir::new().unwrap();
    let file = write_doc(
        &dir,
        "isolated.yaml",
        r#"
nodes:
  - id: a
    label: A
  - id: b
    label: B
  - id: lone
    label: Lone
edges:
  - source: a
    target: b
"#,
    );

    dagedit_cmd()
        .args(["validate", file.to_str().unwrap()])
        .assert()
        .failure()
        .stdout(predicate::str::contains("All nodes must be connected."));
}

#[test]
fn test_validate_too_few_nodes() {
    let dir = TempDir::new().unwrap();
    let file = write_doc(
        &dir,
        "single.yaml",
        r#"
nodes:
  - id: only
    label: Only
edges: []
"#,
    );

    dagedit_cmd()
        .args(["validate", file.to_str().unwrap()])
        .assert()
        .failure()
        .stdout(predicate::str::contains("At least two nodes required."));
}

#[test]
fn test_validate_json_format() {
    let dir = TempDir::new().unwrap();
    let file = write_doc(&dir, "chain.yaml", VALID_CHAIN);

    dagedit_cmd()
        .args(["validate", file.to_str().unwrap(), "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"valid\":true"))
        .stdout(predicate::str::contains("\"nodes\":3"));
}

#[test]
fn test_validate_dangling_edge_is_an_error() {
    let dir = TempDir::new().unwrap();
    let file = write_doc(
        &dir,
        "dangling.yaml",
        r#"
nodes:
  - id: a
    label: A
  - id: b
    label: B
edges:
  - source: a
    target: ghost
"#,
    );

    // structural violation, not a verdict: reported on stderr with a fix
    dagedit_cmd()
        .args(["validate", file.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Dangling edge"))
        .stderr(predicate::str::contains("Fix:"));
}

#[test]
fn test_validate_missing_file() {
    dagedit_cmd()
        .args(["validate", "no-such-file.yaml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error:"));
}

// ============================================================================
// Layout command
// ============================================================================

#[test]
fn test_layout_writes_positions_to_stdout() {
    let dir = TempDir::new().unwrap();
    let file = write_doc(&dir, "chain.yaml", VALID_CHAIN);

    let output = dagedit_cmd()
        .args(["layout", file.to_str().unwrap()])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let yaml = String::from_utf8(output).unwrap();
    assert!(yaml.contains("position"));
    // first rank sits at the origin for left-to-right layout
    assert!(yaml.contains("x: 0.0"));
}

#[test]
fn test_layout_to_output_file() {
    let dir = TempDir::new().unwrap();
    let file = write_doc(&dir, "chain.yaml", VALID_CHAIN);
    let out = dir.path().join("laid-out.yaml");

    dagedit_cmd()
        .args([
            "layout",
            file.to_str().unwrap(),
            "--output",
            out.to_str().unwrap(),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("3 nodes laid out"));

    let written = fs::read_to_string(&out).unwrap();
    assert!(written.contains("position"));
}

#[test]
fn test_layout_top_to_bottom() {
    let dir = TempDir::new().unwrap();
    let file = write_doc(&dir, "chain.yaml", VALID_CHAIN);

    dagedit_cmd()
        .args(["layout", file.to_str().unwrap(), "--direction", "TB"])
        .assert()
        .success();
}

#[test]
fn test_layout_unknown_direction() {
    let dir = TempDir::new().unwrap();
    let file = write_doc(&dir, "chain.yaml", VALID_CHAIN);

    dagedit_cmd()
        .args(["layout", file.to_str().unwrap(), "--direction", "diagonal"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown layout direction"))
        .stderr(predicate::str::contains("Fix:"));
}

#[test]
fn test_layout_does_not_require_valid_dag() {
    // layout on a cyclic graph is unspecified but must not crash
    let dir = TempDir::new().unwrap();
    let file = write_doc(&dir, "cycle.yaml", CYCLE);

    dagedit_cmd()
        .args(["layout", file.to_str().unwrap()])
        .assert()
        .success();
}
