//! CLI diff integration tests
//!
//! Run the built `patchplan` binary against snapshot files and check the
//! patch printed on stdout.

use serde_json::{json, Value};
use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

fn write_snapshot(dir: &TempDir, name: &str, value: &Value) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, serde_json::to_string(value).unwrap()).unwrap();
    path
}

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_patchplan"))
        .args(args)
        .output()
        .expect("Failed to execute CLI")
}

fn run_diff(kind: &str, desired: &Value, current: &Value, extra: &[&str]) -> Output {
    let dir = TempDir::new().unwrap();
    let desired = write_snapshot(&dir, "desired.json", desired);
    let current = write_snapshot(&dir, "current.json", current);
    let mut args = vec![
        "diff",
        "--kind",
        kind,
        "--desired",
        desired.to_str().unwrap(),
        "--current",
        current.to_str().unwrap(),
    ];
    args.extend_from_slice(extra);
    run(&args)
}

fn stdout_json(output: &Output) -> Value {
    assert!(
        output.status.success(),
        "CLI command should succeed. Stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    serde_json::from_slice(&output.stdout).expect("stdout should be a JSON patch")
}

#[test]
fn test_cli_diff_role_prints_patch() {
    let output = run_diff(
        "role",
        &json!({"name": "auditors", "description": "", "owner": {"id": "222"}}),
        &json!({"name": "auditors", "description": "old", "owner": {"id": "111"}}),
        &[],
    );

    assert_eq!(
        stdout_json(&output),
        json!([
            {"op": "remove", "path": "/description"},
            {"op": "replace", "path": "/owner/id", "value": "222"}
        ])
    );
}

#[test]
fn test_cli_diff_identical_snapshots_prints_empty_patch() {
    let role = json!({"name": "auditors", "requestable": true});
    let output = run_diff("role", &role, &role, &[]);
    assert_eq!(stdout_json(&output), json!([]));
}

#[test]
fn test_cli_diff_strict_zero_replaces_threshold() {
    let output = run_diff(
        "source",
        &json!({"name": "hr", "deleteThreshold": 0}),
        &json!({"name": "hr", "deleteThreshold": 10}),
        &["--strict-zero"],
    );
    assert_eq!(
        stdout_json(&output),
        json!([{"op": "replace", "path": "/deleteThreshold", "value": 0}])
    );
}

#[test]
fn test_cli_diff_beta_schema_keeps_array_json() {
    let output = run_diff(
        "source",
        &json!({"name": "hr", "features": ["PROVISIONING", "SEARCH"]}),
        &json!({"name": "hr", "features": ["SEARCH"]}),
        &["--schema", "beta", "--pretty"],
    );
    assert_eq!(
        stdout_json(&output),
        json!([{"op": "replace", "path": "/features", "value": ["PROVISIONING", "SEARCH"]}])
    );
}

#[test]
fn test_cli_diff_unknown_kind_fails() {
    let output = run_diff("robot", &json!({}), &json!({}), &[]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Error: Unknown resource kind: robot"),
        "unexpected stderr: {}",
        stderr
    );
}

#[test]
fn test_cli_diff_invalid_snapshot_fails() {
    let output = run_diff(
        "role",
        &json!({"name": 42}),
        &json!({}),
        &[],
    );
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid desired snapshot for role"), "unexpected stderr: {}", stderr);
}

#[test]
fn test_cli_kinds_lists_fields_and_modes() {
    let output = run(&["kinds", "source"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("source\n"));
    assert!(stdout.contains("/owner"));
    assert!(stdout.lines().any(|l| l.contains("/cluster") && l.ends_with("reference")));
    assert!(stdout.lines().any(|l| l.contains("/features") && l.ends_with("value")));
}
