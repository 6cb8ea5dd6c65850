//! CLI integration tests
//!
//! Run the built binary against a durable store in a temp directory.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn run(store: &Path, args: &[&str]) -> Output {
    let cli_bin = env!("CARGO_BIN_EXE_storable");
    Command::new(cli_bin)
        .arg("--store")
        .arg(store)
        .args(args)
        .env("RUST_LOG", "off")
        .output()
        .expect("Failed to execute CLI")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

#[test]
fn test_set_then_get_across_invocations() {
    let temp_dir = TempDir::new().unwrap();
    let store = temp_dir.path().join("local.json");

    let output = run(&store, &["set", "a", "x"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "true");

    let output = run(&store, &["get", "a"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), r#""x""#);

    assert_eq!(stdout(&run(&store, &["keys"])), r#"["a"]"#);
    assert_eq!(stdout(&run(&store, &["count"])), "1");
}

#[test]
fn test_get_missing_prints_null() {
    let temp_dir = TempDir::new().unwrap();
    let store = temp_dir.path().join("local.json");

    let output = run(&store, &["get", "missing"]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "null");
}

#[test]
fn test_get_malformed_item_exits_with_error() {
    let temp_dir = TempDir::new().unwrap();
    let store = temp_dir.path().join("local.json");
    fs::write(&store, r#"{"version":1,"entries":[["bad","{oops"]]}"#).unwrap();

    let output = run(&store, &["get", "bad"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("'bad'"), "stderr was: {}", stderr);
}

#[test]
fn test_all_skips_falsy_values() {
    let temp_dir = TempDir::new().unwrap();
    let store = temp_dir.path().join("local.json");

    run(&store, &["set", "n", "0"]);
    run(&store, &["set", "word", "hello"]);

    assert_eq!(stdout(&run(&store, &["get", "n"])), "0");
    assert_eq!(stdout(&run(&store, &["all"])), r#"{"word":"hello"}"#);
}

#[test]
fn test_all_prints_items_in_positional_order() {
    let temp_dir = TempDir::new().unwrap();
    let store = temp_dir.path().join("local.json");

    run(&store, &["set", "zeta", "1"]);
    run(&store, &["set", "alpha", "2"]);

    assert_eq!(stdout(&run(&store, &["keys"])), r#"["zeta","alpha"]"#);
    assert_eq!(stdout(&run(&store, &["all"])), r#"{"zeta":1,"alpha":2}"#);
}

#[test]
fn test_pop_key_and_clear() {
    let temp_dir = TempDir::new().unwrap();
    let store = temp_dir.path().join("local.json");

    run(&store, &["set", "first", "1"]);
    run(&store, &["set", "second", "2"]);

    assert_eq!(stdout(&run(&store, &["key", "1"])), r#""second""#);
    assert_eq!(stdout(&run(&store, &["key", "2"])), "null");

    assert_eq!(stdout(&run(&store, &["pop", "first"])), "true");
    assert_eq!(stdout(&run(&store, &["pop", "first"])), "false");
    assert_eq!(stdout(&run(&store, &["exists", "second"])), "true");

    assert_eq!(stdout(&run(&store, &["clear"])), "true");
    assert_eq!(stdout(&run(&store, &["count"])), "0");
}

#[test]
fn test_set_over_quota_exits_with_error() {
    let temp_dir = TempDir::new().unwrap();
    let store = temp_dir.path().join("local.json");

    let output = run(&store, &["--quota", "4", "set", "key", "too long"]);
    assert!(!output.status.success());
    assert_eq!(stdout(&output), "false");
}

#[test]
fn test_demo_lists_keys_then_clears() {
    let temp_dir = TempDir::new().unwrap();
    let store = temp_dir.path().join("local.json");

    let output = run(&store, &["demo", "--delay-ms", "0"]);
    assert!(output.status.success());

    let out = stdout(&output);
    assert!(out.contains(r#"session keys: ["somekey2"]"#), "stdout was: {}", out);
    assert!(out.contains(r#"local keys: ["somekey1"]"#), "stdout was: {}", out);
    assert!(out.contains("session pop somekey: false"), "stdout was: {}", out);

    assert_eq!(stdout(&run(&store, &["count"])), "0");
}
