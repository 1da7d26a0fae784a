//! CLI Integration Tests
//!
//! These tests run the `xlog` binary end-to-end with piped stdin.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

// ============================================================================
// Test Utilities
// ============================================================================

fn xlog() -> Command {
    let mut cmd = Command::cargo_bin("xlog").expect("Failed to find xlog binary");
    cmd.env_remove("RUST_LOG");
    cmd
}

const INPUT: &str = "DEBUG cache warm\nINFO listening\nWARN slow query\nERROR and WARN together\n";

// ============================================================================
// Stdout Tests
// ============================================================================

#[test]
fn test_default_filters_debug_and_colorizes() {
    xlog()
        .write_stdin(INPUT)
        .assert()
        .success()
        .stdout(
            "INFO listening\n\
             \x1b[33mWARN\x1b[0m slow query\n\
             ERROR and \x1b[33mWARN\x1b[0m together\n",
        );
}

#[test]
fn test_min_level_flag() {
    xlog()
        .args(["--min-level", "error"])
        .write_stdin(INPUT)
        .assert()
        .success()
        .stdout(predicate::str::contains("together"))
        .stdout(predicate::str::contains("listening").not())
        .stdout(predicate::str::contains("slow query").not());
}

#[test]
fn test_non_stdout_name_is_plain() {
    xlog()
        .args(["--name", "plain", "--min-level", "debug"])
        .write_stdin(INPUT)
        .assert()
        .success()
        .stdout(INPUT);
}

#[test]
fn test_untagged_lines_pass_as_info() {
    xlog()
        .write_stdin("hello\nworld")
        .assert()
        .success()
        .stdout("hello\nworld\n");

    xlog()
        .args(["-l", "warn"])
        .write_stdin("hello\nworld\n")
        .assert()
        .success()
        .stdout("");
}

#[test]
fn test_invalid_level_fails() {
    xlog()
        .args(["--min-level", "loud"])
        .write_stdin(INPUT)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid log level: loud"));
}

// ============================================================================
// File and Config Tests
// ============================================================================

#[test]
fn test_output_file_is_appended_without_color() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("logs").join("app.log");

    for _ in 0..2 {
        xlog()
            .arg("--output")
            .arg(&path)
            .args(["--min-level", "warn"])
            .write_stdin(INPUT)
            .assert()
            .success()
            .stdout("");
    }

    let content = fs::read_to_string(&path).unwrap();
    assert_eq!(
        content,
        "WARN slow query\nERROR and WARN together\n\
         WARN slow query\nERROR and WARN together\n"
    );
}

#[test]
fn test_config_file() {
    let temp = TempDir::new().unwrap();
    let config_path = temp.path().join("sink.json");
    fs::write(
        &config_path,
        r#"{ "target": "stdout", "min_level": "debug", "colors": { "DEBUG": "<dbg>" } }"#,
    )
    .unwrap();

    xlog()
        .arg("--config")
        .arg(&config_path)
        .write_stdin("DEBUG cache warm\n")
        .assert()
        .success()
        .stdout("<dbg> cache warm\n");
}

#[test]
fn test_bad_config_file_fails() {
    let temp = TempDir::new().unwrap();
    let config_path = temp.path().join("sink.json");
    fs::write(&config_path, r#"{ "target": "stdout", "colors": { "LOUD": "x" } }"#).unwrap();

    xlog()
        .arg("--config")
        .arg(&config_path)
        .write_stdin(INPUT)
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown color token: LOUD"));
}

#[test]
fn test_config_with_explicit_min_level_is_rejected() {
    let temp = TempDir::new().unwrap();
    let config_path = temp.path().join("sink.json");
    fs::write(&config_path, r#"{ "target": "stdout", "min_level": "error" }"#).unwrap();

    xlog()
        .arg("--config")
        .arg(&config_path)
        .args(["--min-level", "debug"])
        .write_stdin(INPUT)
        .assert()
        .failure()
        .stdout("")
        .stderr(predicate::str::contains("cannot be used with"));
}
