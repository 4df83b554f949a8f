//! End-to-end tests for the command-line binary.
//!
//! The interactive timer needs a terminal, so these tests cover the
//! non-interactive surface: help, completions, and the `config` subcommand.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;

// ============================================================================
// Test Helpers
// ============================================================================

fn pomodoro() -> Command {
    let mut cmd = Command::cargo_bin("pomodoro-cli").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

// ============================================================================
// Help and Completions
// ============================================================================

#[test]
fn test_help_lists_subcommands() {
    pomodoro()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("run"))
        .stdout(predicate::str::contains("config"))
        .stdout(predicate::str::contains("completions"));
}

#[test]
fn test_run_help_lists_overrides() {
    pomodoro()
        .args(["run", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--work"))
        .stdout(predicate::str::contains("--break-time"))
        .stdout(predicate::str::contains("--resume"));
}

#[test]
fn test_completions_bash() {
    pomodoro()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("pomodoro-cli"));
}

#[test]
fn test_zero_duration_override_is_rejected() {
    pomodoro().args(["run", "--work", "0"]).assert().failure();
}

// ============================================================================
// Config Subcommand
// ============================================================================

#[test]
fn test_config_creates_file_on_first_run() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pomodoro.json");

    let output = pomodoro()
        .arg("--config")
        .arg(&path)
        .arg("config")
        .assert()
        .success()
        .stderr(predicate::str::contains("設定ファイルを作成しました"))
        .get_output()
        .stdout
        .clone();

    assert!(path.exists());
    let printed: Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(printed["pomodoroTime"], 1800);
    assert_eq!(printed["breakTime"], 60);
}

#[test]
fn test_config_library_profile() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pomodoro.json");

    pomodoro()
        .arg("--config")
        .arg(&path)
        .args(["--profile", "library", "config"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"pomodoroTime\": 3120"));
}

#[test]
fn test_config_prints_merged_document() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pomodoro.json");
    fs::write(&path, r#"{"breakTime": 5, "theme": "dark"}"#).unwrap();

    pomodoro()
        .arg("--config")
        .arg(&path)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"breakTime\": 5"))
        .stdout(predicate::str::contains("\"theme\": \"dark\""))
        .stdout(predicate::str::contains("\"pomodoroTime\": 1800"))
        .stderr(predicate::str::contains("作成しました").not());
}

#[test]
fn test_config_invalid_json_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("pomodoro.json");
    fs::write(&path, "{ not json").unwrap();

    pomodoro()
        .arg("--config")
        .arg(&path)
        .arg("config")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("エラー"))
        .stderr(predicate::str::contains("修正するか削除"));
}

#[test]
fn test_config_conflicts_with_local() {
    pomodoro()
        .args(["--config", "a.json", "--local", "config"])
        .assert()
        .failure();
}
