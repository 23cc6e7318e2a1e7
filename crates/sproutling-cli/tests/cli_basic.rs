//! Basic CLI E2E tests.
//!
//! Each test gets its own HOME so state and config land in a throwaway
//! data directory.

use std::path::Path;
use std::process::Command;

fn run_cli(home: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_sproutling-cli"))
        .env("HOME", home)
        .args(args)
        .output()
        .expect("failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

#[test]
fn habit_list_shows_the_seeded_button() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(home.path(), &["habit", "list"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Decision"));
}

#[test]
fn tap_then_undo_roundtrips() {
    let home = tempfile::tempdir().unwrap();

    let (stdout, _, code) = run_cli(home.path(), &["tap", "Decision"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("stage 1"));

    let (stdout, _, code) = run_cli(home.path(), &["stats", "show", "--json"]);
    assert_eq!(code, 0);
    let stats: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(stats["total"], 1);

    let (stdout, _, code) = run_cli(home.path(), &["undo", "Decision"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("undone"));

    let (stdout, _, _) = run_cli(home.path(), &["stats", "show", "--json"]);
    let stats: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(stats["total"], 0);
}

#[test]
fn undoing_with_an_empty_log_reports_nothing_to_undo() {
    let home = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(home.path(), &["undo", "Decision"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("nothing to undo"));
}

#[test]
fn habit_add_move_remove_flow() {
    let home = tempfile::tempdir().unwrap();

    let (_, _, code) = run_cli(home.path(), &["habit", "add", "water", "--color", "#00aaff"]);
    assert_eq!(code, 0);

    let (_, _, code) = run_cli(home.path(), &["habit", "move", "water", "0"]);
    assert_eq!(code, 0);

    let (stdout, _, _) = run_cli(home.path(), &["habit", "list"]);
    let first = stdout.lines().next().unwrap_or_default();
    assert!(first.contains("water"));

    let (_, _, code) = run_cli(home.path(), &["habit", "remove", "water"]);
    assert_eq!(code, 0);
    let (stdout, _, _) = run_cli(home.path(), &["habit", "list"]);
    assert!(!stdout.contains("water"));
}

#[test]
fn unknown_habit_fails_with_an_error() {
    let home = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(home.path(), &["tap", "no-such-habit"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("no habit matching"));
}

#[test]
fn note_set_show_clear() {
    let home = tempfile::tempdir().unwrap();

    let (_, _, code) = run_cli(home.path(), &["note", "set", "Decision", "remember why"]);
    assert_eq!(code, 0);

    let (stdout, _, _) = run_cli(home.path(), &["note", "show", "Decision"]);
    assert!(stdout.contains("remember why"));

    let (_, _, code) = run_cli(home.path(), &["note", "clear", "Decision"]);
    assert_eq!(code, 0);
    let (stdout, _, _) = run_cli(home.path(), &["note", "show", "Decision"]);
    assert!(stdout.contains("(no note)"));
}

#[test]
fn chart_renders_every_range() {
    let home = tempfile::tempdir().unwrap();
    let _ = run_cli(home.path(), &["tap", "Decision"]);

    for range in ["day", "week", "month", "year"] {
        let (stdout, _, code) = run_cli(home.path(), &["stats", "chart", "--range", range]);
        assert_eq!(code, 0, "chart failed for range {range}");
        assert!(!stdout.trim().is_empty());
    }

    let (_, stderr, code) = run_cli(home.path(), &["stats", "chart", "--range", "century"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("unknown range"));
}

#[test]
fn config_get_and_set() {
    let home = tempfile::tempdir().unwrap();

    let (stdout, _, code) = run_cli(home.path(), &["config", "get", "default_color"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("#3b82f6"));

    let (_, _, code) = run_cli(home.path(), &["config", "set", "default_color", "#ff5733"]);
    assert_eq!(code, 0);
    let (stdout, _, _) = run_cli(home.path(), &["config", "get", "default_color"]);
    assert!(stdout.contains("#ff5733"));
}

#[test]
fn state_export_then_import() {
    let home = tempfile::tempdir().unwrap();
    let _ = run_cli(home.path(), &["tap", "Decision"]);

    let (snapshot, _, code) = run_cli(home.path(), &["state", "export"]);
    assert_eq!(code, 0);

    let file = home.path().join("snapshot.json");
    std::fs::write(&file, &snapshot).unwrap();

    let other_home = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(
        other_home.path(),
        &["state", "import", file.to_str().unwrap()],
    );
    assert_eq!(code, 0);
    assert!(stdout.contains("1 events"));
}
