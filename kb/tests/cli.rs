//! End-to-end tests for the `kb` binary

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// A `kb` invocation isolated inside `temp`: no user config, logs and
/// default board land under the temp dir.
fn kb(temp: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("kb").expect("Failed to find kb binary");
    cmd.current_dir(temp.path())
        .env("HOME", temp.path())
        .env("XDG_DATA_HOME", temp.path().join("data"))
        .env("XDG_CONFIG_HOME", temp.path().join("config"))
        .env("NO_COLOR", "1")
        .env_remove("KANBOARD_REMOTE_URL")
        .env_remove("KANBOARD_REMOTE_PROJECT_ID");
    cmd
}

fn board_path(temp: &TempDir) -> PathBuf {
    temp.path().join("board.json")
}

fn board_arg(path: &Path) -> String {
    path.display().to_string()
}

fn read_board(path: &Path) -> serde_json::Value {
    let raw = fs::read_to_string(path).expect("Failed to read board");
    serde_json::from_str(&raw).expect("Board is not JSON")
}

fn column_titles(stdout: &str, heading: &str) -> Vec<String> {
    stdout
        .lines()
        .skip_while(|l| !l.starts_with(heading))
        .skip(1)
        .take_while(|l| l.starts_with(' '))
        .filter_map(|l| l.trim().strip_prefix('[').and_then(|rest| rest.split_once("] ")))
        .map(|(_, title)| title.to_string())
        .collect()
}

#[test]
fn test_show_seeds_new_board() {
    let temp = TempDir::new().expect("Failed to create temp dir");
    let path = board_path(&temp);

    kb(&temp)
        .args(["show", "--board", &board_arg(&path)])
        .assert()
        .success()
        .stdout(predicate::str::contains("To-do (2)"))
        .stdout(predicate::str::contains("Design landing page"))
        .stdout(predicate::str::contains("Done (2)"));

    let board = read_board(&path);
    let cards = board.as_array().expect("Board should be an array");
    assert_eq!(cards.len(), 6);
    assert!(cards[0].get("createdAt").is_some());
}

#[test]
fn test_add_then_show() {
    let temp = TempDir::new().expect("Failed to create temp dir");
    let path = board_path(&temp);

    kb(&temp)
        .args(["add", "Write release notes", "-d", "for 1.0", "--board", &board_arg(&path)])
        .assert()
        .success()
        .stdout(predicate::str::contains("Created card"));

    let output = kb(&temp)
        .args(["show", "-s", "todo", "--board", &board_arg(&path)])
        .output()
        .expect("Failed to run kb");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(
        column_titles(&stdout, "To-do"),
        vec![
            "Design landing page for support team",
            "Update navigation",
            "Write release notes"
        ]
    );
    assert!(stdout.contains("for 1.0"));
}

#[test]
fn test_add_empty_title_fails() {
    let temp = TempDir::new().expect("Failed to create temp dir");
    let path = board_path(&temp);

    kb(&temp)
        .args(["add", "   ", "--board", &board_arg(&path)])
        .assert()
        .failure()
        .stderr(predicate::str::contains("title"));

    assert_eq!(read_board(&path).as_array().map(Vec::len), Some(6));
}

#[test]
fn test_mv_into_done_at_index() {
    let temp = TempDir::new().expect("Failed to create temp dir");
    let path = board_path(&temp);

    kb(&temp)
        .args(["mv", "3", "done", "--index", "1", "--board", &board_arg(&path)])
        .assert()
        .success()
        .stdout(predicate::str::contains("Moved card"));

    let output = kb(&temp)
        .args(["show", "--board", &board_arg(&path)])
        .output()
        .expect("Failed to run kb");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert_eq!(
        column_titles(&stdout, "Done"),
        vec![
            "Grow email list",
            "Create wireframe for next page",
            "Provide visitors a personalized experience"
        ]
    );
    assert_eq!(column_titles(&stdout, "In-progress"), vec!["Research for solve problem in smooth way"]);
}

#[test]
fn test_mv_unknown_card_is_not_an_error() {
    let temp = TempDir::new().expect("Failed to create temp dir");
    let path = board_path(&temp);

    kb(&temp)
        .args(["mv", "nope", "done", "--board", &board_arg(&path)])
        .assert()
        .success()
        .stdout(predicate::str::contains("No card with id nope"));
}

#[test]
fn test_corrupt_board_is_shown_as_seed_but_not_overwritten() {
    let temp = TempDir::new().expect("Failed to create temp dir");
    let path = board_path(&temp);
    fs::write(&path, "{ not json").expect("Failed to write board");

    kb(&temp)
        .args(["show", "--board", &board_arg(&path)])
        .assert()
        .success()
        .stdout(predicate::str::contains("Design landing page"));
    assert_eq!(fs::read_to_string(&path).expect("Failed to read board"), "{ not json");

    kb(&temp)
        .args(["check", "--board", &board_arg(&path)])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not valid"));
}

#[test]
fn test_repair_and_reset() {
    let temp = TempDir::new().expect("Failed to create temp dir");
    let path = board_path(&temp);
    let gappy = r#"[
  {"id":"a","title":"A","description":"","status":"todo","createdAt":"2024-01-15T10:30:00Z","position":4},
  {"id":"b","title":"B","description":"","status":"todo","createdAt":"2024-01-15T10:30:00Z","position":9}
]"#;
    fs::write(&path, gappy).expect("Failed to write board");

    kb(&temp)
        .args(["repair", "--board", &board_arg(&path)])
        .assert()
        .success();
    let board = read_board(&path);
    let positions: Vec<u64> = board
        .as_array()
        .expect("Board should be an array")
        .iter()
        .filter_map(|c| c["position"].as_u64())
        .collect();
    assert_eq!(positions, vec![0, 1]);

    kb(&temp)
        .args(["reset", "--board", &board_arg(&path)])
        .assert()
        .success()
        .stdout(predicate::str::contains("6 default cards"));
    assert_eq!(read_board(&path).as_array().map(Vec::len), Some(6));
}

#[test]
fn test_check_valid_board() {
    let temp = TempDir::new().expect("Failed to create temp dir");
    let path = board_path(&temp);

    kb(&temp)
        .args(["add", "Seventh", "--board", &board_arg(&path)])
        .assert()
        .success();
    let before = fs::read_to_string(&path).expect("Failed to read board");

    kb(&temp)
        .args(["check", "--board", &board_arg(&path)])
        .assert()
        .success()
        .stdout(predicate::str::contains("7 cards"));
    assert_eq!(fs::read_to_string(&path).expect("Failed to read board"), before);
}

#[test]
fn test_check_missing_board_does_not_create_it() {
    let temp = TempDir::new().expect("Failed to create temp dir");
    let path = temp.path().join("nested").join("board.json");

    kb(&temp)
        .args(["check", "--board", &board_arg(&path)])
        .assert()
        .success()
        .stdout(predicate::str::contains("No board at"));
    assert!(!path.exists());
    assert!(!path.parent().expect("Board path has a parent").exists());
}

#[test]
fn test_config_command_reflects_overrides() {
    let temp = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp.path().join("kb.yml");
    fs::write(&config_path, "board:\n  compaction: destination-only\n").expect("Failed to write config");
    let path = board_path(&temp);

    kb(&temp)
        .args(["config", "--config", &board_arg(&config_path), "--board", &board_arg(&path)])
        .assert()
        .success()
        .stdout(predicate::str::contains("compaction: destination-only"))
        .stdout(predicate::str::contains(board_arg(&path)));

    // Printing config never creates a board
    assert!(!path.exists());
}

#[test]
fn test_remote_reports_configuration() {
    let temp = TempDir::new().expect("Failed to create temp dir");

    kb(&temp)
        .arg("remote")
        .assert()
        .success()
        .stdout(predicate::str::contains("not configured"));

    kb(&temp)
        .arg("remote")
        .env("KANBOARD_REMOTE_URL", "https://db.example.test")
        .env("KANBOARD_REMOTE_PROJECT_ID", "proj-1")
        .assert()
        .success()
        .stdout(predicate::str::contains("https://db.example.test"))
        .stdout(predicate::str::contains("configured (not contacted)"));
}

#[test]
fn test_unknown_status_is_rejected() {
    let temp = TempDir::new().expect("Failed to create temp dir");
    kb(&temp).args(["mv", "1", "archived"]).assert().failure();
}
