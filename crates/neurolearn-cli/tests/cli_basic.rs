//! Basic CLI E2E tests.
//!
//! Tests invoke the built binary against a throwaway data directory and
//! verify the JSON it prints.

use std::path::Path;
use std::process::Command;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(data_dir: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_neurolearn"))
        .args(args)
        .env("NEUROLEARN_DATA_DIR", data_dir)
        .env_remove("NEUROLEARN_API_KEY")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn run_json(data_dir: &Path, args: &[&str]) -> serde_json::Value {
    let (stdout, stderr, code) = run_cli(data_dir, args);
    assert_eq!(code, 0, "command {args:?} failed: {stderr}");
    serde_json::from_str(&stdout).expect("Failed to parse JSON output")
}

fn complete(data_dir: &Path, topic: &str, minutes: &str) -> serde_json::Value {
    run_json(
        data_dir,
        &[
            "session", "complete", "--topic", topic, "--concentration", "4", "--mood", "happy",
            "--goal", "yes", "--minutes", minutes,
        ],
    )
}

#[test]
fn test_fresh_install_is_zero() {
    let dir = tempfile::tempdir().unwrap();
    assert_eq!(run_json(dir.path(), &["xp", "show"])["xp"], 0);
    assert_eq!(run_json(dir.path(), &["streak", "show"])["streak"], 0);
    assert_eq!(run_json(dir.path(), &["history", "list"]), serde_json::json!([]));
}

#[test]
fn test_session_complete_updates_everything() {
    let dir = tempfile::tempdir().unwrap();
    let outcome = complete(dir.path(), "Math", "25");
    assert_eq!(outcome["xp"], 10);
    assert_eq!(outcome["streak"], 1);
    assert_eq!(outcome["record"]["topic"], "Math");
    assert_eq!(outcome["record"]["goalAchieved"], "yes");

    let outcome = complete(dir.path(), "Piano", "40");
    assert_eq!(outcome["xp"], 20);
    assert_eq!(outcome["streak"], 1);

    let today = run_json(dir.path(), &["stats", "today"]);
    assert_eq!(today["todayMinutes"], 65);
    assert_eq!(today["todayLabel"], "1h 5m");

    let summary = run_json(dir.path(), &["stats", "summary"]);
    assert_eq!(summary["totalSessions"], 2);
    assert_eq!(summary["avgConcentration"], 4.0);

    let goal = run_json(dir.path(), &["stats", "goal"]);
    assert_eq!(goal["xp"], 20);
    assert_eq!(goal["progress"], 20.0);

    let history = run_json(dir.path(), &["history", "list", "--limit", "1"]);
    assert_eq!(history.as_array().unwrap().len(), 1);
    assert_eq!(history[0]["topic"], "Piano");
}

#[test]
fn test_invalid_review_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(
        dir.path(),
        &[
            "session", "complete", "--topic", " ", "--concentration", "3", "--mood", "sad",
            "--goal", "no",
        ],
    );
    assert_eq!(code, 1);
    assert!(stderr.contains("error:"), "stderr was: {stderr}");
    assert_eq!(run_json(dir.path(), &["xp", "show"])["xp"], 0);
}

#[test]
fn test_streak_reset_and_data_clear() {
    let dir = tempfile::tempdir().unwrap();
    complete(dir.path(), "Math", "25");

    assert_eq!(run_json(dir.path(), &["streak", "reset"])["streak"], 0);
    let shown = run_json(dir.path(), &["streak", "show"]);
    assert_eq!(shown["streak"], 0);
    assert!(shown["lastSessionDate"].is_string());

    let (_, _, code) = run_cli(dir.path(), &["data", "clear"]);
    assert_ne!(code, 0);

    let (_, _, code) = run_cli(dir.path(), &["data", "clear", "--yes"]);
    assert_eq!(code, 0);
    assert_eq!(run_json(dir.path(), &["xp", "show"])["xp"], 0);
    assert!(run_json(dir.path(), &["streak", "show"])["lastSessionDate"].is_null());
}

#[test]
fn test_xp_add() {
    let dir = tempfile::tempdir().unwrap();
    assert_eq!(run_json(dir.path(), &["xp", "add", "15"])["xp"], 15);
    assert_eq!(run_json(dir.path(), &["xp", "add", "5"])["xp"], 20);
}

#[test]
fn test_config_get_set() {
    let dir = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(dir.path(), &["config", "get", "session.duration_minutes"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "25");

    let (_, _, code) = run_cli(dir.path(), &["config", "set", "progress.xp_per_session", "15"]);
    assert_eq!(code, 0);
    assert_eq!(complete(dir.path(), "Math", "25")["xp"], 15);

    let (_, stderr, code) = run_cli(dir.path(), &["config", "set", "no.such_key", "1"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("Unknown configuration key"));

    let (stdout, _, code) = run_cli(dir.path(), &["config", "list"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("stats.week_start = monday"));
}

#[test]
fn test_assist_prompt_uses_history() {
    let dir = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(dir.path(), &["assist", "prompt", "How am I doing?"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("hasn't recorded any learning sessions"));

    complete(dir.path(), "Chemistry", "25");
    let (stdout, _, code) = run_cli(dir.path(), &["assist", "prompt", "How am I doing?"]);
    assert_eq!(code, 0);
    assert!(stdout.contains("Topic: \"Chemistry\", Concentration: 4/5, Mood: Happy"));
}
