//! Basic CLI E2E tests.
//!
//! Tests invoke CLI commands via cargo run against the dev data directory
//! and verify outputs.

use std::process::Command;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(args: &[&str]) -> (String, String, i32) {
    let output = Command::new("cargo")
        .args(["run", "-p", "wellness-cli", "--"])
        .args(args)
        .env("WELLNESSHUB_ENV", "dev")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

#[test]
fn test_config_show() {
    let (stdout, _, code) = run_cli(&["config", "show"]);
    assert_eq!(code, 0, "config show failed");
    assert!(stdout.contains("daily_goal"));
}

#[test]
fn test_steps_today_json() {
    let (stdout, _, code) = run_cli(&["steps", "today"]);
    assert_eq!(code, 0, "steps today failed");
    let parsed: serde_json::Value =
        serde_json::from_str(&stdout).expect("steps today should print JSON");
    assert!(parsed.get("count").is_some());
    assert!(parsed.get("remaining").is_some());
}

#[test]
fn test_steps_week_renders_seven_bars() {
    let (stdout, _, code) = run_cli(&["steps", "week"]);
    assert_eq!(code, 0, "steps week failed");
    assert_eq!(stdout.lines().count(), 7);
}

#[test]
fn test_mood_add_and_list() {
    let (stdout, _, code) = run_cli(&["mood", "add", "🙂", "--note", "cli test"]);
    assert_eq!(code, 0, "mood add failed");
    assert!(stdout.contains("Mood logged"));

    let (stdout, _, code) = run_cli(&["mood", "list"]);
    assert_eq!(code, 0, "mood list failed");
    assert!(stdout.contains("cli test"));
}

#[test]
fn test_mood_add_rejects_empty_emoji() {
    let (_, stderr, code) = run_cli(&["mood", "add", " "]);
    assert_ne!(code, 0);
    assert!(stderr.contains("must not be empty"));
}

#[test]
fn test_habit_lifecycle() {
    let (stdout, _, code) = run_cli(&["habit", "add", "CLI Habit", "--target", "2"]);
    assert_eq!(code, 0, "habit add failed");
    assert!(stdout.contains("Habit created:"));
    // "Habit created: <name> (<id>)"
    let id = stdout
        .trim()
        .rsplit_once('(')
        .and_then(|(_, rest)| rest.strip_suffix(')'))
        .expect("habit add should print the id")
        .to_string();

    // The success message must reflect a landed write: the stored list and
    // today's completion count have to agree with what was printed.
    let (stdout, _, code) = run_cli(&["habit", "list"]);
    assert_eq!(code, 0, "habit list failed");
    assert!(stdout.contains("CLI Habit"));

    let (stdout, _, code) = run_cli(&["habit", "done", &id]);
    assert_eq!(code, 0, "habit done failed");
    assert!(stdout.contains("Progress:"));

    let (stdout, _, code) = run_cli(&["habit", "list"]);
    assert_eq!(code, 0, "habit list failed");
    let line = stdout
        .lines()
        .find(|l| l.contains(&id))
        .expect("habit should still be listed");
    assert!(line.contains("/2"), "completion count not persisted: {line}");

    let (_, _, code) = run_cli(&["habit", "delete", &id]);
    assert_eq!(code, 0, "habit delete failed");
}

#[test]
fn test_remind_set_and_status() {
    let (stdout, _, code) = run_cli(&["remind", "set", "--interval", "45"]);
    assert_eq!(code, 0, "remind set failed");
    assert!(stdout.contains("Reminder set"));

    let (stdout, _, code) = run_cli(&["remind", "status"]);
    assert_eq!(code, 0, "remind status failed");
    assert!(stdout.contains("\"interval_minutes\": 45"));
}

#[test]
fn test_remind_set_rejects_bad_time() {
    let (_, stderr, code) = run_cli(&["remind", "set", "--start", "8am"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("Invalid time"));
}
