//! Integration tests for the `slots` CLI binary.
//!
//! These tests use `assert_cmd` and `predicates` to exercise the find, book,
//! and settings subcommands through the actual binary, including stdin input,
//! file I/O, settings files and error handling.

// `Command::cargo_bin` was deprecated in assert_cmd 2.1.2 in favor of
// `cargo::cargo_bin_cmd!`. Allow it until we migrate.
#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;

/// Helper: path to the team.json fixture (Mon 2026-03-16, Carol has no busy data).
fn team_json_path() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/team.json")
}

/// Helper: path to the settings.toml fixture (150-minute meetings, one day).
fn settings_toml_path() -> &'static str {
    concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/settings.toml")
}

/// Helper: the binary with no ambient settings file.
fn slots() -> Command {
    let mut cmd = Command::cargo_bin("slots").unwrap();
    cmd.env_remove("SLOTS_CONFIG");
    cmd
}

/// Helper: run to success and parse stdout as JSON.
fn json_output(cmd: &mut Command) -> Value {
    let output = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&output).expect("stdout must be valid JSON")
}

fn slot_starts(result: &Value) -> Vec<&str> {
    result["slots"]
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["start"].as_str().unwrap())
        .collect()
}

// ─────────────────────────────────────────────────────────────────────────────
// find
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn find_with_default_settings() {
    let result = json_output(slots().args(["find", "-i", team_json_path()]));

    // Mon 10:00-13:00 and 15:30-17:30; Tue fully booked; Wed-Fri whole days.
    assert_eq!(
        slot_starts(&result),
        vec![
            "2026-03-16T10:00:00Z",
            "2026-03-16T15:30:00Z",
            "2026-03-18T09:00:00Z",
            "2026-03-19T09:00:00Z",
            "2026-03-20T09:00:00Z",
        ]
    );
    assert_eq!(result["slots"][0]["end"], "2026-03-16T13:00:00Z");
    assert_eq!(result["slots"][0]["duration_minutes"], 180);
    assert_eq!(result["window_end"], "2026-03-23T00:00:00Z");
}

#[test]
fn find_reports_unknown_attendees() {
    let result = json_output(slots().args(["find", "-i", team_json_path()]));

    assert_eq!(result["unknown_attendees"][0]["email"], "carol@example.com");
    let listed = result["slots"][0]["attendees"].as_array().unwrap();
    assert_eq!(listed.len(), 2);
    assert!(listed.iter().all(|a| a["email"] != "carol@example.com"));
}

#[test]
fn find_block_unknown_suppresses_slots() {
    let result = json_output(slots().args(["find", "-i", team_json_path(), "--block-unknown"]));
    assert!(result["slots"].as_array().unwrap().is_empty());
    assert_eq!(result["unknown_attendees"].as_array().unwrap().len(), 1);
}

#[test]
fn find_reads_stdin() {
    let input = std::fs::read_to_string(team_json_path()).unwrap();
    let result = json_output(slots().arg("find").write_stdin(input));
    assert_eq!(result["slots"].as_array().unwrap().len(), 5);
}

#[test]
fn find_overrides_apply() {
    let result = json_output(slots().args([
        "find",
        "-i",
        team_json_path(),
        "--any-time",
        "--days",
        "1",
        "--length",
        "30",
    ]));

    assert_eq!(
        slot_starts(&result),
        vec![
            "2026-03-16T00:00:00Z",
            "2026-03-16T10:00:00Z",
            "2026-03-16T15:30:00Z",
        ]
    );
    assert_eq!(result["slots"][2]["end"], "2026-03-17T00:00:00Z");
}

#[test]
fn find_from_overrides_input_window_start() {
    let result = json_output(slots().args([
        "find",
        "-i",
        team_json_path(),
        "--from",
        "2026-03-18T00:00:00Z",
        "--days",
        "1",
    ]));

    assert_eq!(result["window_start"], "2026-03-18T00:00:00Z");
    assert_eq!(slot_starts(&result), vec!["2026-03-18T09:00:00Z"]);
    assert_eq!(result["slots"][0]["end"], "2026-03-18T17:30:00Z");
}

#[test]
fn find_groups_by_day() {
    let result = json_output(slots().args(["find", "-i", team_json_path(), "--by-day"]));

    let days = result["days"].as_object().unwrap();
    assert_eq!(days["2026-03-16"].as_array().unwrap().len(), 2);
    assert!(!days.contains_key("2026-03-17"));
    assert_eq!(days.len(), 4);
}

#[test]
fn find_uses_config_file() {
    let result = json_output(slots().args([
        "--config",
        settings_toml_path(),
        "find",
        "-i",
        team_json_path(),
    ]));
    // Only the 180-minute gap fits a 150-minute meeting.
    assert_eq!(slot_starts(&result), vec!["2026-03-16T10:00:00Z"]);
}

#[test]
fn find_uses_config_from_environment() {
    let result = json_output(
        slots()
            .env("SLOTS_CONFIG", settings_toml_path())
            .args(["find", "-i", team_json_path()]),
    );
    assert_eq!(result["slots"].as_array().unwrap().len(), 1);
}

#[test]
fn find_writes_output_file() {
    let output_path = "/tmp/slots-test-find-output.json";
    let _ = std::fs::remove_file(output_path);

    slots()
        .args(["find", "-i", team_json_path(), "-o", output_path])
        .assert()
        .success();

    let content = std::fs::read_to_string(output_path).expect("output file must exist");
    let result: Value = serde_json::from_str(&content).unwrap();
    assert_eq!(result["slots"].as_array().unwrap().len(), 5);

    let _ = std::fs::remove_file(output_path);
}

#[test]
fn find_rejects_invalid_timezone() {
    slots()
        .args(["find", "-i", team_json_path(), "--timezone", "Mars/Olympus_Mons"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid timezone"));
}

#[test]
fn find_rejects_oversized_time_span() {
    slots()
        .args(["find", "-i", team_json_path(), "--days", "4294967295"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid settings"))
        .stderr(predicate::str::contains("exceeds 366"));
}

#[test]
fn find_rejects_malformed_input() {
    slots()
        .arg("find")
        .write_stdin("{not json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse input JSON"));
}

#[test]
fn find_rejects_inverted_busy_interval() {
    let input = r#"{
        "window_start": "2026-03-16T00:00:00Z",
        "attendees": [{"name": "Alice", "email": "alice@example.com"}],
        "busy": {"alice@example.com": [
            {"start": "2026-03-16T10:00:00Z", "end": "2026-03-16T09:00:00Z"}
        ]}
    }"#;
    slots().arg("find").write_stdin(input).assert().failure();
}

#[test]
fn find_missing_input_file_fails() {
    slots()
        .args(["find", "-i", "/nonexistent/team.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read file"));
}

// ─────────────────────────────────────────────────────────────────────────────
// book
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn book_whole_slot() {
    let request = json_output(slots().args([
        "book",
        "-i",
        team_json_path(),
        "--slot",
        "0",
        "--title",
        "Design review",
        "--location",
        "Room 4",
        "--notify",
    ]));

    assert_eq!(request["title"], "Design review");
    assert_eq!(request["location"], "Room 4");
    assert_eq!(request["notify"], true);
    assert_eq!(request["start"], "2026-03-16T10:00:00Z");
    assert_eq!(request["end"], "2026-03-16T13:00:00Z");
    assert_eq!(request["attendees"].as_array().unwrap().len(), 2);
}

#[test]
fn book_part_of_a_slot_uses_meeting_length() {
    let request = json_output(slots().args([
        "book",
        "-i",
        team_json_path(),
        "--slot",
        "0",
        "--title",
        "1:1",
        "--start",
        "2026-03-16T11:00:00Z",
    ]));

    assert_eq!(request["start"], "2026-03-16T11:00:00Z");
    assert_eq!(request["end"], "2026-03-16T12:00:00Z");
}

#[test]
fn book_outside_slot_fails() {
    slots()
        .args([
            "book",
            "-i",
            team_json_path(),
            "--slot",
            "0",
            "--title",
            "Late",
            "--start",
            "2026-03-16T12:30:00Z",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not inside the slot"));
}

#[test]
fn book_missing_slot_fails() {
    slots()
        .args(["book", "-i", team_json_path(), "--slot", "99", "--title", "Nope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No slot at index 99"));
}

// ─────────────────────────────────────────────────────────────────────────────
// settings
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn settings_prints_defaults() {
    slots()
        .arg("settings")
        .assert()
        .success()
        .stdout(predicate::str::contains("meeting_length_minutes = 60"))
        .stdout(predicate::str::contains("timezone = \"UTC\""))
        .stdout(predicate::str::contains("unknown_attendees = \"exclude\""));
}

#[test]
fn settings_merges_file_and_flags() {
    slots()
        .args(["--config", settings_toml_path(), "settings", "--timezone", "Asia/Tokyo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("meeting_length_minutes = 150"))
        .stdout(predicate::str::contains("time_span_days = 1"))
        .stdout(predicate::str::contains("timezone = \"Asia/Tokyo\""));
}

#[test]
fn settings_rejects_bad_config_file() {
    let path = "/tmp/slots-test-bad-settings.toml";
    std::fs::write(path, "meeting_length_minutes = \"long\"").unwrap();

    slots()
        .args(["--config", path, "settings"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse settings file"));

    let _ = std::fs::remove_file(path);
}

#[test]
fn no_subcommand_prints_usage() {
    slots()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}
