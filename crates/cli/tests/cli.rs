// ABOUTME: Integration tests for the tubeaudit CLI binary.
// ABOUTME: Tests file and stdin input, output files, pinned clocks and error exits.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const INPUT: &str = r#"{
  "channel": {"title": "Kitchen Lab"},
  "videos": [
    {"id": "s1", "title": "Quick knife trick", "duration": "PT45S",
     "publishedAt": "2025-01-18T09:00:00Z", "tags": ["knife"],
     "statistics": {"viewCount": 5000, "likeCount": 300, "commentCount": 40}},
    {"id": "l1", "title": "Complete guide to sourdough starters at home", "duration": "PT12M",
     "publishedAt": "2025-01-14T09:00:00Z",
     "statistics": {"viewCount": 12000, "likeCount": 500, "commentCount": 80}}
  ]
}"#;

fn tubeaudit_cmd() -> Command {
    Command::cargo_bin("tubeaudit").unwrap()
}

fn write_input(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("channel.json");
    fs::write(&path, INPUT).unwrap();
    path
}

#[test]
fn audits_a_file_and_prints_json() {
    let dir = TempDir::new().unwrap();
    let path = write_input(&dir);

    tubeaudit_cmd()
        .arg(&path)
        .arg("--now")
        .arg("2025-01-20T00:00:00Z")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"channelHealthScore\""))
        .stdout(predicate::str::contains("\"shorts2026\""));
}

#[test]
fn reads_stdin_and_emits_compact_json() {
    let output = tubeaudit_cmd()
        .arg("-")
        .arg("--compact")
        .arg("--now")
        .arg("2025-01-20T00:00:00Z")
        .write_stdin(INPUT)
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.trim_end().lines().count(), 1);
    let json: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(json["summary"]["shortsVideos"], 1);
    assert_eq!(json["analysisModules"]["uploadSchedule"]["daysSinceLastUpload"], 1);
}

#[test]
fn pinned_clock_makes_runs_identical() {
    let dir = TempDir::new().unwrap();
    let path = write_input(&dir);
    let run = || {
        tubeaudit_cmd()
            .arg(&path)
            .arg("--now")
            .arg("2025-03-01T00:00:00Z")
            .output()
            .unwrap()
            .stdout
    };
    assert_eq!(run(), run());
}

#[test]
fn writes_report_to_output_file() {
    let dir = TempDir::new().unwrap();
    let path = write_input(&dir);
    let out = dir.path().join("report.json");

    tubeaudit_cmd()
        .arg(&path)
        .arg("--output")
        .arg(&out)
        .arg("--quick-win-limit")
        .arg("1")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert!(json["quickWins"].as_array().unwrap().len() <= 1);
}

#[test]
fn missing_file_fails() {
    tubeaudit_cmd()
        .arg("/definitely/not/here.json")
        .assert()
        .failure()
        .stderr(predicate::str::contains("file not found"));
}

#[test]
fn structurally_invalid_input_fails() {
    tubeaudit_cmd()
        .arg("-")
        .write_stdin(r#"{"videos": []}"#)
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid input document"));
}

#[test]
fn rejects_malformed_now() {
    let dir = TempDir::new().unwrap();
    let path = write_input(&dir);

    tubeaudit_cmd()
        .arg(&path)
        .arg("--now")
        .arg("yesterday")
        .assert()
        .failure()
        .stderr(predicate::str::contains("RFC 3339"));
}
