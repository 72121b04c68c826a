use assert_cmd::Command;
use predicates::prelude::*;

fn blockwise() -> Command {
    Command::cargo_bin("blockwise").unwrap()
}

fn fixture(name: &str) -> String {
    format!("{}/tests/fixtures/{name}", env!("CARGO_MANIFEST_DIR"))
}

#[test]
fn test_active_inside_window() {
    blockwise()
        .arg(fixture("standup.block"))
        .args(["--at", "2025-08-14T10:00:00Z"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"active\": true"))
        .stdout(predicate::str::contains("\"title\": \"Morning standup\""))
        .stdout(predicate::str::contains("2025-08-14T09:00:00+00:00"));
}

#[test]
fn test_inactive_at_window_end() {
    blockwise()
        .arg(fixture("standup.block"))
        .args(["--at", "2025-08-14T11:00:00Z"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"active\": false"))
        .stdout(predicate::str::contains("2025-08-14T11:00:00+00:00"));
}

#[test]
fn test_inactive_before_window() {
    blockwise()
        .arg(fixture("standup.block"))
        .args(["--at", "2025-08-14T08:00:00Z"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"active\": false"))
        .stdout(predicate::str::contains("\"last_effective\": null"));
}

#[test]
fn test_variables_are_substituted() {
    blockwise()
        .arg(fixture("greeting.block"))
        .args(["--at", "2025-08-14T10:00:00Z", "--var", "who=Ada"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"title\": \"Meet Ada\""))
        .stdout(predicate::str::contains("\"active\": true"));
}

#[test]
fn test_undefined_variable_fails() {
    blockwise()
        .arg(fixture("greeting.block"))
        .args(["--at", "2025-08-14T10:00:00Z"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Variable 'who' is undefined"));
}

#[test]
fn test_missing_schedule_fails() {
    blockwise()
        .arg(fixture("no_schedule.block"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("Missing required field: 'schedule'"));
}

#[test]
fn test_malformed_var_flag_fails() {
    blockwise()
        .arg(fixture("greeting.block"))
        .args(["--var", "who"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected NAME=VALUE"));
}

#[test]
fn test_missing_file_fails() {
    blockwise()
        .arg(fixture("does_not_exist.block"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read"));
}
