use assert_cmd::Command;
use predicates::prelude::*;

fn desk() -> Command {
    Command::cargo_bin("dispatch-desk").unwrap()
}

#[test]
fn routes_lists_all_destinations() {
    desk()
        .arg("routes")
        .assert()
        .success()
        .stdout(predicate::str::contains("operator.html"))
        .stdout(predicate::str::contains("emt.html"))
        .stdout(predicate::str::contains("manager.html"))
        .stdout(predicate::str::contains("call.html"));
}

#[test]
fn check_signs_in_and_routes_by_role() {
    desk()
        .args([
            "check",
            "--username",
            "alice",
            "--password",
            "secret1",
            "--role",
            "operator",
            "--delay-ms",
            "0",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Signing In..."))
        .stdout(predicate::str::contains("operator.html"));
}

#[test]
fn check_rejects_short_password() {
    desk()
        .args([
            "check",
            "--username",
            "alice",
            "--password",
            "abc12",
            "--role",
            "operator",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Password must be at least 6 characters",
        ));
}

#[test]
fn check_rejects_missing_fields_with_one_message_each() {
    let assert = desk()
        .args(["check", "--password", "secret1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Username is required"))
        .stderr(predicate::str::contains("Please select a role"));
    // Exactly one message per failing field
    let stderr = String::from_utf8_lossy(&assert.get_output().stderr).to_string();
    assert_eq!(stderr.matches("Username is required").count(), 1);
    assert_eq!(stderr.matches("Please select a role").count(), 1);
}

#[test]
fn check_unknown_role_fails_after_delay() {
    desk()
        .args([
            "check",
            "--username",
            "alice",
            "--password",
            "secret1",
            "--role",
            "supervisor",
            "--delay-ms",
            "0",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid role selected"));
}

#[test]
fn config_round_trips_through_a_temp_home() {
    let home = tempfile::tempdir().unwrap();

    desk()
        .env("HOME", home.path())
        .args(["config", "--submit-delay-ms", "250", "--effects", "false"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Settings saved."));

    desk()
        .env("HOME", home.path())
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("250"))
        .stdout(predicate::str::contains("false"));
}

#[test]
fn check_honors_configured_delay_override() {
    // --delay-ms 0 keeps the test fast while still walking the full
    // submit path (loading line, then routed page).
    desk()
        .args([
            "check",
            "--username",
            "bob",
            "--password",
            "secret1",
            "--role",
            "emt",
            "--delay-ms",
            "0",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("emt.html"));
}
