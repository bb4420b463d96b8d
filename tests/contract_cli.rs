//! CLI contract tests
//!
//! Validates argument handling and exit behavior at the process boundary:
//! missing events, validation notices, event listing, and bad capture
//! paths.

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_no_events_and_no_file_fails_with_directive() {
    let mut cmd = Command::cargo_bin("esmon").unwrap();

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("no events to listen for"));
}

#[test]
fn test_all_invalid_events_is_a_usage_notice_not_a_crash() {
    let mut cmd = Command::cargo_bin("esmon").unwrap();
    cmd.arg("bogus_event").arg("another_bogus_event");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(
            "Validation Error - no valid events provided",
        ));
}

#[test]
fn test_list_events_prints_known_names() {
    let mut cmd = Command::cargo_bin("esmon").unwrap();
    cmd.arg("--list-events");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("exec"))
        .stdout(predicate::str::contains("open"))
        .stdout(predicate::str::contains("xp_malware_detected"));
}

#[test]
fn test_missing_capture_file_fails_with_description() {
    let mut cmd = Command::cargo_bin("esmon").unwrap();
    cmd.arg("--infilename").arg("/nonexistent/capture.ndjson");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("cannot open capture file"));
}

#[test]
fn test_help_describes_replay_flag() {
    let mut cmd = Command::cargo_bin("esmon").unwrap();
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("--infilename"))
        .stdout(predicate::str::contains("--no-json"));
}

#[test]
fn test_version_flag() {
    let mut cmd = Command::cargo_bin("esmon").unwrap();
    cmd.arg("--version");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}
