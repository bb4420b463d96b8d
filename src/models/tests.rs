//! Unit tests for data models module
//!
//! Validates record decoding against the collaborator's wire shape and
//! the flag-resolution rules for output mode and verbosity.

use super::*;

#[test]
fn test_event_record_decodes_collaborator_shape() {
    let line = r#"{
        "event_type": "exec",
        "process": {
            "executable": {"path": "/bin/ls"},
            "signing_id": "com.apple.ls",
            "audit_token": {"pid": 423, "euid": 501},
            "ppid": 401,
            "codesigning_flags": 570425361,
            "is_platform_binary": true
        },
        "event": {"exec": {"args": ["ls", "-l"]}},
        "seq_num": 17
    }"#;

    let record: EventRecord = serde_json::from_str(line).unwrap();
    assert_eq!(record.event_type, "exec");
    assert_eq!(record.process.executable.path, "/bin/ls");
    assert_eq!(record.process.signing_id.as_deref(), Some("com.apple.ls"));
    assert_eq!(record.process.audit_token.pid, 423);
    assert_eq!(record.process.ppid, 401);
    assert_eq!(record.process.codesigning_flags, 570425361);
    assert!(record.event.get("exec").is_some());
}

#[test]
fn test_event_record_missing_signing_id_and_payload() {
    let line = r#"{
        "event_type": "fork",
        "process": {
            "executable": {"path": "/usr/sbin/cron"},
            "audit_token": {"pid": 88},
            "ppid": 1,
            "codesigning_flags": 0
        }
    }"#;

    let record: EventRecord = serde_json::from_str(line).unwrap();
    assert!(record.process.signing_id.is_none());
    assert!(record.event.is_null());
}

#[test]
fn test_event_record_rejects_malformed_record() {
    // Not an object at all
    assert!(serde_json::from_str::<EventRecord>("[1, 2, 3]").is_err());
    // Missing the process block
    assert!(serde_json::from_str::<EventRecord>(r#"{"event_type": "open"}"#).is_err());
}

#[test]
fn test_payload_round_trip_preserves_fields() {
    let payload = serde_json::json!({
        "open": {"file": {"path": "/etc/hosts"}, "fflag": 1}
    });
    let pretty = serde_json::to_string_pretty(&payload).unwrap();
    let decoded: serde_json::Value = serde_json::from_str(&pretty).unwrap();
    assert_eq!(decoded, payload);
}

#[test]
fn test_output_mode_resolution() {
    // No flags: payload on
    assert_eq!(OutputMode::from_flags(false, false, false), OutputMode::SummaryPlusJson);
    // --json alone
    assert_eq!(OutputMode::from_flags(true, false, false), OutputMode::SummaryPlusJson);
    // --json-only alone resolves to its own variant...
    assert_eq!(OutputMode::from_flags(false, true, false), OutputMode::JsonOnly);
    // ...which still renders the summary
    assert!(OutputMode::JsonOnly.includes_payload());
    // Both flags set is JSON-with-summary, not JSON-only
    assert_eq!(OutputMode::from_flags(true, true, false), OutputMode::SummaryPlusJson);
}

#[test]
fn test_no_json_suppresses_payload_regardless() {
    for (json, json_only) in [(false, false), (true, false), (false, true), (true, true)] {
        let mode = OutputMode::from_flags(json, json_only, true);
        assert_eq!(mode, OutputMode::Summary);
        assert!(!mode.includes_payload());
    }
}

#[test]
fn test_verbosity_resolution() {
    assert_eq!(Verbosity::from_flags(false, false), Verbosity::Info);
    assert_eq!(Verbosity::from_flags(true, false), Verbosity::Debug);
    assert_eq!(Verbosity::from_flags(false, true), Verbosity::Trace);
    // --verbose-verbose overrides -v
    assert_eq!(Verbosity::from_flags(true, true), Verbosity::Trace);
}

#[test]
fn test_verbosity_level_filter_mapping() {
    assert_eq!(Verbosity::Info.level_filter(), log::LevelFilter::Info);
    assert_eq!(Verbosity::Debug.level_filter(), log::LevelFilter::Debug);
    assert_eq!(Verbosity::Trace.level_filter(), log::LevelFilter::Trace);
}
