//! Output formatting module
//!
//! Handles:
//! - Event summary blocks (delimiter line, process identity, code-signing
//!   flags) with the optional pretty-printed payload
//! - Visually distinct error blocks for delivery errors
//!
//! Each event is formatted into a single string and printed with one call
//! so blocks from concurrent delivery contexts never interleave.

use crate::models::{EventRecord, OutputMode};
use crate::source::SourceError;
use serde::Serialize;
use std::fmt::{self, Write};

/// Leader of the per-event delimiter line, followed by the event type
pub const EVENT_DELIMITER: &str = "*-*-*-*-*-*-*-*-*-*-*-";

const ERROR_BRACKET: &str = "/\\/\\/\\/\\/\\/\\/";

/// Format one event as its printed block
pub fn format_event(record: &EventRecord, mode: OutputMode) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}{}", EVENT_DELIMITER, record.event_type);
    let _ = writeln!(out, "{}", record.process.executable.path);
    if let Some(signing_id) = &record.process.signing_id {
        let _ = writeln!(out, "{signing_id}");
    }
    let _ = writeln!(
        out,
        "pid: {} ppid: {}",
        record.process.audit_token.pid, record.process.ppid
    );
    if mode.includes_payload() {
        let _ = writeln!(out, "{}", format_payload(&record.event));
    }
    let _ = write!(out, "code signing: {}", record.process.codesigning_flags);
    out
}

pub fn print_event(record: &EventRecord, mode: OutputMode) {
    println!("{}", format_event(record, mode));
}

/// Pretty-print the payload, falling back to its Debug rendering rather
/// than losing the event when encoding fails
fn format_payload<T: Serialize + fmt::Debug>(payload: &T) -> String {
    match serde_json::to_string_pretty(payload) {
        Ok(json) => json,
        Err(_) => format!("{payload:?}"),
    }
}

/// Format a delivery error as its bracketed block
pub fn format_error(err: &SourceError) -> String {
    format!("{ERROR_BRACKET} ERROR {ERROR_BRACKET}\n{err}\n{ERROR_BRACKET}")
}

pub fn print_error(err: &SourceError) {
    println!("{}", format_error(err));
}
