//! Data models module
//!
//! Defines core data structures:
//! - EventRecord: One delivered Endpoint Security event
//! - ProcessInfo: Identity of the process that produced an event
//! - OutputMode: Resolved rendering mode for event payloads
//! - Verbosity: Logging level selected on the command line
//! - SessionConfig: Immutable per-session configuration from argv

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// One event record as delivered by the event source.
///
/// The wire shape is owned by the collaborator; only the fields rendered
/// here are decoded, everything else the collaborator emits is ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventRecord {
    /// Canonical name of the event class (e.g. "exec", "open")
    pub event_type: String,
    /// Identity of the originating process
    pub process: ProcessInfo,
    /// Event-type-specific payload, kept opaque
    #[serde(default)]
    pub event: serde_json::Value,
}

/// Identity of the process an event was attributed to
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessInfo {
    pub executable: ExecutableInfo,
    /// Code-signing identifier, absent for unsigned binaries
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signing_id: Option<String>,
    pub audit_token: AuditToken,
    pub ppid: i32,
    /// Code-signing status flags bitmask
    pub codesigning_flags: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutableInfo {
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditToken {
    pub pid: i32,
}

/// Logging verbosity selected on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    Info,
    Debug,
    Trace,
}

impl Verbosity {
    /// Resolve the two verbosity flags; `--verbose-verbose` wins over `-v`.
    pub fn from_flags(verbose: bool, verbose_verbose: bool) -> Self {
        if verbose_verbose {
            Verbosity::Trace
        } else if verbose {
            Verbosity::Debug
        } else {
            Verbosity::Info
        }
    }

    pub fn level_filter(self) -> log::LevelFilter {
        match self {
            Verbosity::Info => log::LevelFilter::Info,
            Verbosity::Debug => log::LevelFilter::Debug,
            Verbosity::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Rendering mode for event payloads, resolved once from the three JSON
/// flags.
///
/// `JsonOnly` renders identically to `SummaryPlusJson`: the historical flag
/// name implies payload-only output, but the shipped behavior keeps the
/// summary lines on. That quirk is preserved here rather than corrected,
/// which is also why both flags together resolve to `SummaryPlusJson`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Summary lines only, payload suppressed
    Summary,
    /// Summary lines plus the pretty-printed payload
    SummaryPlusJson,
    /// Same rendered output as `SummaryPlusJson` (see above)
    JsonOnly,
}

impl OutputMode {
    /// `--no-json` suppresses the payload regardless of the other flags.
    /// With no flags at all the payload is on, matching the historical
    /// printer which always rendered JSON unless told not to.
    pub fn from_flags(json: bool, json_only: bool, no_json: bool) -> Self {
        if no_json {
            OutputMode::Summary
        } else if json_only && !json {
            OutputMode::JsonOnly
        } else {
            OutputMode::SummaryPlusJson
        }
    }

    pub fn includes_payload(self) -> bool {
        !matches!(self, OutputMode::Summary)
    }
}

/// Immutable session configuration constructed once from argv
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Event type names requested for live subscription
    pub events: Vec<String>,
    /// Capture file to replay; when set, replay mode wins over `events`
    pub infilename: Option<PathBuf>,
    pub output_mode: OutputMode,
    pub verbosity: Verbosity,
}

#[cfg(test)]
mod tests;
