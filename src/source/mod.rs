//! Event source module
//!
//! Provides the two ways events reach a session:
//! - LiveEventSource: spawns the system eslogger utility and streams its
//!   NDJSON output through a bounded delivery queue
//! - ReplayEventSource: reads a previously captured NDJSON file to
//!   completion
//!
//! Both variants expose the same control surface through the EventSource
//! trait so the session loop can supervise either without knowing which
//! one it owns.

pub mod live;
pub mod replay;

pub use live::LiveEventSource;
pub use replay::{ReplayEventSource, ReplayStatus};

use crate::models::EventRecord;
use std::io;
use std::sync::Arc;
use thiserror::Error;

/// Handler invoked for every delivered event record. Called from the
/// source's delivery context, concurrently with the session loop.
pub type EventHandler = Arc<dyn Fn(EventRecord) + Send + Sync>;

/// Handler invoked for every delivery problem. Delivery errors never
/// terminate the session; the stream continues with the next record.
pub type ErrorHandler = Arc<dyn Fn(&SourceError) + Send + Sync>;

/// Errors raised by an event source, at startup or during delivery
#[derive(Debug, Error)]
pub enum SourceError {
    /// None of the requested event names are subscribable
    #[error("no valid events provided")]
    NoValidRequestedEvents,

    /// The event collaborator could not be launched
    #[error("failed to launch {path}: {source}")]
    Spawn {
        path: String,
        #[source]
        source: io::Error,
    },

    /// The capture file could not be opened for replay
    #[error("cannot open capture file {path}: {source}")]
    OpenCapture {
        path: String,
        #[source]
        source: io::Error,
    },

    /// The event stream failed mid-read
    #[error("event stream read failed: {0}")]
    Stream(#[from] io::Error),

    /// A delivered line did not decode as an event record
    #[error("undecodable event record: {0}")]
    Decode(#[from] serde_json::Error),

    /// A diagnostic line reported by the collaborator on stderr
    #[error("collaborator reported: {0}")]
    Collaborator(String),
}

/// Control surface shared by the live and replay sources
pub trait EventSource {
    /// True while the underlying delivery mechanism is active. Becomes
    /// false on natural completion or after `stop()`, though not
    /// necessarily synchronously with either.
    fn is_running(&self) -> bool;

    /// Cumulative count of events that could not be delivered.
    /// Monotonically non-decreasing; always 0 for replay.
    fn dropped_event_count(&self) -> u64;

    /// Number of distinct event names actually subscribed
    fn requested_event_count(&self) -> usize;

    /// Request orderly shutdown. Idempotent; calling it on a stopped
    /// source is a no-op.
    fn stop(&self);
}

/// A session's event source, resolved once at construction
pub enum SessionSource {
    Live(LiveEventSource),
    Replay(ReplayEventSource),
}

impl EventSource for SessionSource {
    fn is_running(&self) -> bool {
        match self {
            SessionSource::Live(source) => source.is_running(),
            SessionSource::Replay(source) => source.is_running(),
        }
    }

    fn dropped_event_count(&self) -> u64 {
        match self {
            SessionSource::Live(source) => source.dropped_event_count(),
            SessionSource::Replay(source) => source.dropped_event_count(),
        }
    }

    fn requested_event_count(&self) -> usize {
        match self {
            SessionSource::Live(source) => source.requested_event_count(),
            SessionSource::Replay(source) => source.requested_event_count(),
        }
    }

    fn stop(&self) {
        match self {
            SessionSource::Live(source) => source.stop(),
            SessionSource::Replay(source) => source.stop(),
        }
    }
}
