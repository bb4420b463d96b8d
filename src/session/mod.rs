//! Session controller module
//!
//! Owns mode selection (live vs replay), starts the event source, and
//! supervises it until natural completion or interrupt:
//! - Replay sessions drive the capture file to completion synchronously
//! - Live sessions poll the source at a fixed interval, reporting
//!   dropped-event deltas and reacting to the interrupt flag
//!
//! The interrupt handler installed in main only sets a flag; every
//! shutdown action happens here, outside signal-handler context.

use crate::constants::DROP_SAMPLE_INTERVAL;
use crate::models::SessionConfig;
use crate::output;
use crate::source::{
    ErrorHandler, EventHandler, EventSource, LiveEventSource, ReplayEventSource, ReplayStatus,
    SessionSource, SourceError,
};
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use thiserror::Error;

/// Session-level failures, mapped to process exit status in main
#[derive(Debug, Error)]
pub enum SessionError {
    /// Usage error: nothing to do. Reported before any source exists.
    #[error("no events to listen for, need to specify at least one or filename")]
    MissingEvents,

    /// External interrupt ended an otherwise-healthy session
    #[error("user requested exit")]
    UserRequestedExit,

    /// The source failed to start
    #[error(transparent)]
    Startup(#[from] SourceError),
}

/// Operating mode, resolved once before any source is constructed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionMode {
    Live(Vec<String>),
    Replay(PathBuf),
}

impl SessionMode {
    /// A capture file wins over positional events; requesting both is
    /// legal but the ignored events are called out.
    pub fn resolve(config: &SessionConfig) -> Result<Self, SessionError> {
        if let Some(path) = &config.infilename {
            if !config.events.is_empty() {
                log::warn!(
                    "replaying {} and ignoring {} requested event type(s)",
                    path.display(),
                    config.events.len()
                );
            }
            Ok(SessionMode::Replay(path.clone()))
        } else if !config.events.is_empty() {
            Ok(SessionMode::Live(config.events.clone()))
        } else {
            Err(SessionError::MissingEvents)
        }
    }
}

/// Run one session to completion.
///
/// Rejecting every requested event name is treated as a usage notice, not
/// a failure: the validation message is printed and the session ends
/// cleanly.
pub fn run(config: &SessionConfig, interrupted: Arc<AtomicBool>) -> Result<(), SessionError> {
    let mode = SessionMode::resolve(config)?;

    let output_mode = config.output_mode;
    let on_event: EventHandler = Arc::new(move |record| output::print_event(&record, output_mode));
    let on_error: ErrorHandler = Arc::new(|err| output::print_error(err));

    let source = match mode {
        SessionMode::Replay(path) => SessionSource::Replay(ReplayEventSource::open(&path)?),
        SessionMode::Live(events) => {
            match LiveEventSource::start(&events, Arc::clone(&on_event), Arc::clone(&on_error)) {
                Ok(live) => SessionSource::Live(live),
                Err(SourceError::NoValidRequestedEvents) => {
                    println!("Validation Error - no valid events provided");
                    return Ok(());
                }
                Err(e) => return Err(e.into()),
            }
        }
    };

    match &source {
        SessionSource::Replay(replay) => match replay.run(&interrupted, &on_event, &on_error) {
            ReplayStatus::Completed => Ok(()),
            ReplayStatus::Interrupted => Err(SessionError::UserRequestedExit),
        },
        SessionSource::Live(_) => {
            println!("listening for {} event types", source.requested_event_count());
            supervise(&source, &interrupted, DROP_SAMPLE_INTERVAL, |delta| {
                println!("******* DROPPED {delta}");
            })
        }
    }
}

/// Supervisory loop for a live source: sample the drop counter at a fixed
/// interval while the source runs, and shut the source down when the
/// interrupt flag is observed.
///
/// Drops occurring between two samples coalesce into one reported delta.
fn supervise<F: FnMut(u64)>(
    source: &dyn EventSource,
    interrupted: &AtomicBool,
    interval: Duration,
    mut report: F,
) -> Result<(), SessionError> {
    let mut drops = DropMonitor::new(source.dropped_event_count());
    while source.is_running() {
        if interrupted.load(Ordering::Relaxed) {
            source.stop();
            return Err(SessionError::UserRequestedExit);
        }
        thread::sleep(interval);
        if let Some(delta) = drops.observe(source.dropped_event_count()) {
            report(delta);
        }
    }
    Ok(())
}

/// Tracks the last observed value of the cumulative drop counter and
/// yields the growth since then
pub struct DropMonitor {
    last: u64,
}

impl DropMonitor {
    pub fn new(initial: u64) -> Self {
        Self { last: initial }
    }

    /// Returns the delta when the counter grew. The counter is
    /// monotonically non-decreasing by contract; saturating arithmetic
    /// keeps a misbehaving sample from producing a bogus delta.
    pub fn observe(&mut self, current: u64) -> Option<u64> {
        let delta = current.saturating_sub(self.last);
        if delta == 0 {
            return None;
        }
        self.last = current;
        Some(delta)
    }
}
