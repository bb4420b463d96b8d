//! Replay event source
//!
//! Consumes a previously captured NDJSON event file, delivering each
//! record through the event handler. Replay is bounded and synchronous:
//! `run` drives the whole file to completion from the caller's thread,
//! checking the cancellation flag between records.

use crate::models::EventRecord;
use crate::source::{ErrorHandler, EventHandler, EventSource, SourceError};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

/// Outcome of driving a replay to its end
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplayStatus {
    /// The whole capture file was delivered
    Completed,
    /// The cancellation flag was observed before the end of the file
    Interrupted,
}

/// Offline replay of a captured event file. Unknown event types in the
/// file are delivered as-is; nothing is validated against the live
/// subscription table.
#[derive(Debug)]
pub struct ReplayEventSource {
    path: PathBuf,
    file: Mutex<Option<File>>,
    running: AtomicBool,
}

impl ReplayEventSource {
    /// Open the capture file, surfacing unreadable paths as a startup
    /// failure before any delivery begins
    pub fn open(path: &Path) -> Result<Self, SourceError> {
        let file = File::open(path).map_err(|e| SourceError::OpenCapture {
            path: path.display().to_string(),
            source: e,
        })?;
        Ok(Self {
            path: path.to_path_buf(),
            file: Mutex::new(Some(file)),
            running: AtomicBool::new(true),
        })
    }

    /// Drive the replay to completion. Undecodable lines are reported
    /// through the error handler and replay continues with the next
    /// record; a mid-file read failure ends the replay after being
    /// reported. `is_running` is false once this returns.
    pub fn run(
        &self,
        cancel: &AtomicBool,
        on_event: &EventHandler,
        on_error: &ErrorHandler,
    ) -> ReplayStatus {
        let file = match self.file.lock() {
            Ok(mut slot) => slot.take(),
            Err(_) => None,
        };
        let Some(file) = file else {
            // run() on an already-consumed source delivers nothing
            self.running.store(false, Ordering::SeqCst);
            return ReplayStatus::Completed;
        };

        log::debug!("replaying events from {}", self.path.display());

        let mut delivered: u64 = 0;
        for line in BufReader::new(file).lines() {
            if cancel.load(Ordering::Relaxed) {
                self.running.store(false, Ordering::SeqCst);
                log::debug!("replay interrupted after {delivered} events");
                return ReplayStatus::Interrupted;
            }
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    on_error(&SourceError::Stream(e));
                    break;
                }
            };
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<EventRecord>(&line) {
                Ok(record) => {
                    delivered += 1;
                    on_event(record);
                }
                Err(e) => on_error(&SourceError::Decode(e)),
            }
        }

        self.running.store(false, Ordering::SeqCst);
        log::debug!("replay finished, {delivered} events delivered");
        ReplayStatus::Completed
    }
}

impl EventSource for ReplayEventSource {
    fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    fn dropped_event_count(&self) -> u64 {
        0
    }

    fn requested_event_count(&self) -> usize {
        0
    }

    fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
    }
}
