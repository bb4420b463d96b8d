//! Live event source
//!
//! Spawns the system eslogger utility for the requested event types and
//! turns its NDJSON stdout into event-record callbacks. Delivery runs on
//! its own threads: a reader decodes lines and pushes records into a
//! bounded queue, a consumer drains the queue into the event handler, and
//! a forwarder surfaces collaborator stderr lines through the error
//! handler. A record that arrives while the queue is full is counted as
//! dropped.

use crate::constants::{ESLOGGER_PATH, EVENT_QUEUE_CAPACITY, SUBSCRIBABLE_EVENTS};
use crate::models::EventRecord;
use crate::source::{ErrorHandler, EventHandler, EventSource, SourceError};
use std::collections::HashSet;
use std::io::{self, BufRead, BufReader};
use std::process::{Child, Command, Stdio};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::mpsc::{self, TrySendError};
use std::sync::{Arc, Mutex};
use std::thread;

/// Live subscription to Endpoint Security events via the eslogger child
/// process. Exclusively owned by one session.
#[derive(Debug)]
pub struct LiveEventSource {
    requested: Vec<String>,
    running: Arc<AtomicBool>,
    dropped: Arc<AtomicU64>,
    stopped: AtomicBool,
    child: Mutex<Child>,
}

impl LiveEventSource {
    /// Validate the requested event names and start delivering them.
    ///
    /// Unrecognized names are ignored with a warning; if none of the
    /// requested names are subscribable no child is spawned and
    /// `SourceError::NoValidRequestedEvents` is returned.
    pub fn start(
        events: &[String],
        on_event: EventHandler,
        on_error: ErrorHandler,
    ) -> Result<Self, SourceError> {
        let requested = validate_requested(events)?;
        Self::launch(ESLOGGER_PATH, requested, on_event, on_error)
    }

    fn launch(
        program: &str,
        requested: Vec<String>,
        on_event: EventHandler,
        on_error: ErrorHandler,
    ) -> Result<Self, SourceError> {
        log::debug!("launching {} for {} event types", program, requested.len());

        let mut child = Command::new(program)
            .args(&requested)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| SourceError::Spawn {
                path: program.to_string(),
                source: e,
            })?;

        let stdout = child.stdout.take().ok_or_else(|| SourceError::Spawn {
            path: program.to_string(),
            source: io::Error::new(io::ErrorKind::Other, "stdout not captured"),
        })?;
        let stderr = child.stderr.take().ok_or_else(|| SourceError::Spawn {
            path: program.to_string(),
            source: io::Error::new(io::ErrorKind::Other, "stderr not captured"),
        })?;

        let running = Arc::new(AtomicBool::new(true));
        let dropped = Arc::new(AtomicU64::new(0));
        let (tx, rx) = mpsc::sync_channel::<EventRecord>(EVENT_QUEUE_CAPACITY);

        // Reader: decode stdout lines into records and enqueue them.
        // Closing tx at EOF is what ends the consumer below.
        let reader_dropped = Arc::clone(&dropped);
        let reader_on_error = Arc::clone(&on_error);
        thread::spawn(move || {
            for line in BufReader::new(stdout).lines() {
                let line = match line {
                    Ok(line) => line,
                    Err(e) => {
                        reader_on_error(&SourceError::Stream(e));
                        break;
                    }
                };
                if line.trim().is_empty() {
                    continue;
                }
                log::trace!("event line: {line}");
                match serde_json::from_str::<EventRecord>(&line) {
                    Ok(record) => match tx.try_send(record) {
                        Ok(()) => {}
                        Err(TrySendError::Full(_)) => {
                            reader_dropped.fetch_add(1, Ordering::Relaxed);
                        }
                        Err(TrySendError::Disconnected(_)) => break,
                    },
                    Err(e) => reader_on_error(&SourceError::Decode(e)),
                }
            }
        });

        // Consumer: drain the queue into the event handler, then clear the
        // running flag once the queue closes and is fully drained.
        let consumer_running = Arc::clone(&running);
        thread::spawn(move || {
            while let Ok(record) = rx.recv() {
                on_event(record);
            }
            consumer_running.store(false, Ordering::SeqCst);
        });

        // Forwarder: collaborator stderr lines become delivery errors
        thread::spawn(move || {
            for line in BufReader::new(stderr).lines() {
                match line {
                    Ok(line) if !line.trim().is_empty() => {
                        on_error(&SourceError::Collaborator(line));
                    }
                    Ok(_) => {}
                    Err(_) => break,
                }
            }
        });

        Ok(Self {
            requested,
            running,
            dropped,
            stopped: AtomicBool::new(false),
            child: Mutex::new(child),
        })
    }
}

impl EventSource for LiveEventSource {
    fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    fn dropped_event_count(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }

    fn requested_event_count(&self) -> usize {
        self.requested.len()
    }

    /// Kill the child; the resulting stdout EOF drains through the
    /// delivery queue and clears the running flag from the consumer side.
    fn stop(&self) {
        if self.stopped.swap(true, Ordering::SeqCst) {
            return;
        }
        log::debug!("stopping event collaborator");
        if let Ok(mut child) = self.child.lock() {
            let _ = child.kill();
            let _ = child.wait();
        }
    }
}

impl Drop for LiveEventSource {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Filter the requested names down to the subscribable set, deduplicated
/// and in request order
fn validate_requested(events: &[String]) -> Result<Vec<String>, SourceError> {
    let mut seen = HashSet::new();
    let mut requested = Vec::new();
    for name in events {
        if !SUBSCRIBABLE_EVENTS.contains(&name.as_str()) {
            log::warn!("ignoring unrecognized event type: {name}");
            continue;
        }
        if seen.insert(name.clone()) {
            requested.push(name.clone());
        }
    }
    if requested.is_empty() {
        return Err(SourceError::NoValidRequestedEvents);
    }
    Ok(requested)
}
