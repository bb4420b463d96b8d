//! CLI argument parsing module
//!
//! Handles the command-line interface using clap, including:
//! - Positional event type names (live mode)
//! - Capture file replay selection
//! - Output mode flags (--json / --json-only / --no-json)
//! - Verbosity flags
//! - Event type listing

use crate::constants::SUBSCRIBABLE_EVENTS;
use crate::models::{OutputMode, SessionConfig, Verbosity};
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::path::PathBuf;

/// What the invocation asked for
pub enum CliAction {
    /// Run a monitoring or replay session
    Run(SessionConfig),
    /// Print the subscribable event types and exit
    ListEvents,
}

/// Parse command line arguments into the requested action
pub fn parse_args() -> CliAction {
    action_from_matches(&command().get_matches())
}

fn command() -> Command {
    Command::new("esmon")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Monitor macOS Endpoint Security events")
        .long_about(
            "A command-line tool that subscribes to named macOS Endpoint Security \
             events and prints each received event, or replays events from a \
             previously captured file.",
        )
        .arg(
            Arg::new("events")
                .value_name("EVENT")
                .help("Event type names to listen for")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("infilename")
                .long("infilename")
                .value_name("PATH")
                .help("Replay events from a previously captured file instead of listening live"),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Print each event's payload as pretty JSON")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("json-only")
                .long("json-only")
                .help("Print event payload JSON (kept for compatibility; behaves like --json)")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("no-json")
                .long("no-json")
                .help("Suppress the event payload, print summary lines only")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Debug logging")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose-verbose")
                .long("verbose-verbose")
                .help("Trace logging (overrides -v)")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("list-events")
                .long("list-events")
                .help("List the subscribable event types and exit")
                .action(ArgAction::SetTrue),
        )
}

fn action_from_matches(matches: &ArgMatches) -> CliAction {
    if matches.get_flag("list-events") {
        return CliAction::ListEvents;
    }

    let events = matches
        .get_many::<String>("events")
        .map(|values| values.cloned().collect())
        .unwrap_or_default();

    let infilename = matches.get_one::<String>("infilename").map(PathBuf::from);

    CliAction::Run(SessionConfig {
        events,
        infilename,
        output_mode: OutputMode::from_flags(
            matches.get_flag("json"),
            matches.get_flag("json-only"),
            matches.get_flag("no-json"),
        ),
        verbosity: Verbosity::from_flags(
            matches.get_flag("verbose"),
            matches.get_flag("verbose-verbose"),
        ),
    })
}

/// Print the event type table, one name per line
pub fn print_event_list() {
    for name in SUBSCRIBABLE_EVENTS {
        println!("{name}");
    }
}
