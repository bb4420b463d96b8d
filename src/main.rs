#![forbid(unsafe_code)]

mod cli;
mod constants;
mod models;
mod output;
mod session;
mod source;

use anyhow::Result;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

fn main() -> Result<()> {
    let config = match cli::parse_args() {
        cli::CliAction::ListEvents => {
            cli::print_event_list();
            return Ok(());
        }
        cli::CliAction::Run(config) => config,
    };

    env_logger::Builder::from_default_env()
        .filter_level(config.verbosity.level_filter())
        .init();

    // The handlers only set the flag; shutdown happens in the session loop
    let interrupted = Arc::new(AtomicBool::new(false));
    let _ = signal_hook::flag::register(signal_hook::consts::SIGINT, interrupted.clone());
    let _ = signal_hook::flag::register(signal_hook::consts::SIGTERM, interrupted.clone());

    session::run(&config, interrupted)?;

    Ok(())
}
