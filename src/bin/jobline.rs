//! Jobline CLI Binary
//!
//! Runs a synthetic batch under the job progress reporter and maps the
//! terminal outcome onto the process exit status.

use std::process;

use anyhow::Context;
use clap::Parser;
use jobline::cli::{run_batch, Cli};
use jobline::config::Settings;
use jobline::console::StdoutConsole;
use jobline::logging::init_logging;
use jobline::queue::InMemoryQueue;
use tracing::{error, info};

fn main() {
    let cli = Cli::parse();

    let settings = match load_settings(&cli) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("{e:#}");
            process::exit(2);
        }
    };

    if let Err(e) = init_logging(&settings.logging) {
        eprintln!("Failed to initialize logging: {e}");
        process::exit(2);
    }

    let queue = InMemoryQueue::new();
    if let Some(id) = settings.context_id() {
        // A context must exist on the service before it can be bound.
        queue.register_context(id);
        info!(context_id = %id, "running managed");
    }

    match run_batch(&cli, &settings, queue, StdoutConsole) {
        Ok(outcome) => {
            info!(success = outcome.is_success(), "run concluded");
            process::exit(if outcome.is_success() { 0 } else { 1 });
        }
        Err(e) => {
            error!("run failed: {e}");
            eprintln!("{e}");
            process::exit(2);
        }
    }
}

fn load_settings(cli: &Cli) -> anyhow::Result<Settings> {
    let mut settings =
        Settings::load(cli.config.as_deref()).context("failed to load configuration")?;
    if let Some(level) = &cli.log_level {
        settings.logging.level = level.clone();
    }
    Ok(settings)
}
