//! Command-line interface for the demo runner.
//!
//! The binary drives a synthetic batch through the reporter and maps the
//! resulting [`Outcome`] onto the process exit status. Exit-status semantics
//! live here, in the outermost run loop, never inside the reporter.

use std::path::PathBuf;

use clap::Parser;

use crate::config::Settings;
use crate::console::Console;
use crate::error::ReportError;
use crate::queue::QueueService;
use crate::report::{Outcome, Reporter};

#[derive(Debug, Parser)]
#[command(name = "jobline", about = "Run a demo batch under the job progress reporter")]
pub struct Cli {
    /// Number of records in the synthetic batch
    #[arg(long, default_value_t = 10)]
    pub total: i64,

    /// Label attached to each progress line
    #[arg(long, default_value = "records")]
    pub label: String,

    /// Fail the run after this many records
    #[arg(long)]
    pub fail_at: Option<u64>,

    /// Configuration file (TOML)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level override
    #[arg(long)]
    pub log_level: Option<String>,
}

/// Run the synthetic batch and hand back the terminal outcome.
pub fn run_batch<Q: QueueService, C: Console>(
    cli: &Cli,
    settings: &Settings,
    queue: Q,
    console: C,
) -> Result<Outcome, ReportError> {
    let mut reporter = Reporter::initialize(settings, queue, console)?;

    let effective_total = cli.total.max(1) as u64;
    for count in 1..=effective_total {
        reporter.progress_counted(cli.total, count, &cli.label, 0)?;
        if cli.fail_at == Some(count) {
            return reporter.fail(format!("stopped after {count} of {effective_total}"));
        }
    }
    reporter.succeed(format!("processed {effective_total} {}", cli.label))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::CaptureConsole;
    use crate::queue::InMemoryQueue;

    fn cli(total: i64, fail_at: Option<u64>) -> Cli {
        Cli {
            total,
            label: "records".to_string(),
            fail_at,
            config: None,
            log_level: None,
        }
    }

    #[test]
    fn interactive_batch_prints_every_record_and_the_result() {
        let console = CaptureConsole::new();
        let outcome = run_batch(
            &cli(3, None),
            &Settings::default(),
            InMemoryQueue::new(),
            console.clone(),
        )
        .unwrap();

        assert!(outcome.is_success());
        assert_eq!(
            console.lines(),
            vec![
                "[1/3] records",
                "[2/3] records",
                "[3/3] records",
                "processed 3 records",
            ]
        );
    }

    #[test]
    fn fail_at_stops_the_batch_with_a_failure_outcome() {
        let console = CaptureConsole::new();
        let outcome = run_batch(
            &cli(5, Some(2)),
            &Settings::default(),
            InMemoryQueue::new(),
            console.clone(),
        )
        .unwrap();

        assert!(!outcome.is_success());
        assert_eq!(outcome.message(), "stopped after 2 of 5");
        assert_eq!(console.lines().len(), 3);
    }
}
