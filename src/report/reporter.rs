//! The job progress reporter: routes notifications to the right sink.

use tracing::debug;

use crate::config::Settings;
use crate::console::Console;
use crate::context::{ExecutionContext, ExecutionMode, JobHandle};
use crate::error::ReportError;
use crate::queue::QueueService;
use crate::report::update::ProgressUpdate;

/// Terminal notification for a run. Produced at most once, when the run
/// concludes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Success(String),
    Failure(String),
}

impl Outcome {
    pub fn message(&self) -> &str {
        match self {
            Outcome::Success(msg) | Outcome::Failure(msg) => msg,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }
}

/// Routes progress and terminal notifications for one command run.
///
/// In managed mode every notification is forwarded to the queue service; in
/// interactive mode progress lines go to the console and terminal
/// notifications are handed back as an [`Outcome`] for the outermost run loop
/// to act on. The reporter itself never exits the process.
///
/// [`succeed`](Reporter::succeed) and [`fail`](Reporter::fail) consume the
/// reporter: once a run has concluded, no further reporting is possible.
pub struct Reporter<Q: QueueService, C: Console> {
    ctx: ExecutionContext,
    queue: Q,
    console: C,
}

impl<Q: QueueService, C: Console> Reporter<Q, C> {
    /// Build a reporter from configuration.
    ///
    /// A configured context identifier selects managed mode; the queue
    /// service's binding is re-initialized only when it differs from the
    /// configured identifier. An unknown identifier surfaces as
    /// [`QueueError::ContextNotFound`](crate::error::QueueError::ContextNotFound).
    pub fn initialize(settings: &Settings, mut queue: Q, console: C) -> Result<Self, ReportError> {
        let ctx = match settings.context_id() {
            Some(id) => {
                let handle = match queue.current_context_id() {
                    Some(current) if current == id => JobHandle::new(id),
                    _ => {
                        debug!(context_id = %id, "re-binding queue context");
                        queue.bind_context(id)?
                    }
                };
                ExecutionContext::managed(handle)
            }
            None => ExecutionContext::interactive(),
        };
        Ok(Self::with_context(ctx, queue, console))
    }

    /// Build a reporter over an already-constructed context.
    pub fn with_context(ctx: ExecutionContext, queue: Q, console: C) -> Self {
        Self { ctx, queue, console }
    }

    pub fn context(&self) -> &ExecutionContext {
        &self.ctx
    }

    /// Report progress and continue.
    ///
    /// Managed mode forwards `(message, percentage, backline)` with
    /// informational severity. Interactive mode writes the message plus a line
    /// terminator when present and nothing otherwise; the percentage and
    /// backline only matter to the managed sink.
    pub fn progress(
        &mut self,
        message: Option<&str>,
        percentage: Option<&str>,
        backline: u32,
    ) -> Result<(), ReportError> {
        match self.ctx.mode() {
            ExecutionMode::Managed => self.queue.progress(message, percentage, backline)?,
            ExecutionMode::Interactive => {
                if let Some(text) = message {
                    self.console.write_line(text)?;
                }
            }
        }
        Ok(())
    }

    /// Report progress as `count` of `total` records processed.
    ///
    /// Formats `"[{index}/{total}] {message}"` with the index zero-padded to
    /// the total's digit width, plus a two-decimal percentage.
    pub fn progress_counted(
        &mut self,
        total: i64,
        count: u64,
        message: &str,
        backline: u32,
    ) -> Result<(), ReportError> {
        let update = ProgressUpdate::new(total, count, message, backline);
        self.progress(
            Some(&update.formatted_message()),
            Some(&update.percentage_text()),
            update.backline(),
        )
    }

    /// Conclude the run successfully, consuming the reporter.
    pub fn succeed(self, message: impl Into<String>) -> Result<Outcome, ReportError> {
        self.conclude(Outcome::Success(message.into()))
    }

    /// Conclude the run as failed, consuming the reporter.
    pub fn fail(self, message: impl Into<String>) -> Result<Outcome, ReportError> {
        self.conclude(Outcome::Failure(message.into()))
    }

    fn conclude(mut self, outcome: Outcome) -> Result<Outcome, ReportError> {
        match self.ctx.mode() {
            ExecutionMode::Managed => match &outcome {
                Outcome::Success(msg) => self.queue.succeed(msg)?,
                Outcome::Failure(msg) => self.queue.fail(msg)?,
            },
            ExecutionMode::Interactive => self.console.write_line(outcome.message())?,
        }
        Ok(outcome)
    }
}
