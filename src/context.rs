//! Execution context for a single command run.

use serde::{Deserialize, Serialize};

/// How the current run is attached to the outside world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionMode {
    /// Attached to an interactive console; output goes to stdout.
    Interactive,
    /// Detached under a managed job-queue context.
    Managed,
}

/// Opaque reference to the queue service's tracking record for this run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobHandle {
    context_id: String,
}

impl JobHandle {
    pub fn new(context_id: impl Into<String>) -> Self {
        Self {
            context_id: context_id.into(),
        }
    }

    pub fn context_id(&self) -> &str {
        &self.context_id
    }
}

/// Per-run execution context, constructed once at command start and immutable
/// for the run's duration.
///
/// A job handle is present exactly when the run is managed; the two
/// constructors are the only way to build a context, so the invariant holds by
/// construction.
#[derive(Debug, Clone)]
pub struct ExecutionContext {
    mode: ExecutionMode,
    job_handle: Option<JobHandle>,
}

impl ExecutionContext {
    pub fn interactive() -> Self {
        Self {
            mode: ExecutionMode::Interactive,
            job_handle: None,
        }
    }

    pub fn managed(handle: JobHandle) -> Self {
        Self {
            mode: ExecutionMode::Managed,
            job_handle: Some(handle),
        }
    }

    pub fn mode(&self) -> ExecutionMode {
        self.mode
    }

    pub fn is_managed(&self) -> bool {
        self.mode == ExecutionMode::Managed
    }

    pub fn job_handle(&self) -> Option<&JobHandle> {
        self.job_handle.as_ref()
    }
}
