//! Queue service seam and an in-process recording implementation.
//!
//! The queue service tracks a job's state and progress history under an opaque
//! context identifier. The reporter only ever talks to [`QueueService`];
//! storage, supervision, and cross-run interleaving are the service's problem.

use std::collections::HashSet;
use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::context::JobHandle;
use crate::error::QueueError;

/// Severity attached to a forwarded notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Success,
    Error,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Success => "success",
            Severity::Error => "error",
        }
    }
}

/// External queue service contract.
///
/// `bind_context` fails with [`QueueError::ContextNotFound`] when the
/// identifier does not name an existing, initialized context. The terminal
/// methods mark the job complete on the service side; they do not terminate
/// the calling process.
pub trait QueueService {
    fn current_context_id(&self) -> Option<String>;

    fn bind_context(&mut self, context_id: &str) -> Result<JobHandle, QueueError>;

    fn progress(
        &mut self,
        message: Option<&str>,
        percentage: Option<&str>,
        backline: u32,
    ) -> Result<(), QueueError>;

    fn succeed(&mut self, message: &str) -> Result<(), QueueError>;

    fn fail(&mut self, message: &str) -> Result<(), QueueError>;
}

/// One recorded call against the in-process queue.
#[derive(Debug, Clone, Serialize)]
pub struct QueueCall {
    pub severity: Severity,
    pub message: Option<String>,
    pub percentage: Option<String>,
    pub backline: u32,
}

#[derive(Debug, Default)]
struct QueueState {
    contexts: HashSet<String>,
    current: Option<String>,
    bind_calls: usize,
    calls: Vec<QueueCall>,
}

/// In-process queue implementation recording every forwarded call.
///
/// Clones share the same state, so a caller can hand one clone to a
/// [`Reporter`](crate::report::Reporter) and keep another to inspect the
/// recorded calls after the run.
#[derive(Debug, Clone, Default)]
pub struct InMemoryQueue {
    inner: Arc<Mutex<QueueState>>,
}

impl InMemoryQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a context identifier so it can be bound later.
    pub fn register_context(&self, context_id: impl Into<String>) {
        self.inner.lock().contexts.insert(context_id.into());
    }

    pub fn calls(&self) -> Vec<QueueCall> {
        self.inner.lock().calls.clone()
    }

    /// Number of `bind_context` calls that reached the service.
    pub fn bind_calls(&self) -> usize {
        self.inner.lock().bind_calls
    }

    fn record(&self, call: QueueCall) -> Result<(), QueueError> {
        let mut state = self.inner.lock();
        if state.current.is_none() {
            return Err(QueueError::Backend("no context bound".to_string()));
        }
        state.calls.push(call);
        Ok(())
    }
}

impl QueueService for InMemoryQueue {
    fn current_context_id(&self) -> Option<String> {
        self.inner.lock().current.clone()
    }

    fn bind_context(&mut self, context_id: &str) -> Result<JobHandle, QueueError> {
        let mut state = self.inner.lock();
        if !state.contexts.contains(context_id) {
            return Err(QueueError::ContextNotFound(context_id.to_string()));
        }
        state.bind_calls += 1;
        state.current = Some(context_id.to_string());
        debug!(context_id = %context_id, "queue context bound");
        Ok(JobHandle::new(context_id))
    }

    fn progress(
        &mut self,
        message: Option<&str>,
        percentage: Option<&str>,
        backline: u32,
    ) -> Result<(), QueueError> {
        debug!(message = ?message, percentage = ?percentage, backline, "queue progress");
        self.record(QueueCall {
            severity: Severity::Info,
            message: message.map(str::to_string),
            percentage: percentage.map(str::to_string),
            backline,
        })
    }

    fn succeed(&mut self, message: &str) -> Result<(), QueueError> {
        debug!(message = %message, "queue success");
        self.record(QueueCall {
            severity: Severity::Success,
            message: Some(message.to_string()),
            percentage: None,
            backline: 0,
        })
    }

    fn fail(&mut self, message: &str) -> Result<(), QueueError> {
        debug!(message = %message, "queue failure");
        self.record(QueueCall {
            severity: Severity::Error,
            message: Some(message.to_string()),
            percentage: None,
            backline: 0,
        })
    }
}
