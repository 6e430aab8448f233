//! Error types for queue-managed progress reporting.

use thiserror::Error;

/// Failures raised by a queue-service collaborator.
#[derive(Debug, Error)]
pub enum QueueError {
    #[error("Queue context not found: {0}")]
    ContextNotFound(String),

    #[error("Queue backend error: {0}")]
    Backend(String),
}

/// Errors surfaced by the reporter and its configuration layer.
///
/// The reporter performs no retries and holds no fallback: a collaborator
/// failure propagates to the caller unchanged.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Queue(#[from] QueueError),

    #[error("Console I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<config::ConfigError> for ReportError {
    fn from(err: config::ConfigError) -> Self {
        ReportError::Config(err.to_string())
    }
}
