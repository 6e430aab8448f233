//! Jobline: progress reporting for queue-managed console commands.
//!
//! A command run is either attached to an interactive console or detached under
//! a managed job-queue context. The [`report::Reporter`] formats and routes
//! progress, success, and failure notifications to the matching sink: the
//! external queue service in managed mode, standard output in interactive mode.

pub mod cli;
pub mod config;
pub mod console;
pub mod context;
pub mod error;
pub mod logging;
pub mod queue;
pub mod report;
