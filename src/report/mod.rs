//! Job progress reporting.

pub mod reporter;
pub mod update;

pub use reporter::{Outcome, Reporter};
pub use update::{index_label, percentage_text, ProgressUpdate};
