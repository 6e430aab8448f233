//! Console output seam.
//!
//! The reporter never talks to stdout directly; it goes through [`Console`] so
//! interactive output is testable without capturing the process streams.

use std::io::{self, Write};
use std::sync::Arc;

use parking_lot::Mutex;

/// Line-oriented console sink. Each call writes the text plus a single line
/// terminator.
pub trait Console {
    fn write_line(&mut self, text: &str) -> io::Result<()>;
}

/// Production adapter writing to standard output.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutConsole;

impl Console for StdoutConsole {
    fn write_line(&mut self, text: &str) -> io::Result<()> {
        let stdout = io::stdout();
        let mut lock = stdout.lock();
        writeln!(lock, "{text}")?;
        lock.flush()
    }
}

/// In-memory adapter capturing every line; clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct CaptureConsole {
    lines: Arc<Mutex<Vec<String>>>,
}

impl CaptureConsole {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }
}

impl Console for CaptureConsole {
    fn write_line(&mut self, text: &str) -> io::Result<()> {
        self.lines.lock().push(text.to_string());
        Ok(())
    }
}
