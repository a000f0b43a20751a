//! Diagnostic sinks for pass output.
//!
//! The annotation diagnostics are part of the pass's observable contract,
//! so the sink is an injected collaborator rather than a hard-coded global
//! stream: hosts pass the stdout sink, tests capture lines in memory.
use parking_lot::Mutex;

/// Receives one line per diagnostic event.
pub trait Reporter: Send + Sync {
    fn line(&self, message: &str);
}

/// Reporter writing to the standard output stream of the host process.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutReporter;

impl Reporter for StdoutReporter {
    fn line(&self, message: &str) {
        println!("{}", message);
    }
}

/// Reporter capturing lines in memory, in emission order.
#[derive(Debug, Default)]
pub struct BufferReporter {
    lines: Mutex<Vec<String>>,
}

impl BufferReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the captured lines.
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }

    /// Drain the captured lines, leaving the buffer empty.
    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.lines.lock())
    }
}

impl Reporter for BufferReporter {
    fn line(&self, message: &str) {
        self.lines.lock().push(message.to_string());
    }
}
