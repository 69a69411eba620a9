//! In-memory log sink.

use logbridge_ports::LogSink;
use std::sync::Mutex;

/// Sink that keeps every line in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Mutex<Vec<String>>,
}

impl MemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the captured lines.
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().expect("memory sink lock").clone()
    }

    /// Drain the captured lines.
    pub fn take(&self) -> Vec<String> {
        let mut guard = self.lines.lock().expect("memory sink lock");
        std::mem::take(&mut *guard)
    }
}

impl LogSink for MemorySink {
    fn write_line(&self, line: &str) {
        let mut guard = self.lines.lock().expect("memory sink lock");
        guard.push(line.to_string());
    }

    fn label(&self) -> &str {
        "memory"
    }
}
