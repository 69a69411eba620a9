//! Output stream and formatter capabilities a logger may expose.

use crate::logger::LogRecord;

/// A sink that receives pre-formatted log lines.
pub trait LogSink: Send + Sync {
    /// Write a line to the sink. `line` carries its own trailing newline.
    fn write_line(&self, line: &str);

    /// Short label for diagnostics (`stderr`, `stdout`, `memory`, ...).
    fn label(&self) -> &str {
        "custom"
    }
}

/// Renders a record (with fields already merged) into one output line.
pub trait LogFormatter: Send + Sync {
    /// Formatter name (`json`, `text`, ...).
    fn name(&self) -> &'static str;

    /// Render `record` without a trailing newline.
    fn format(&self, record: &LogRecord, timestamp_ms: u64) -> String;
}
