//! Process stream sinks.
//!
//! Each line is written under the stream lock so concurrent records never
//! interleave. Write failures are reported on stderr and otherwise dropped.

use logbridge_ports::LogSink;
use std::io::{self, Write};

fn write_locked(mut stream: impl Write, line: &str) {
    if let Err(error) = stream.write_all(line.as_bytes()) {
        eprintln!("log sink write failed: {error}");
    }
}

/// Log sink that writes to stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct StderrLogSink;

impl LogSink for StderrLogSink {
    fn write_line(&self, line: &str) {
        write_locked(io::stderr().lock(), line);
    }

    fn label(&self) -> &str {
        "stderr"
    }
}

/// Log sink that writes to stdout.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutLogSink;

impl LogSink for StdoutLogSink {
    fn write_line(&self, line: &str) {
        write_locked(io::stdout().lock(), line);
    }

    fn label(&self) -> &str {
        "stdout"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn process_sinks_report_their_stream() {
        assert_eq!(StderrLogSink.label(), "stderr");
        assert_eq!(StdoutLogSink.label(), "stdout");
    }

    #[test]
    fn writing_to_process_streams_does_not_fail() {
        StderrLogSink.write_line("stderr sink smoke\n");
        StdoutLogSink.write_line("stdout sink smoke\n");
    }
}
