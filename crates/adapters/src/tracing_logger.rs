//! Shared logger backed by `tracing` events.
//!
//! The subscriber owns output and formatting, so this backend is not
//! introspectable: `output()` and `formatter()` stay `None`.

use crate::termination::ProcessExit;
use logbridge_ports::{
    FATAL_EXIT_CODE, LogFields, LogLevel, LogRecord, StructuredLogger, Terminator, merge_fields,
};
use serde_json::Value;
use std::sync::Arc;
use tracing::level_filters::LevelFilter;

/// Forwards records to the current `tracing` dispatcher.
#[derive(Clone)]
pub struct TracingLogger {
    base_fields: LogFields,
    min_level: LogLevel,
    terminator: Arc<dyn Terminator>,
}

impl Default for TracingLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl TracingLogger {
    /// Logger with no bound fields that exits the process on `fatal`.
    #[must_use]
    pub fn new() -> Self {
        Self {
            base_fields: LogFields::new(),
            min_level: LogLevel::Trace,
            terminator: Arc::new(ProcessExit),
        }
    }

    /// Set base fields applied to every record.
    #[must_use]
    pub fn with_base_fields(mut self, fields: LogFields) -> Self {
        self.base_fields = fields;
        self
    }

    /// Configured threshold. `tracing` stops at `error`, so a `fatal` or
    /// `panic` threshold is enforced here rather than by the subscriber.
    #[must_use]
    pub const fn with_min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    /// Replace the terminator used by `fatal`.
    #[must_use]
    pub fn with_terminator(mut self, terminator: Arc<dyn Terminator>) -> Self {
        self.terminator = terminator;
        self
    }

    fn emit(&self, record: LogRecord) {
        let fields = merge_fields(&self.base_fields, record.fields);
        let fields = Value::Object(
            fields
                .into_iter()
                .map(|(key, value)| (key.into_string(), value))
                .collect(),
        );
        let message = &*record.message;
        let severity = record.level.as_str();
        match record.level {
            LogLevel::Trace => tracing::trace!(fields = %fields, "{message}"),
            LogLevel::Debug => tracing::debug!(fields = %fields, "{message}"),
            LogLevel::Info => tracing::info!(fields = %fields, "{message}"),
            LogLevel::Warn => tracing::warn!(fields = %fields, "{message}"),
            LogLevel::Error | LogLevel::Fatal | LogLevel::Panic => {
                tracing::error!(severity, fields = %fields, "{message}");
            },
        }
    }
}

impl StructuredLogger for TracingLogger {
    fn log(&self, record: LogRecord) {
        if self.is_enabled(record.level) {
            self.emit(record);
        }
    }

    fn child(&self, fields: LogFields) -> Box<dyn StructuredLogger> {
        let mut child = self.clone();
        child.base_fields = merge_fields(&self.base_fields, Some(fields));
        Box::new(child)
    }

    fn level(&self) -> LogLevel {
        self.min_level.max(level_from_filter(LevelFilter::current()))
    }

    fn fatal(&self, message: &str) -> ! {
        self.emit(LogRecord::new(LogLevel::Fatal, message));
        self.terminator.terminate(FATAL_EXIT_CODE)
    }
}

/// Most verbose shared level a `tracing` filter lets through.
///
/// `OFF` maps to `Panic`, the only level still forwarded so a panic is
/// never silent.
pub fn level_from_filter(filter: LevelFilter) -> LogLevel {
    if filter >= LevelFilter::TRACE {
        LogLevel::Trace
    } else if filter >= LevelFilter::DEBUG {
        LogLevel::Debug
    } else if filter >= LevelFilter::INFO {
        LogLevel::Info
    } else if filter >= LevelFilter::WARN {
        LogLevel::Warn
    } else if filter >= LevelFilter::ERROR {
        LogLevel::Error
    } else {
        LogLevel::Panic
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use logbridge_testkit::{RecordingTerminator, Terminated, catch_termination};
    use serde_json::json;

    #[test]
    fn filter_levels_map_to_shared_levels() {
        assert_eq!(level_from_filter(LevelFilter::TRACE), LogLevel::Trace);
        assert_eq!(level_from_filter(LevelFilter::DEBUG), LogLevel::Debug);
        assert_eq!(level_from_filter(LevelFilter::INFO), LogLevel::Info);
        assert_eq!(level_from_filter(LevelFilter::WARN), LogLevel::Warn);
        assert_eq!(level_from_filter(LevelFilter::ERROR), LogLevel::Error);
        assert_eq!(level_from_filter(LevelFilter::OFF), LogLevel::Panic);
    }

    #[test]
    fn tracing_backend_is_not_introspectable() {
        let logger = TracingLogger::new();
        assert!(logger.output().is_none());
        assert!(logger.formatter().is_none());
    }

    #[test]
    fn emits_under_a_subscriber_without_failing() {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_test_writer()
            .finish();
        tracing::subscriber::with_default(subscriber, || {
            let mut fields = LogFields::new();
            fields.insert("job".into(), json!("sync"));
            let logger = TracingLogger::new().child(fields);
            logger.info("started", None);
            logger.error("failed", None);
        });
    }

    #[test]
    fn configured_threshold_above_error_wins_over_filter() {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::ERROR)
            .with_test_writer()
            .finish();
        tracing::subscriber::with_default(subscriber, || {
            let logger = TracingLogger::new().with_min_level(LogLevel::Fatal);
            assert_eq!(logger.level(), LogLevel::Fatal);
            assert!(!logger.is_enabled(LogLevel::Error));
            assert!(logger.is_enabled(LogLevel::Panic));
        });
    }

    #[test]
    fn fatal_terminates_through_injected_terminator() {
        let terminator = RecordingTerminator::new();
        let logger = TracingLogger::new().with_terminator(Arc::new(terminator.clone()));

        let caught = catch_termination(|| logger.fatal("shutting down"));
        assert_eq!(caught, Some(Terminated { code: 1 }));
        assert_eq!(terminator.codes(), vec![1]);
    }
}
