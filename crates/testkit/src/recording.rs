//! Recording implementation of the shared logger.
//!
//! Every emitted record is stored with the fields that were bound onto the
//! emitting logger, so tests can assert exactly what an adapter forwarded.

use crate::termination::RecordingTerminator;
use logbridge_ports::{
    FATAL_EXIT_CODE, LogFields, LogFormatter, LogLevel, LogRecord, LogSink, StructuredLogger,
    Terminator, merge_fields,
};
use serde_json::Value;
use std::sync::{Arc, Mutex};

/// One captured emission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedEntry {
    /// Level the record was emitted at.
    pub level: LogLevel,
    /// Message text.
    pub message: String,
    /// Bound fields merged with the record's own fields.
    pub fields: LogFields,
}

impl RecordedEntry {
    /// Field lookup by name.
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }
}

/// Logger double that records instead of writing.
///
/// Clones and children share one record log.
#[derive(Clone)]
pub struct RecordingLogger {
    entries: Arc<Mutex<Vec<RecordedEntry>>>,
    bound: LogFields,
    level: LogLevel,
    output: Option<Arc<dyn LogSink>>,
    formatter: Option<Arc<dyn LogFormatter>>,
    terminator: Arc<dyn Terminator>,
}

impl Default for RecordingLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingLogger {
    /// Logger enabled at every level, not introspectable, with a
    /// [`RecordingTerminator`].
    pub fn new() -> Self {
        Self {
            entries: Arc::new(Mutex::new(Vec::new())),
            bound: LogFields::new(),
            level: LogLevel::Trace,
            output: None,
            formatter: None,
            terminator: Arc::new(RecordingTerminator::new()),
        }
    }

    /// Set the threshold reported by `level()` and applied to emissions.
    #[must_use]
    pub fn with_level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    /// Expose `output` through `StructuredLogger::output`.
    #[must_use]
    pub fn with_output(mut self, output: Arc<dyn LogSink>) -> Self {
        self.output = Some(output);
        self
    }

    /// Expose `formatter` through `StructuredLogger::formatter`.
    #[must_use]
    pub fn with_formatter(mut self, formatter: Arc<dyn LogFormatter>) -> Self {
        self.formatter = Some(formatter);
        self
    }

    /// Terminator used by `fatal`.
    #[must_use]
    pub fn with_terminator(mut self, terminator: Arc<dyn Terminator>) -> Self {
        self.terminator = terminator;
        self
    }

    /// Snapshot of every captured record.
    pub fn entries(&self) -> Vec<RecordedEntry> {
        self.entries.lock().expect("recording logger lock").clone()
    }

    /// Drain the captured records.
    pub fn take(&self) -> Vec<RecordedEntry> {
        let mut guard = self.entries.lock().expect("recording logger lock");
        std::mem::take(&mut *guard)
    }

    fn record(&self, record: LogRecord) {
        let entry = RecordedEntry {
            level: record.level,
            message: record.message.into_string(),
            fields: merge_fields(&self.bound, record.fields),
        };
        self.entries
            .lock()
            .expect("recording logger lock")
            .push(entry);
    }
}

impl StructuredLogger for RecordingLogger {
    fn log(&self, record: LogRecord) {
        if self.is_enabled(record.level) {
            self.record(record);
        }
    }

    fn child(&self, fields: LogFields) -> Box<dyn StructuredLogger> {
        let mut child = self.clone();
        child.bound = merge_fields(&self.bound, Some(fields));
        Box::new(child)
    }

    fn level(&self) -> LogLevel {
        self.level
    }

    fn output(&self) -> Option<Arc<dyn LogSink>> {
        self.output.clone()
    }

    fn formatter(&self) -> Option<Arc<dyn LogFormatter>> {
        self.formatter.clone()
    }

    fn fatal(&self, message: &str) -> ! {
        self.record(LogRecord::new(LogLevel::Fatal, message));
        self.terminator.terminate(FATAL_EXIT_CODE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::termination::{Terminated, catch_logged_panic, catch_termination};
    use serde_json::json;

    fn fields(pairs: &[(&str, Value)]) -> LogFields {
        pairs
            .iter()
            .map(|(key, value)| ((*key).into(), value.clone()))
            .collect()
    }

    #[test]
    fn records_messages_with_bound_fields() {
        let logger = RecordingLogger::new();
        let child = logger.child(fields(&[("a", json!(1))]));
        child.info("hello", Some(fields(&[("b", json!(2))])));

        let entries = logger.take();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].level, LogLevel::Info);
        assert_eq!(entries[0].message, "hello");
        assert_eq!(entries[0].field("a"), Some(&json!(1)));
        assert_eq!(entries[0].field("b"), Some(&json!(2)));
    }

    #[test]
    fn threshold_filters_records() {
        let logger = RecordingLogger::new().with_level(LogLevel::Warn);
        logger.debug("hidden", None);
        logger.error("shown", None);

        let entries = logger.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].message, "shown");
    }

    #[test]
    fn fatal_records_then_terminates() {
        let terminator = RecordingTerminator::new();
        let logger = RecordingLogger::new()
            .with_level(LogLevel::Panic)
            .with_terminator(Arc::new(terminator.clone()));

        let caught = catch_termination(|| logger.fatal("bye"));
        assert_eq!(caught, Some(Terminated { code: 1 }));
        assert_eq!(terminator.codes(), vec![1]);
        assert_eq!(logger.entries()[0].level, LogLevel::Fatal);
    }

    #[test]
    fn panic_records_then_unwinds() {
        let logger = RecordingLogger::new();
        let caught = catch_logged_panic(|| logger.panic("oops"));

        assert_eq!(caught.map(|p| p.message().to_string()), Some("oops".into()));
        assert_eq!(logger.entries()[0].level, LogLevel::Panic);
    }
}
