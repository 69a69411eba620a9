//! Sink-backed structured logger.

use crate::formatter::JsonFormatter;
use crate::termination::ProcessExit;
use logbridge_ports::{
    FATAL_EXIT_CODE, LogFields, LogFormatter, LogLevel, LogRecord, LogSink, StructuredLogger,
    Terminator, merge_fields,
};
use logbridge_shared::redact_field;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

/// Logger writing one formatted line per record to a [`LogSink`].
///
/// Output and formatter are introspectable, so adapters can hand the raw
/// stream to foreign callers.
#[derive(Clone)]
pub struct SinkLogger {
    sink: Arc<dyn LogSink>,
    formatter: Arc<dyn LogFormatter>,
    terminator: Arc<dyn Terminator>,
    base_fields: LogFields,
    min_level: LogLevel,
    redact_secrets: bool,
}

impl SinkLogger {
    /// Create a JSON logger at `info` backed by the provided sink.
    #[must_use]
    pub fn new(sink: Arc<dyn LogSink>) -> Self {
        Self {
            sink,
            formatter: Arc::new(JsonFormatter),
            terminator: Arc::new(ProcessExit),
            base_fields: LogFields::new(),
            min_level: LogLevel::Info,
            redact_secrets: true,
        }
    }

    /// Set the line formatter.
    #[must_use]
    pub fn with_formatter(mut self, formatter: Arc<dyn LogFormatter>) -> Self {
        self.formatter = formatter;
        self
    }

    /// Set base fields applied to every record.
    #[must_use]
    pub fn with_base_fields(mut self, fields: LogFields) -> Self {
        self.base_fields = fields;
        self
    }

    /// Set the minimum log level.
    #[must_use]
    pub const fn with_min_level(mut self, level: LogLevel) -> Self {
        self.min_level = level;
        self
    }

    /// Mask values of secret-looking field names (on by default).
    #[must_use]
    pub const fn with_redaction(mut self, enabled: bool) -> Self {
        self.redact_secrets = enabled;
        self
    }

    /// Replace the terminator used by `fatal`.
    #[must_use]
    pub fn with_terminator(mut self, terminator: Arc<dyn Terminator>) -> Self {
        self.terminator = terminator;
        self
    }

    fn write(&self, record: LogRecord) {
        let mut fields = merge_fields(&self.base_fields, record.fields);
        if self.redact_secrets {
            for (key, value) in &mut fields {
                redact_field(key, value);
            }
        }
        let record = LogRecord {
            level: record.level,
            message: record.message,
            fields: (!fields.is_empty()).then_some(fields),
        };

        let mut line = self.formatter.format(&record, now_epoch_ms());
        line.push('\n');
        self.sink.write_line(&line);
    }
}

impl StructuredLogger for SinkLogger {
    fn log(&self, record: LogRecord) {
        if self.is_enabled(record.level) {
            self.write(record);
        }
    }

    fn child(&self, fields: LogFields) -> Box<dyn StructuredLogger> {
        let mut child = self.clone();
        child.base_fields = merge_fields(&self.base_fields, Some(fields));
        Box::new(child)
    }

    fn level(&self) -> LogLevel {
        self.min_level
    }

    fn output(&self) -> Option<Arc<dyn LogSink>> {
        Some(Arc::clone(&self.sink))
    }

    fn formatter(&self) -> Option<Arc<dyn LogFormatter>> {
        Some(Arc::clone(&self.formatter))
    }

    fn fatal(&self, message: &str) -> ! {
        self.write(LogRecord::new(LogLevel::Fatal, message));
        self.terminator.terminate(FATAL_EXIT_CODE)
    }
}

fn now_epoch_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .ok()
        .and_then(|duration| u64::try_from(duration.as_millis()).ok())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formatter::TextFormatter;
    use logbridge_shared::REDACTED;
    use logbridge_testkit::{
        MemorySink, RecordingTerminator, Terminated, catch_logged_panic, catch_termination,
    };
    use serde_json::{Value, json};

    fn parse(line: &str) -> Result<Value, serde_json::Error> {
        serde_json::from_str(line.trim_end())
    }

    #[test]
    fn sink_logger_redacts_sensitive_fields() -> Result<(), Box<dyn std::error::Error>> {
        let sink = Arc::new(MemorySink::default());
        let logger = SinkLogger::new(sink.clone()).with_min_level(LogLevel::Debug);

        let mut fields = LogFields::new();
        fields.insert("apiKey".into(), json!("secret"));
        fields.insert("safe".into(), json!("ok"));
        fields.insert(
            "db".into(),
            json!({ "password": "nope", "port": 5432 }), // pragma: allowlist secret
        );
        logger.info("testing", Some(fields));

        let lines = sink.take();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].ends_with('\n'));
        let payload = parse(&lines[0])?;
        let fields = payload
            .get("fields")
            .and_then(Value::as_object)
            .ok_or("missing fields")?;
        assert_eq!(fields.get("apiKey"), Some(&json!(REDACTED)));
        assert_eq!(fields.get("safe"), Some(&json!("ok")));
        assert_eq!(fields["db"]["password"], json!(REDACTED));
        assert_eq!(fields["db"]["port"], json!(5432));
        Ok(())
    }

    #[test]
    fn redaction_can_be_disabled() -> Result<(), Box<dyn std::error::Error>> {
        let sink = Arc::new(MemorySink::default());
        let logger = SinkLogger::new(sink.clone()).with_redaction(false);

        let mut fields = LogFields::new();
        fields.insert("token".into(), json!("visible"));
        logger.info("raw", Some(fields));

        let payload = parse(&sink.take()[0])?;
        assert_eq!(payload["fields"]["token"], json!("visible"));
        Ok(())
    }

    #[test]
    fn child_logger_merges_fields() -> Result<(), Box<dyn std::error::Error>> {
        let sink = Arc::new(MemorySink::default());
        let mut base = LogFields::new();
        base.insert("service".into(), json!("api"));
        base.insert("region".into(), json!("eu"));
        let logger = SinkLogger::new(sink.clone()).with_base_fields(base);

        let mut extra = LogFields::new();
        extra.insert("region".into(), json!("us"));
        let child = logger.child(extra);
        child.info("child log", None);

        let payload = parse(&sink.take()[0])?;
        assert_eq!(payload["fields"]["service"], json!("api"));
        assert_eq!(payload["fields"]["region"], json!("us"));
        Ok(())
    }

    #[test]
    fn records_below_threshold_are_dropped() {
        let sink = Arc::new(MemorySink::default());
        let logger = SinkLogger::new(sink.clone()).with_min_level(LogLevel::Warn);

        logger.info("quiet", None);
        logger.warn("loud", None);

        assert_eq!(sink.take().len(), 1);
        assert!(logger.is_enabled(LogLevel::Error));
        assert!(!logger.is_enabled(LogLevel::Info));
    }

    #[test]
    fn output_and_formatter_are_introspectable() {
        let sink = Arc::new(MemorySink::default());
        let logger = SinkLogger::new(sink).with_formatter(Arc::new(TextFormatter));

        assert_eq!(logger.output().map(|out| out.label().to_string()), Some("memory".into()));
        assert_eq!(logger.formatter().map(|fmt| fmt.name()), Some("text"));
    }

    #[test]
    fn fatal_writes_even_when_filtered_then_terminates() -> Result<(), Box<dyn std::error::Error>>
    {
        let sink = Arc::new(MemorySink::default());
        let terminator = RecordingTerminator::new();
        let logger = SinkLogger::new(sink.clone())
            .with_min_level(LogLevel::Panic)
            .with_terminator(Arc::new(terminator.clone()));

        let caught = catch_termination(|| logger.fatal("disk gone"));
        assert_eq!(caught, Some(Terminated { code: FATAL_EXIT_CODE }));

        let payload = parse(&sink.take()[0])?;
        assert_eq!(payload["level"], json!("fatal"));
        assert_eq!(payload["message"], json!("disk gone"));
        Ok(())
    }

    #[test]
    fn panic_writes_then_unwinds() {
        let sink = Arc::new(MemorySink::default());
        let logger = SinkLogger::new(sink.clone());

        let caught = catch_logged_panic(|| logger.panic("invariant broken"));
        assert!(caught.is_some());
        assert_eq!(sink.take().len(), 1);
    }
}
