//! Structured logging capability shared by every adapter.
//!
//! A single `StructuredLogger` instance is configured centrally and handed to
//! the adapters. Adapters only ever emit records, bind fields, and read the
//! threshold/output/formatter; they never reconfigure it.

use crate::output::{LogFormatter, LogSink};
use logbridge_shared::{ErrorCode, ErrorEnvelope};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Severity levels in ascending order.
///
/// `Fatal` and `Panic` sit above `Error`; emitting through
/// [`StructuredLogger::fatal`] or [`StructuredLogger::panic`] also ends the
/// process or unwinds the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Very verbose diagnostics.
    Trace,
    /// Debug.
    Debug,
    /// Info.
    Info,
    /// Warn.
    Warn,
    /// Error.
    Error,
    /// Error after which the process exits.
    Fatal,
    /// Error after which the caller unwinds.
    Panic,
}

impl LogLevel {
    /// Every level, least severe first.
    pub const ALL: [Self; 7] = [
        Self::Trace,
        Self::Debug,
        Self::Info,
        Self::Warn,
        Self::Error,
        Self::Fatal,
        Self::Panic,
    ];

    /// Lowercase name used in formatted output and config.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
            Self::Fatal => "fatal",
            Self::Panic => "panic",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Unknown level name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseLogLevelError {
    input: Box<str>,
}

impl ParseLogLevelError {
    /// The rejected input.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }
}

impl fmt::Display for ParseLogLevelError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "unknown log level `{}` (expected trace, debug, info, warn, error, fatal, or panic)",
            self.input
        )
    }
}

impl std::error::Error for ParseLogLevelError {}

impl From<ParseLogLevelError> for ErrorEnvelope {
    fn from(error: ParseLogLevelError) -> Self {
        let input = error.input.to_string();
        Self::expected(ErrorCode::new("logger", "invalid_level"), error.to_string())
            .with_metadata("value", input)
    }
}

impl FromStr for LogLevel {
    type Err = ParseLogLevelError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.trim().to_ascii_lowercase().as_str() {
            "trace" => Ok(Self::Trace),
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" => Ok(Self::Error),
            "fatal" => Ok(Self::Fatal),
            "panic" => Ok(Self::Panic),
            _ => Err(ParseLogLevelError {
                input: input.to_owned().into_boxed_str(),
            }),
        }
    }
}

/// Structured fields attached to a record or bound onto a logger.
pub type LogFields = BTreeMap<Box<str>, Value>;

/// Merge `extra` over `base`; on key collisions the later value wins.
#[must_use]
pub fn merge_fields(base: &LogFields, extra: Option<LogFields>) -> LogFields {
    let mut merged = base.clone();
    if let Some(extra) = extra {
        merged.extend(extra);
    }
    merged
}

/// One log emission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    /// Severity.
    pub level: LogLevel,
    /// Message text.
    pub message: Box<str>,
    /// Optional per-record fields (merged over bound fields).
    pub fields: Option<LogFields>,
}

impl LogRecord {
    /// Record without fields.
    pub fn new(level: LogLevel, message: impl Into<Box<str>>) -> Self {
        Self {
            level,
            message: message.into(),
            fields: None,
        }
    }

    /// Attach per-record fields.
    #[must_use]
    pub fn with_fields(mut self, fields: LogFields) -> Self {
        self.fields = Some(fields);
        self
    }
}

/// Unwind payload raised by [`StructuredLogger::panic`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggedPanic {
    message: Box<str>,
}

impl LoggedPanic {
    /// Wrap the message that was logged before unwinding.
    pub fn new(message: impl Into<Box<str>>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The logged message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for LoggedPanic {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(&self.message)
    }
}

/// Leveled, structured logger consumed by the adapters.
///
/// Implementations must be safe for concurrent emission.
pub trait StructuredLogger: Send + Sync {
    /// Emit a record if its level is enabled.
    fn log(&self, record: LogRecord);

    /// Derive a logger that carries `fields` on every future record.
    fn child(&self, fields: LogFields) -> Box<dyn StructuredLogger>;

    /// Current minimum enabled level.
    fn level(&self) -> LogLevel;

    /// Whether records at `level` would be emitted.
    fn is_enabled(&self, level: LogLevel) -> bool {
        level >= self.level()
    }

    /// Underlying output stream, if this backend exposes one.
    fn output(&self) -> Option<Arc<dyn LogSink>> {
        None
    }

    /// Active formatter, if this backend exposes one.
    fn formatter(&self) -> Option<Arc<dyn LogFormatter>> {
        None
    }

    /// Emit at [`LogLevel::Fatal`], then terminate the process.
    fn fatal(&self, message: &str) -> !;

    /// Emit at [`LogLevel::Panic`], then unwind with a [`LoggedPanic`] payload.
    fn panic(&self, message: &str) -> ! {
        self.log(LogRecord::new(LogLevel::Panic, message));
        std::panic::panic_any(LoggedPanic::new(message))
    }

    /// Convenience: trace record.
    fn trace(&self, message: &str, fields: Option<LogFields>) {
        self.log(LogRecord {
            level: LogLevel::Trace,
            message: message.into(),
            fields,
        });
    }

    /// Convenience: debug record.
    fn debug(&self, message: &str, fields: Option<LogFields>) {
        self.log(LogRecord {
            level: LogLevel::Debug,
            message: message.into(),
            fields,
        });
    }

    /// Convenience: info record.
    fn info(&self, message: &str, fields: Option<LogFields>) {
        self.log(LogRecord {
            level: LogLevel::Info,
            message: message.into(),
            fields,
        });
    }

    /// Convenience: warn record.
    fn warn(&self, message: &str, fields: Option<LogFields>) {
        self.log(LogRecord {
            level: LogLevel::Warn,
            message: message.into(),
            fields,
        });
    }

    /// Convenience: error record.
    fn error(&self, message: &str, fields: Option<LogFields>) {
        self.log(LogRecord {
            level: LogLevel::Error,
            message: message.into(),
            fields,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levels_are_ordered_by_severity() {
        for pair in LogLevel::ALL.windows(2) {
            if let [lower, higher] = pair {
                assert!(lower < higher, "{lower} should be below {higher}");
            }
        }
    }

    #[test]
    fn levels_parse_case_insensitively() {
        assert_eq!("WARNING".parse::<LogLevel>(), Ok(LogLevel::Warn));
        assert_eq!(" debug ".parse::<LogLevel>(), Ok(LogLevel::Debug));
        for level in LogLevel::ALL {
            assert_eq!(level.as_str().parse::<LogLevel>(), Ok(level));
        }
    }

    #[test]
    fn unknown_level_maps_to_envelope() {
        let error = "verbose".parse::<LogLevel>().err();
        let envelope = error.map(ErrorEnvelope::from);
        assert_eq!(
            envelope.as_ref().map(|envelope| envelope.code.to_string()),
            Some("logger:invalid_level".to_string())
        );
        assert_eq!(
            envelope
                .as_ref()
                .and_then(|envelope| envelope.metadata.get("value"))
                .map(String::as_str),
            Some("verbose")
        );
    }

    #[test]
    fn merge_fields_is_last_write_wins() {
        let mut base = LogFields::new();
        base.insert("a".into(), Value::from(1));
        base.insert("b".into(), Value::from(2));
        let mut extra = LogFields::new();
        extra.insert("b".into(), Value::from(3));

        let merged = merge_fields(&base, Some(extra));
        assert_eq!(merged.get("a"), Some(&Value::from(1)));
        assert_eq!(merged.get("b"), Some(&Value::from(3)));
        assert_eq!(base.get("b"), Some(&Value::from(2)));
    }

    #[test]
    fn level_serde_uses_lowercase_names() -> Result<(), serde_json::Error> {
        assert_eq!(serde_json::to_string(&LogLevel::Fatal)?, "\"fatal\"");
        let level: LogLevel = serde_json::from_str("\"warn\"")?;
        assert_eq!(level, LogLevel::Warn);
        Ok(())
    }
}
