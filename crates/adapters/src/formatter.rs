//! Line formatters for the sink-backed logger.

use logbridge_ports::{LogFormatter, LogRecord};
use serde_json::Value;
use std::fmt::Write;

/// One JSON object per line: `timestampMs`, `level`, `message`, `fields`.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonFormatter;

impl LogFormatter for JsonFormatter {
    fn name(&self) -> &'static str {
        "json"
    }

    fn format(&self, record: &LogRecord, timestamp_ms: u64) -> String {
        let mut payload = serde_json::Map::new();
        payload.insert("timestampMs".to_string(), Value::from(timestamp_ms));
        payload.insert(
            "level".to_string(),
            Value::String(record.level.as_str().to_string()),
        );
        payload.insert(
            "message".to_string(),
            Value::String(record.message.to_string()),
        );
        if let Some(fields) = record.fields.as_ref().filter(|fields| !fields.is_empty()) {
            let map = fields
                .iter()
                .map(|(key, value)| (key.to_string(), value.clone()))
                .collect();
            payload.insert("fields".to_string(), Value::Object(map));
        }

        serde_json::to_string(&Value::Object(payload)).unwrap_or_else(|_| {
            "{\"timestampMs\":0,\"level\":\"error\",\"message\":\"log serialization failed\"}"
                .to_string()
        })
    }
}

/// Logfmt-style text: `ts=<ms> level=<lvl> msg="..." key=value ...`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextFormatter;

impl LogFormatter for TextFormatter {
    fn name(&self) -> &'static str {
        "text"
    }

    fn format(&self, record: &LogRecord, timestamp_ms: u64) -> String {
        let mut line = format!(
            "ts={timestamp_ms} level={} msg={}",
            record.level,
            Value::String(record.message.to_string())
        );
        if let Some(fields) = &record.fields {
            for (key, value) in fields {
                if needs_quoting(key) {
                    let _ = write!(line, " {}={value}", Value::String(key.to_string()));
                } else {
                    let _ = write!(line, " {key}={value}");
                }
            }
        }
        line
    }
}

fn needs_quoting(key: &str) -> bool {
    key.is_empty()
        || key
            .chars()
            .any(|ch| ch == '=' || ch == '"' || ch.is_whitespace() || ch.is_control())
}
