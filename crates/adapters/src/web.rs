//! Web framework adapter.
//!
//! Exposes the framework's full logger surface over the shared logger. The
//! shared logger is configured centrally, so every setter is accepted and
//! ignored, and every accessor reads through to the shared logger.

use crate::levels::web_level;
use crate::log_sink::StderrLogSink;
use logbridge_ports::{
    JsonMap, LogFormatter, LogLevel, LogRecord, LogSink, StructuredLogger, WebLevel, WebLogger,
};
use std::fmt;
use std::sync::Arc;

/// [`WebLogger`] over the shared logger.
#[derive(Clone)]
pub struct WebLogAdapter {
    logger: Arc<dyn StructuredLogger>,
}

impl WebLogAdapter {
    /// Wrap the shared logger.
    #[must_use]
    pub fn new(logger: Arc<dyn StructuredLogger>) -> Self {
        Self { logger }
    }

    fn emit(&self, level: LogLevel, message: String) {
        self.logger.log(LogRecord::new(level, message));
    }
}

fn join_values(values: &[&dyn fmt::Display]) -> String {
    values
        .iter()
        .map(|value| value.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

fn json_message(json: &JsonMap) -> String {
    serde_json::to_string(json).unwrap_or_else(|_| "{}".to_string())
}

impl WebLogger for WebLogAdapter {
    fn output(&self) -> Arc<dyn LogSink> {
        self.logger
            .output()
            .unwrap_or_else(|| Arc::new(StderrLogSink))
    }

    fn set_output(&mut self, _output: Arc<dyn LogSink>) {}

    fn prefix(&self) -> String {
        String::new()
    }

    fn set_prefix(&mut self, _prefix: &str) {}

    fn level(&self) -> WebLevel {
        web_level(self.logger.level())
    }

    fn set_level(&mut self, _level: WebLevel) {}

    fn set_header(&mut self, _header: &str) {}

    fn formatter(&self) -> Option<Arc<dyn LogFormatter>> {
        self.logger.formatter()
    }

    fn set_formatter(&mut self, _formatter: Arc<dyn LogFormatter>) {}

    fn print(&self, values: &[&dyn fmt::Display]) {
        self.emit(LogLevel::Info, join_values(values));
    }

    fn printf(&self, args: fmt::Arguments<'_>) {
        self.emit(LogLevel::Info, args.to_string());
    }

    fn printj(&self, json: &JsonMap) {
        self.emit(LogLevel::Info, json_message(json));
    }

    fn debug(&self, values: &[&dyn fmt::Display]) {
        self.emit(LogLevel::Debug, join_values(values));
    }

    fn debugf(&self, args: fmt::Arguments<'_>) {
        self.emit(LogLevel::Debug, args.to_string());
    }

    fn debugj(&self, json: &JsonMap) {
        self.emit(LogLevel::Debug, json_message(json));
    }

    fn info(&self, values: &[&dyn fmt::Display]) {
        self.emit(LogLevel::Info, join_values(values));
    }

    fn infof(&self, args: fmt::Arguments<'_>) {
        self.emit(LogLevel::Info, args.to_string());
    }

    fn infoj(&self, json: &JsonMap) {
        self.emit(LogLevel::Info, json_message(json));
    }

    fn warn(&self, values: &[&dyn fmt::Display]) {
        self.emit(LogLevel::Warn, join_values(values));
    }

    fn warnf(&self, args: fmt::Arguments<'_>) {
        self.emit(LogLevel::Warn, args.to_string());
    }

    fn warnj(&self, json: &JsonMap) {
        self.emit(LogLevel::Warn, json_message(json));
    }

    fn error(&self, values: &[&dyn fmt::Display]) {
        self.emit(LogLevel::Error, join_values(values));
    }

    fn errorf(&self, args: fmt::Arguments<'_>) {
        self.emit(LogLevel::Error, args.to_string());
    }

    fn errorj(&self, json: &JsonMap) {
        self.emit(LogLevel::Error, json_message(json));
    }

    fn fatal(&self, values: &[&dyn fmt::Display]) -> ! {
        self.logger.fatal(&join_values(values))
    }

    fn fatalf(&self, args: fmt::Arguments<'_>) -> ! {
        self.logger.fatal(&args.to_string())
    }

    fn fatalj(&self, json: &JsonMap) -> ! {
        self.logger.fatal(&json_message(json))
    }

    fn panic(&self, values: &[&dyn fmt::Display]) -> ! {
        self.logger.panic(&join_values(values))
    }

    fn panicf(&self, args: fmt::Arguments<'_>) -> ! {
        self.logger.panic(&args.to_string())
    }

    fn panicj(&self, json: &JsonMap) -> ! {
        self.logger.panic(&json_message(json))
    }
}
