//! Plugin/RPC framework adapter.
//!
//! Hierarchical names and implied arguments live on the adapter; everything
//! else is bound onto the shared logger as fields. Deriving (`with`, `named`,
//! `reset_named`) never touches the parent.

use crate::levels::{plugin_level, shared_level};
use crate::log_sink::StderrLogSink;
use crate::termination::ProcessExit;
use logbridge_ports::{
    FATAL_EXIT_CODE, LogFields, LogLevel, LogRecord, LogSink, PluginLevel, PluginLogger,
    StandardLoggerOptions, StructuredLogger, Terminator,
};
use serde_json::Value;
use std::error::Error;
use std::io;
use std::sync::Arc;

/// Field bound by `named`/`reset_named`.
pub const SUBSYSTEM_NAME_FIELD: &str = "subsystem_name";

/// Value paired with a trailing key that has none.
pub const MISSING_VALUE: &str = "<unknown>";

/// Build a field set from a flat `key, value, ...` list.
///
/// A dangling trailing key gets [`MISSING_VALUE`]; pairs whose key is not a
/// string are dropped. Later duplicates win.
pub fn entry_fields(args: &[Value]) -> LogFields {
    let mut fields = LogFields::new();
    for pair in args.chunks(2) {
        let Some(Value::String(key)) = pair.first() else {
            continue;
        };
        let value = pair
            .get(1)
            .cloned()
            .unwrap_or_else(|| Value::String(MISSING_VALUE.to_string()));
        fields.insert(key.as_str().into(), value);
    }
    fields
}

/// [`PluginLogger`] over the shared logger.
#[derive(Clone)]
pub struct PluginLogAdapter {
    logger: Arc<dyn StructuredLogger>,
    name: Box<str>,
    implied_args: Vec<Value>,
    terminator: Arc<dyn Terminator>,
}

impl PluginLogAdapter {
    /// Wrap the shared logger under `name` (may be empty).
    #[must_use]
    pub fn new(logger: Arc<dyn StructuredLogger>, name: &str) -> Self {
        Self {
            logger,
            name: name.into(),
            implied_args: Vec::new(),
            terminator: Arc::new(ProcessExit),
        }
    }

    /// Replace the terminator used by `fatal`. Derived adapters inherit it.
    #[must_use]
    pub fn with_terminator(mut self, terminator: Arc<dyn Terminator>) -> Self {
        self.terminator = terminator;
        self
    }

    /// Shared logger bound with the fields parsed from `args`.
    pub fn create_entry(&self, args: &[Value]) -> Box<dyn StructuredLogger> {
        self.logger.child(entry_fields(args))
    }

    /// Shared threshold in the plugin vocabulary.
    pub fn level(&self) -> PluginLevel {
        plugin_level(self.logger.level())
    }

    fn derive(
        &self,
        logger: Box<dyn StructuredLogger>,
        name: Box<str>,
        implied_args: Vec<Value>,
    ) -> Self {
        Self {
            logger: Arc::from(logger),
            name,
            implied_args,
            terminator: Arc::clone(&self.terminator),
        }
    }

    fn emit(&self, level: LogLevel, msg: &str, args: &[Value]) {
        let record = LogRecord::new(level, msg);
        if args.is_empty() {
            self.logger.log(record);
        } else {
            self.create_entry(args).log(record);
        }
    }
}

impl PluginLogger for PluginLogAdapter {
    fn log(&self, level: PluginLevel, msg: &str, args: &[Value]) {
        if let Some(level) = shared_level(level) {
            self.emit(level, msg, args);
        }
    }

    fn trace(&self, _msg: &str, _args: &[Value]) {}

    fn debug(&self, msg: &str, args: &[Value]) {
        self.emit(LogLevel::Debug, msg, args);
    }

    fn info(&self, msg: &str, args: &[Value]) {
        self.emit(LogLevel::Info, msg, args);
    }

    fn warn(&self, msg: &str, args: &[Value]) {
        self.emit(LogLevel::Warn, msg, args);
    }

    fn error(&self, msg: &str, args: &[Value]) {
        self.emit(LogLevel::Error, msg, args);
    }

    fn is_trace(&self) -> bool {
        false
    }

    fn is_debug(&self) -> bool {
        self.logger.is_enabled(LogLevel::Debug)
    }

    fn is_info(&self) -> bool {
        self.logger.is_enabled(LogLevel::Info)
    }

    fn is_warn(&self) -> bool {
        self.logger.is_enabled(LogLevel::Warn)
    }

    fn is_error(&self) -> bool {
        self.logger.is_enabled(LogLevel::Error)
    }

    fn implied_args(&self) -> &[Value] {
        &self.implied_args
    }

    fn with(&self, args: &[Value]) -> Box<dyn PluginLogger> {
        let implied_args = [self.implied_args.as_slice(), args].concat();
        Box::new(self.derive(self.create_entry(args), self.name.clone(), implied_args))
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn named(&self, name: &str) -> Box<dyn PluginLogger> {
        if self.name.is_empty() {
            self.reset_named(name)
        } else {
            self.reset_named(&format!("{}.{name}", self.name))
        }
    }

    fn reset_named(&self, name: &str) -> Box<dyn PluginLogger> {
        let mut fields = LogFields::new();
        fields.insert(SUBSYSTEM_NAME_FIELD.into(), Value::String(name.to_string()));
        Box::new(self.derive(self.logger.child(fields), name.into(), Vec::new()))
    }

    fn set_level(&mut self, _level: PluginLevel) {}

    fn standard_logger(&self, opts: &StandardLoggerOptions) -> Box<dyn io::Write + Send> {
        Box::new(LevelWriter::new(Arc::clone(&self.logger), opts))
    }

    fn standard_writer(&self, _opts: &StandardLoggerOptions) -> Arc<dyn LogSink> {
        self.logger
            .output()
            .unwrap_or_else(|| Arc::new(StderrLogSink))
    }

    fn fatal(&self, err: &dyn Error) -> ! {
        self.emit(LogLevel::Error, &err.to_string(), &[]);
        self.terminator.terminate(FATAL_EXIT_CODE)
    }
}

/// Longest partial line [`LevelWriter`] buffers before logging it as is.
pub const MAX_PENDING_LINE: usize = 64 * 1024;

/// Line-oriented writer that logs each complete line.
///
/// Lines go out at `Info` unless the options force a level or ask for
/// `[LEVEL]` prefixes to be inferred. A trailing partial line is logged on
/// flush or drop, or as soon as it exceeds [`MAX_PENDING_LINE`] bytes.
pub struct LevelWriter {
    logger: Arc<dyn StructuredLogger>,
    options: StandardLoggerOptions,
    pending: Vec<u8>,
}

impl LevelWriter {
    /// Writer emitting through `logger`.
    #[must_use]
    pub fn new(logger: Arc<dyn StructuredLogger>, options: &StandardLoggerOptions) -> Self {
        Self {
            logger,
            options: *options,
            pending: Vec::new(),
        }
    }

    fn emit_line(&self, raw: &[u8]) {
        let text = String::from_utf8_lossy(raw);
        let text = text.trim_end_matches('\r');
        if text.is_empty() {
            return;
        }
        let (level, message) = self.classify(text);
        if let Some(level) = level {
            self.logger.log(LogRecord::new(level, message));
        }
    }

    fn classify<'a>(&self, line: &'a str) -> (Option<LogLevel>, &'a str) {
        match self.options.force_level {
            Some(PluginLevel::NoLevel) | None => {},
            Some(level) => return (shared_level(level), line),
        }
        if self.options.infer_levels {
            if let Some((level, rest)) = infer_level(line) {
                return (shared_level(level), rest);
            }
        }
        (Some(LogLevel::Info), line)
    }
}

fn infer_level(line: &str) -> Option<(PluginLevel, &str)> {
    const PREFIXES: [(&str, PluginLevel); 5] = [
        ("[TRACE]", PluginLevel::Trace),
        ("[DEBUG]", PluginLevel::Debug),
        ("[INFO]", PluginLevel::Info),
        ("[WARN]", PluginLevel::Warn),
        ("[ERROR]", PluginLevel::Error),
    ];
    PREFIXES.iter().find_map(|(prefix, level)| {
        line.strip_prefix(*prefix)
            .map(|rest| (*level, rest.trim_start()))
    })
}

impl io::Write for LevelWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.pending.extend_from_slice(buf);
        while let Some(end) = self.pending.iter().position(|byte| *byte == b'\n') {
            let mut line: Vec<u8> = self.pending.drain(..=end).collect();
            line.pop();
            self.emit_line(&line);
        }
        if self.pending.len() > MAX_PENDING_LINE {
            let line = std::mem::take(&mut self.pending);
            self.emit_line(&line);
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        if !self.pending.is_empty() {
            let line = std::mem::take(&mut self.pending);
            self.emit_line(&line);
        }
        Ok(())
    }
}

impl Drop for LevelWriter {
    fn drop(&mut self) {
        let _ = io::Write::flush(self);
    }
}
