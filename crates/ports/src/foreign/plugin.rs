//! Plugin/RPC framework logger contract.
//!
//! Loggers are hierarchical: `named` derives dot-joined sub-loggers, `with`
//! accumulates implied key/value arguments, and every emission takes a flat
//! `key, value, key, value, ...` argument list.

use crate::output::LogSink;
use serde_json::Value;
use std::error::Error;
use std::io;
use std::sync::Arc;

/// The framework's level vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum PluginLevel {
    /// Unset; inherits from the parent.
    #[default]
    NoLevel,
    /// Trace.
    Trace,
    /// Debug.
    Debug,
    /// Info.
    Info,
    /// Warn.
    Warn,
    /// Error.
    Error,
    /// Disables output.
    Off,
}

/// Options for the standard-library style logger/writer accessors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StandardLoggerOptions {
    /// Infer a level from a `[LEVEL]` prefix on each line.
    pub infer_levels: bool,
    /// Emit every line at this level.
    pub force_level: Option<PluginLevel>,
}

/// Logger accepted by the plugin framework.
pub trait PluginLogger: Send + Sync {
    /// Emit at an explicit level.
    fn log(&self, level: PluginLevel, msg: &str, args: &[Value]);
    /// Trace message.
    fn trace(&self, msg: &str, args: &[Value]);
    /// Debug message.
    fn debug(&self, msg: &str, args: &[Value]);
    /// Info message.
    fn info(&self, msg: &str, args: &[Value]);
    /// Warn message.
    fn warn(&self, msg: &str, args: &[Value]);
    /// Error message.
    fn error(&self, msg: &str, args: &[Value]);

    /// Whether trace output is enabled.
    fn is_trace(&self) -> bool;
    /// Whether debug output is enabled.
    fn is_debug(&self) -> bool;
    /// Whether info output is enabled.
    fn is_info(&self) -> bool;
    /// Whether warn output is enabled.
    fn is_warn(&self) -> bool;
    /// Whether error output is enabled.
    fn is_error(&self) -> bool;

    /// Key/value arguments accumulated through `with`.
    fn implied_args(&self) -> &[Value];
    /// Derive a logger carrying extra implied arguments.
    fn with(&self, args: &[Value]) -> Box<dyn PluginLogger>;

    /// Full dotted name.
    fn name(&self) -> &str;
    /// Derive a sub-logger named `<current>.<name>`.
    fn named(&self, name: &str) -> Box<dyn PluginLogger>;
    /// Derive a logger named exactly `name`.
    fn reset_named(&self, name: &str) -> Box<dyn PluginLogger>;

    /// Change the level.
    fn set_level(&mut self, level: PluginLevel);

    /// A line-oriented writer that logs each line.
    fn standard_logger(&self, opts: &StandardLoggerOptions) -> Box<dyn io::Write + Send>;
    /// The raw output stream.
    fn standard_writer(&self, opts: &StandardLoggerOptions) -> Arc<dyn LogSink>;

    /// Log `err` and terminate the process.
    fn fatal(&self, err: &dyn Error) -> !;
}
