//! Web framework logger contract.
//!
//! The framework expects to own and reconfigure its logger (output, level,
//! prefix, header, formatter) and logs through three calling conventions per
//! level: print-style values, format arguments, and JSON maps.

use crate::output::{LogFormatter, LogSink};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// JSON object passed to the `*j` methods.
pub type JsonMap = serde_json::Map<String, Value>;

/// The framework's level vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum WebLevel {
    /// DEBUG.
    Debug = 1,
    /// INFO.
    Info = 2,
    /// WARN.
    Warn = 3,
    /// ERROR.
    Error = 4,
    /// OFF.
    Off = 5,
}

impl WebLevel {
    /// Numeric value used by the framework.
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for WebLevel {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
            Self::Off => "OFF",
        };
        formatter.write_str(name)
    }
}

/// Logger accepted by the web framework.
pub trait WebLogger: Send + Sync {
    /// Current output stream.
    fn output(&self) -> Arc<dyn LogSink>;
    /// Redirect output.
    fn set_output(&mut self, output: Arc<dyn LogSink>);
    /// Line prefix.
    fn prefix(&self) -> String;
    /// Set the line prefix.
    fn set_prefix(&mut self, prefix: &str);
    /// Current level.
    fn level(&self) -> WebLevel;
    /// Set the level.
    fn set_level(&mut self, level: WebLevel);
    /// Set the header template.
    fn set_header(&mut self, header: &str);
    /// Current formatter, if any.
    fn formatter(&self) -> Option<Arc<dyn LogFormatter>>;
    /// Replace the formatter.
    fn set_formatter(&mut self, formatter: Arc<dyn LogFormatter>);

    /// Level-less print.
    fn print(&self, values: &[&dyn fmt::Display]);
    /// Level-less formatted print.
    fn printf(&self, args: fmt::Arguments<'_>);
    /// Level-less JSON print.
    fn printj(&self, json: &JsonMap);

    /// Debug print.
    fn debug(&self, values: &[&dyn fmt::Display]);
    /// Debug formatted.
    fn debugf(&self, args: fmt::Arguments<'_>);
    /// Debug JSON.
    fn debugj(&self, json: &JsonMap);

    /// Info print.
    fn info(&self, values: &[&dyn fmt::Display]);
    /// Info formatted.
    fn infof(&self, args: fmt::Arguments<'_>);
    /// Info JSON.
    fn infoj(&self, json: &JsonMap);

    /// Warn print.
    fn warn(&self, values: &[&dyn fmt::Display]);
    /// Warn formatted.
    fn warnf(&self, args: fmt::Arguments<'_>);
    /// Warn JSON.
    fn warnj(&self, json: &JsonMap);

    /// Error print.
    fn error(&self, values: &[&dyn fmt::Display]);
    /// Error formatted.
    fn errorf(&self, args: fmt::Arguments<'_>);
    /// Error JSON.
    fn errorj(&self, json: &JsonMap);

    /// Fatal print; does not return.
    fn fatal(&self, values: &[&dyn fmt::Display]) -> !;
    /// Fatal formatted; does not return.
    fn fatalf(&self, args: fmt::Arguments<'_>) -> !;
    /// Fatal JSON; does not return.
    fn fatalj(&self, json: &JsonMap) -> !;

    /// Panic print; unwinds.
    fn panic(&self, values: &[&dyn fmt::Display]) -> !;
    /// Panic formatted; unwinds.
    fn panicf(&self, args: fmt::Arguments<'_>) -> !;
    /// Panic JSON; unwinds.
    fn panicj(&self, json: &JsonMap) -> !;
}
