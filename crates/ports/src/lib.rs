//! # logbridge-ports
//!
//! Capabilities consumed and contracts exposed by the logbridge adapters.
//!
//! The shared [`StructuredLogger`] is the one capability every adapter
//! consumes. The [`foreign`] module mirrors the logger interfaces demanded by
//! third-party components. This crate depends only on `shared`.

/// Returns the ports crate version.
#[must_use]
pub const fn ports_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

pub mod foreign;
pub mod logger;
pub mod output;
pub mod termination;

pub use foreign::{
    JsonMap, PluginLevel, PluginLogger, SchedulerLogger, StandardLoggerOptions,
    StorageEngineLogger, WebLevel, WebLogger,
};
pub use logger::*;
pub use output::*;
pub use termination::*;
