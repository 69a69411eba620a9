//! # logbridge-adapters
//!
//! Adapters exposing the shared logger through foreign logging contracts,
//! plus the concrete shared-logger backends (sinks, formatters, tracing).
//! This crate depends on `ports` and `shared`.

pub mod formatter;
pub mod levels;
pub mod log_sink;
pub mod logger;
pub mod plugin;
pub mod scheduler;
pub mod storage;
pub mod termination;
pub mod tracing_logger;
pub mod web;

pub use formatter::{JsonFormatter, TextFormatter};
pub use log_sink::{StderrLogSink, StdoutLogSink};
pub use logger::SinkLogger;
pub use plugin::{LevelWriter, MAX_PENDING_LINE, PluginLogAdapter, entry_fields};
pub use scheduler::SchedulerLogAdapter;
pub use storage::StorageLogAdapter;
pub use termination::ProcessExit;
pub use tracing_logger::TracingLogger;
pub use web::WebLogAdapter;

/// Returns the adapters crate version.
#[must_use]
pub const fn adapters_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
