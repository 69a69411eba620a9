//! Logging contracts demanded by third-party components.
//!
//! Each component accepts only its own logger interface. These traits mirror
//! those interfaces method for method, including setters the shared logger
//! will never honor, so an adapter can be handed over as a drop-in.

pub mod plugin;
pub mod scheduler;
pub mod storage;
pub mod web;

pub use plugin::{PluginLevel, PluginLogger, StandardLoggerOptions};
pub use scheduler::SchedulerLogger;
pub use storage::StorageEngineLogger;
pub use web::{JsonMap, WebLevel, WebLogger};
