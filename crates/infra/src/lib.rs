//! # logbridge-infra
//!
//! Composition root: turns a validated `LoggingConfig` into one shared
//! logger and the four foreign-contract adapters over it.
//! This crate depends on `adapters`, `config`, `ports`, and `shared`.

/// Adapter bundle over one shared logger.
pub mod bridge;
/// Config rendering for the `print_effective_config` binary.
pub mod config_check;
/// Shared logger selection.
pub mod logger_factory;
/// Global `tracing` subscriber installation.
pub mod subscriber;

pub use bridge::{LoggerAdapters, init_from_env};
pub use config_check::load_effective_config_json;
pub use logger_factory::{build_shared_logger, build_sink_logger};
pub use subscriber::{filter_directive, init_tracing};

/// Infra-level error type (shared error envelope).
pub type InfraError = logbridge_shared::ErrorEnvelope;

/// Infra-level result type.
pub type InfraResult<T> = Result<T, InfraError>;

/// Returns the infra crate version.
#[must_use]
pub const fn infra_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
