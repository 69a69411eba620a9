//! Global `tracing` subscriber installation for the tracing backend.

use crate::InfraResult;
use logbridge_config::{LogFormat, LogOutput, LoggingConfig};
use logbridge_ports::LogLevel;
use logbridge_shared::{ErrorCode, ErrorEnvelope};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

/// Filter directive for the configured threshold.
///
/// `tracing` has no levels above `error`, so fatal and panic collapse into it.
pub const fn filter_directive(level: LogLevel) -> &'static str {
    match level {
        LogLevel::Trace => "trace",
        LogLevel::Debug => "debug",
        LogLevel::Info => "info",
        LogLevel::Warn => "warn",
        LogLevel::Error | LogLevel::Fatal | LogLevel::Panic => "error",
    }
}

/// Install the process-wide fmt subscriber described by `config`.
///
/// Fails if a global subscriber is already set.
pub fn init_tracing(config: &LoggingConfig) -> InfraResult<()> {
    let directive = filter_directive(config.level);
    let filter = EnvFilter::try_new(directive).map_err(|error| {
        ErrorEnvelope::unexpected(
            ErrorCode::new("infra", "invalid_filter"),
            format!("invalid tracing filter: {error}"),
        )
        .with_metadata("directive", directive)
    })?;
    let writer = match config.output {
        LogOutput::Stderr => BoxMakeWriter::new(std::io::stderr),
        LogOutput::Stdout => BoxMakeWriter::new(std::io::stdout),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .with_target(false);
    let installed = match config.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Text => builder.try_init(),
    };

    installed.map_err(|error| {
        ErrorEnvelope::expected(
            ErrorCode::new("infra", "subscriber_already_set"),
            format!("failed to install tracing subscriber: {error}"),
        )
    })
}
