//! Shared logger selection from the validated logging config.

use logbridge_adapters::{
    JsonFormatter, SinkLogger, StderrLogSink, StdoutLogSink, TextFormatter, TracingLogger,
};
use logbridge_config::{LogFormat, LogOutput, LoggerBackend, LoggingConfig};
use logbridge_ports::{LogFields, LogFormatter, LogSink, StructuredLogger, Terminator};
use std::sync::Arc;

/// Build the shared logger described by `config`.
///
/// `terminator` is what `fatal` calls after the record is written.
pub fn build_shared_logger(
    config: &LoggingConfig,
    terminator: Arc<dyn Terminator>,
) -> Arc<dyn StructuredLogger> {
    tracing::debug!(
        backend = ?config.backend,
        level = %config.level,
        "building shared logger"
    );
    match config.backend {
        LoggerBackend::Sink => {
            let sink: Arc<dyn LogSink> = match config.output {
                LogOutput::Stderr => Arc::new(StderrLogSink),
                LogOutput::Stdout => Arc::new(StdoutLogSink),
            };
            Arc::new(build_sink_logger(config, sink, terminator))
        },
        LoggerBackend::Tracing => Arc::new(
            TracingLogger::new()
                .with_min_level(config.level)
                .with_base_fields(base_fields(config))
                .with_terminator(terminator),
        ),
    }
}

/// Build a sink-backed logger writing to `sink` instead of the configured stream.
pub fn build_sink_logger(
    config: &LoggingConfig,
    sink: Arc<dyn LogSink>,
    terminator: Arc<dyn Terminator>,
) -> SinkLogger {
    let formatter: Arc<dyn LogFormatter> = match config.format {
        LogFormat::Json => Arc::new(JsonFormatter),
        LogFormat::Text => Arc::new(TextFormatter),
    };
    SinkLogger::new(sink)
        .with_formatter(formatter)
        .with_min_level(config.level)
        .with_redaction(config.redact_secrets)
        .with_base_fields(base_fields(config))
        .with_terminator(terminator)
}

fn base_fields(config: &LoggingConfig) -> LogFields {
    config
        .base_fields
        .iter()
        .map(|(key, value)| (key.as_str().into(), value.clone()))
        .collect()
}
