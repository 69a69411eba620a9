//! A `fatal` threshold on the tracing backend, where the subscriber filter
//! can only go as high as `error`.
//!
//! Kept in its own test binary: the subscriber is process-wide.

use logbridge_config::{LoggerBackend, LoggingConfig};
use logbridge_infra::{LoggerAdapters, init_tracing};
use logbridge_ports::{LogLevel, PluginLevel, PluginLogger, WebLevel, WebLogger};
use logbridge_testkit::RecordingTerminator;
use std::error::Error;
use std::sync::Arc;

#[test]
fn fatal_threshold_survives_the_error_filter() -> Result<(), Box<dyn Error>> {
    let config = LoggingConfig {
        backend: LoggerBackend::Tracing,
        level: LogLevel::Fatal,
        ..LoggingConfig::default()
    };

    init_tracing(&config)?;
    let adapters = LoggerAdapters::from_config(&config, Arc::new(RecordingTerminator::new()));

    assert_eq!(adapters.shared().level(), LogLevel::Fatal);
    assert!(!adapters.shared().is_enabled(LogLevel::Error));
    assert_eq!(adapters.web.level(), WebLevel::Off);
    assert!(!adapters.plugin.is_error());
    assert_eq!(adapters.plugin.level(), PluginLevel::Error);
    Ok(())
}
