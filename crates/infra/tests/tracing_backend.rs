//! The tracing backend after the global subscriber is installed.
//!
//! Kept in its own test binary: the subscriber is process-wide.

use logbridge_config::{LogFormat, LoggerBackend, LoggingConfig};
use logbridge_infra::{LoggerAdapters, init_tracing};
use logbridge_ports::{LogLevel, PluginLevel, PluginLogger, WebLevel, WebLogger};
use logbridge_shared::ErrorCode;
use logbridge_testkit::RecordingTerminator;
use std::error::Error;
use std::sync::Arc;

#[test]
fn tracing_backend_reports_the_subscriber_threshold() -> Result<(), Box<dyn Error>> {
    let config = LoggingConfig {
        backend: LoggerBackend::Tracing,
        level: LogLevel::Warn,
        format: LogFormat::Json,
        plugin_name: "host".to_string(),
        ..LoggingConfig::default()
    };

    init_tracing(&config)?;
    let second = init_tracing(&config).err().ok_or("second install should fail")?;
    assert_eq!(second.code, ErrorCode::new("infra", "subscriber_already_set"));

    let adapters = LoggerAdapters::from_config(&config, Arc::new(RecordingTerminator::new()));

    assert_eq!(adapters.shared().level(), LogLevel::Warn);
    assert_eq!(adapters.web.level(), WebLevel::Warn);
    assert_eq!(adapters.web.output().label(), "stderr");
    assert!(adapters.web.formatter().is_none());
    assert_eq!(adapters.plugin.level(), PluginLevel::Warn);
    assert!(!adapters.plugin.is_info());
    assert!(adapters.plugin.is_error());
    assert_eq!(adapters.plugin.name(), "host");
    Ok(())
}
