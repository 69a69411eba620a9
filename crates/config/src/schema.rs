//! Logging configuration schema, defaults, validation, and normalization.
//!
//! - Deserialization uses `serde` (JSON or TOML).
//! - Validation is manual and returns typed errors mapped to `ErrorEnvelope`.
//! - Normalization trims the plugin name so env and file values compare equal.

use logbridge_ports::LogLevel;
use logbridge_shared::{ErrorCode, ErrorEnvelope};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Current supported configuration schema version.
pub const CURRENT_CONFIG_VERSION: u32 = 1;

/// Field names the adapters bind themselves; base fields may not shadow them.
pub const RESERVED_FIELD_NAMES: [&str; 2] = ["subsystem_name", "args"];

const PLUGIN_NAME_MAX_LEN: usize = 256;
const BASE_FIELDS_MAX: usize = 64;

/// Which shared logger implementation to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoggerBackend {
    /// Formatted lines written to a process stream.
    #[default]
    Sink,
    /// Events forwarded to the global `tracing` subscriber.
    Tracing,
}

/// Line format for the sink backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// One JSON object per line.
    #[default]
    Json,
    /// `key=value` text.
    Text,
}

/// Process stream for the sink backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogOutput {
    /// Standard error.
    #[default]
    Stderr,
    /// Standard output.
    Stdout,
}

/// Top-level logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields, default)]
pub struct LoggingConfig {
    /// Schema version for forward-compatible migrations.
    pub version: u32,
    /// Shared logger implementation.
    pub backend: LoggerBackend,
    /// Minimum enabled level.
    pub level: LogLevel,
    /// Line format (sink backend only).
    pub format: LogFormat,
    /// Output stream (sink backend only).
    pub output: LogOutput,
    /// Mask values of secret-looking field names.
    pub redact_secrets: bool,
    /// Fields bound onto every record.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub base_fields: BTreeMap<String, Value>,
    /// Root name handed to the plugin adapter.
    pub plugin_name: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            version: CURRENT_CONFIG_VERSION,
            backend: LoggerBackend::default(),
            level: LogLevel::Info,
            format: LogFormat::default(),
            output: LogOutput::default(),
            redact_secrets: true,
            base_fields: BTreeMap::new(),
            plugin_name: String::new(),
        }
    }
}

impl LoggingConfig {
    /// Validate and normalize the config.
    pub fn validate_and_normalize(mut self) -> Result<Self, ConfigSchemaError> {
        self.validate_version()?;

        self.plugin_name = self.plugin_name.trim().to_string();
        validate_plugin_name(&self.plugin_name)?;
        validate_base_fields(&self.base_fields)?;

        Ok(self)
    }

    const fn validate_version(&self) -> Result<(), ConfigSchemaError> {
        if self.version != CURRENT_CONFIG_VERSION {
            return Err(ConfigSchemaError::UnsupportedVersion {
                found: self.version,
                supported: CURRENT_CONFIG_VERSION,
            });
        }
        Ok(())
    }
}

fn validate_plugin_name(name: &str) -> Result<(), ConfigSchemaError> {
    if name.is_empty() {
        return Ok(());
    }
    let invalid = |reason: &str| ConfigSchemaError::InvalidPluginName {
        name: name.to_string(),
        reason: reason.to_string(),
    };
    if name.len() > PLUGIN_NAME_MAX_LEN {
        return Err(invalid("name is too long"));
    }
    if name.split('.').any(str::is_empty) {
        return Err(invalid("name segments must be non-empty"));
    }
    if name.chars().any(char::is_whitespace) {
        return Err(invalid("name must not contain whitespace"));
    }
    Ok(())
}

fn validate_base_fields(fields: &BTreeMap<String, Value>) -> Result<(), ConfigSchemaError> {
    if fields.len() > BASE_FIELDS_MAX {
        return Err(ConfigSchemaError::TooManyBaseFields {
            len: fields.len(),
            max: BASE_FIELDS_MAX,
        });
    }
    for key in fields.keys() {
        if key.trim().is_empty() {
            return Err(ConfigSchemaError::InvalidBaseField {
                key: key.clone(),
                reason: "field names must be non-empty".to_string(),
            });
        }
        if RESERVED_FIELD_NAMES.contains(&key.as_str()) {
            return Err(ConfigSchemaError::InvalidBaseField {
                key: key.clone(),
                reason: "field name is reserved".to_string(),
            });
        }
    }
    Ok(())
}

/// Parse a logging config from a JSON string, applying validation and normalization.
pub fn parse_logging_config_json(input: &str) -> Result<LoggingConfig, ErrorEnvelope> {
    let config: LoggingConfig = serde_json::from_str(input).map_err(|error| {
        ErrorEnvelope::expected(
            ErrorCode::new("config", "invalid_json"),
            format!("invalid config JSON: {error}"),
        )
    })?;

    config.validate_and_normalize().map_err(Into::into)
}

/// Parse a logging config from a TOML string, applying validation and normalization.
pub fn parse_logging_config_toml(input: &str) -> Result<LoggingConfig, ErrorEnvelope> {
    let config: LoggingConfig = toml::from_str(input).map_err(|error| {
        ErrorEnvelope::expected(
            ErrorCode::new("config", "invalid_toml"),
            format!("invalid config TOML: {error}"),
        )
    })?;

    config.validate_and_normalize().map_err(Into::into)
}

/// Typed validation failures for [`LoggingConfig`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSchemaError {
    /// The config version is not supported by this binary.
    UnsupportedVersion {
        /// Version found in the config.
        found: u32,
        /// Version supported by this crate.
        supported: u32,
    },
    /// The plugin name is malformed.
    InvalidPluginName {
        /// Name after trimming.
        name: String,
        /// Human readable reason.
        reason: String,
    },
    /// A base field name is empty or reserved.
    InvalidBaseField {
        /// Offending field name.
        key: String,
        /// Human readable reason.
        reason: String,
    },
    /// Too many base fields.
    TooManyBaseFields {
        /// Number of fields provided.
        len: usize,
        /// Maximum allowed.
        max: usize,
    },
}

impl ConfigSchemaError {
    fn error_code(&self) -> ErrorCode {
        match self {
            Self::UnsupportedVersion { .. } => ErrorCode::new("config", "unsupported_version"),
            Self::InvalidPluginName { .. } => ErrorCode::new("config", "invalid_plugin_name"),
            Self::InvalidBaseField { .. } | Self::TooManyBaseFields { .. } => {
                ErrorCode::new("config", "invalid_base_fields")
            },
        }
    }
}

impl fmt::Display for ConfigSchemaError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedVersion { found, supported } => write!(
                formatter,
                "unsupported config version {found} (supported: {supported})"
            ),
            Self::InvalidPluginName { name, reason } => {
                write!(formatter, "invalid pluginName `{name}`: {reason}")
            },
            Self::InvalidBaseField { key, reason } => {
                write!(formatter, "invalid baseFields entry `{key}`: {reason}")
            },
            Self::TooManyBaseFields { len, max } => {
                write!(formatter, "baseFields is too large ({len} entries, max {max})")
            },
        }
    }
}

impl std::error::Error for ConfigSchemaError {}

impl From<ConfigSchemaError> for ErrorEnvelope {
    fn from(error: ConfigSchemaError) -> Self {
        let code = error.error_code();
        let message = error.to_string();
        let mut envelope = Self::expected(code, message);

        match error {
            ConfigSchemaError::UnsupportedVersion { found, supported } => {
                envelope = envelope
                    .with_metadata("found", found.to_string())
                    .with_metadata("supported", supported.to_string());
            },
            ConfigSchemaError::InvalidPluginName { name, .. } => {
                envelope = envelope.with_metadata("field", "pluginName").with_metadata("value", name);
            },
            ConfigSchemaError::InvalidBaseField { key, .. } => {
                envelope = envelope.with_metadata("field", "baseFields").with_metadata("key", key);
            },
            ConfigSchemaError::TooManyBaseFields { len, max } => {
                envelope = envelope
                    .with_metadata("field", "baseFields")
                    .with_metadata("len", len.to_string())
                    .with_metadata("max", max.to_string());
            },
        }

        envelope
    }
}
