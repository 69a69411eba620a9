//! Environment variable parsing and merging.
//!
//! Values are parsed strictly: a variable that is present must be non-empty
//! and well-formed, otherwise parsing fails with a typed [`EnvParseError`].

use crate::schema::{LogFormat, LogOutput, LoggerBackend, LoggingConfig};
use logbridge_ports::LogLevel;
use logbridge_shared::{ErrorCode, ErrorEnvelope};
use std::collections::BTreeMap;
use std::fmt;

/// Env var overriding `backend`.
pub const ENV_LOG_BACKEND: &str = "LOGBRIDGE_LOG_BACKEND";
/// Env var overriding `level`.
pub const ENV_LOG_LEVEL: &str = "LOGBRIDGE_LOG_LEVEL";
/// Env var overriding `format`.
pub const ENV_LOG_FORMAT: &str = "LOGBRIDGE_LOG_FORMAT";
/// Env var overriding `output`.
pub const ENV_LOG_OUTPUT: &str = "LOGBRIDGE_LOG_OUTPUT";
/// Env var overriding `redactSecrets`.
pub const ENV_LOG_REDACT: &str = "LOGBRIDGE_LOG_REDACT";
/// Env var overriding `pluginName`.
pub const ENV_PLUGIN_NAME: &str = "LOGBRIDGE_PLUGIN_NAME";

const ALL_ENV_VARS: [&str; 6] = [
    ENV_LOG_BACKEND,
    ENV_LOG_LEVEL,
    ENV_LOG_FORMAT,
    ENV_LOG_OUTPUT,
    ENV_LOG_REDACT,
    ENV_PLUGIN_NAME,
];

/// Typed env-derived overrides for [`LoggingConfig`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoggingEnv {
    /// Override for `backend`.
    pub backend: Option<LoggerBackend>,
    /// Override for `level`.
    pub level: Option<LogLevel>,
    /// Override for `format`.
    pub format: Option<LogFormat>,
    /// Override for `output`.
    pub output: Option<LogOutput>,
    /// Override for `redactSecrets`.
    pub redact_secrets: Option<bool>,
    /// Override for `pluginName`.
    pub plugin_name: Option<Box<str>>,
}

impl LoggingEnv {
    /// Parse overrides from an explicit map (tests, fixtures).
    pub fn from_map(map: &BTreeMap<String, String>) -> Result<Self, EnvParseError> {
        Ok(Self {
            backend: parse_optional_enum(map, ENV_LOG_BACKEND, |value| match value {
                "sink" => Some(LoggerBackend::Sink),
                "tracing" => Some(LoggerBackend::Tracing),
                _ => None,
            })?,
            level: parse_optional_enum(map, ENV_LOG_LEVEL, |value| value.parse().ok())?,
            format: parse_optional_enum(map, ENV_LOG_FORMAT, |value| match value {
                "json" => Some(LogFormat::Json),
                "text" => Some(LogFormat::Text),
                _ => None,
            })?,
            output: parse_optional_enum(map, ENV_LOG_OUTPUT, |value| match value {
                "stderr" => Some(LogOutput::Stderr),
                "stdout" => Some(LogOutput::Stdout),
                _ => None,
            })?,
            redact_secrets: parse_optional_bool(map, ENV_LOG_REDACT)?,
            plugin_name: parse_optional_trimmed_string(map, ENV_PLUGIN_NAME)?,
        })
    }

    /// Parse overrides from the process environment.
    pub fn from_std_env() -> Result<Self, EnvParseError> {
        let mut map = BTreeMap::new();
        for name in ALL_ENV_VARS {
            if let Ok(value) = std::env::var(name) {
                map.insert(name.to_string(), value);
            }
        }
        Self::from_map(&map)
    }

    /// Whether no override is set.
    pub const fn is_empty(&self) -> bool {
        self.backend.is_none()
            && self.level.is_none()
            && self.format.is_none()
            && self.output.is_none()
            && self.redact_secrets.is_none()
            && self.plugin_name.is_none()
    }
}

/// Apply env overrides onto `base`, then validate and normalize.
pub fn apply_env_overrides(
    base: LoggingConfig,
    env: &LoggingEnv,
) -> Result<LoggingConfig, ErrorEnvelope> {
    let mut config = base;
    if let Some(backend) = env.backend {
        config.backend = backend;
    }
    if let Some(level) = env.level {
        config.level = level;
    }
    if let Some(format) = env.format {
        config.format = format;
    }
    if let Some(output) = env.output {
        config.output = output;
    }
    if let Some(redact) = env.redact_secrets {
        config.redact_secrets = redact;
    }
    if let Some(name) = &env.plugin_name {
        config.plugin_name = name.to_string();
    }

    config.validate_and_normalize().map_err(Into::into)
}

/// Typed env parsing failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvParseError {
    /// An env var was present but empty after trimming.
    EmptyValue {
        /// Env var name.
        var: &'static str,
    },
    /// Boolean env var had an invalid value.
    InvalidBool {
        /// Env var name.
        var: &'static str,
        /// Raw input value.
        value: String,
    },
    /// Enum env var had an invalid value.
    InvalidEnum {
        /// Env var name.
        var: &'static str,
        /// Raw input value.
        value: String,
    },
}

impl EnvParseError {
    fn error_code(&self) -> ErrorCode {
        match self {
            Self::EmptyValue { .. } => ErrorCode::new("config", "empty_env_var"),
            Self::InvalidBool { .. } => ErrorCode::new("config", "invalid_env_bool"),
            Self::InvalidEnum { .. } => ErrorCode::new("config", "invalid_env_enum"),
        }
    }
}

impl fmt::Display for EnvParseError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyValue { var } => write!(formatter, "{var} must be non-empty"),
            Self::InvalidBool { var, .. } => write!(formatter, "{var} must be a boolean"),
            Self::InvalidEnum { var, .. } => write!(formatter, "{var} has an unsupported value"),
        }
    }
}

impl std::error::Error for EnvParseError {}

impl From<EnvParseError> for ErrorEnvelope {
    fn from(error: EnvParseError) -> Self {
        let code = error.error_code();
        let message = error.to_string();
        let envelope = Self::expected(code, message);

        match error {
            EnvParseError::EmptyValue { var } => envelope.with_metadata("env_var", var),
            EnvParseError::InvalidBool { var, value } | EnvParseError::InvalidEnum { var, value } => {
                envelope
                    .with_metadata("env_var", var)
                    .with_metadata("value", value)
            },
        }
    }
}

fn parse_optional_trimmed_string(
    map: &BTreeMap<String, String>,
    var: &'static str,
) -> Result<Option<Box<str>>, EnvParseError> {
    let Some(raw) = map.get(var) else {
        return Ok(None);
    };

    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(EnvParseError::EmptyValue { var });
    }

    Ok(Some(trimmed.to_owned().into_boxed_str()))
}

fn parse_optional_bool(
    map: &BTreeMap<String, String>,
    var: &'static str,
) -> Result<Option<bool>, EnvParseError> {
    let Some(raw) = map.get(var) else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(EnvParseError::EmptyValue { var });
    }

    match trimmed.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(Some(true)),
        "false" | "0" | "no" | "off" => Ok(Some(false)),
        _ => Err(EnvParseError::InvalidBool {
            var,
            value: raw.clone(),
        }),
    }
}

fn parse_optional_enum<T>(
    map: &BTreeMap<String, String>,
    var: &'static str,
    parse: impl Fn(&str) -> Option<T>,
) -> Result<Option<T>, EnvParseError> {
    let Some(raw) = map.get(var) else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(EnvParseError::EmptyValue { var });
    }

    parse(&trimmed.to_ascii_lowercase())
        .map(Some)
        .ok_or_else(|| EnvParseError::InvalidEnum {
            var,
            value: raw.clone(),
        })
}
