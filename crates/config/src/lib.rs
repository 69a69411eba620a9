//! # logbridge-config
//!
//! Logging configuration schema, env overrides, and file loading.
//! This crate depends on `ports` (for `LogLevel`) and `shared` only.

/// Environment variable parsing and merging.
pub mod env;
/// Config loading helpers (env + file).
pub mod load;
/// Configuration schema types and helpers.
pub mod schema;

pub use env::{
    ENV_LOG_BACKEND, ENV_LOG_FORMAT, ENV_LOG_LEVEL, ENV_LOG_OUTPUT, ENV_LOG_REDACT,
    ENV_PLUGIN_NAME, EnvParseError, LoggingEnv, apply_env_overrides,
};
pub use load::{
    load_logging_config_from_path, load_logging_config_from_sources, load_logging_config_std_env,
    to_pretty_json, to_pretty_toml,
};
pub use schema::{
    CURRENT_CONFIG_VERSION, ConfigSchemaError, LogFormat, LogOutput, LoggerBackend, LoggingConfig,
    RESERVED_FIELD_NAMES, parse_logging_config_json, parse_logging_config_toml,
};

/// Returns the config crate version.
#[must_use]
pub const fn config_crate_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;
    use logbridge_ports::ports_crate_version;
    use logbridge_shared::shared_crate_version;

    #[test]
    fn config_crate_compiles() {
        let version = config_crate_version();
        assert!(!version.is_empty());
    }

    #[test]
    fn config_can_use_ports_and_shared() {
        let ports_version = ports_crate_version();
        let shared_version = shared_crate_version();

        assert!(!ports_version.is_empty());
        assert!(!shared_version.is_empty());
    }
}
