//! Effective config rendering for the `print_effective_config` binary.

use crate::InfraResult;
use logbridge_config::{LoggingEnv, load_logging_config_from_path, to_pretty_json};
use logbridge_shared::ErrorEnvelope;
use std::collections::BTreeMap;
use std::path::Path;

/// Load and validate the effective config, returning deterministic pretty JSON.
pub fn load_effective_config_json(
    env: &BTreeMap<String, String>,
    config_path: Option<&Path>,
) -> InfraResult<String> {
    let env = LoggingEnv::from_map(env).map_err(ErrorEnvelope::from)?;
    let config = load_logging_config_from_path(config_path, &env)?;
    to_pretty_json(&config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use logbridge_shared::ErrorCode;
    use std::path::PathBuf;

    fn fixture(name: &str) -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .join("../testkit/fixtures/config")
            .join(name)
    }

    #[test]
    fn defaults_render_as_json() -> InfraResult<()> {
        let env = BTreeMap::from([("LOGBRIDGE_LOG_FORMAT".to_string(), "text".to_string())]);
        let json = load_effective_config_json(&env, None)?;
        assert!(json.contains("\"format\": \"text\""));
        assert!(json.ends_with('\n'));
        Ok(())
    }

    #[test]
    fn env_overrides_the_config_file() -> InfraResult<()> {
        let env = BTreeMap::from([("LOGBRIDGE_LOG_LEVEL".to_string(), "trace".to_string())]);
        let json = load_effective_config_json(&env, Some(&fixture("logging.valid.toml")))?;
        assert!(json.contains("\"backend\": \"tracing\""));
        assert!(json.contains("\"level\": \"trace\""));
        Ok(())
    }

    #[test]
    fn invalid_plugin_name_fails_after_merge() {
        let env = BTreeMap::from([("LOGBRIDGE_PLUGIN_NAME".to_string(), "a..b".to_string())]);
        let code = load_effective_config_json(&env, None)
            .err()
            .map(|error| error.code);
        assert_eq!(code, Some(ErrorCode::new("config", "invalid_plugin_name")));
    }

    #[test]
    fn invalid_env_value_is_reported() {
        let env = BTreeMap::from([("LOGBRIDGE_LOG_OUTPUT".to_string(), "syslog".to_string())]);
        let code = load_effective_config_json(&env, None)
            .err()
            .map(|error| error.code);
        assert_eq!(code, Some(ErrorCode::new("config", "invalid_env_enum")));
    }
}
