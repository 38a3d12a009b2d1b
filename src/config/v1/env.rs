//! `OPS_*` environment variable overrides.

use crate::config::v1::ScriptConfig;
use crate::utils::v1::error::{OpsError, Result};
use crate::utils::v1::validation::{validate_path, validate_range};
use std::path::PathBuf;
use std::time::Duration;

/// Variables recognized by the loader, with descriptions and example values.
pub fn supported_env_vars() -> Vec<(&'static str, &'static str, &'static str)> {
    vec![
        (
            "OPS_CONFIG_FILE",
            "Path to the TOML configuration file",
            "/etc/myscript.toml",
        ),
        ("OPS_LOG_LEVEL", "Minimum log level", "debug"),
        ("OPS_LOG_JSON", "Emit logs as JSON lines (true/false)", "false"),
        (
            "OPS_LOG_FILE",
            "Append a copy of the logs to this file",
            "/var/log/myscript.log",
        ),
        (
            "OPS_DRY_RUN",
            "Report what would be done without doing it (true/false)",
            "false",
        ),
        (
            "OPS_HTTP_TIMEOUT",
            "HTTP timeout in seconds (1-3600)",
            "30",
        ),
    ]
}

/// Validate a single recognized variable before it is applied. Unknown keys
/// are ignored.
pub fn validate_env_var(key: &str, value: &str) -> Result<()> {
    match key {
        "OPS_LOG_LEVEL" => crate::logging::v1::parse_level(value).map(|_| ()),
        "OPS_LOG_JSON" | "OPS_DRY_RUN" => parse_bool(key, value).map(|_| ()),
        "OPS_LOG_FILE" | "OPS_CONFIG_FILE" => validate_path(key, value),
        "OPS_HTTP_TIMEOUT" => validate_range(key, parse_seconds(key, value)?, 1, 3600),
        _ => Ok(()),
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Ok(true),
        "false" | "0" | "no" => Ok(false),
        _ => Err(OpsError::InvalidConfigValue {
            field: key.to_string(),
            value: value.to_string(),
            reason: "Expected true or false".to_string(),
        }),
    }
}

fn parse_seconds(key: &str, value: &str) -> Result<u64> {
    value.parse::<u64>().map_err(|e| OpsError::InvalidConfigValue {
        field: key.to_string(),
        value: value.to_string(),
        reason: format!("Expected a number of seconds: {}", e),
    })
}

/// Apply the recognized overrides on top of the file layer. Invalid values
/// are hard errors rather than silent fallbacks.
pub fn apply_env_overrides(config: &mut ScriptConfig) -> Result<()> {
    if let Ok(value) = std::env::var("OPS_LOG_LEVEL") {
        validate_env_var("OPS_LOG_LEVEL", &value)?;
        config.log_level = Some(value);
    }
    if let Ok(value) = std::env::var("OPS_LOG_JSON") {
        config.log_json = parse_bool("OPS_LOG_JSON", &value)?;
    }
    if let Ok(value) = std::env::var("OPS_LOG_FILE") {
        validate_env_var("OPS_LOG_FILE", &value)?;
        config.log_file = Some(PathBuf::from(value));
    }
    if let Ok(value) = std::env::var("OPS_DRY_RUN") {
        config.dry_run = parse_bool("OPS_DRY_RUN", &value)?;
    }
    if let Ok(value) = std::env::var("OPS_HTTP_TIMEOUT") {
        let secs = parse_seconds("OPS_HTTP_TIMEOUT", &value)?;
        validate_range("OPS_HTTP_TIMEOUT", secs, 1, 3600)?;
        config.http_timeout = Duration::from_secs(secs);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_env_var_per_key() {
        assert!(validate_env_var("OPS_LOG_LEVEL", "debug").is_ok());
        assert!(validate_env_var("OPS_LOG_LEVEL", "loud").is_err());
        assert!(validate_env_var("OPS_LOG_JSON", "true").is_ok());
        assert!(validate_env_var("OPS_LOG_JSON", "maybe").is_err());
        assert!(validate_env_var("OPS_HTTP_TIMEOUT", "30").is_ok());
        assert!(validate_env_var("OPS_HTTP_TIMEOUT", "0").is_err());
        assert!(validate_env_var("OPS_HTTP_TIMEOUT", "soon").is_err());
        assert!(validate_env_var("OPS_LOG_FILE", "/var/log/x.log").is_ok());
        assert!(validate_env_var("OPS_LOG_FILE", "").is_err());
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        assert!(validate_env_var("OPS_SOMETHING_ELSE", "whatever").is_ok());
        assert!(validate_env_var("PATH", "/usr/bin").is_ok());
    }

    #[test]
    fn test_parse_bool_variants() {
        assert!(parse_bool("OPS_DRY_RUN", "TRUE").unwrap());
        assert!(parse_bool("OPS_DRY_RUN", "1").unwrap());
        assert!(!parse_bool("OPS_DRY_RUN", "no").unwrap());
        assert!(parse_bool("OPS_DRY_RUN", "2").is_err());
    }

    #[test]
    fn test_supported_env_vars_catalog() {
        let vars = supported_env_vars();
        assert!(vars.iter().any(|(key, _, _)| *key == "OPS_LOG_LEVEL"));
        assert!(vars.iter().all(|(key, _, _)| key.starts_with("OPS_")));
    }
}
