use crate::utils::v1::error::{OpsError, Result};
use crate::utils::v1::validation::{validate_path, validate_range, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// TOML configuration file layer.
///
/// Every field is optional: anything absent falls through to the defaults,
/// and environment variables and CLI flags override whatever is present.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileConfig {
    pub script: Option<ScriptSection>,
    pub logging: Option<LoggingSection>,
    pub http: Option<HttpSection>,
    /// Free-form script-specific settings.
    #[serde(default)]
    pub vars: toml::Table,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScriptSection {
    pub dry_run: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingSection {
    pub level: Option<String>,
    pub json: Option<bool>,
    pub file: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HttpSection {
    pub timeout_seconds: Option<u64>,
}

impl FileConfig {
    /// Load the configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(OpsError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Parse the configuration from a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = substitute_env_vars(content);
        toml::from_str(&processed).map_err(|e| OpsError::Config {
            message: format!("TOML parsing error: {}", e),
        })
    }
}

/// Replace `${VAR}` references with values from the process environment.
/// Unset variables are left as written.
fn substitute_env_vars(content: &str) -> String {
    let re = Regex::new(r"\$\{([^}]+)\}").unwrap();
    re.replace_all(content, |caps: &regex::Captures| {
        let name = &caps[1];
        std::env::var(name).unwrap_or_else(|_| format!("${{{}}}", name))
    })
    .to_string()
}

impl Validate for FileConfig {
    fn validate(&self) -> Result<()> {
        if let Some(logging) = &self.logging {
            if let Some(level) = &logging.level {
                crate::logging::v1::parse_level(level)?;
            }
            if let Some(file) = &logging.file {
                validate_path("logging.file", &file.to_string_lossy())?;
            }
        }

        if let Some(http) = &self.http {
            if let Some(timeout) = http.timeout_seconds {
                validate_range("http.timeout_seconds", timeout, 1, 3600)?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_basic_file_config() {
        let toml_content = r#"
[script]
dry_run = true

[logging]
level = "debug"
json = false

[http]
timeout_seconds = 10

[vars]
service = "nginx"
retries = 3
"#;

        let config = FileConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.script.unwrap().dry_run, Some(true));
        assert_eq!(config.logging.unwrap().level.as_deref(), Some("debug"));
        assert_eq!(config.http.unwrap().timeout_seconds, Some(10));
        assert_eq!(
            config.vars.get("service").and_then(|v| v.as_str()),
            Some("nginx")
        );
    }

    #[test]
    fn test_empty_file_is_all_defaults() {
        let config = FileConfig::from_toml_str("").unwrap();
        assert!(config.script.is_none());
        assert!(config.logging.is_none());
        assert!(config.http.is_none());
        assert!(config.vars.is_empty());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("FILE_TEST_LEVEL", "warn");

        let toml_content = r#"
[logging]
level = "${FILE_TEST_LEVEL}"
"#;

        let config = FileConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.logging.unwrap().level.as_deref(), Some("warn"));

        std::env::remove_var("FILE_TEST_LEVEL");
    }

    #[test]
    fn test_unset_env_var_is_left_verbatim() {
        let toml_content = r#"
[vars]
token = "${FILE_TEST_UNSET_VAR}"
"#;

        let config = FileConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(
            config.vars.get("token").and_then(|v| v.as_str()),
            Some("${FILE_TEST_UNSET_VAR}")
        );
    }

    #[test]
    fn test_validation_rejects_bad_level() {
        let config = FileConfig::from_toml_str("[logging]\nlevel = \"loud\"\n").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_zero_timeout() {
        let config = FileConfig::from_toml_str("[http]\ntimeout_seconds = 0\n").unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[logging]\nlevel = \"info\"\n")
            .unwrap();

        let config = FileConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.logging.unwrap().level.as_deref(), Some("info"));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let result = FileConfig::from_file("/nonexistent/opscripts-test.toml");
        assert!(matches!(result, Err(OpsError::Io(_))));
    }
}
