pub mod cli;
pub mod env;
pub mod file;

pub use cli::{Cli, CommonArgs};
pub use file::FileConfig;

use crate::logging::v1::LogOptions;
use crate::utils::v1::error::{OpsError, Result};
use crate::utils::v1::validation::{validate_path, validate_range, Validate};
use clap::Parser;
use serde::Serialize;
use std::ffi::OsString;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// The resolved settings object: defaults, config file, `OPS_*` environment
/// variables and CLI flags merged in ascending precedence.
#[derive(Debug, Clone, Serialize)]
pub struct ScriptConfig {
    /// Config file the file layer was read from, if any.
    pub config_file: Option<PathBuf>,
    pub verbosity: u8,
    pub log_level: Option<String>,
    pub log_json: bool,
    pub log_file: Option<PathBuf>,
    pub dry_run: bool,
    pub http_timeout: Duration,
    /// Script-specific settings from the file's `[vars]` table.
    pub vars: toml::Table,
}

impl Default for ScriptConfig {
    fn default() -> Self {
        Self {
            config_file: None,
            verbosity: 0,
            log_level: None,
            log_json: false,
            log_file: None,
            dry_run: false,
            http_timeout: DEFAULT_HTTP_TIMEOUT,
            vars: toml::Table::new(),
        }
    }
}

impl ScriptConfig {
    fn apply_file(&mut self, file: &FileConfig) {
        if let Some(script) = &file.script {
            if let Some(dry_run) = script.dry_run {
                self.dry_run = dry_run;
            }
        }
        if let Some(logging) = &file.logging {
            if let Some(level) = &logging.level {
                self.log_level = Some(level.clone());
            }
            if let Some(json) = logging.json {
                self.log_json = json;
            }
            if let Some(path) = &logging.file {
                self.log_file = Some(path.clone());
            }
        }
        if let Some(http) = &file.http {
            if let Some(secs) = http.timeout_seconds {
                self.http_timeout = Duration::from_secs(secs);
            }
        }
        for (key, value) in &file.vars {
            self.vars.insert(key.clone(), value.clone());
        }
    }

    /// Typed access to a script-specific `[vars]` entry. `Ok(None)` when the
    /// key is absent, an error when it cannot deserialize into `T`.
    pub fn var<T: serde::de::DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.vars.get(key) {
            Some(value) => value.clone().try_into().map(Some).map_err(|e| {
                OpsError::InvalidConfigValue {
                    field: format!("vars.{}", key),
                    value: value.to_string(),
                    reason: e.to_string(),
                }
            }),
            None => Ok(None),
        }
    }

    /// Logging settings derived from this configuration.
    pub fn log_options(&self) -> LogOptions {
        LogOptions {
            level: self.log_level.clone(),
            verbosity: self.verbosity,
            json: self.log_json,
            file: self.log_file.clone(),
        }
    }

    /// The resolved configuration as pretty JSON, for debug output.
    pub fn dump_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

impl Validate for ScriptConfig {
    fn validate(&self) -> Result<()> {
        if let Some(level) = &self.log_level {
            crate::logging::v1::parse_level(level)?;
        }
        if let Some(file) = &self.log_file {
            validate_path("log_file", &file.to_string_lossy())?;
        }
        validate_range("http_timeout", self.http_timeout.as_secs(), 1, 3600)?;
        Ok(())
    }
}

/// Builds the resolved configuration: defaults, then the config file, then
/// `OPS_*` environment variables, then CLI flags.
pub struct ConfigLoader {
    args: CommonArgs,
}

impl ConfigLoader {
    pub fn new(args: CommonArgs) -> Self {
        Self { args }
    }

    pub fn parse(&self) -> Result<ScriptConfig> {
        let mut config = ScriptConfig::default();

        // File layer; an explicitly named file that cannot be read is a hard
        // error, no file at all means defaults.
        if let Some(path) = &self.args.config_file {
            let file = FileConfig::from_file(path)?;
            file.validate()?;
            config.apply_file(&file);
            config.config_file = Some(path.clone());
        }

        env::apply_env_overrides(&mut config)?;
        self.apply_cli_overrides(&mut config);
        config.validate()?;

        Ok(config)
    }

    /// CLI flags win over every other layer, but only when actually given.
    fn apply_cli_overrides(&self, config: &mut ScriptConfig) {
        if self.args.verbose > 0 {
            config.verbosity = self.args.verbose;
        }
        if let Some(level) = &self.args.log_level {
            config.log_level = Some(level.clone());
        }
        if self.args.log_json {
            config.log_json = true;
        }
        if let Some(path) = &self.args.log_file {
            config.log_file = Some(path.clone());
        }
        if self.args.dry_run {
            config.dry_run = true;
        }
    }
}

/// Parse the process arguments and resolve the full configuration.
pub fn load() -> Result<ScriptConfig> {
    ConfigLoader::new(Cli::parse().common).parse()
}

/// Same as [`load`] but from an explicit argument list, for tests and
/// wrappers.
pub fn load_from<I, T>(args: I) -> Result<ScriptConfig>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = Cli::try_parse_from(args).map_err(|e| OpsError::config(e.to_string()))?;
    ConfigLoader::new(cli.common).parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ScriptConfig::default();
        assert!(!config.dry_run);
        assert!(!config.log_json);
        assert_eq!(config.http_timeout, DEFAULT_HTTP_TIMEOUT);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_apply_file_overrides_defaults() {
        let file = FileConfig::from_toml_str(
            r#"
[script]
dry_run = true

[logging]
level = "warn"

[http]
timeout_seconds = 5
"#,
        )
        .unwrap();

        let mut config = ScriptConfig::default();
        config.apply_file(&file);

        assert!(config.dry_run);
        assert_eq!(config.log_level.as_deref(), Some("warn"));
        assert_eq!(config.http_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_cli_overrides_only_when_given() {
        let file = FileConfig::from_toml_str("[logging]\nlevel = \"warn\"\njson = true\n").unwrap();
        let mut config = ScriptConfig::default();
        config.apply_file(&file);

        let cli = Cli::try_parse_from(["script"]).unwrap();
        ConfigLoader::new(cli.common).apply_cli_overrides(&mut config);
        assert_eq!(config.log_level.as_deref(), Some("warn"));
        assert!(config.log_json);

        let cli = Cli::try_parse_from(["script", "--log-level", "error"]).unwrap();
        ConfigLoader::new(cli.common).apply_cli_overrides(&mut config);
        assert_eq!(config.log_level.as_deref(), Some("error"));
        assert!(config.log_json);
    }

    #[test]
    fn test_var_typed_access() {
        let file = FileConfig::from_toml_str("[vars]\nservice = \"nginx\"\nretries = 3\n").unwrap();
        let mut config = ScriptConfig::default();
        config.apply_file(&file);

        let service: Option<String> = config.var("service").unwrap();
        assert_eq!(service.as_deref(), Some("nginx"));
        let retries: Option<u32> = config.var("retries").unwrap();
        assert_eq!(retries, Some(3));
        let missing: Option<String> = config.var("missing").unwrap();
        assert!(missing.is_none());
        let wrong_type: Result<Option<u32>> = config.var("service");
        assert!(wrong_type.is_err());
    }

    #[test]
    fn test_validate_rejects_bad_level() {
        let config = ScriptConfig {
            log_level: Some("loud".to_string()),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_log_options_carry_over() {
        let config = ScriptConfig {
            verbosity: 2,
            log_json: true,
            ..Default::default()
        };
        let options = config.log_options();
        assert_eq!(options.verbosity, 2);
        assert!(options.json);
        assert!(options.level.is_none());
    }

    #[test]
    fn test_dump_json() {
        let dump = ScriptConfig::default().dump_json().unwrap();
        assert!(dump.contains("\"dry_run\": false"));
    }
}
