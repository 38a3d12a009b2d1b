use crate::utils::v1::error::{OpsError, Result};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Settings for the script's log output.
///
/// An explicit `level` wins over the `verbosity` count; the `RUST_LOG`
/// environment variable wins over both.
#[derive(Debug, Clone, Default)]
pub struct LogOptions {
    /// Explicit minimum level (trace, debug, info, warn, error).
    pub level: Option<String>,
    /// `-v` count: 0 is info, 1 is debug, 2 or more is trace.
    pub verbosity: u8,
    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
    /// Also append an ANSI-free copy of the logs to this file.
    pub file: Option<PathBuf>,
}

impl LogOptions {
    /// Resolve the minimum level from the explicit setting or the verbosity
    /// count.
    pub fn effective_level(&self) -> Result<Level> {
        match &self.level {
            Some(value) => parse_level(value),
            None => Ok(match self.verbosity {
                0 => Level::INFO,
                1 => Level::DEBUG,
                _ => Level::TRACE,
            }),
        }
    }
}

/// Parse a log level name. Case-insensitive; accepts "warning" for "warn".
pub fn parse_level(value: &str) -> Result<Level> {
    match value.to_ascii_uppercase().as_str() {
        "TRACE" => Ok(Level::TRACE),
        "DEBUG" => Ok(Level::DEBUG),
        "INFO" => Ok(Level::INFO),
        "WARN" | "WARNING" => Ok(Level::WARN),
        "ERROR" => Ok(Level::ERROR),
        _ => Err(OpsError::InvalidConfigValue {
            field: "log_level".to_string(),
            value: value.to_string(),
            reason: "Expected trace, debug, info, warn or error".to_string(),
        }),
    }
}

/// Install the global subscriber for a script.
///
/// Console output is compact or JSON per the options; when a log file is set
/// a second plain-text layer appends there. A second call reports a
/// configuration error instead of panicking.
pub fn init(options: &LogOptions) -> Result<()> {
    let level = options.effective_level()?;
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.to_string().to_lowercase()));

    let file_layer = match &options.file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .append(true)
                .create(true)
                .open(path)?;
            Some(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(Arc::new(file)),
            )
        }
        None => None,
    };

    let registry = tracing_subscriber::registry().with(filter).with(file_layer);

    let installed = if options.json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false)
                    .json(),
            )
            .try_init()
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_file(false)
                    .with_line_number(false)
                    .compact(),
            )
            .try_init()
    };

    installed.map_err(|e| OpsError::config(format!("Logging already initialized: {}", e)))
}

/// Quick setup for scripts that skip the config layer entirely. Repeated
/// calls are no-ops.
pub fn init_script_logger(verbose: bool) {
    let options = LogOptions {
        verbosity: if verbose { 1 } else { 0 },
        ..Default::default()
    };
    let _ = init(&options);
}
