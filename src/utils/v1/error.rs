use thiserror::Error;

/// Exit status for "not allowed to run" failures, same value as sysexits
/// EX_NOPERM.
pub const EXIT_NOPERM: i32 = 77;

/// Exit status reported after an interrupt (128 + SIGINT).
pub const EXIT_SIGINT: i32 = 130;

#[derive(Error, Debug)]
pub enum OpsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfig { field: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Command failed with exit status {status}: {command}")]
    CommandFailed {
        command: String,
        status: i32,
        stdout: String,
        stderr: String,
    },

    #[error("Command timed out after {timeout_secs}s: {command}")]
    CommandTimeout { command: String, timeout_secs: u64 },

    #[error("({code}) {message}")]
    Fatal { message: String, code: i32 },
}

pub type Result<T> = std::result::Result<T, OpsError>;

impl OpsError {
    pub fn config<S: Into<String>>(message: S) -> Self {
        OpsError::Config {
            message: message.into(),
        }
    }

    pub fn validation<S: Into<String>>(message: S) -> Self {
        OpsError::Validation {
            message: message.into(),
        }
    }

    /// An unrecoverable script error carrying its own exit status.
    pub fn fatal<S: Into<String>>(message: S, code: i32) -> Self {
        OpsError::Fatal {
            message: message.into(),
            code,
        }
    }

    /// Process exit status a script should report for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            OpsError::Fatal { code, .. } => *code,
            OpsError::CommandFailed { status, .. } if *status > 0 => *status,
            _ => 1,
        }
    }
}

/// Log the error and terminate with its exit status.
pub fn log_fatal_and_exit(error: &OpsError) -> ! {
    let code = error.exit_code();
    match error {
        // Fatal already renders as "(code) message"
        OpsError::Fatal { .. } => tracing::error!("{}", error),
        _ => tracing::error!("({}) {}", code, error),
    }
    std::process::exit(code);
}

/// Terminate after an interrupt: newline to stderr so the terminal line with
/// the ^C stays clean, one info-level log entry, exit 130.
pub fn log_sigint_and_exit() -> ! {
    eprintln!();
    tracing::info!("({}) Halted via SIGINT.", EXIT_SIGINT);
    std::process::exit(EXIT_SIGINT);
}

/// Wait for Ctrl-C and terminate via [`log_sigint_and_exit`]. Meant to be
/// raced against the script body with `tokio::select!`.
pub async fn exit_on_sigint() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => log_sigint_and_exit(),
        Err(e) => log_fatal_and_exit(&OpsError::Io(e)),
    }
}

/// Unwrap a result or log the error and exit with its status.
pub fn run_or_exit<T>(result: Result<T>) -> T {
    match result {
        Ok(value) => value,
        Err(e) => log_fatal_and_exit(&e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fatal_display_includes_code() {
        let error = OpsError::fatal("Must be root or equivalent (ex. sudo).", EXIT_NOPERM);
        assert_eq!(
            error.to_string(),
            "(77) Must be root or equivalent (ex. sudo)."
        );
    }

    #[test]
    fn test_exit_code_mapping() {
        assert_eq!(OpsError::fatal("stop", 3).exit_code(), 3);
        assert_eq!(
            OpsError::CommandFailed {
                command: "false".to_string(),
                status: 2,
                stdout: String::new(),
                stderr: String::new(),
            }
            .exit_code(),
            2
        );
        assert_eq!(OpsError::config("bad").exit_code(), 1);
        assert_eq!(OpsError::validation("bad").exit_code(), 1);
    }

    #[test]
    fn test_run_or_exit_passes_ok_through() {
        assert_eq!(run_or_exit(Ok(5)), 5);
    }

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let error: OpsError = io.into();
        assert!(matches!(error, OpsError::Io(_)));
        assert_eq!(error.exit_code(), 1);
    }
}
