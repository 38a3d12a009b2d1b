//! Child command execution helpers.

use crate::utils::v1::error::{OpsError, Result};
use std::path::PathBuf;
use std::time::Duration;
use tokio::process::Command;

/// Knobs for a command run. `uid`/`gid` drop privileges before exec and are
/// honored on Unix only.
#[derive(Debug, Clone, Default)]
pub struct ExecOptions {
    pub cwd: Option<PathBuf>,
    pub uid: Option<u32>,
    pub gid: Option<u32>,
    pub timeout: Option<Duration>,
}

/// Captured result of a finished command.
#[derive(Debug, Clone)]
pub struct CmdOutput {
    /// Exit status; -1 when the command died on a signal.
    pub status: i32,
    /// Captured stdout, lossy UTF-8 with trailing whitespace trimmed.
    pub stdout: String,
    /// Captured stderr, same treatment as stdout.
    pub stderr: String,
}

/// Run a command, logging the invocation and outcome at debug level.
///
/// Returns the captured output whatever the exit status is; callers that want
/// a nonzero status to be an error use [`exec_cmd_fail_hard`].
pub async fn exec_cmd(argv: &[&str], options: &ExecOptions) -> Result<CmdOutput> {
    let (program, args) = argv
        .split_first()
        .ok_or_else(|| OpsError::validation("Command is empty"))?;

    let mut command = Command::new(program);
    command.args(args);
    command.kill_on_drop(true);
    if let Some(cwd) = &options.cwd {
        command.current_dir(cwd);
    }
    #[cfg(unix)]
    {
        if let Some(uid) = options.uid {
            command.uid(uid);
        }
        if let Some(gid) = options.gid {
            command.gid(gid);
        }
    }

    tracing::debug!("Executing command: {:?} (cwd: {:?})", argv, options.cwd);

    let output = match options.timeout {
        Some(limit) => tokio::time::timeout(limit, command.output())
            .await
            .map_err(|_| OpsError::CommandTimeout {
                command: argv.join(" "),
                timeout_secs: limit.as_secs(),
            })??,
        None => command.output().await?,
    };

    let status = output.status.code().unwrap_or(-1);
    let stdout = String::from_utf8_lossy(&output.stdout)
        .trim_end()
        .to_string();
    let stderr = String::from_utf8_lossy(&output.stderr)
        .trim_end()
        .to_string();

    tracing::debug!("Command exited with status {}: {:?}", status, argv);
    if !stdout.is_empty() {
        tracing::debug!("stdout: {}", stdout);
    }
    if !stderr.is_empty() {
        tracing::debug!("stderr: {}", stderr);
    }

    Ok(CmdOutput {
        status,
        stdout,
        stderr,
    })
}

/// Run a command and treat any nonzero exit status as an error carrying the
/// captured output.
pub async fn exec_cmd_fail_hard(argv: &[&str], options: &ExecOptions) -> Result<CmdOutput> {
    let output = exec_cmd(argv, options).await?;
    if output.status != 0 {
        return Err(OpsError::CommandFailed {
            command: argv.join(" "),
            status: output.status,
            stdout: output.stdout,
            stderr: output.stderr,
        });
    }
    Ok(output)
}
