//! Process privilege checks and operator prompts.

use crate::utils::v1::error::{OpsError, Result, EXIT_NOPERM};
use std::io::{self, BufRead, Write};

/// Effective uid of the current process.
#[cfg(unix)]
pub fn current_euid() -> u32 {
    // SAFETY: geteuid is always safe to call
    unsafe { libc::geteuid() }
}

/// Fail with exit status 77 (EX_NOPERM) unless running as root.
#[cfg(unix)]
pub fn verify_root() -> Result<()> {
    if current_euid() != 0 {
        return Err(OpsError::fatal(
            "Must be root or equivalent (ex. sudo).",
            EXIT_NOPERM,
        ));
    }
    Ok(())
}

/// Ask the operator a yes/no question on the terminal. Anything other than
/// "y" or "yes" counts as no.
pub fn request_confirmation(question: &str) -> Result<bool> {
    print!("{} [y/N] ", question);
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "y" | "yes"
    ))
}
