use clap::{ArgAction, Args, Parser};
use std::path::PathBuf;

/// Standard flags shared by every ops script.
///
/// Scripts with options of their own embed this with `#[command(flatten)]`;
/// scripts without any use [`Cli`] directly.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Path to a TOML configuration file
    #[arg(short = 'c', long, env = "OPS_CONFIG_FILE")]
    pub config_file: Option<PathBuf>,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Minimum log level (trace, debug, info, warn, error)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub log_json: bool,

    /// Append a copy of the logs to this file
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Report what would be done without doing it
    #[arg(long)]
    pub dry_run: bool,
}

/// Ready-made parser for scripts that only need the standard flags.
#[derive(Debug, Clone, Parser)]
#[command(name = "opscript")]
#[command(about = "Linux operations script")]
pub struct Cli {
    #[command(flatten)]
    pub common: CommonArgs,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_mean_not_set() {
        let cli = Cli::try_parse_from(["script"]).unwrap();
        assert!(cli.common.config_file.is_none());
        assert_eq!(cli.common.verbose, 0);
        assert!(cli.common.log_level.is_none());
        assert!(!cli.common.log_json);
        assert!(!cli.common.dry_run);
    }

    #[test]
    fn test_verbosity_counts() {
        let cli = Cli::try_parse_from(["script", "-vv"]).unwrap();
        assert_eq!(cli.common.verbose, 2);
    }

    #[test]
    fn test_unknown_flag_is_rejected() {
        assert!(Cli::try_parse_from(["script", "--frobnicate"]).is_err());
    }
}
