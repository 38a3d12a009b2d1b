//! opscripts — helper modules for Linux operations scripts.
//!
//! Three independent module families, each behind a versioned namespace so a
//! breaking change never lands under an existing import path:
//!
//! - [`config`]: CLI flags, a TOML config file and `OPS_*` environment
//!   variables merged into one resolved settings object.
//! - [`logging`]: preconfigured tracing setup for scripts.
//! - [`utils`]: command execution, column formatting, hostname checks and
//!   other grab-bag helpers.
//!
//! Scripts pin the version they were written against:
//!
//! ```no_run
//! use opscripts::config::v1 as ops_config;
//! use opscripts::logging::v1 as ops_logging;
//! use opscripts::utils::v1 as ops_utils;
//!
//! # fn main() -> opscripts::Result<()> {
//! let config = ops_config::load()?;
//! ops_logging::init(&config.log_options())?;
//! assert!(ops_utils::is_valid_hostname("web-01.example.com"));
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod logging;
pub mod utils;

pub use config::v1::{Cli, CommonArgs, ConfigLoader, ScriptConfig};
pub use utils::v1::error::{OpsError, Result};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
