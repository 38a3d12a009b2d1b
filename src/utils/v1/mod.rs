pub mod columns;
pub mod error;
pub mod exec;
pub mod hostname;
pub mod http;
pub mod monitor;
pub mod sys;
pub mod validation;

pub use columns::{format_columns, Alignment};
pub use error::{OpsError, Result};
pub use exec::{exec_cmd, exec_cmd_fail_hard, CmdOutput, ExecOptions};
pub use hostname::is_valid_hostname;
pub use monitor::ScriptMonitor;
