//! Grab-bag helpers for ops scripts: command execution, column formatting,
//! hostname checks, privilege checks, HTTP probes and resource monitoring.
//!
//! Versioned namespace: import a specific version (`opscripts::utils::v1`).
//! Breaking changes land in a new version module so pinned scripts keep
//! compiling.

pub mod v1;
