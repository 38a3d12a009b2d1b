//! Preconfigured logging setup for ops scripts.
//!
//! Versioned namespace: import a specific version (`opscripts::logging::v1`).
//! Breaking changes land in a new version module so pinned scripts keep
//! compiling.

pub mod v1;
