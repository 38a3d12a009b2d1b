//! Configuration loading for ops scripts: CLI flags, a TOML config file and
//! `OPS_*` environment variables merged into one resolved settings object.
//!
//! Versioned namespace: import a specific version (`opscripts::config::v1`).
//! Breaking changes land in a new version module so pinned scripts keep
//! compiling.

pub mod v1;
