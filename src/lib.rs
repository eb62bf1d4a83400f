//! Discover version markers and manifests in a project tree, and read or
//! rewrite the version they carry.
//!
//! # Modules
//!
//! - [`discovery`]: tree walk, known-manifest catalog, `Discoverer`
//! - [`version`]: per-file read/write through a `FileConfig` descriptor
//! - [`format`]: JSON / YAML / TOML / raw / regex adapters
//! - [`field`]: dot-separated field addressing over parsed documents
//! - [`sync`]: apply one version to every sync candidate
//! - [`fs`]: storage abstraction with OS and in-memory backends
//! - [`config`]: discovery configuration
//! - [`cancel`]: cooperative cancellation

pub mod cancel;
pub mod config;
pub mod discovery;
pub mod field;
pub mod format;
pub mod fs;
pub mod sync;
pub mod version;
