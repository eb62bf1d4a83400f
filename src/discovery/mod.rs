//! Discovery layer
//! - walker.rs: bounded-depth walk over the storage abstraction
//! - exclude.rs: hidden entries, deny-listed directories, glob excludes
//! - catalog.rs: known manifest files and where their version lives
//! - discoverer.rs: Discoverer, combines both walks into a DiscoveryResult
//! - types.rs: Module, ManifestSource, SyncCandidate, Mismatch, DiscoveryResult
//! - error.rs: DiscoveryError

pub mod catalog;
pub mod discoverer;
pub mod error;
pub mod exclude;
pub mod types;
pub mod walker;

pub use catalog::{KNOWN_MANIFESTS, KnownManifest, known_manifests};
pub use discoverer::Discoverer;
pub use error::DiscoveryError;
pub use exclude::{ExcludeMatcher, IGNORED_DIRS};
pub use types::{
    DiscoveryMode, DiscoveryResult, ManifestSource, Mismatch, Module, SyncCandidate,
};
pub use walker::{TreeWalker, WalkEntry};
