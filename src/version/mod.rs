//! Version file layer
//!
//! Reads and rewrites the version inside a single described file.
//!
//! # Modules
//!
//! - [`descriptor`]: `FileConfig`, the path / format / field / pattern descriptor
//! - [`reader`]: `VersionReader`, dispatches to the format adapter on read
//! - [`writer`]: `VersionWriter`, dispatches to the format adapter on write
//! - [`store`]: `VersionStore`, reader and writer sharing one storage
//! - [`semver`]: semantic version shape check used by discovery
//! - [`error`]: `VersionFileError`

pub mod descriptor;
pub mod error;
pub mod reader;
pub mod semver;
pub mod store;
pub mod writer;

pub use descriptor::FileConfig;
pub use error::VersionFileError;
pub use reader::{VersionInfo, VersionReader};
pub use store::VersionStore;
pub use writer::VersionWriter;
