//! Format adapter layer
//! - traits.rs: FormatAdapter trait, Locator, FormatError
//! - types.rs: FileFormat enum and format detection
//! - json_file.rs: JSON documents (re-serialized on write)
//! - yaml_file.rs: YAML documents (re-serialized on write)
//! - toml_file.rs: TOML documents (patched in place on write)
//! - raw_file.rs: whole-file plain text
//! - regex_capture.rs: first capture group of a regular expression

pub mod json_file;
pub mod raw_file;
pub mod regex_capture;
pub mod toml_file;
pub mod traits;
pub mod types;
pub mod yaml_file;

pub use traits::{FormatAdapter, FormatError, Locator};
pub use types::{FileFormat, UnknownFormat};
