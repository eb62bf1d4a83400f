//! Storage layer
//! - traits.rs: FileSystem trait, stat/dir entry types, StorageError
//! - os.rs: std::fs backed implementation
//! - memory.rs: in-memory implementation

pub mod memory;
pub mod os;
pub mod traits;

pub use memory::MemoryFileSystem;
pub use os::OsFileSystem;
pub use traits::{
    DEFAULT_FILE_PERMISSIONS, DirEntry, FileStat, FileSystem, StorageError, exists, is_file,
};
