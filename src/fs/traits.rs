//! Storage trait definition

use std::path::{Path, PathBuf};

#[cfg(test)]
use mockall::automock;

use crate::cancel::{CancellationToken, Cancelled};

/// Permissions applied when a write creates a new file
pub const DEFAULT_FILE_PERMISSIONS: u32 = 0o644;

/// Result of a successful `stat`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileStat {
    pub is_dir: bool,
}

/// One entry of a directory listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub name: String,
    pub is_dir: bool,
}

impl DirEntry {
    pub fn file(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_dir: false,
        }
    }

    pub fn dir(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_dir: true,
        }
    }
}

/// Error type for storage operations
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("operation cancelled")]
    Cancelled,
}

impl StorageError {
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            StorageError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            StorageError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, StorageError::NotFound { .. })
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, StorageError::Cancelled)
    }
}

impl From<Cancelled> for StorageError {
    fn from(_: Cancelled) -> Self {
        StorageError::Cancelled
    }
}

/// Storage used by every reader, writer and walker in this crate
///
/// All operations are synchronous and take the caller's cancellation token.
#[cfg_attr(test, automock)]
pub trait FileSystem: Send + Sync {
    /// Stat a path without reading its contents
    fn stat(&self, path: &Path, cancel: &CancellationToken) -> Result<FileStat, StorageError>;

    /// Read the full contents of a file
    fn read_file(&self, path: &Path, cancel: &CancellationToken) -> Result<Vec<u8>, StorageError>;

    /// Replace the contents of a file, creating it with `permissions` if missing
    fn write_file(
        &self,
        path: &Path,
        contents: &[u8],
        permissions: u32,
        cancel: &CancellationToken,
    ) -> Result<(), StorageError>;

    /// List the direct children of a directory, sorted by name
    fn read_dir(&self, path: &Path, cancel: &CancellationToken)
    -> Result<Vec<DirEntry>, StorageError>;
}

/// Returns true if `path` exists. Any storage error other than cancellation
/// counts as absent.
pub fn exists(
    fs: &dyn FileSystem,
    path: &Path,
    cancel: &CancellationToken,
) -> Result<bool, Cancelled> {
    match fs.stat(path, cancel) {
        Ok(_) => Ok(true),
        Err(StorageError::Cancelled) => Err(Cancelled),
        Err(_) => Ok(false),
    }
}

/// Returns true if `path` exists and is a regular file
pub fn is_file(
    fs: &dyn FileSystem,
    path: &Path,
    cancel: &CancellationToken,
) -> Result<bool, Cancelled> {
    match fs.stat(path, cancel) {
        Ok(stat) => Ok(!stat.is_dir),
        Err(StorageError::Cancelled) => Err(Cancelled),
        Err(_) => Ok(false),
    }
}
