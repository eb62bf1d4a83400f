//! `FileSystem` backed by `std::fs`

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use crate::cancel::CancellationToken;
use crate::fs::traits::{DirEntry, FileStat, FileSystem, StorageError};

/// The real filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFileSystem;

impl OsFileSystem {
    pub fn new() -> Self {
        Self
    }
}

impl FileSystem for OsFileSystem {
    fn stat(&self, path: &Path, cancel: &CancellationToken) -> Result<FileStat, StorageError> {
        cancel.check()?;
        let metadata = std::fs::metadata(path).map_err(|e| StorageError::io(path, e))?;
        Ok(FileStat {
            is_dir: metadata.is_dir(),
        })
    }

    fn read_file(&self, path: &Path, cancel: &CancellationToken) -> Result<Vec<u8>, StorageError> {
        cancel.check()?;
        std::fs::read(path).map_err(|e| StorageError::io(path, e))
    }

    fn write_file(
        &self,
        path: &Path,
        contents: &[u8],
        permissions: u32,
        cancel: &CancellationToken,
    ) -> Result<(), StorageError> {
        cancel.check()?;

        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(permissions);
        }
        #[cfg(not(unix))]
        let _ = permissions;

        let mut file = options.open(path).map_err(|e| StorageError::io(path, e))?;
        file.write_all(contents)
            .map_err(|e| StorageError::io(path, e))?;
        Ok(())
    }

    fn read_dir(
        &self,
        path: &Path,
        cancel: &CancellationToken,
    ) -> Result<Vec<DirEntry>, StorageError> {
        cancel.check()?;

        let mut entries = Vec::new();
        for entry in std::fs::read_dir(path).map_err(|e| StorageError::io(path, e))? {
            let entry = entry.map_err(|e| StorageError::io(path, e))?;
            let Ok(file_type) = entry.file_type() else {
                continue;
            };
            entries.push(DirEntry {
                name: entry.file_name().to_string_lossy().into_owned(),
                is_dir: file_type.is_dir(),
            });
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(entries)
    }
}
