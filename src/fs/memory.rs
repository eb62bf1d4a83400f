//! In-memory `FileSystem`
//!
//! Used by the discovery tests and by callers that want to run a dry pass over
//! a synthetic tree. Directories are created implicitly for every added file.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use crate::cancel::CancellationToken;
use crate::fs::traits::{DirEntry, FileStat, FileSystem, StorageError};

#[derive(Debug, Default)]
struct State {
    files: BTreeMap<PathBuf, Vec<u8>>,
    permissions: BTreeMap<PathBuf, u32>,
    dirs: BTreeSet<PathBuf>,
    unreadable: BTreeSet<PathBuf>,
}

impl State {
    fn add_dir_all(&mut self, path: &Path) {
        for ancestor in path.ancestors() {
            if ancestor.as_os_str().is_empty() {
                break;
            }
            self.dirs.insert(ancestor.to_path_buf());
        }
    }
}

#[derive(Debug, Default)]
pub struct MemoryFileSystem {
    state: Mutex<State>,
}

impl MemoryFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style variant of [`MemoryFileSystem::add_file`]
    pub fn with_file(self, path: impl AsRef<Path>, contents: impl AsRef<[u8]>) -> Self {
        self.add_file(path, contents);
        self
    }

    /// Builder-style variant of [`MemoryFileSystem::add_dir`]
    pub fn with_dir(self, path: impl AsRef<Path>) -> Self {
        self.add_dir(path);
        self
    }

    pub fn add_file(&self, path: impl AsRef<Path>, contents: impl AsRef<[u8]>) {
        let path = path.as_ref();
        let mut state = self.lock();
        if let Some(parent) = path.parent() {
            state.add_dir_all(parent);
        }
        state
            .files
            .insert(path.to_path_buf(), contents.as_ref().to_vec());
    }

    pub fn add_dir(&self, path: impl AsRef<Path>) {
        self.lock().add_dir_all(path.as_ref());
    }

    /// Make `read_dir` on `path` fail with a permission error
    pub fn deny_read_dir(&self, path: impl AsRef<Path>) {
        self.lock().unreadable.insert(path.as_ref().to_path_buf());
    }

    /// Current contents of a file as UTF-8, if it exists
    pub fn contents(&self, path: impl AsRef<Path>) -> Option<String> {
        self.lock()
            .files
            .get(path.as_ref())
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
    }

    /// Permissions recorded when the file was created by `write_file`
    pub fn permissions(&self, path: impl AsRef<Path>) -> Option<u32> {
        self.lock().permissions.get(path.as_ref()).copied()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl FileSystem for MemoryFileSystem {
    fn stat(&self, path: &Path, cancel: &CancellationToken) -> Result<FileStat, StorageError> {
        cancel.check()?;
        let state = self.lock();
        if state.files.contains_key(path) {
            Ok(FileStat { is_dir: false })
        } else if state.dirs.contains(path) {
            Ok(FileStat { is_dir: true })
        } else {
            Err(StorageError::NotFound {
                path: path.to_path_buf(),
            })
        }
    }

    fn read_file(&self, path: &Path, cancel: &CancellationToken) -> Result<Vec<u8>, StorageError> {
        cancel.check()?;
        self.lock()
            .files
            .get(path)
            .cloned()
            .ok_or_else(|| StorageError::NotFound {
                path: path.to_path_buf(),
            })
    }

    fn write_file(
        &self,
        path: &Path,
        contents: &[u8],
        permissions: u32,
        cancel: &CancellationToken,
    ) -> Result<(), StorageError> {
        cancel.check()?;
        let mut state = self.lock();

        if state.dirs.contains(path) {
            return Err(StorageError::io(
                path,
                std::io::Error::new(std::io::ErrorKind::IsADirectory, "is a directory"),
            ));
        }
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !state.dirs.contains(parent)
        {
            return Err(StorageError::NotFound {
                path: path.to_path_buf(),
            });
        }

        if !state.files.contains_key(path) {
            state.permissions.insert(path.to_path_buf(), permissions);
        }
        state.files.insert(path.to_path_buf(), contents.to_vec());
        Ok(())
    }

    fn read_dir(
        &self,
        path: &Path,
        cancel: &CancellationToken,
    ) -> Result<Vec<DirEntry>, StorageError> {
        cancel.check()?;
        let state = self.lock();

        if state.unreadable.contains(path) {
            return Err(StorageError::io(
                path,
                std::io::Error::new(std::io::ErrorKind::PermissionDenied, "permission denied"),
            ));
        }
        if !state.dirs.contains(path) {
            return Err(StorageError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let mut children: BTreeMap<String, bool> = BTreeMap::new();
        let child_name = |candidate: &Path| -> Option<String> {
            (candidate.parent() == Some(path))
                .then(|| candidate.file_name())
                .flatten()
                .map(|name| name.to_string_lossy().into_owned())
        };

        for dir in &state.dirs {
            if let Some(name) = child_name(dir) {
                children.insert(name, true);
            }
        }
        for file in state.files.keys() {
            if let Some(name) = child_name(file) {
                children.insert(name, false);
            }
        }

        Ok(children
            .into_iter()
            .map(|(name, is_dir)| DirEntry { name, is_dir })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_file_creates_parent_directories() {
        let fs = MemoryFileSystem::new().with_file("/project/packages/api/package.json", "{}");
        let cancel = CancellationToken::new();

        assert_eq!(
            fs.stat(Path::new("/project/packages"), &cancel).unwrap(),
            FileStat { is_dir: true }
        );
        assert_eq!(
            fs.read_dir(Path::new("/project"), &cancel).unwrap(),
            vec![DirEntry::dir("packages")]
        );
    }

    #[test]
    fn read_dir_lists_only_direct_children() {
        let fs = MemoryFileSystem::new()
            .with_file("/p/.version", "1.0.0")
            .with_file("/p/a/.version", "1.0.0")
            .with_file("/p/a/b/Cargo.toml", "")
            .with_dir("/p/empty");

        let entries = fs
            .read_dir(Path::new("/p"), &CancellationToken::new())
            .unwrap();

        assert_eq!(
            entries,
            vec![
                DirEntry::file(".version"),
                DirEntry::dir("a"),
                DirEntry::dir("empty"),
            ]
        );
    }

    #[test]
    fn write_file_records_permissions_only_on_create() {
        let fs = MemoryFileSystem::new().with_dir("/p");
        let cancel = CancellationToken::new();
        let path = Path::new("/p/VERSION");

        fs.write_file(path, b"1.0.0\n", 0o600, &cancel).unwrap();
        fs.write_file(path, b"2.0.0\n", 0o644, &cancel).unwrap();

        assert_eq!(fs.permissions(path), Some(0o600));
        assert_eq!(fs.contents(path).as_deref(), Some("2.0.0\n"));
    }

    #[test]
    fn write_file_into_missing_directory_fails() {
        let fs = MemoryFileSystem::new();

        let err = fs
            .write_file(
                Path::new("/missing/VERSION"),
                b"1.0.0",
                0o644,
                &CancellationToken::new(),
            )
            .unwrap_err();

        assert!(err.is_not_found());
    }

    #[test]
    fn deny_read_dir_makes_listing_fail() {
        let fs = MemoryFileSystem::new().with_dir("/p/secret");
        fs.deny_read_dir("/p/secret");

        let err = fs
            .read_dir(Path::new("/p/secret"), &CancellationToken::new())
            .unwrap_err();

        assert!(matches!(err, StorageError::Io { .. }));
    }
}
