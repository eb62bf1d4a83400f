//! Bounded-depth directory walk over the storage abstraction

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use crate::cancel::{CancellationToken, Cancelled};
use crate::discovery::exclude::ExcludeMatcher;
use crate::fs::{FileSystem, StorageError};

/// A non-excluded entry found during a walk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkEntry {
    pub path: PathBuf,
    /// Path relative to the walk root
    pub relative_path: PathBuf,
    pub name: String,
    pub is_dir: bool,
    /// Children of the root are at depth 1
    pub depth: usize,
}

pub struct TreeWalker {
    fs: Arc<dyn FileSystem>,
    excludes: ExcludeMatcher,
}

impl TreeWalker {
    pub fn new(fs: Arc<dyn FileSystem>, excludes: ExcludeMatcher) -> Self {
        Self { fs, excludes }
    }

    /// Depth-first walk from `root` (depth 0).
    ///
    /// Every non-excluded entry of every directory read is passed to `visit`.
    /// Directories deeper than `max_depth` are visited but not read.
    /// Unreadable directories are skipped. Cancellation is checked before
    /// each directory read and aborts the walk.
    pub fn walk<E, F>(
        &self,
        root: &Path,
        max_depth: usize,
        cancel: &CancellationToken,
        mut visit: F,
    ) -> Result<(), E>
    where
        E: From<Cancelled>,
        F: FnMut(&WalkEntry) -> Result<(), E>,
    {
        self.walk_dir(root, root, 0, max_depth, cancel, &mut visit)
    }

    fn walk_dir<E, F>(
        &self,
        root: &Path,
        dir: &Path,
        depth: usize,
        max_depth: usize,
        cancel: &CancellationToken,
        visit: &mut F,
    ) -> Result<(), E>
    where
        E: From<Cancelled>,
        F: FnMut(&WalkEntry) -> Result<(), E>,
    {
        cancel.check()?;

        let entries = match self.fs.read_dir(dir, cancel) {
            Ok(entries) => entries,
            Err(StorageError::Cancelled) => return Err(Cancelled.into()),
            Err(e) => {
                debug!("Skipping unreadable directory {}: {}", dir.display(), e);
                return Ok(());
            }
        };

        for entry in entries {
            let path = dir.join(&entry.name);
            let relative_path = path.strip_prefix(root).unwrap_or(&path).to_path_buf();

            if self
                .excludes
                .is_excluded(&entry.name, &path, &relative_path)
            {
                continue;
            }

            let walk_entry = WalkEntry {
                path,
                relative_path,
                name: entry.name,
                is_dir: entry.is_dir,
                depth: depth + 1,
            };
            visit(&walk_entry)?;

            if walk_entry.is_dir && walk_entry.depth <= max_depth {
                self.walk_dir(root, &walk_entry.path, depth + 1, max_depth, cancel, visit)?;
            }
        }

        Ok(())
    }
}
