//! Rewrite the version inside a described file

use std::path::Path;
use std::sync::Arc;

use tracing::info;

use crate::cancel::CancellationToken;
use crate::format::FileFormat;
use crate::fs::{DEFAULT_FILE_PERMISSIONS, FileSystem};
use crate::version::descriptor::FileConfig;
use crate::version::error::VersionFileError;

pub struct VersionWriter {
    fs: Arc<dyn FileSystem>,
}

impl VersionWriter {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    /// Replace the version in the file described by `config` with `new_value`.
    ///
    /// Raw files are created if missing; every other format needs the
    /// existing content.
    pub fn write(
        &self,
        config: &FileConfig,
        new_value: &str,
        cancel: &CancellationToken,
    ) -> Result<(), VersionFileError> {
        let locator = config.validate()?;

        let content = match config.format {
            FileFormat::Raw => Vec::new(),
            _ => self.fs.read_file(&config.path, cancel)?,
        };

        let updated = config
            .format
            .adapter()
            .write_bytes(&content, locator, new_value)
            .map_err(|e| VersionFileError::format(&config.path, e))?;

        self.fs.write_file(
            &config.path,
            &updated,
            DEFAULT_FILE_PERMISSIONS,
            cancel,
        )?;

        info!("Updated {} to {}", config.path.display(), new_value);
        Ok(())
    }

    /// Whether `path` exists. Only stats the file.
    pub fn exists(&self, path: &Path, cancel: &CancellationToken) -> Result<bool, VersionFileError> {
        Ok(crate::fs::exists(self.fs.as_ref(), path, cancel)?)
    }
}
