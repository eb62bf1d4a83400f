//! Extract the version from a described file

use std::path::PathBuf;
use std::sync::Arc;

use tracing::debug;

use crate::cancel::CancellationToken;
use crate::format::FileFormat;
use crate::fs::FileSystem;
use crate::version::descriptor::FileConfig;
use crate::version::error::VersionFileError;

/// Version read from a file, with the descriptor that produced it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionInfo {
    pub version: String,
    pub path: PathBuf,
    pub format: FileFormat,
    pub field: String,
}

pub struct VersionReader {
    fs: Arc<dyn FileSystem>,
}

impl VersionReader {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    pub fn read(
        &self,
        config: &FileConfig,
        cancel: &CancellationToken,
    ) -> Result<VersionInfo, VersionFileError> {
        let locator = config.validate()?;
        let content = self.fs.read_file(&config.path, cancel)?;

        let version = config
            .format
            .adapter()
            .read_bytes(&content, locator)
            .map_err(|e| VersionFileError::format(&config.path, e))?;

        debug!(
            "Read version {} from {} ({})",
            version,
            config.path.display(),
            config.format
        );

        Ok(VersionInfo {
            version,
            path: config.path.clone(),
            format: config.format,
            field: config.field.clone(),
        })
    }
}
