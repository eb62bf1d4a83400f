//! Combined reader and writer over one storage

use std::path::Path;
use std::sync::Arc;

use crate::cancel::CancellationToken;
use crate::fs::FileSystem;
use crate::version::descriptor::FileConfig;
use crate::version::error::VersionFileError;
use crate::version::reader::{VersionInfo, VersionReader};
use crate::version::writer::VersionWriter;

pub struct VersionStore {
    reader: VersionReader,
    writer: VersionWriter,
}

impl VersionStore {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self {
            reader: VersionReader::new(fs.clone()),
            writer: VersionWriter::new(fs),
        }
    }

    pub fn read(
        &self,
        config: &FileConfig,
        cancel: &CancellationToken,
    ) -> Result<VersionInfo, VersionFileError> {
        self.reader.read(config, cancel)
    }

    pub fn write(
        &self,
        config: &FileConfig,
        new_value: &str,
        cancel: &CancellationToken,
    ) -> Result<(), VersionFileError> {
        self.writer.write(config, new_value, cancel)
    }

    pub fn exists(&self, path: &Path, cancel: &CancellationToken) -> Result<bool, VersionFileError> {
        self.writer.exists(path, cancel)
    }

    pub fn reader(&self) -> &VersionReader {
        &self.reader
    }

    pub fn writer(&self) -> &VersionWriter {
        &self.writer
    }
}
