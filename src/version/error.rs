use std::path::PathBuf;

use thiserror::Error;

use crate::cancel::Cancelled;
use crate::format::{FileFormat, FormatError, UnknownFormat};
use crate::fs::StorageError;

#[derive(Debug, Error)]
pub enum VersionFileError {
    #[error("file path must not be empty")]
    EmptyPath,

    #[error("{format} format requires a field address")]
    MissingField { format: FileFormat },

    #[error("{format} format does not take a field address (got '{field}')")]
    UnexpectedField { format: FileFormat, field: String },

    #[error("regex format requires a pattern")]
    MissingPattern,

    #[error(transparent)]
    UnknownFormat(#[from] UnknownFormat),

    #[error("{}: {source}", path.display())]
    Format {
        path: PathBuf,
        #[source]
        source: FormatError,
    },

    #[error(transparent)]
    Storage(StorageError),

    #[error("operation cancelled")]
    Cancelled,
}

impl VersionFileError {
    pub fn format(path: impl Into<PathBuf>, source: impl Into<FormatError>) -> Self {
        VersionFileError::Format {
            path: path.into(),
            source: source.into(),
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, VersionFileError::Cancelled)
    }

    /// Caller misuse: the descriptor itself is invalid
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            VersionFileError::EmptyPath
                | VersionFileError::MissingField { .. }
                | VersionFileError::UnexpectedField { .. }
                | VersionFileError::MissingPattern
                | VersionFileError::UnknownFormat(_)
        )
    }
}

impl From<StorageError> for VersionFileError {
    fn from(error: StorageError) -> Self {
        match error {
            StorageError::Cancelled => VersionFileError::Cancelled,
            other => VersionFileError::Storage(other),
        }
    }
}

impl From<Cancelled> for VersionFileError {
    fn from(_: Cancelled) -> Self {
        VersionFileError::Cancelled
    }
}
