//! File descriptor passed between discovery and the reader/writer

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::format::{FileFormat, Locator};
use crate::version::error::VersionFileError;

/// Where a version lives: file, format, and field address or pattern
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FileConfig {
    pub path: PathBuf,
    pub format: FileFormat,
    /// Dot-separated field address, required for structured formats
    #[serde(default)]
    pub field: String,
    /// Regular expression with one capture group, required for the regex format
    #[serde(default)]
    pub pattern: Option<String>,
}

impl FileConfig {
    /// A plain-text file whose whole content is the version
    pub fn raw(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            format: FileFormat::Raw,
            field: String::new(),
            pattern: None,
        }
    }

    /// A JSON, YAML or TOML document with the version at `field`
    pub fn structured(path: impl Into<PathBuf>, format: FileFormat, field: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            format,
            field: field.into(),
            pattern: None,
        }
    }

    pub fn regex(path: impl Into<PathBuf>, pattern: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            format: FileFormat::Regex,
            field: String::new(),
            pattern: Some(pattern.into()),
        }
    }

    /// Build a descriptor from loosely-typed input such as command-line flags.
    /// The format is detected from the file name when not given.
    pub fn from_parts(
        path: impl Into<PathBuf>,
        format: Option<&str>,
        field: Option<String>,
        pattern: Option<String>,
    ) -> Result<Self, VersionFileError> {
        let path = path.into();
        let format = match format {
            Some(name) => name.parse()?,
            None if pattern.is_some() => FileFormat::Regex,
            None => FileFormat::detect(&path),
        };

        Ok(Self {
            path,
            format,
            field: field.unwrap_or_default(),
            pattern,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check the format-specific preconditions and return the locator the
    /// format adapter needs
    pub fn validate(&self) -> Result<Locator<'_>, VersionFileError> {
        if self.path.as_os_str().is_empty() {
            return Err(VersionFileError::EmptyPath);
        }

        match self.format {
            FileFormat::Json | FileFormat::Yaml | FileFormat::Toml => {
                if self.field.is_empty() {
                    return Err(VersionFileError::MissingField {
                        format: self.format,
                    });
                }
                Ok(Locator::Field(&self.field))
            }
            FileFormat::Raw => {
                if !self.field.is_empty() {
                    return Err(VersionFileError::UnexpectedField {
                        format: self.format,
                        field: self.field.clone(),
                    });
                }
                Ok(Locator::Whole)
            }
            FileFormat::Regex => match self.pattern.as_deref() {
                Some(pattern) if !pattern.is_empty() => Ok(Locator::Pattern(pattern)),
                _ => Err(VersionFileError::MissingPattern),
            },
        }
    }
}
