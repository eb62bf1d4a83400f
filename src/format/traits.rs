//! Format adapter trait definition

use crate::field::FieldError;
use crate::format::types::FileFormat;

/// Where inside a file the version lives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Locator<'a> {
    /// The whole file is the version
    Whole,
    /// Dot-separated field path in a structured document
    Field(&'a str),
    /// Regular expression whose first capture group is the version
    Pattern(&'a str),
}

impl<'a> Locator<'a> {
    pub fn field(self, format: FileFormat) -> Result<&'a str, FormatError> {
        match self {
            Locator::Field(address) => Ok(address),
            _ => Err(FormatError::Locator {
                format,
                expected: "a field address",
            }),
        }
    }

    pub fn pattern(self, format: FileFormat) -> Result<&'a str, FormatError> {
        match self {
            Locator::Pattern(pattern) => Ok(pattern),
            _ => Err(FormatError::Locator {
                format,
                expected: "a regex pattern",
            }),
        }
    }
}

/// Read and rewrite the version inside file contents of one format
pub trait FormatAdapter: Send + Sync {
    /// The format this adapter handles
    fn format(&self) -> FileFormat;

    /// Extract the version from `content`
    fn read(&self, content: &str, locator: Locator<'_>) -> Result<String, FormatError>;

    /// Return `content` with the version replaced by `new_value`
    fn write(
        &self,
        content: &str,
        locator: Locator<'_>,
        new_value: &str,
    ) -> Result<String, FormatError>;

    /// [`read`](Self::read) over raw file bytes. Text formats require UTF-8.
    fn read_bytes(&self, content: &[u8], locator: Locator<'_>) -> Result<String, FormatError> {
        let text = String::from_utf8(content.to_vec())?;
        self.read(&text, locator)
    }

    /// [`write`](Self::write) over raw file bytes. Text formats require UTF-8.
    fn write_bytes(
        &self,
        content: &[u8],
        locator: Locator<'_>,
        new_value: &str,
    ) -> Result<Vec<u8>, FormatError> {
        let text = String::from_utf8(content.to_vec())?;
        Ok(self.write(&text, locator, new_value)?.into_bytes())
    }
}

/// Error type for format adapters
#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    #[error(transparent)]
    Field(#[from] FieldError),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("failed to serialize TOML: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("pattern '{pattern}' must contain exactly one capture group, found {found}")]
    CaptureGroupCount { pattern: String, found: usize },

    #[error("pattern '{pattern}' did not match")]
    NoMatch { pattern: String },

    #[error("{format} format expects {expected}")]
    Locator {
        format: FileFormat,
        expected: &'static str,
    },

    #[error("file is not valid UTF-8")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    #[error("Tree-sitter error: {0}")]
    TreeSitter(String),
}

pub(crate) fn ensure_trailing_newline(mut content: String) -> String {
    if !content.ends_with('\n') {
        content.push('\n');
    }
    content
}
