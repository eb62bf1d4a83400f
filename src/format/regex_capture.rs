//! Regex-capture adapter for versions embedded in source code

use std::ops::Range;

use regex::bytes::Regex;

use crate::format::traits::{FormatAdapter, FormatError, Locator};
use crate::format::types::FileFormat;

/// The version is the first capture group of the first match. Matching runs
/// over raw bytes, so the rest of the file need not be UTF-8. Writes replace
/// only that span; every other byte is left untouched and later matches are
/// not rewritten.
pub struct RegexAdapter;

impl RegexAdapter {
    fn compile(pattern: &str) -> Result<Regex, FormatError> {
        let regex = Regex::new(pattern)?;
        let found = regex.captures_len() - 1;
        if found != 1 {
            return Err(FormatError::CaptureGroupCount {
                pattern: pattern.to_string(),
                found,
            });
        }
        Ok(regex)
    }

    /// Byte range of the capture group in `content`
    fn locate(content: &[u8], pattern: &str) -> Result<Range<usize>, FormatError> {
        let regex = Self::compile(pattern)?;
        regex
            .captures(content)
            .and_then(|captures| captures.get(1))
            .map(|group| group.range())
            .ok_or_else(|| FormatError::NoMatch {
                pattern: pattern.to_string(),
            })
    }
}

impl FormatAdapter for RegexAdapter {
    fn format(&self) -> FileFormat {
        FileFormat::Regex
    }

    fn read(&self, content: &str, locator: Locator<'_>) -> Result<String, FormatError> {
        self.read_bytes(content.as_bytes(), locator)
    }

    fn write(
        &self,
        content: &str,
        locator: Locator<'_>,
        new_value: &str,
    ) -> Result<String, FormatError> {
        let written = self.write_bytes(content.as_bytes(), locator, new_value)?;
        Ok(String::from_utf8(written)?)
    }

    fn read_bytes(&self, content: &[u8], locator: Locator<'_>) -> Result<String, FormatError> {
        let pattern = locator.pattern(FileFormat::Regex)?;
        let span = Self::locate(content, pattern)?;
        // only the captured version has to be text
        Ok(String::from_utf8(content[span].to_vec())?)
    }

    fn write_bytes(
        &self,
        content: &[u8],
        locator: Locator<'_>,
        new_value: &str,
    ) -> Result<Vec<u8>, FormatError> {
        let pattern = locator.pattern(FileFormat::Regex)?;
        let span = Self::locate(content, pattern)?;

        let mut written = Vec::with_capacity(content.len() + new_value.len());
        written.extend_from_slice(&content[..span.start]);
        written.extend_from_slice(new_value.as_bytes());
        written.extend_from_slice(&content[span.end..]);
        Ok(written)
    }
}
