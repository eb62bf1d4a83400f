//! Plain-text adapter (.version, VERSION, version.txt)

use crate::format::traits::{FormatAdapter, FormatError, Locator, ensure_trailing_newline};
use crate::format::types::FileFormat;

/// The whole file, minus surrounding whitespace, is the version
pub struct RawAdapter;

impl RawAdapter {
    fn check_locator(locator: Locator<'_>) -> Result<(), FormatError> {
        match locator {
            Locator::Whole => Ok(()),
            _ => Err(FormatError::Locator {
                format: FileFormat::Raw,
                expected: "no field or pattern",
            }),
        }
    }
}

impl FormatAdapter for RawAdapter {
    fn format(&self) -> FileFormat {
        FileFormat::Raw
    }

    fn read(&self, content: &str, locator: Locator<'_>) -> Result<String, FormatError> {
        Self::check_locator(locator)?;
        Ok(content.trim().to_string())
    }

    fn write(
        &self,
        _content: &str,
        locator: Locator<'_>,
        new_value: &str,
    ) -> Result<String, FormatError> {
        Self::check_locator(locator)?;
        Ok(ensure_trailing_newline(new_value.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("1.2.3", "1.2.3")]
    #[case("1.2.3\n", "1.2.3")]
    #[case("  v2.0.0-rc.1 \r\n", "v2.0.0-rc.1")]
    #[case("", "")]
    fn read_trims_whitespace(#[case] content: &str, #[case] expected: &str) {
        assert_eq!(RawAdapter.read(content, Locator::Whole).unwrap(), expected);
    }

    #[test]
    fn write_replaces_whole_file() {
        let written = RawAdapter
            .write("1.0.0\n# trailing note\n", Locator::Whole, "1.1.0")
            .unwrap();
        assert_eq!(written, "1.1.0\n");
    }

    #[test]
    fn field_locator_is_rejected() {
        let err = RawAdapter
            .read("1.0.0", Locator::Field("version"))
            .unwrap_err();
        assert!(matches!(err, FormatError::Locator { .. }));
    }
}
