//! JSON adapter (package.json, composer.json)

use crate::field;
use crate::format::traits::{FormatAdapter, FormatError, Locator, ensure_trailing_newline};
use crate::format::types::FileFormat;

/// Reads a field from a JSON document and re-serializes the whole document
/// on write. Key order is preserved; indentation becomes two spaces.
pub struct JsonAdapter;

impl FormatAdapter for JsonAdapter {
    fn format(&self) -> FileFormat {
        FileFormat::Json
    }

    fn read(&self, content: &str, locator: Locator<'_>) -> Result<String, FormatError> {
        let address = locator.field(FileFormat::Json)?;
        let tree: serde_json::Value = serde_json::from_str(content)?;
        Ok(field::get_scalar(&tree, address)?)
    }

    fn write(
        &self,
        content: &str,
        locator: Locator<'_>,
        new_value: &str,
    ) -> Result<String, FormatError> {
        let address = locator.field(FileFormat::Json)?;
        let mut tree: serde_json::Value = serde_json::from_str(content)?;
        field::set(&mut tree, address, new_value)?;
        Ok(ensure_trailing_newline(serde_json::to_string_pretty(&tree)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PACKAGE_JSON: &str = r#"{
  "name": "web",
  "version": "1.2.3",
  "scripts": {
    "build": "vite build"
  },
  "publishConfig": {
    "tag": "next"
  }
}
"#;

    #[test]
    fn read_extracts_top_level_version() {
        let version = JsonAdapter
            .read(PACKAGE_JSON, Locator::Field("version"))
            .unwrap();
        assert_eq!(version, "1.2.3");
    }

    #[test]
    fn read_extracts_nested_field() {
        let version = JsonAdapter
            .read(PACKAGE_JSON, Locator::Field("publishConfig.tag"))
            .unwrap();
        assert_eq!(version, "next");
    }

    #[test]
    fn write_keeps_key_order_and_other_fields() {
        let written = JsonAdapter
            .write(PACKAGE_JSON, Locator::Field("version"), "1.3.0")
            .unwrap();

        assert_eq!(written, PACKAGE_JSON.replace("1.2.3", "1.3.0"));
    }

    #[test]
    fn write_appends_trailing_newline() {
        let written = JsonAdapter
            .write(r#"{"version":"1.0.0"}"#, Locator::Field("version"), "1.0.1")
            .unwrap();

        assert_eq!(written, "{\n  \"version\": \"1.0.1\"\n}\n");
    }

    #[test]
    fn read_malformed_json_fails() {
        let err = JsonAdapter
            .read("{ \"version\": ", Locator::Field("version"))
            .unwrap_err();
        assert!(matches!(err, FormatError::Json(_)));
    }

    #[test]
    fn read_without_field_locator_fails() {
        let err = JsonAdapter.read(PACKAGE_JSON, Locator::Whole).unwrap_err();
        assert!(matches!(err, FormatError::Locator { .. }));
    }
}
