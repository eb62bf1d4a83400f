//! YAML adapter (Chart.yaml, pubspec.yaml)

use crate::field;
use crate::format::traits::{FormatAdapter, FormatError, Locator, ensure_trailing_newline};
use crate::format::types::FileFormat;

pub struct YamlAdapter;

impl FormatAdapter for YamlAdapter {
    fn format(&self) -> FileFormat {
        FileFormat::Yaml
    }

    fn read(&self, content: &str, locator: Locator<'_>) -> Result<String, FormatError> {
        let address = locator.field(FileFormat::Yaml)?;
        let tree: serde_yaml::Value = serde_yaml::from_str(content)?;
        Ok(field::get_scalar(&tree, address)?)
    }

    fn write(
        &self,
        content: &str,
        locator: Locator<'_>,
        new_value: &str,
    ) -> Result<String, FormatError> {
        let address = locator.field(FileFormat::Yaml)?;
        let mut tree: serde_yaml::Value = serde_yaml::from_str(content)?;
        field::set(&mut tree, address, new_value)?;
        Ok(ensure_trailing_newline(serde_yaml::to_string(&tree)?))
    }
}
