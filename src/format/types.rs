//! Common types for format adapters

use std::path::Path;

use serde::Deserialize;

use crate::format::json_file::JsonAdapter;
use crate::format::raw_file::RawAdapter;
use crate::format::regex_capture::RegexAdapter;
use crate::format::toml_file::TomlAdapter;
use crate::format::traits::FormatAdapter;
use crate::format::yaml_file::YamlAdapter;

/// Serialization format of a version-bearing file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum FileFormat {
    /// JSON document, addressed by field path (package.json)
    Json,
    /// YAML document, addressed by field path (Chart.yaml)
    Yaml,
    /// TOML document, addressed by field path (Cargo.toml)
    Toml,
    /// Whole file is the version (.version, VERSION)
    Raw,
    /// Version is the first capture group of a regular expression
    Regex,
}

/// Error returned when a format name is not recognized
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown file format '{0}' (expected json, yaml, toml, raw or regex)")]
pub struct UnknownFormat(pub String);

impl FileFormat {
    /// Returns the string representation of the format
    pub fn as_str(&self) -> &'static str {
        match self {
            FileFormat::Json => "json",
            FileFormat::Yaml => "yaml",
            FileFormat::Toml => "toml",
            FileFormat::Raw => "raw",
            FileFormat::Regex => "regex",
        }
    }

    /// Structured formats are addressed by a dot-separated field path
    pub fn is_structured(&self) -> bool {
        matches!(self, FileFormat::Json | FileFormat::Yaml | FileFormat::Toml)
    }

    /// The adapter that reads and writes this format
    pub fn adapter(&self) -> &'static dyn FormatAdapter {
        match self {
            FileFormat::Json => &JsonAdapter,
            FileFormat::Yaml => &YamlAdapter,
            FileFormat::Toml => &TomlAdapter,
            FileFormat::Raw => &RawAdapter,
            FileFormat::Regex => &RegexAdapter,
        }
    }

    /// Guess the format from a file name. Anything unrecognized is raw text.
    pub fn detect(path: &Path) -> FileFormat {
        let extension = path
            .extension()
            .map(|ext| ext.to_string_lossy().to_ascii_lowercase());

        match extension.as_deref() {
            Some("json") => FileFormat::Json,
            Some("yaml" | "yml") => FileFormat::Yaml,
            Some("toml") => FileFormat::Toml,
            _ => FileFormat::Raw,
        }
    }
}

impl std::fmt::Display for FileFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for FileFormat {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(FileFormat::Json),
            "yaml" | "yml" => Ok(FileFormat::Yaml),
            "toml" => Ok(FileFormat::Toml),
            "raw" => Ok(FileFormat::Raw),
            "regex" => Ok(FileFormat::Regex),
            _ => Err(UnknownFormat(s.to_string())),
        }
    }
}

impl TryFrom<String> for FileFormat {
    type Error = UnknownFormat;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("/path/to/package.json", FileFormat::Json)]
    #[case("/path/to/Chart.yaml", FileFormat::Yaml)]
    #[case("/path/to/.github/release.yml", FileFormat::Yaml)]
    #[case("/path/to/Cargo.toml", FileFormat::Toml)]
    #[case("/path/to/.version", FileFormat::Raw)]
    #[case("/path/to/VERSION", FileFormat::Raw)]
    #[case("/path/to/version.txt", FileFormat::Raw)]
    fn detect_returns_expected(#[case] path: &str, #[case] expected: FileFormat) {
        assert_eq!(FileFormat::detect(Path::new(path)), expected);
    }

    #[rstest]
    #[case("json", Ok(FileFormat::Json))]
    #[case("YAML", Ok(FileFormat::Yaml))]
    #[case("yml", Ok(FileFormat::Yaml))]
    #[case("toml", Ok(FileFormat::Toml))]
    #[case("raw", Ok(FileFormat::Raw))]
    #[case("regex", Ok(FileFormat::Regex))]
    #[case("xml", Err(UnknownFormat("xml".to_string())))]
    #[case("text", Err(UnknownFormat("text".to_string())))]
    fn from_str_returns_expected(
        #[case] input: &str,
        #[case] expected: Result<FileFormat, UnknownFormat>,
    ) {
        assert_eq!(input.parse::<FileFormat>(), expected);
    }

    #[test]
    fn deserialize_rejects_unknown_format() {
        let ok: FileFormat = serde_json::from_str("\"toml\"").unwrap();
        assert_eq!(ok, FileFormat::Toml);

        assert!(serde_json::from_str::<FileFormat>("\"ini\"").is_err());
    }

    #[test]
    fn adapter_matches_format() {
        for format in [
            FileFormat::Json,
            FileFormat::Yaml,
            FileFormat::Toml,
            FileFormat::Raw,
            FileFormat::Regex,
        ] {
            assert_eq!(format.adapter().format(), format);
        }
    }
}
