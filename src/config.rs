use serde::Deserialize;

// =============================================================================
// Discovery defaults
// =============================================================================

/// Canonical version marker file name
pub const VERSION_FILE: &str = ".version";

/// Module name given to the version marker at the scan root
pub const ROOT_MODULE_NAME: &str = "root";

/// Manifest scan depth used when neither the caller nor the config set one
pub const DEFAULT_MANIFEST_MAX_DEPTH: usize = 3;

/// Depth limit for the version marker walk
pub const DEFAULT_MODULE_MAX_DEPTH: usize = 5;

/// Top-level configuration consumed by discovery
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    /// Glob patterns matched against entry names and paths during the walk
    pub exclude: Vec<String>,
    pub discovery: DiscoveryConfig,
}

/// Discovery-related configuration
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct DiscoveryConfig {
    pub enabled: bool,
    pub recursive: bool,
    pub module_max_depth: usize,
    pub manifest_max_depth: Option<usize>,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            recursive: true,
            module_max_depth: DEFAULT_MODULE_MAX_DEPTH,
            manifest_max_depth: None,
        }
    }
}

impl Config {
    /// Parse a configuration document
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}

/// Discovery switches handed to the discoverer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiscoveryOptions {
    pub enabled: bool,
    pub recursive: bool,
    pub max_depth: usize,
    pub manifest_max_depth: Option<usize>,
}

/// Accessors the discoverer needs from whatever holds the configuration
pub trait DiscoverySettings {
    fn exclude_patterns(&self) -> &[String];
    fn discovery_options(&self) -> DiscoveryOptions;
}

impl DiscoverySettings for Config {
    fn exclude_patterns(&self) -> &[String] {
        &self.exclude
    }

    fn discovery_options(&self) -> DiscoveryOptions {
        DiscoveryOptions {
            enabled: self.discovery.enabled,
            recursive: self.discovery.recursive,
            max_depth: self.discovery.module_max_depth,
            manifest_max_depth: self.discovery.manifest_max_depth,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn config_from_partial_object_uses_defaults_for_missing_fields() {
        let result = serde_json::from_value::<Config>(json!({
            "discovery": {
                "recursive": false
            }
        }))
        .unwrap();

        assert!(result.exclude.is_empty());
        assert_eq!(
            result.discovery,
            DiscoveryConfig {
                recursive: false,
                ..DiscoveryConfig::default()
            }
        );
    }

    #[test]
    fn config_from_full_object_parses_all_fields() {
        let result = serde_json::from_value::<Config>(json!({
            "exclude": ["fixtures", "**/testdata/**"],
            "discovery": {
                "enabled": false,
                "recursive": true,
                "moduleMaxDepth": 2,
                "manifestMaxDepth": 1
            }
        }))
        .unwrap();

        assert_eq!(
            result,
            Config {
                exclude: vec!["fixtures".to_string(), "**/testdata/**".to_string()],
                discovery: DiscoveryConfig {
                    enabled: false,
                    recursive: true,
                    module_max_depth: 2,
                    manifest_max_depth: Some(1),
                },
            }
        );
    }

    #[test]
    fn config_from_toml_str_parses_document() {
        let result = Config::from_toml_str(
            r#"
exclude = ["legacy"]

[discovery]
manifestMaxDepth = 0
"#,
        )
        .unwrap();

        assert_eq!(result.exclude_patterns(), ["legacy".to_string()]);
        assert_eq!(
            result.discovery_options(),
            DiscoveryOptions {
                enabled: true,
                recursive: true,
                max_depth: DEFAULT_MODULE_MAX_DEPTH,
                manifest_max_depth: Some(0),
            }
        );
    }
}
