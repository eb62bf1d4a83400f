//! Known manifest files that carry a version

use crate::format::FileFormat;

/// One manifest kind discovery looks for in every scanned directory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KnownManifest {
    pub filename: &'static str,
    pub format: FileFormat,
    /// Field address, empty for raw files
    pub field: &'static str,
    pub description: &'static str,
    /// Lower is tried first
    pub priority: u8,
}

/// Manifests in priority order
pub const KNOWN_MANIFESTS: &[KnownManifest] = &[
    KnownManifest {
        filename: "package.json",
        format: FileFormat::Json,
        field: "version",
        description: "Node.js package",
        priority: 1,
    },
    KnownManifest {
        filename: "composer.json",
        format: FileFormat::Json,
        field: "version",
        description: "PHP Composer package",
        priority: 2,
    },
    KnownManifest {
        filename: "Cargo.toml",
        format: FileFormat::Toml,
        field: "package.version",
        description: "Rust crate",
        priority: 3,
    },
    KnownManifest {
        filename: "pyproject.toml",
        format: FileFormat::Toml,
        field: "project.version",
        description: "Python project (PEP 621)",
        priority: 4,
    },
    KnownManifest {
        filename: "pyproject.toml",
        format: FileFormat::Toml,
        field: "tool.poetry.version",
        description: "Python project (Poetry)",
        priority: 5,
    },
    KnownManifest {
        filename: "Chart.yaml",
        format: FileFormat::Yaml,
        field: "version",
        description: "Helm chart",
        priority: 6,
    },
    KnownManifest {
        filename: "pubspec.yaml",
        format: FileFormat::Yaml,
        field: "version",
        description: "Dart/Flutter package",
        priority: 7,
    },
    KnownManifest {
        filename: "VERSION",
        format: FileFormat::Raw,
        field: "",
        description: "Plain version file",
        priority: 8,
    },
    KnownManifest {
        filename: "version.txt",
        format: FileFormat::Raw,
        field: "",
        description: "Plain version file",
        priority: 9,
    },
];

/// Catalog entries sorted by priority
pub fn known_manifests() -> Vec<&'static KnownManifest> {
    let mut manifests: Vec<&'static KnownManifest> = KNOWN_MANIFESTS.iter().collect();
    manifests.sort_by_key(|manifest| manifest.priority);
    manifests
}
