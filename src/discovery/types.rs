//! Discovery result model

use std::path::{Path, PathBuf};

use crate::config::VERSION_FILE;
use crate::format::FileFormat;
use crate::version::FileConfig;

/// How many version markers a project has
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiscoveryMode {
    /// No `.version` file anywhere
    NoMarkers,
    /// Exactly one `.version` file
    SingleMarker,
    /// Several independently versioned modules
    MultipleMarkers,
}

impl DiscoveryMode {
    pub fn from_count(count: usize) -> Self {
        match count {
            0 => DiscoveryMode::NoMarkers,
            1 => DiscoveryMode::SingleMarker,
            _ => DiscoveryMode::MultipleMarkers,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DiscoveryMode::NoMarkers => "no_markers",
            DiscoveryMode::SingleMarker => "single_marker",
            DiscoveryMode::MultipleMarkers => "multiple_markers",
        }
    }
}

/// A discovered `.version` file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Module {
    /// Relative directory with `/` separators, or `root` for the scan root
    pub name: String,
    pub path: PathBuf,
    /// Path of the marker relative to the scan root
    pub relative_path: PathBuf,
    /// Trimmed file contents
    pub version: String,
    pub dir: PathBuf,
}

impl Module {
    /// The marker directly under the scan root
    pub fn is_root(&self) -> bool {
        self.relative_path == Path::new(VERSION_FILE)
    }
}

/// A known manifest whose version could be extracted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestSource {
    pub path: PathBuf,
    pub relative_path: PathBuf,
    pub filename: String,
    pub version: String,
    pub format: FileFormat,
    /// Field address, empty for raw files
    pub field: String,
    pub description: String,
}

/// A file that should carry the canonical version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncCandidate {
    pub path: PathBuf,
    pub relative_path: PathBuf,
    pub filename: String,
    pub version: String,
    pub format: FileFormat,
    pub field: String,
    pub pattern: Option<String>,
    pub description: String,
}

impl SyncCandidate {
    /// Descriptor the writer needs to update this candidate
    pub fn file_config(&self) -> FileConfig {
        FileConfig {
            path: self.path.clone(),
            format: self.format,
            field: self.field.clone(),
            pattern: self.pattern.clone(),
        }
    }
}

impl From<&ManifestSource> for SyncCandidate {
    fn from(manifest: &ManifestSource) -> Self {
        Self {
            path: manifest.path.clone(),
            relative_path: manifest.relative_path.clone(),
            filename: manifest.filename.clone(),
            version: manifest.version.clone(),
            format: manifest.format,
            field: manifest.field.clone(),
            pattern: None,
            description: manifest.description.clone(),
        }
    }
}

impl From<&Module> for SyncCandidate {
    fn from(module: &Module) -> Self {
        Self {
            path: module.path.clone(),
            relative_path: module.relative_path.clone(),
            filename: VERSION_FILE.to_string(),
            version: module.version.clone(),
            format: FileFormat::Raw,
            field: String::new(),
            pattern: None,
            description: format!("Version file ({})", display_path(&module.relative_path)),
        }
    }
}

/// A source whose version differs from the primary version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mismatch {
    pub source: String,
    pub expected: String,
    pub actual: String,
}

/// Everything one discovery run found
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryResult {
    mode: DiscoveryMode,
    modules: Vec<Module>,
    manifests: Vec<ManifestSource>,
    sync_candidates: Vec<SyncCandidate>,
    mismatches: Vec<Mismatch>,
}

impl DiscoveryResult {
    /// Assemble a result. The mode is derived from the module count.
    pub fn new(
        modules: Vec<Module>,
        manifests: Vec<ManifestSource>,
        sync_candidates: Vec<SyncCandidate>,
        mismatches: Vec<Mismatch>,
    ) -> Self {
        Self {
            mode: DiscoveryMode::from_count(modules.len()),
            modules,
            manifests,
            sync_candidates,
            mismatches,
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new(), Vec::new(), Vec::new(), Vec::new())
    }

    pub fn mode(&self) -> DiscoveryMode {
        self.mode
    }

    pub fn modules(&self) -> &[Module] {
        &self.modules
    }

    pub fn manifests(&self) -> &[ManifestSource] {
        &self.manifests
    }

    pub fn sync_candidates(&self) -> &[SyncCandidate] {
        &self.sync_candidates
    }

    pub fn mismatches(&self) -> &[Mismatch] {
        &self.mismatches
    }

    pub fn has_modules(&self) -> bool {
        !self.modules.is_empty()
    }

    pub fn has_manifests(&self) -> bool {
        !self.manifests.is_empty()
    }

    pub fn has_mismatches(&self) -> bool {
        !self.mismatches.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty() && self.manifests.is_empty()
    }

    /// The root marker, if the scan root has one
    pub fn root_module(&self) -> Option<&Module> {
        self.modules.iter().find(|module| module.is_root())
    }

    /// The version everything else is compared against: root marker, else
    /// first marker, else first manifest, else empty
    pub fn primary_version(&self) -> &str {
        primary_version(&self.modules, &self.manifests)
    }
}

pub(crate) fn primary_version<'a>(modules: &'a [Module], manifests: &'a [ManifestSource]) -> &'a str {
    modules
        .iter()
        .find(|module| module.is_root())
        .or_else(|| modules.first())
        .map(|module| module.version.as_str())
        .or_else(|| manifests.first().map(|manifest| manifest.version.as_str()))
        .unwrap_or("")
}

/// Relative path rendered with `/` separators
pub(crate) fn display_path(path: &Path) -> String {
    path.components()
        .map(|component| component.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
