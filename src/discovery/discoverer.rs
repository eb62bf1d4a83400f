//! Discovery orchestrator
//!
//! One [`Discoverer::discover`] call runs two independent walks over the tree:
//! the marker walk collects `.version` files into [`Module`]s, the manifest
//! walk probes every directory up to the manifest depth for catalog entries.
//! The results are then combined into sync candidates and mismatches.

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::cancel::CancellationToken;
use crate::config::{
    DEFAULT_MANIFEST_MAX_DEPTH, DiscoveryOptions, DiscoverySettings, ROOT_MODULE_NAME,
    VERSION_FILE,
};
use crate::discovery::catalog::{KnownManifest, known_manifests};
use crate::discovery::error::DiscoveryError;
use crate::discovery::exclude::ExcludeMatcher;
use crate::discovery::types::{
    DiscoveryResult, ManifestSource, Mismatch, Module, SyncCandidate, display_path,
    primary_version,
};
use crate::discovery::walker::{TreeWalker, WalkEntry};
use crate::fs::{self, FileSystem};
use crate::version::semver::is_semver;
use crate::version::{FileConfig, VersionFileError, VersionReader};

pub struct Discoverer {
    fs: Arc<dyn FileSystem>,
    reader: VersionReader,
    excludes: ExcludeMatcher,
    walker: TreeWalker,
    options: DiscoveryOptions,
}

impl Discoverer {
    pub fn new(fs: Arc<dyn FileSystem>, settings: &impl DiscoverySettings) -> Self {
        let excludes = ExcludeMatcher::new(settings.exclude_patterns());
        Self {
            reader: VersionReader::new(fs.clone()),
            walker: TreeWalker::new(fs.clone(), excludes.clone()),
            fs,
            excludes,
            options: settings.discovery_options(),
        }
    }

    /// Discover markers and manifests under `root`.
    ///
    /// `manifest_max_depth` overrides the configured manifest depth. Returns
    /// `DiscoveryError::Cancelled` and nothing else if the token fires at any
    /// point during the run.
    pub fn discover(
        &self,
        root: &Path,
        manifest_max_depth: Option<usize>,
        cancel: &CancellationToken,
    ) -> Result<DiscoveryResult, DiscoveryError> {
        cancel.check()?;
        debug!("Discovering versions under {}", root.display());

        let modules = self.discover_modules(root, cancel)?;

        let depth = manifest_max_depth
            .or(self.options.manifest_max_depth)
            .unwrap_or(DEFAULT_MANIFEST_MAX_DEPTH);
        let manifests = self.discover_manifests(root, depth, cancel)?;

        let sync_candidates = sync_candidates(&modules, &manifests);
        let mismatches = find_mismatches(&modules, &manifests);
        let result = DiscoveryResult::new(modules, manifests, sync_candidates, mismatches);

        debug!(
            "Discovery finished: mode={}, modules={}, manifests={}, mismatches={}",
            result.mode().as_str(),
            result.modules().len(),
            result.manifests().len(),
            result.mismatches().len()
        );

        Ok(result)
    }

    /// Collect `.version` markers. The root marker comes first when present.
    pub fn discover_modules(
        &self,
        root: &Path,
        cancel: &CancellationToken,
    ) -> Result<Vec<Module>, DiscoveryError> {
        if !self.options.enabled {
            debug!("Version marker discovery is disabled");
            return Ok(Vec::new());
        }
        cancel.check()?;

        let mut modules = Vec::new();

        let root_marker = root.join(VERSION_FILE);
        if fs::is_file(self.fs.as_ref(), &root_marker, cancel)?
            && let Some(module) = self.read_module(root, &root_marker, cancel)?
        {
            modules.push(module);
        }

        if !self.options.recursive {
            return Ok(modules);
        }

        self.walker.walk(
            root,
            self.options.max_depth,
            cancel,
            |entry: &WalkEntry| -> Result<(), DiscoveryError> {
                if entry.is_dir || entry.name != VERSION_FILE || entry.path == root_marker {
                    return Ok(());
                }
                if let Some(module) = self.read_module(root, &entry.path, cancel)? {
                    modules.push(module);
                }
                Ok(())
            },
        )?;

        Ok(modules)
    }

    /// Probe the root and every directory down to `max_depth` for known
    /// manifests, in walk order then catalog priority order.
    pub fn discover_manifests(
        &self,
        root: &Path,
        max_depth: usize,
        cancel: &CancellationToken,
    ) -> Result<Vec<ManifestSource>, DiscoveryError> {
        cancel.check()?;

        let catalog = known_manifests();
        let mut manifests = Vec::new();
        let mut seen = HashSet::new();

        seen.insert(root.to_path_buf());
        self.scan_directory(root, root, &catalog, cancel, &mut manifests)?;

        self.walker.walk(
            root,
            max_depth,
            cancel,
            |entry: &WalkEntry| -> Result<(), DiscoveryError> {
                if entry.is_dir && entry.depth <= max_depth && seen.insert(entry.path.clone()) {
                    self.scan_directory(root, &entry.path, &catalog, cancel, &mut manifests)?;
                }
                Ok(())
            },
        )?;

        Ok(manifests)
    }

    fn read_module(
        &self,
        root: &Path,
        marker: &Path,
        cancel: &CancellationToken,
    ) -> Result<Option<Module>, DiscoveryError> {
        let info = match self.reader.read(&FileConfig::raw(marker), cancel) {
            Ok(info) => info,
            Err(e) => {
                skip_unless_cancelled(marker, e)?;
                return Ok(None);
            }
        };

        let relative_path = marker.strip_prefix(root).unwrap_or(marker).to_path_buf();
        let name = match relative_path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => display_path(dir),
            _ => ROOT_MODULE_NAME.to_string(),
        };
        let dir = marker.parent().unwrap_or(root).to_path_buf();

        trace!("Found version marker {} ({})", marker.display(), name);

        Ok(Some(Module {
            name,
            path: marker.to_path_buf(),
            relative_path,
            version: info.version,
            dir,
        }))
    }

    fn scan_directory(
        &self,
        root: &Path,
        dir: &Path,
        catalog: &[&'static KnownManifest],
        cancel: &CancellationToken,
        out: &mut Vec<ManifestSource>,
    ) -> Result<(), DiscoveryError> {
        let mut found: HashSet<&str> = HashSet::new();

        for known in catalog {
            if found.contains(known.filename) {
                continue;
            }

            let path = dir.join(known.filename);
            let relative_path = path.strip_prefix(root).unwrap_or(&path).to_path_buf();
            if self
                .excludes
                .is_excluded(known.filename, &path, &relative_path)
            {
                continue;
            }
            if !fs::is_file(self.fs.as_ref(), &path, cancel)? {
                continue;
            }

            let config = FileConfig {
                path: path.clone(),
                format: known.format,
                field: known.field.to_string(),
                pattern: None,
            };
            let info = match self.reader.read(&config, cancel) {
                Ok(info) => info,
                Err(e) => {
                    skip_unless_cancelled(&path, e)?;
                    continue;
                }
            };
            if !is_semver(&info.version) {
                trace!(
                    "Skipping {}: {:?} is not a semantic version",
                    path.display(),
                    info.version
                );
                continue;
            }

            found.insert(known.filename);
            out.push(ManifestSource {
                path,
                relative_path,
                filename: known.filename.to_string(),
                version: info.version,
                format: known.format,
                field: known.field.to_string(),
                description: known.description.to_string(),
            });
        }

        Ok(())
    }
}

fn skip_unless_cancelled(path: &Path, error: VersionFileError) -> Result<(), DiscoveryError> {
    if error.is_cancelled() {
        return Err(DiscoveryError::Cancelled);
    }
    trace!("Skipping {}: {}", path.display(), error);
    Ok(())
}

/// Manifest candidates first, then every marker except the root one
fn sync_candidates(modules: &[Module], manifests: &[ManifestSource]) -> Vec<SyncCandidate> {
    manifests
        .iter()
        .map(SyncCandidate::from)
        .chain(
            modules
                .iter()
                .filter(|module| !module.is_root())
                .map(SyncCandidate::from),
        )
        .collect()
}

/// Exact string comparison against the primary version
fn find_mismatches(modules: &[Module], manifests: &[ManifestSource]) -> Vec<Mismatch> {
    let primary = primary_version(modules, manifests);
    let primary_index = modules
        .iter()
        .position(Module::is_root)
        .or_else(|| (!modules.is_empty()).then_some(0));

    let manifest_mismatches = manifests
        .iter()
        .filter(|manifest| manifest.version != primary)
        .map(|manifest| Mismatch {
            source: display_path(&manifest.relative_path),
            expected: primary.to_string(),
            actual: manifest.version.clone(),
        });

    let module_mismatches = modules
        .iter()
        .enumerate()
        .filter(|(index, module)| Some(*index) != primary_index && module.version != primary)
        .map(|(_, module)| Mismatch {
            source: module.name.clone(),
            expected: primary.to_string(),
            actual: module.version.clone(),
        });

    manifest_mismatches.chain(module_mismatches).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, DiscoveryConfig};
    use crate::format::FileFormat;
    use crate::fs::MemoryFileSystem;
    use crate::fs::traits::MockFileSystem;
    use rstest::rstest;

    fn discoverer(fs: MemoryFileSystem) -> Discoverer {
        Discoverer::new(Arc::new(fs), &Config::default())
    }

    fn discover(fs: MemoryFileSystem) -> DiscoveryResult {
        discoverer(fs)
            .discover(Path::new("/p"), None, &CancellationToken::new())
            .unwrap()
    }

    #[test]
    fn root_marker_is_named_root_and_listed_first() {
        let result = discover(
            MemoryFileSystem::new()
                .with_file("/p/api/.version", "1.0.0\n")
                .with_file("/p/.version", "1.0.0\n"),
        );

        let names: Vec<&str> = result.modules().iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["root", "api"]);
        assert!(result.modules()[0].is_root());
        assert_eq!(result.modules()[1].dir, Path::new("/p/api"));
    }

    #[test]
    fn nested_module_name_uses_forward_slashes() {
        let result = discover(
            MemoryFileSystem::new().with_file("/p/services/billing/.version", "0.3.0"),
        );

        assert_eq!(result.modules()[0].name, "services/billing");
        assert_eq!(
            result.modules()[0].relative_path,
            Path::new("services/billing/.version")
        );
    }

    #[test]
    fn non_recursive_discovery_only_checks_the_root() {
        let config = Config {
            discovery: DiscoveryConfig {
                recursive: false,
                ..DiscoveryConfig::default()
            },
            ..Config::default()
        };
        let fs = MemoryFileSystem::new()
            .with_file("/p/.version", "1.0.0")
            .with_file("/p/api/.version", "2.0.0");

        let modules = Discoverer::new(Arc::new(fs), &config)
            .discover_modules(Path::new("/p"), &CancellationToken::new())
            .unwrap();

        assert_eq!(modules.len(), 1);
        assert!(modules[0].is_root());
    }

    #[test]
    fn disabled_discovery_never_touches_storage() {
        let mut fs = MockFileSystem::new();
        fs.expect_stat().never();
        fs.expect_read_dir().never();
        fs.expect_read_file().never();
        let config = Config {
            discovery: DiscoveryConfig {
                enabled: false,
                ..DiscoveryConfig::default()
            },
            ..Config::default()
        };

        let modules = Discoverer::new(Arc::new(fs), &config)
            .discover_modules(Path::new("/p"), &CancellationToken::new())
            .unwrap();

        assert!(modules.is_empty());
    }

    #[test]
    fn pyproject_reports_only_the_first_matching_field() {
        let result = discover(MemoryFileSystem::new().with_file(
            "/p/pyproject.toml",
            "[project]\nversion = \"1.0.0\"\n\n[tool.poetry]\nversion = \"1.0.0\"\n",
        ));

        assert_eq!(result.manifests().len(), 1);
        assert_eq!(result.manifests()[0].field, "project.version");
        assert_eq!(result.manifests()[0].description, "Python project (PEP 621)");
    }

    #[test]
    fn poetry_field_is_used_when_project_table_is_missing() {
        let result = discover(MemoryFileSystem::new().with_file(
            "/p/pyproject.toml",
            "[tool.poetry]\nname = \"app\"\nversion = \"0.4.1\"\n",
        ));

        assert_eq!(result.manifests().len(), 1);
        assert_eq!(result.manifests()[0].field, "tool.poetry.version");
        assert_eq!(result.manifests()[0].format, FileFormat::Toml);
    }

    #[rstest]
    #[case::malformed_json("/p/package.json", "{ \"version\": ")]
    #[case::missing_field("/p/package.json", "{ \"name\": \"app\" }")]
    #[case::not_semver("/p/package.json", "{ \"version\": \"latest\" }")]
    #[case::not_scalar("/p/Chart.yaml", "version:\n  major: 1\n")]
    #[case::empty_raw("/p/VERSION", "\n")]
    #[case::partial_version("/p/package.json", "{ \"version\": \"1.2\" }")]
    #[case::numeric_yaml("/p/Chart.yaml", "version: 2\n")]
    #[case::yaml_float("/p/Chart.yaml", "version: 1.10\n")]
    #[case::partial_raw("/p/VERSION", "v1\n")]
    fn unusable_manifests_are_skipped(#[case] path: &str, #[case] content: &str) {
        let result = discover(
            MemoryFileSystem::new()
                .with_file(path, content)
                .with_file("/p/version.txt", "1.0.0\n"),
        );

        let files: Vec<&str> = result
            .manifests()
            .iter()
            .map(|m| m.filename.as_str())
            .collect();
        assert_eq!(files, vec!["version.txt"]);
    }

    #[test]
    fn manifests_in_a_directory_follow_catalog_priority() {
        let result = discover(
            MemoryFileSystem::new()
                .with_file("/p/version.txt", "1.0.0")
                .with_file("/p/Cargo.toml", "[package]\nversion = \"1.0.0\"\n")
                .with_file("/p/package.json", "{\"version\": \"1.0.0\"}"),
        );

        let files: Vec<&str> = result
            .manifests()
            .iter()
            .map(|m| m.filename.as_str())
            .collect();
        assert_eq!(files, vec!["package.json", "Cargo.toml", "version.txt"]);
    }

    #[test]
    fn explicit_manifest_depth_overrides_configuration() {
        let config = Config {
            discovery: DiscoveryConfig {
                manifest_max_depth: Some(0),
                ..DiscoveryConfig::default()
            },
            ..Config::default()
        };
        let fs = Arc::new(
            MemoryFileSystem::new()
                .with_file("/p/package.json", "{\"version\": \"1.0.0\"}")
                .with_file("/p/web/package.json", "{\"version\": \"1.0.0\"}"),
        );
        let discoverer = Discoverer::new(fs, &config);
        let cancel = CancellationToken::new();

        let configured = discoverer.discover(Path::new("/p"), None, &cancel).unwrap();
        let explicit = discoverer
            .discover(Path::new("/p"), Some(1), &cancel)
            .unwrap();

        assert_eq!(configured.manifests().len(), 1);
        assert_eq!(explicit.manifests().len(), 2);
    }

    #[test]
    fn first_marker_is_primary_without_a_root_marker() {
        let result = discover(
            MemoryFileSystem::new()
                .with_file("/p/a/.version", "1.0.0")
                .with_file("/p/b/.version", "1.1.0"),
        );

        assert_eq!(result.primary_version(), "1.0.0");
        assert_eq!(
            result.mismatches(),
            &[Mismatch {
                source: "b".to_string(),
                expected: "1.0.0".to_string(),
                actual: "1.1.0".to_string(),
            }]
        );
    }

    #[test]
    fn cancelled_token_aborts_before_any_storage_access() {
        let mut fs = MockFileSystem::new();
        fs.expect_stat().never();
        fs.expect_read_dir().never();
        let cancel = CancellationToken::new();
        cancel.cancel();

        let result =
            Discoverer::new(Arc::new(fs), &Config::default()).discover(Path::new("/p"), None, &cancel);

        assert_eq!(result, Err(DiscoveryError::Cancelled));
    }
}
