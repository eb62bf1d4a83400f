//! Exclusion rules applied to every directory entry during a walk

use std::path::Path;

use globset::{Glob, GlobSet, GlobSetBuilder};
use tracing::warn;

use crate::config::VERSION_FILE;

/// Dependency caches, VCS metadata and build output that never hold a
/// project's own version files
pub const IGNORED_DIRS: [&str; 7] = [
    "node_modules",
    "vendor",
    ".git",
    "target",
    "dist",
    "build",
    "__pycache__",
];

/// Decides whether a walk skips an entry
#[derive(Debug, Clone)]
pub struct ExcludeMatcher {
    globs: GlobSet,
}

impl ExcludeMatcher {
    /// Compile caller-supplied glob patterns. Invalid patterns are skipped.
    pub fn new(patterns: &[String]) -> Self {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            match Glob::new(pattern) {
                Ok(glob) => {
                    builder.add(glob);
                }
                Err(e) => warn!("Ignoring invalid exclude pattern {:?}: {}", pattern, e),
            }
        }

        let globs = builder.build().unwrap_or_else(|e| {
            warn!("Failed to compile exclude patterns: {}", e);
            GlobSet::empty()
        });

        Self { globs }
    }

    /// Hidden entries (except the version marker), deny-listed names, and
    /// anything whose name, path, or path relative to the scan root matches
    /// an exclude pattern
    pub fn is_excluded(&self, name: &str, path: &Path, relative_path: &Path) -> bool {
        if name.starts_with('.') && name != VERSION_FILE {
            return true;
        }
        if IGNORED_DIRS.contains(&name) {
            return true;
        }

        !self.globs.is_empty()
            && (self.globs.is_match(name)
                || self.globs.is_match(path)
                || self.globs.is_match(relative_path))
    }
}

impl Default for ExcludeMatcher {
    fn default() -> Self {
        Self::new(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn check(matcher: &ExcludeMatcher, relative: &str) -> bool {
        let relative_path = Path::new(relative);
        let name = relative_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        matcher.is_excluded(&name, &Path::new("/project").join(relative_path), relative_path)
    }

    #[rstest]
    #[case(".git", true)]
    #[case(".github", true)]
    #[case(".version", false)]
    #[case("packages/.cache", true)]
    #[case("node_modules", true)]
    #[case("web/node_modules", true)]
    #[case("vendor", true)]
    #[case("target", true)]
    #[case("dist", true)]
    #[case("build", true)]
    #[case("__pycache__", true)]
    #[case("packages", false)]
    #[case("package.json", false)]
    fn builtin_rules(#[case] relative: &str, #[case] expected: bool) {
        assert_eq!(check(&ExcludeMatcher::default(), relative), expected);
    }

    #[rstest]
    #[case("fixtures", true)]
    #[case("tests/fixtures", true)]
    #[case("legacy/api", true)]
    #[case("legacy", false)]
    #[case("examples/demo.tmp", true)]
    #[case("src", false)]
    fn glob_patterns_match_name_or_path(#[case] relative: &str, #[case] expected: bool) {
        let matcher = ExcludeMatcher::new(&[
            "fixtures".to_string(),
            "legacy/*".to_string(),
            "*.tmp".to_string(),
        ]);
        assert_eq!(check(&matcher, relative), expected);
    }

    #[test]
    fn invalid_patterns_are_ignored() {
        let matcher = ExcludeMatcher::new(&["[unclosed".to_string(), "skipme".to_string()]);

        assert!(check(&matcher, "skipme"));
        assert!(!check(&matcher, "keepme"));
    }
}
