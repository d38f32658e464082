//! Package enumeration for a repository's `packages/` directory.
//!
//! Layout follows the plugins monorepo convention:
//!
//! ```text
//! packages/
//!   foo/                 package (has pubspec.yaml)
//!     example/           example app, listed after its package
//!   bar/                 federated container (no pubspec.yaml)
//!     bar/               app-facing package
//!     bar_android/       platform implementation
//! ```

use std::path::{Path, PathBuf};

use log::{debug, warn};
use serde::Serialize;

use crate::errors::{RepoToolsError, Result};
use crate::fs_util::{is_hidden, is_regular_dir};
use crate::parser::find_pubspec;

/// Name of the example app subdirectory inside a package.
const EXAMPLE_DIR: &str = "example";

/// A package directory to check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageRef {
    /// Directory name; published repository links must end with it.
    pub name: String,
    /// Filesystem path of the package directory.
    pub path: PathBuf,
    /// Path relative to the packages directory, `/`-separated.
    pub relative_path: String,
    /// Federated container name, if the package lives inside one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
}

impl PackageRef {
    /// Build a reference for `path`, which must lie under `root`.
    #[must_use]
    pub fn new(root: &Path, path: &Path, group: Option<String>) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let relative_path = path
            .strip_prefix(root)
            .unwrap_or(path)
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join("/");
        Self {
            name,
            path: path.to_path_buf(),
            relative_path,
            group,
        }
    }
}

/// Supplies the packages to check and their manifest text.
pub trait PackageSource {
    /// Packages in the order they should be checked.
    fn packages(&self) -> Result<Vec<PackageRef>>;

    /// pubspec.yaml text for `package`, or `None` if it has no manifest.
    fn read_manifest(&self, package: &PackageRef) -> Result<Option<String>> {
        match find_pubspec(&package.path) {
            Some(path) => Ok(Some(std::fs::read_to_string(path)?)),
            None => Ok(None),
        }
    }
}

/// Packages discovered on disk under a packages directory.
#[derive(Debug, Clone)]
pub struct DirectoryPackages {
    root: PathBuf,
    include: Vec<String>,
    exclude: Vec<String>,
}

impl DirectoryPackages {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            include: Vec::new(),
            exclude: Vec::new(),
        }
    }

    /// Only check packages with these names (or in these federated groups).
    /// An empty list means every package.
    #[must_use]
    pub fn with_include(mut self, names: Vec<String>) -> Self {
        self.include = names;
        self
    }

    /// Skip packages with these names (or in these federated groups).
    #[must_use]
    pub fn with_exclude(mut self, names: Vec<String>) -> Self {
        self.exclude = names;
        self
    }

    fn matches(names: &[String], package: &PackageRef) -> bool {
        names
            .iter()
            .any(|n| *n == package.name || package.group.as_deref() == Some(n.as_str()))
    }

    fn is_selected(&self, package: &PackageRef) -> bool {
        if Self::matches(&self.exclude, package) {
            return false;
        }
        self.include.is_empty() || Self::matches(&self.include, package)
    }

    /// Push `dir` and, if present, its example app.
    fn push_with_example(&self, dir: &Path, group: Option<&str>, out: &mut Vec<PackageRef>) {
        out.push(PackageRef::new(&self.root, dir, group.map(str::to_string)));
        let example = dir.join(EXAMPLE_DIR);
        if is_regular_dir(&example) {
            // Examples are filtered by their parent package's name.
            out.push(PackageRef::new(&self.root, &example, Some(package_dir_name(dir))));
        }
    }
}

impl PackageSource for DirectoryPackages {
    fn packages(&self) -> Result<Vec<PackageRef>> {
        if !is_regular_dir(&self.root) {
            return Err(RepoToolsError::MissingPackagesDir {
                path: self.root.display().to_string(),
            });
        }

        let mut found = Vec::new();
        for dir in list_subdirs(&self.root)? {
            if find_pubspec(&dir).is_some() {
                self.push_with_example(&dir, None, &mut found);
                continue;
            }
            let members = match list_subdirs(&dir) {
                Ok(m) => m,
                Err(e) => {
                    warn!("cannot read directory {}: {e}", dir.display());
                    Vec::new()
                }
            };
            if members.is_empty() {
                found.push(PackageRef::new(&self.root, &dir, None));
                continue;
            }
            let group = package_dir_name(&dir);
            for member in members {
                self.push_with_example(&member, Some(&group), &mut found);
            }
        }

        let selected: Vec<PackageRef> = found.into_iter().filter(|p| self.is_selected(p)).collect();
        debug!(
            "discovered {} packages under {}",
            selected.len(),
            self.root.display()
        );
        Ok(selected)
    }
}

fn package_dir_name(dir: &Path) -> String {
    dir.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Non-hidden, non-symlink subdirectories of `dir`, sorted by path.
fn list_subdirs(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut subdirs = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if is_regular_dir(&path) && !is_hidden(&path) {
            subdirs.push(path);
        }
    }
    subdirs.sort();
    Ok(subdirs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn make_package(root: &Path, rel: &str) {
        let dir = root.join(rel);
        fs::create_dir_all(&dir).unwrap();
        let name = dir.file_name().unwrap().to_str().unwrap().to_string();
        fs::write(dir.join("pubspec.yaml"), format!("name: {name}\n")).unwrap();
    }

    fn relative_paths(source: &DirectoryPackages) -> Vec<String> {
        source
            .packages()
            .unwrap()
            .into_iter()
            .map(|p| p.relative_path)
            .collect()
    }

    #[test]
    fn package_ref_relative_path_and_name() {
        let root = Path::new("/repo/packages");
        let p = PackageRef::new(root, &root.join("foo").join("foo_android"), Some("foo".into()));
        assert_eq!(p.name, "foo_android");
        assert_eq!(p.relative_path, "foo/foo_android");
        assert_eq!(p.group.as_deref(), Some("foo"));
    }

    #[test]
    fn lists_plain_packages_sorted() {
        let root = tempdir().unwrap();
        make_package(root.path(), "zeta");
        make_package(root.path(), "alpha");
        let source = DirectoryPackages::new(root.path());
        assert_eq!(relative_paths(&source), vec!["alpha", "zeta"]);
    }

    #[test]
    fn lists_federated_members() {
        let root = tempdir().unwrap();
        make_package(root.path(), "bar/bar");
        make_package(root.path(), "bar/bar_android");
        make_package(root.path(), "foo");
        let source = DirectoryPackages::new(root.path());
        assert_eq!(
            relative_paths(&source),
            vec!["bar/bar", "bar/bar_android", "foo"]
        );
    }

    #[test]
    fn lists_examples_after_package() {
        let root = tempdir().unwrap();
        make_package(root.path(), "foo");
        make_package(root.path(), "foo/example");
        make_package(root.path(), "bar/bar");
        make_package(root.path(), "bar/bar/example");
        let source = DirectoryPackages::new(root.path());
        assert_eq!(
            relative_paths(&source),
            vec!["bar/bar", "bar/bar/example", "foo", "foo/example"]
        );
    }

    #[test]
    fn empty_container_is_listed_for_skipping() {
        let root = tempdir().unwrap();
        fs::create_dir(root.path().join("stray")).unwrap();
        let source = DirectoryPackages::new(root.path());
        assert_eq!(relative_paths(&source), vec!["stray"]);
    }

    #[test]
    fn hidden_directories_are_skipped() {
        let root = tempdir().unwrap();
        make_package(root.path(), ".dart_tool");
        make_package(root.path(), "foo");
        let source = DirectoryPackages::new(root.path());
        assert_eq!(relative_paths(&source), vec!["foo"]);
    }

    #[test]
    fn include_matches_name_or_group() {
        let root = tempdir().unwrap();
        make_package(root.path(), "bar/bar");
        make_package(root.path(), "bar/bar_ios");
        make_package(root.path(), "foo");
        make_package(root.path(), "foo/example");
        make_package(root.path(), "baz");

        let by_group = DirectoryPackages::new(root.path()).with_include(vec!["bar".into()]);
        assert_eq!(relative_paths(&by_group), vec!["bar/bar", "bar/bar_ios"]);

        let by_name = DirectoryPackages::new(root.path()).with_include(vec!["foo".into()]);
        assert_eq!(relative_paths(&by_name), vec!["foo", "foo/example"]);
    }

    #[test]
    fn exclude_wins_over_include() {
        let root = tempdir().unwrap();
        make_package(root.path(), "bar/bar");
        make_package(root.path(), "bar/bar_ios");
        let source = DirectoryPackages::new(root.path())
            .with_include(vec!["bar".into()])
            .with_exclude(vec!["bar_ios".into()]);
        assert_eq!(relative_paths(&source), vec!["bar/bar"]);
    }

    #[test]
    fn missing_root_is_error() {
        let root = tempdir().unwrap();
        let source = DirectoryPackages::new(root.path().join("packages"));
        let err = source.packages().unwrap_err();
        assert!(matches!(err, RepoToolsError::MissingPackagesDir { .. }));
    }

    #[test]
    fn read_manifest_none_without_pubspec() {
        let root = tempdir().unwrap();
        fs::create_dir(root.path().join("stray")).unwrap();
        let source = DirectoryPackages::new(root.path());
        let pkg = PackageRef::new(root.path(), &root.path().join("stray"), None);
        assert!(source.read_manifest(&pkg).unwrap().is_none());
    }

    #[test]
    fn read_manifest_returns_text() {
        let root = tempdir().unwrap();
        make_package(root.path(), "foo");
        let source = DirectoryPackages::new(root.path());
        let pkg = &source.packages().unwrap()[0];
        assert_eq!(source.read_manifest(pkg).unwrap().as_deref(), Some("name: foo\n"));
    }
}
