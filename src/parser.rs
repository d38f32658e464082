use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::errors::Result;
use crate::fs_util::is_regular_file;
use crate::models::{PublishTo, Pubspec};

/// File name of a package manifest.
pub const PUBSPEC_FILE: &str = "pubspec.yaml";

/// Raw shape of the keys we read. Unknown keys are ignored.
#[derive(Debug, Deserialize)]
struct RawPubspec {
    name: String,
    version: Option<String>,
    publish_to: Option<String>,
    repository: Option<String>,
    homepage: Option<String>,
    issue_tracker: Option<String>,
}

/// Locate pubspec.yaml in a package directory.
#[must_use]
pub fn find_pubspec(dir: &Path) -> Option<PathBuf> {
    let path = dir.join(PUBSPEC_FILE);
    if is_regular_file(&path) {
        Some(path)
    } else {
        None
    }
}

/// Parse pubspec.yaml text into a [`Pubspec`].
///
/// The top level must be a mapping with a string `name`. Link values are
/// kept as written; their format is a policy question, not a parse error.
///
/// # Errors
///
/// Returns [`RepoToolsError::Yaml`](crate::errors::RepoToolsError::Yaml) for
/// malformed YAML or mistyped keys.
pub fn parse_pubspec(content: &str) -> Result<Pubspec> {
    let raw: RawPubspec = serde_yaml_ng::from_str(content)?;
    Ok(Pubspec {
        name: raw.name,
        version: raw.version,
        publish_to: PublishTo::from_raw(raw.publish_to.as_deref()),
        repository: raw.repository,
        homepage: raw.homepage,
        issue_tracker: raw.issue_tracker,
    })
}
