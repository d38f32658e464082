//! Symlink-safe filesystem helpers.
//!
//! Package discovery uses `symlink_metadata()` so a symlinked directory under
//! `packages/` is never walked or checked twice.

use std::path::Path;

/// Returns `true` if the path is a regular file (not a symlink).
#[must_use]
pub(crate) fn is_regular_file(path: &Path) -> bool {
    path.symlink_metadata()
        .map(|m| m.file_type().is_file())
        .unwrap_or(false)
}

/// Returns `true` if the path is a regular directory (not a symlink).
#[must_use]
pub(crate) fn is_regular_dir(path: &Path) -> bool {
    path.symlink_metadata()
        .map(|m| m.file_type().is_dir())
        .unwrap_or(false)
}

/// Returns `true` if the final path component starts with a dot.
#[must_use]
pub(crate) fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with('.'))
}
