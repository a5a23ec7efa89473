//! Fixed scan rules. These are constants rather than a config file: every
//! checkout is scanned the same way.

use std::path::{Component, Path};

/// File extension (without the dot) of documents that are scanned.
pub const DOC_EXTENSION: &str = "md";

/// Directory names skipped at any depth below the root.
pub const EXCLUDED_DIR_NAMES: &[&str] =
    &[".git", ".uv", ".venv", "build", "dist", "node_modules", "unloads"];

/// Entry whose presence marks a directory as the repository root.
pub const ROOT_MARKER: &str = ".git";

/// Check whether a file name carries the documentation extension.
pub fn is_document(path: &Path) -> bool {
    return path.extension().is_some_and(|ext| return ext == DOC_EXTENSION);
}

/// Check whether a path relative to the root passes through an excluded directory.
///
/// Every segment is compared, not only the immediate parent, so
/// `docs/build/notes.md` and `build/notes.md` are both excluded.
pub fn is_excluded(relative_path: &Path) -> bool {
    return relative_path.components().any(|component| {
        let Component::Normal(segment) = component else {
            return false;
        };
        return segment
            .to_str()
            .is_some_and(|name| return EXCLUDED_DIR_NAMES.contains(&name));
    });
}
