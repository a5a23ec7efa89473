use std::path::{Path, is_separator};

use crate::types::ResolutionResult;

/// Resolve a normalized target and check whether anything exists there.
///
/// A target starting with a separator is relative to the documentation
/// root, not the filesystem root. Anything else is relative to the
/// directory containing the linking document. The joined path is used as
/// written: `..` is not collapsed and no near-miss is accepted. Files and
/// directories both count as existing; symlinks are followed.
pub fn resolve_target(root: &Path, document: &Path, target: &str) -> ResolutionResult {
    let path = if target.starts_with(is_separator) {
        root.join(target.trim_start_matches(is_separator))
    } else {
        document.parent().unwrap_or(root).join(target)
    };
    let exists = path.exists();
    return ResolutionResult { exists, path };
}
