use std::path::{Path, PathBuf};

use crate::config::ROOT_MARKER;

/// Find the repository root by walking up from `start`.
///
/// Returns the nearest ancestor (including `start` and the filesystem root)
/// that contains the root marker, or `start` itself when none does. The
/// marker may be a directory or a file, as in git worktrees and submodules.
pub fn find_root(start: &Path) -> PathBuf {
    for dir in start.ancestors() {
        if dir.join(ROOT_MARKER).exists() {
            return dir.to_path_buf();
        }
    }
    return start.to_path_buf();
}
