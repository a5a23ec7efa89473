use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use crate::config;
use crate::error::Error;

/// Lazily enumerate every markdown document under `root`, sorted by name per directory.
///
/// Excluded directories are pruned rather than filtered afterwards, so their
/// contents are never read. The root itself is never excluded, whatever its name.
///
/// # Errors
///
/// Yields `Error::Walk` for any directory that cannot be listed. Callers
/// treat that as fatal: the candidate set is incomplete.
pub fn documents(root: &Path) -> impl Iterator<Item = Result<PathBuf, Error>> {
    let walk_root = root.to_path_buf();
    return WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| return entry.depth() == 0 || !config::is_excluded(Path::new(entry.file_name())))
        .filter_map(move |entry| {
            return match entry {
                Err(err) => {
                    let path = err.path().map_or_else(|| return walk_root.clone(), Path::to_path_buf);
                    Some(Err(Error::Walk { path, source: err }))
                },
                Ok(entry) => is_candidate(&entry).then(|| return Ok(entry.into_path())),
            };
        });
}

/// A regular file, or a symlink to one, with the documentation extension.
fn is_candidate(entry: &DirEntry) -> bool {
    if !config::is_document(entry.path()) {
        return false;
    }
    let file_type = entry.file_type();
    return file_type.is_file() || (file_type.is_symlink() && entry.path().is_file());
}
