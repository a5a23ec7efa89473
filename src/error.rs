/// Crate-level error types for doclinks diagnostics.
use std::path::PathBuf;

/// Fatal failures that abort a run. Broken links and undecodable documents
/// are not errors: they are accumulated in the scan summary instead.
/// Every variant names the path it failed on.
#[allow(clippy::error_impl_error, reason = "crate-internal error type in binary")]
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The starting directory handed to the scanner cannot be used.
    #[error("invalid starting directory: {}: {reason}", path.display())]
    InvalidStart {
        /// Path that was rejected.
        path: PathBuf,
        /// Why the path was rejected.
        reason: String,
    },

    /// Reading a document or inspecting the tree failed.
    #[error("io: {}: {source}", path.display())]
    Io {
        /// Path that was being read.
        path: PathBuf,
        /// The wrapped I/O error.
        source: std::io::Error,
    },

    /// Enumerating the documentation tree failed part-way.
    #[error("walk: {}: {source}", path.display())]
    Walk {
        /// Path at which the walk failed, or the root when unknown.
        path: PathBuf,
        /// The wrapped walk error.
        source: walkdir::Error,
    },

    /// The filesystem watcher could not be created or attached.
    #[error("watcher: {}: {source}", path.display())]
    Watch {
        /// Directory that was being watched.
        path: PathBuf,
        /// The wrapped watcher error.
        source: notify::Error,
    },
}

impl Error {
    /// Wrap an I/O error with the path it occurred on.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        return Self::Io { path: path.into(), source };
    }
}
