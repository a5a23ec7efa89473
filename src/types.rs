/// Core domain types for doclinks documents, links, and scan results.
use std::path::PathBuf;

use serde::Serialize;

/// A relative link whose target does not exist on disk.
/// Produced if and only if resolution reported the target as missing.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct BrokenLink {
    /// Document containing the link, relative to the root.
    pub document: PathBuf,
    /// One-based line in the document where the link starts.
    pub line: usize,
    /// Link target exactly as written in the document.
    pub target: String,
    /// Absolute path that resolution looked for.
    pub resolved: PathBuf,
}

/// A markdown file under the root, read once per scan.
#[derive(Debug)]
pub struct Document {
    /// Absolute path on disk.
    pub path: PathBuf,
    /// Path relative to the documentation root.
    pub relative: PathBuf,
    /// Decoded text, or `None` when the bytes are not valid UTF-8.
    pub text: Option<String>,
}

impl Document {
    /// Whether the document content decoded as UTF-8.
    pub const fn decoded(&self) -> bool {
        return self.text.is_some();
    }
}

/// A link occurrence pulled out of a document, not yet validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawLink {
    /// One-based line in the original document where the link starts.
    pub line: usize,
    /// Target text between the parentheses, untouched.
    pub target: String,
}

/// Outcome of checking one normalized target against the filesystem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionResult {
    /// Whether anything (file or directory) exists at `path`.
    pub exists: bool,
    /// Absolute path the target resolved to.
    pub path: PathBuf,
}

/// Everything one run produced. Owned by the caller; nothing survives between runs.
#[derive(Debug, Default, Serialize)]
pub struct ScanSummary {
    /// Broken links, sorted by document, line, then target.
    pub broken: Vec<BrokenLink>,
    /// Number of documents the enumerator found.
    pub discovered: usize,
    /// Documentation root the scan ran against.
    pub root: PathBuf,
    /// Number of documents that decoded and were checked.
    pub scanned: usize,
    /// Documents skipped because they are not valid UTF-8, relative to the root.
    pub skipped: Vec<PathBuf>,
}

impl ScanSummary {
    /// A run succeeds when no link is broken; decode skips are only warnings.
    pub fn is_ok(&self) -> bool {
        return self.broken.is_empty();
    }
}
