use std::path::{Path, PathBuf};

use crate::error::Error;
use crate::extract;
use crate::fence;
use crate::normalize;
use crate::resolve;
use crate::root;
use crate::types::{BrokenLink, Document, ScanSummary};
use crate::walker;

/// Check every link in one decoded document and record the broken ones.
fn check_document(root: &Path, document: &Document, broken: &mut Vec<BrokenLink>) {
    let Some(text) = document.text.as_deref() else {
        return;
    };

    let stripped = fence::strip_fences(text);
    for link in extract::extract_links(&stripped) {
        let Some(target) = normalize::normalize(&link.target) else {
            tracing::trace!(
                document = %document.relative.display(),
                line = link.line,
                target = %link.target,
                kind = ?normalize::classify(&link.target),
                "Skipping non-file link"
            );
            continue;
        };

        let result = resolve::resolve_target(root, &document.path, &target);
        if !result.exists {
            tracing::debug!(
                document = %document.relative.display(),
                line = link.line,
                resolved = %result.path.display(),
                "Broken link"
            );
            broken.push(BrokenLink {
                document: document.relative.clone(),
                line: link.line,
                target: link.target,
                resolved: result.path,
            });
        }
    }
}

/// Read a document once. Invalid UTF-8 is recorded on the document, not raised.
///
/// # Errors
///
/// Returns `Error::Io` if the file cannot be read at all.
fn read_document(root: &Path, path: PathBuf) -> Result<Document, Error> {
    let bytes = std::fs::read(&path).map_err(|e| return Error::io(&path, e))?;
    let relative = path.strip_prefix(root).unwrap_or(&path).to_path_buf();
    return Ok(Document {
        path,
        relative,
        text: String::from_utf8(bytes).ok(),
    });
}

/// Scan the documentation tree containing `start` and collect broken relative links.
///
/// The root is the nearest ancestor of `start` holding the root marker.
/// Every run starts from empty state; the summary is the only output.
///
/// # Errors
///
/// Returns `Error::InvalidStart` if `start` is not a directory, and
/// `Error::Walk` or `Error::Io` if the tree cannot be enumerated or a
/// document cannot be read. No partial summary is produced in that case.
pub fn run(start: &Path) -> Result<ScanSummary, Error> {
    if !start.is_dir() {
        return Err(Error::InvalidStart {
            path: start.to_path_buf(),
            reason: "not a directory".to_string(),
        });
    }

    let root = root::find_root(start);
    tracing::info!(root = %root.display(), "Scanning documentation tree");

    let paths = walker::documents(&root).collect::<Result<Vec<_>, _>>()?;
    let mut summary = ScanSummary {
        discovered: paths.len(),
        root: root.clone(),
        ..ScanSummary::default()
    };

    for path in paths {
        let document = read_document(&root, path)?;
        if !document.decoded() {
            tracing::debug!(
                document = %document.relative.display(),
                "Skipping document that is not valid UTF-8"
            );
            summary.skipped.push(document.relative);
            continue;
        }

        tracing::debug!(document = %document.relative.display(), "Checking document");
        summary.scanned = summary.scanned.saturating_add(1);
        check_document(&root, &document, &mut summary.broken);
    }

    summary.broken.sort();
    summary.skipped.sort();
    return Ok(summary);
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc, reason = "test code")]
mod tests {
    use super::*;

    /// A temporary checkout: a directory holding a `.git` marker.
    fn checkout() -> tempfile::TempDir {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::create_dir(tmp.path().join(".git")).unwrap();
        return tmp;
    }

    /// Set unix permission bits on `path`.
    #[cfg(unix)]
    fn chmod(path: &Path, mode: u32) {
        use std::os::unix::fs::PermissionsExt as _;
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(mode)).unwrap();
    }

    /// Write `content` to `relative`, creating parent directories.
    fn write(root: &Path, relative: &str, content: &[u8]) {
        let path = root.join(relative);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    #[test]
    fn clean_tree_passes_and_counts_documents() {
        let tmp = checkout();
        write(tmp.path(), "README.md", b"See [guide](docs/guide.md) and [home](https://example.com).");
        write(tmp.path(), "docs/guide.md", b"Back to [readme](../README.md#top).");

        let summary = run(tmp.path()).unwrap();
        assert!(summary.is_ok());
        assert_eq!(summary.discovered, 2);
        assert_eq!(summary.scanned, 2);
        assert!(summary.skipped.is_empty());
        assert_eq!(summary.root, tmp.path());
    }

    #[test]
    fn reports_missing_targets_with_context() {
        let tmp = checkout();
        write(tmp.path(), "docs/index.md", b"# Index\n\nRead [setup](setup.md \"Setup\").\n");

        let summary = run(tmp.path()).unwrap();
        assert!(!summary.is_ok());
        assert_eq!(
            summary.broken,
            vec![BrokenLink {
                document: PathBuf::from("docs/index.md"),
                line: 3,
                target: "setup.md \"Setup\"".to_string(),
                resolved: tmp.path().join("docs/setup.md"),
            }]
        );
    }

    #[test]
    fn parent_relative_link_is_resolved_exactly() {
        let tmp = checkout();
        write(tmp.path(), "a/b.md", b"[x](../c.md)");
        write(tmp.path(), "a/c.md", b"# decoy next to the linking document");

        let summary = run(tmp.path()).unwrap();
        assert_eq!(summary.broken.len(), 1);
        assert_eq!(summary.broken[0].resolved, tmp.path().join("a").join("../c.md"));

        write(tmp.path(), "c.md", b"# the real target");
        assert!(run(tmp.path()).unwrap().is_ok());
    }

    #[test]
    fn root_relative_links_use_the_documentation_root() {
        let tmp = checkout();
        write(tmp.path(), "README.md", b"");
        write(tmp.path(), "docs/deep/page.md", b"[home](/README.md) [gone](/docs/gone.md)");

        let summary = run(tmp.path()).unwrap();
        assert_eq!(summary.broken.len(), 1);
        assert_eq!(summary.broken[0].target, "/docs/gone.md");
        assert_eq!(summary.broken[0].resolved, tmp.path().join("docs/gone.md"));
    }

    #[test]
    fn non_file_targets_are_never_resolved() {
        let tmp = checkout();
        write(
            tmp.path(),
            "README.md",
            b"[a](#usage) [b](mailto:x@example.com) [c](tel:123) [d](http://x) [e](<https://y>)",
        );

        let summary = run(tmp.path()).unwrap();
        assert!(summary.is_ok());
    }

    #[test]
    fn excluded_directories_never_contribute() {
        let tmp = checkout();
        write(tmp.path(), "unloads/old.md", b"[gone](nowhere.md)");
        write(tmp.path(), "docs/unloads/older.md", b"[gone](nowhere.md)");
        write(tmp.path(), "node_modules/pkg/README.md", b"[gone](nowhere.md)");
        write(tmp.path(), "README.md", b"fine");

        let summary = run(tmp.path()).unwrap();
        assert!(summary.is_ok());
        assert_eq!(summary.discovered, 1);
    }

    #[test]
    fn undecodable_document_is_skipped_without_failing() {
        let tmp = checkout();
        write(tmp.path(), "latin1.md", b"caf\xe9 [gone](nowhere.md)");
        write(tmp.path(), "README.md", b"fine");

        let summary = run(tmp.path()).unwrap();
        assert!(summary.is_ok());
        assert_eq!(summary.skipped, vec![PathBuf::from("latin1.md")]);
        assert_eq!(summary.scanned, 1);
        assert_eq!(summary.discovered, 2);
    }

    #[test]
    fn links_in_fences_are_ignored() {
        let tmp = checkout();
        let doc = b"```\n[a](missing-a.md)\n```\n~~~\n[b](missing-b.md)\n~~~\n";
        write(tmp.path(), "README.md", doc);

        assert!(run(tmp.path()).unwrap().is_ok());
    }

    #[test]
    fn tilde_line_leaves_backtick_fence_open() {
        let tmp = checkout();
        let doc = b"```\n[a](missing-a.md)\n~~~\n[b](missing-b.md)\n";
        write(tmp.path(), "README.md", doc);

        assert!(run(tmp.path()).unwrap().is_ok());
    }

    #[test]
    fn starting_below_the_root_scans_the_whole_tree() {
        let tmp = checkout();
        write(tmp.path(), "README.md", b"[gone](gone.md)");
        write(tmp.path(), "docs/guide.md", b"fine");

        let summary = run(&tmp.path().join("docs")).unwrap();
        assert_eq!(summary.root, tmp.path());
        assert_eq!(summary.broken.len(), 1);
        assert_eq!(summary.broken[0].document, PathBuf::from("README.md"));
    }

    #[test]
    fn repeated_runs_are_identical() {
        let tmp = checkout();
        write(tmp.path(), "b.md", b"[x](x.md)\n[y](y.md)");
        write(tmp.path(), "a.md", b"[z](z.md)");

        let first = run(tmp.path()).unwrap();
        let second = run(tmp.path()).unwrap();
        assert_eq!(first.broken, second.broken);
        assert_eq!(first.broken.len(), 3);
        assert_eq!(first.broken[0].document, PathBuf::from("a.md"));
    }

    #[test]
    fn missing_start_directory_is_rejected() {
        let tmp = checkout();
        let err = run(&tmp.path().join("absent")).unwrap_err();
        assert!(matches!(err, Error::InvalidStart { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_directory_aborts_the_scan() {
        let tmp = checkout();
        write(tmp.path(), "README.md", b"[gone](gone.md)");
        write(tmp.path(), "locked/page.md", b"fine");
        let locked = tmp.path().join("locked");
        chmod(&locked, 0o000);
        if std::fs::read_dir(&locked).is_ok() {
            // Permission bits are not enforced for this user (e.g. root).
            chmod(&locked, 0o755);
            return;
        }

        let result = run(tmp.path());
        chmod(&locked, 0o755);
        match result {
            Err(Error::Walk { path, .. }) => assert_eq!(path, locked),
            other => panic!("expected a walk error, got {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn unreadable_document_aborts_the_scan() {
        let tmp = checkout();
        write(tmp.path(), "secret.md", b"[gone](gone.md)");
        let secret = tmp.path().join("secret.md");
        chmod(&secret, 0o000);
        if std::fs::read(&secret).is_ok() {
            chmod(&secret, 0o644);
            return;
        }

        let result = run(tmp.path());
        chmod(&secret, 0o644);
        match result {
            Err(Error::Io { path, .. }) => assert_eq!(path, secret),
            other => panic!("expected a read error, got {other:?}"),
        }
    }
}
