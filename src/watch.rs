//! File watcher: runs `check` on startup, then re-runs on changes under the root.

use std::path::Path;
use std::process::ExitCode;
use std::time::Duration;

use notify::{RecursiveMode, Watcher as _};

use crate::commands;
use crate::config;
use crate::diagnostics;
use crate::error;
use crate::report::{self, Format};
use crate::root;

/// Debounce delay between filesystem events and re-check.
const DEBOUNCE_MS: u64 = 100;

/// Create a filesystem watcher that signals on the channel for relevant changes.
///
/// # Errors
///
/// Returns `Error::Watch` if the watcher cannot be created.
fn create_watcher(
    root: &Path,
    tx: crossbeam_channel::Sender<()>,
) -> Result<notify::RecommendedWatcher, error::Error> {
    let watched_root = root.to_path_buf();
    return notify::recommended_watcher(move |res: Result<notify::Event, notify::Error>| {
        if let Ok(event) = res
            && matches!(
                event.kind,
                notify::EventKind::Create(_)
                    | notify::EventKind::Modify(_)
                    | notify::EventKind::Remove(_)
            )
            && event.paths.iter().any(|path| return is_relevant(&watched_root, path))
        {
            let _ = tx.send(());
        }
    })
    .map_err(|source| {
        return error::Error::Watch {
            path: root.to_path_buf(),
            source,
        };
    });
}

/// A change matters unless it happened inside an excluded directory.
///
/// Any file counts, not only markdown: creating or deleting a link target
/// changes the result just as editing a document does.
fn is_relevant(root: &Path, path: &Path) -> bool {
    let relative = path.strip_prefix(root).unwrap_or(path);
    return !config::is_excluded(relative);
}

/// Entry point for the watch command.
///
/// Runs an initial check, then re-checks the whole tree after each burst of
/// changes. Every check is a fresh scan.
///
/// # Errors
///
/// Returns `Error::Watch` if the watcher cannot be set up.
pub fn run(start: &Path, format: Format) -> Result<ExitCode, error::Error> {
    eprintln!("watch: initial check");
    let mut last_code = run_check(start, format);

    let root = root::find_root(start);
    let (tx, rx) = crossbeam_channel::unbounded();
    let mut watcher = create_watcher(&root, tx)?;
    watcher
        .watch(&root, RecursiveMode::Recursive)
        .map_err(|source| {
            return error::Error::Watch {
                path: root.clone(),
                source,
            };
        })?;

    eprintln!("watch: monitoring {}, press Ctrl+C to stop", root.display());

    while rx.recv().is_ok() {
        let debounce = Duration::from_millis(DEBOUNCE_MS);
        while rx.recv_timeout(debounce).is_ok() {}
        eprintln!("watch: change detected, re-checking...");
        last_code = run_check(start, format);
    }

    return Ok(last_code);
}

/// Run check once and print result. Returns the exit code from check.
fn run_check(start: &Path, format: Format) -> ExitCode {
    return match commands::check(start, format) {
        Ok(code) => code,
        Err(e) => {
            diagnostics::print_error(&e);
            ExitCode::from(report::EXIT_ERROR)
        },
    };
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc, reason = "test code")]
mod tests {
    use super::*;

    #[test]
    fn changes_in_excluded_directories_are_ignored() {
        let root = Path::new("/repo");
        assert!(!is_relevant(root, Path::new("/repo/.git/index")));
        assert!(!is_relevant(root, Path::new("/repo/web/node_modules/x/README.md")));
        assert!(!is_relevant(root, Path::new("/repo/unloads/old.md")));
    }

    #[test]
    fn any_other_change_is_relevant() {
        let root = Path::new("/repo");
        assert!(is_relevant(root, Path::new("/repo/docs/guide.md")));
        assert!(is_relevant(root, Path::new("/repo/assets/logo.png")));
        assert!(is_relevant(root, Path::new("/repo")));
    }
}
