use crate::error::Error;

/// ANSI bold, used for headings on a terminal.
const BOLD: &str = "\x1b[1m";
/// ANSI reset.
const RESET: &str = "\x1b[0m";

/// Render an error as valid markdown with bold headings and print to stderr.
pub fn print_error(e: &Error) {
    let md = render_error(e);
    for line in md.lines() {
        if line.starts_with('#') {
            eprintln!("{BOLD}{line}{RESET}");
        } else {
            eprintln!("{line}");
        }
    }
    return;
}

/// Render an error as a structured markdown diagnostic.
///
/// Each block says what failed and, where there is one, how to fix it.
/// No report is printed alongside: a failed walk means the candidate set is unreliable.
pub fn render_error(e: &Error) -> String {
    return match e {
        Error::InvalidStart { path, reason } => format!(
            "\
# Error: Invalid Starting Directory

`{}`: {reason}

## Fix

Run doclinks from inside the documentation tree, or pass an existing directory:

    doclinks check --root-hint <dir>
",
            path.display()
        ),
        Error::Io { path, source } => format!(
            "\
# Error: Unreadable Document

Could not read `{}`: {source}

## Fix

Check the file's permissions; no partial report was produced.
",
            path.display()
        ),
        Error::Walk { path, source } => format!(
            "\
# Error: Tree Walk Failed

Could not enumerate `{}`: {source}

## Fix

Check directory permissions under the documentation root; no partial report was produced.
",
            path.display()
        ),
        Error::Watch { path, source } => format!(
            "\
# Error: Watcher Failed

Could not watch `{}`: {source}
",
            path.display()
        ),
    };
}

#[cfg(test)]
#[allow(clippy::missing_panics_doc, reason = "test code")]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn io_error_names_the_file() {
        let e = Error::io(
            "docs/secret.md",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "permission denied"),
        );
        let md = render_error(&e);
        assert!(md.starts_with("# Error: Unreadable Document"));
        assert!(md.contains("`docs/secret.md`: permission denied"));
    }

    #[test]
    fn invalid_start_suggests_root_hint() {
        let e = Error::InvalidStart {
            path: PathBuf::from("nope"),
            reason: "not a directory".to_string(),
        };
        let md = render_error(&e);
        assert!(md.contains("`nope`: not a directory"));
        assert!(md.contains("doclinks check --root-hint <dir>"));
    }
}
