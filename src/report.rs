//! Human and machine output for a finished scan.

use std::fmt::Write as _;
use std::process::ExitCode;

use serde::Serialize;

use crate::types::ScanSummary;

/// Exit status when at least one link is broken.
pub const EXIT_BROKEN: u8 = 1;

/// Exit status when the scan itself failed.
pub const EXIT_ERROR: u8 = 2;

/// Output format selected on the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Format {
    /// One JSON object on stdout.
    Json,
    /// Markdown-flavoured lines; failures on stderr, success on stdout.
    #[default]
    Text,
}

/// JSON document written for `--format json`.
#[derive(Serialize)]
struct JsonReport<'a> {
    /// Same as the exit status being zero.
    ok: bool,
    /// The scan results, inlined.
    #[serde(flatten)]
    summary: &'a ScanSummary,
}

/// Rendered report, split by destination stream.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Rendered {
    /// Text for stderr.
    pub stderr: String,
    /// Text for stdout.
    pub stdout: String,
}

/// Map a summary to the process exit status.
pub fn exit_code(summary: &ScanSummary) -> ExitCode {
    if summary.is_ok() {
        return ExitCode::SUCCESS;
    }
    return ExitCode::from(EXIT_BROKEN);
}

/// Print the report in the requested format and return the exit status.
pub fn print(summary: &ScanSummary, format: Format) -> ExitCode {
    let rendered = match format {
        Format::Json => render_json(summary),
        Format::Text => render_text(summary),
    };
    eprint!("{}", rendered.stderr);
    print!("{}", rendered.stdout);
    return exit_code(summary);
}

/// Single-quote a raw target, escaping anything that would break the line.
///
/// Line breaks, control characters, backslashes and single quotes are
/// escaped; double quotes stay as written.
fn quote_target(target: &str) -> String {
    let mut quoted = String::with_capacity(target.len().saturating_add(2));
    quoted.push('\'');
    for ch in target.chars() {
        match ch {
            '\'' => quoted.push_str("\\'"),
            '"' => quoted.push('"'),
            _ => quoted.extend(ch.escape_debug()),
        }
    }
    quoted.push('\'');
    return quoted;
}

/// Render the summary as a single pretty-printed JSON object.
pub fn render_json(summary: &ScanSummary) -> Rendered {
    let report = JsonReport {
        ok: summary.is_ok(),
        summary,
    };
    // Paths and strings only; serialization cannot fail here.
    let mut stdout = serde_json::to_string_pretty(&report).unwrap_or_default();
    stdout.push('\n');
    return Rendered {
        stderr: String::new(),
        stdout,
    };
}

/// Render the summary as console text.
///
/// Broken links and decode skips go to stderr; the success line goes to stdout.
pub fn render_text(summary: &ScanSummary) -> Rendered {
    let mut rendered = Rendered::default();

    if !summary.broken.is_empty() {
        rendered.stderr.push_str("Broken documentation links detected:\n\n");
        for link in &summary.broken {
            let _ = writeln!(
                rendered.stderr,
                "- {}:{}: broken link target: {} (resolved to {})",
                link.document.display(),
                link.line,
                quote_target(&link.target),
                link.resolved.display(),
            );
        }
        let _ = writeln!(rendered.stderr, "\nTotal: {} broken links", summary.broken.len());
    }

    if !summary.skipped.is_empty() {
        if !rendered.stderr.is_empty() {
            rendered.stderr.push('\n');
        }
        let _ = writeln!(
            rendered.stderr,
            "Note: skipped {} markdown file(s) due to UTF-8 decode errors:",
            summary.skipped.len()
        );
        for path in &summary.skipped {
            let _ = writeln!(rendered.stderr, "- {}", path.display());
        }
    }

    if summary.is_ok() {
        let _ = writeln!(
            rendered.stdout,
            "OK: scanned {}/{} markdown files; no broken relative links found",
            summary.scanned, summary.discovered
        );
    }

    return rendered;
}
