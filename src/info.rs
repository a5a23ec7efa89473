use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config;
use crate::normalize;
use crate::report;
use crate::root;

/// Output the doclinks reference document.
pub fn run(start: &Path, json: bool) {
    let state = gather_state(start);

    if json {
        print_json(&state);
    } else {
        print_markdown(&state);
    }
}

// ── State gathering ───────────────────────────────────────────────────

struct CurrentState {
    marker_found: bool,
    root: PathBuf,
}

fn gather_state(start: &Path) -> CurrentState {
    let root = root::find_root(start);
    let marker_found = root.join(config::ROOT_MARKER).exists();
    return CurrentState { marker_found, root };
}

// ── Markdown output ───────────────────────────────────────────────────

fn print_markdown(state: &CurrentState) {
    let version = env!("CARGO_PKG_VERSION");
    print_markdown_header(version);
    print_markdown_rules();
    print_markdown_state(state);
    println!();
    print_markdown_exit_codes();
}

fn print_markdown_header(version: &str) {
    print!(
        "\
# doclinks {version}

Detect broken relative links in markdown documentation: catch links to
renamed or deleted files before a reader clicks them.

## What Is Checked

    [text](path/to/doc.md)             relative to the linking document
    ![alt](img/logo.png)               images too
    [text](/docs/guide.md)             relative to the repository root
    [text](guide.md#section)           anchor dropped, file checked
    [text](guide.md \"Title\")           title dropped, file checked

Skipped: http(s)://, mailto:, tel:, pure #anchors, and anything inside
``` or ~~~ fenced code blocks.

## Workflow

    doclinks check                    Scan once (exit 0/1/2)
    doclinks check --format json      Machine-readable report
    doclinks watch                    Re-check on every change
    doclinks info                     This document

"
    );
}

fn print_markdown_rules() {
    println!("## Scan Rules\n");
    println!("Extension:  .{}", config::DOC_EXTENSION);
    println!("Root:       nearest ancestor containing `{}`", config::ROOT_MARKER);
    println!("Excluded:   {}", config::EXCLUDED_DIR_NAMES.join(", "));
    println!();
}

fn print_markdown_state(state: &CurrentState) {
    println!("## Current State\n");
    if state.marker_found {
        println!("Root:       {} ({} found)", state.root.display(), config::ROOT_MARKER);
    } else {
        println!(
            "Root:       {} ({} not found, using the starting directory)",
            state.root.display(),
            config::ROOT_MARKER
        );
    }
}

fn print_markdown_exit_codes() {
    print!(
        "\
## Exit Codes

| Code | Meaning |
|------|---------|
| 0    | No broken links |
| {}    | Broken links found |
| {}    | Runtime error |
",
        report::EXIT_BROKEN,
        report::EXIT_ERROR,
    );
}

// ── JSON output ───────────────────────────────────────────────────────

#[derive(Serialize)]
struct InfoJson {
    version: String,
    rules: RulesJson,
    exit_codes: Vec<ExitCodeInfo>,
    current_state: StateJson,
}

#[derive(Serialize)]
struct RulesJson {
    excluded_dirs: Vec<String>,
    extension: String,
    root_marker: String,
    skipped_prefixes: Vec<String>,
}

#[derive(Serialize)]
struct ExitCodeInfo {
    code: u8,
    meaning: String,
}

#[derive(Serialize)]
struct StateJson {
    marker_found: bool,
    root: PathBuf,
}

fn print_json(state: &CurrentState) {
    let info = InfoJson {
        version: env!("CARGO_PKG_VERSION").to_string(),
        rules: RulesJson {
            excluded_dirs: config::EXCLUDED_DIR_NAMES.iter().map(ToString::to_string).collect(),
            extension: config::DOC_EXTENSION.to_string(),
            root_marker: config::ROOT_MARKER.to_string(),
            skipped_prefixes: normalize::EXTERNAL_PREFIXES
                .iter()
                .chain(std::iter::once(&"#"))
                .map(ToString::to_string)
                .collect(),
        },
        exit_codes: vec![
            ExitCodeInfo { code: 0, meaning: "No broken links".to_string() },
            ExitCodeInfo { code: report::EXIT_BROKEN, meaning: "Broken links found".to_string() },
            ExitCodeInfo { code: report::EXIT_ERROR, meaning: "Runtime error".to_string() },
        ],
        current_state: StateJson {
            marker_found: state.marker_found,
            root: state.root.clone(),
        },
    };

    // serde_json::to_string_pretty won't fail on this structure.
    let json = serde_json::to_string_pretty(&info).unwrap_or_default();
    println!("{json}");
}
