mod commands;
mod config;
mod diagnostics;
mod error;
mod extract;
mod fence;
mod info;
mod normalize;
mod report;
mod resolve;
mod root;
mod scanner;
mod types;
mod walker;
mod watch;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::report::Format;

#[derive(Parser)]
#[command(name = "doclinks", version, about = "Detect broken relative links in markdown documentation")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Log scan progress at debug level (otherwise RUST_LOG, default warn)
    #[arg(long, short, global = true)]
    verbose: bool,
}

/// Options shared by commands that run a scan.
#[derive(Args)]
struct ScanArgs {
    /// Output format for the report
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,
    /// Directory to start the root search from (defaults to the current directory)
    #[arg(long, value_name = "DIR")]
    root_hint: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan markdown files once and report broken relative links
    Check(ScanArgs),
    /// Print what doclinks checks and how
    Info {
        /// Output as JSON instead of markdown
        #[arg(long)]
        json: bool,
        /// Directory to start the root search from (defaults to the current directory)
        #[arg(long, value_name = "DIR")]
        root_hint: Option<PathBuf>,
    },
    /// Check once, then re-check whenever files under the root change
    Watch(ScanArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Check(args) => {
            starting_directory(args.root_hint).and_then(|start| return commands::check(&start, args.format))
        },
        Commands::Info { json, root_hint } => starting_directory(root_hint).map(|start| {
            commands::info(&start, json);
            return ExitCode::SUCCESS;
        }),
        Commands::Watch(args) => {
            starting_directory(args.root_hint).and_then(|start| return watch::run(&start, args.format))
        },
    };

    return match result {
        Ok(code) => code,
        Err(e) => {
            diagnostics::print_error(&e);
            ExitCode::from(report::EXIT_ERROR)
        },
    };
}

/// Install the stderr log subscriber.
///
/// `--verbose` forces debug output; otherwise `RUST_LOG` applies, defaulting to warnings only.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_err| return EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Absolute, symlink-free directory the root search starts from.
///
/// # Errors
///
/// Returns `Error::Io` if the current directory is unavailable, or
/// `Error::InvalidStart` if the hinted directory cannot be resolved.
fn starting_directory(hint: Option<PathBuf>) -> Result<PathBuf, error::Error> {
    let dir = match hint {
        Some(dir) => dir,
        None => std::env::current_dir().map_err(|e| return error::Error::io(".", e))?,
    };
    return std::fs::canonicalize(&dir).map_err(|e| {
        return error::Error::InvalidStart {
            path: dir,
            reason: e.to_string(),
        };
    });
}
