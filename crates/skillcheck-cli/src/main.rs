//! The `skillcheck` binary.
//!
//! Offline validator for skill packages: scans a skills root, checks every
//! package against the rule table, and prints a deterministic report. The
//! report goes to stdout; logs go to stderr so piped output stays clean.

#![deny(unsafe_code)]

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use skillcheck_core::constants::DEFAULT_SKILLS_ROOT;
use skillcheck_lint::scanner;

#[derive(Debug, Parser)]
#[command(name = "skillcheck", version, about = "Validate skill packages under a skills root")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Validate every skill package and report violations.
    Validate {
        /// Skills root to scan (defaults to ./skills).
        root: Option<PathBuf>,

        /// Report format.
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// List loadable skill packages with their descriptions.
    List {
        /// Skills root to scan (defaults to ./skills).
        root: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() -> Result<ExitCode> {
    init_logging();
    let cli = Cli::parse();
    let ok = match cli.command {
        Command::Validate { root, format } => run_validate(&root_or_default(root), format)?,
        Command::List { root } => run_list(&root_or_default(root))?,
    };
    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn root_or_default(root: Option<PathBuf>) -> PathBuf {
    root.unwrap_or_else(|| PathBuf::from(DEFAULT_SKILLS_ROOT))
}

fn run_validate(root: &Path, format: Format) -> Result<bool> {
    let report = skillcheck_lint::validate_tree(root)
        .with_context(|| format!("failed to validate {}", root.display()))?;

    match format {
        Format::Text => println!("{}", report.render_text()),
        Format::Json => println!("{}", report.render_json()?),
    }

    if report.checked == 0 {
        tracing::warn!(root = %root.display(), "no skill packages found");
    }
    Ok(report.success())
}

fn run_list(root: &Path) -> Result<bool> {
    let scan = scanner::scan(root).with_context(|| format!("failed to list {}", root.display()))?;
    for entry in scan {
        match entry.outcome {
            Ok(package) => println!("{}", package.summary()),
            Err(err) => {
                tracing::warn!(package = %entry.directory_name, error = %err, "skipping package");
            }
        }
    }
    Ok(true)
}

// ─────────────────────────────────────────────────────────────────────────────
