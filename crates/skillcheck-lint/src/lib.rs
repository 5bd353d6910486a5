//! # skillcheck-lint
//!
//! The validation pipeline for skill packages: scan a skills root, parse
//! each package's SKILL.md frontmatter, apply the fixed rule table, and
//! fold the results into a deterministic report.
//!
//! ## Module Overview
//!
//! - [`scanner`] — Sorted, lazy discovery of package directories
//! - [`parser`] — SKILL.md frontmatter parsing (narrow YAML subset)
//! - [`checker`] — The fixed rule table over scanned packages
//! - [`report`] — Text/JSON rendering and the run-level success predicate
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! let report = skillcheck_lint::validate_tree(Path::new("skills"))?;
//! println!("{}", report.render_text());
//! # Ok::<(), skillcheck_core::errors::ScanError>(())
//! ```
//!
//! ## Crate Position
//!
//! Pipeline crate. Depends on `skillcheck-core`; depended on by
//! `skillcheck-cli`.

#![deny(unsafe_code)]

pub mod checker;
pub mod parser;
pub mod report;
pub mod scanner;

pub use report::Report;

use std::path::Path;

use skillcheck_core::errors::ScanError;

/// Run the whole pipeline over one skills root.
///
/// Fails only when the root itself is unusable; per-package problems are
/// folded into the report as violations.
pub fn validate_tree(root: &Path) -> Result<Report, ScanError> {
    let results = scanner::scan(root)?.map(|entry| checker::check_entry(&entry)).collect();
    Ok(Report::from_results(results))
}
