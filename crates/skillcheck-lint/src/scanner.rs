//! Skills-root discovery and package loading.
//!
//! A scan enumerates the immediate subdirectories of the skills root and
//! sorts them by name, so report order never depends on filesystem
//! enumeration order. Each candidate's SKILL.md is read lazily as the
//! iterator advances, and a failure to load one package is recorded in
//! that package's entry without disturbing its siblings. Only an unusable
//! root aborts the scan.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;
use skillcheck_core::constants::SKILL_MD_FILENAME;
use skillcheck_core::errors::{LoadError, ScanError};
use skillcheck_core::types::{PackageEntry, SkillPackage};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::parser;

/// Paths into the optional auxiliary directories, as mentioned in bodies.
static AUX_REFERENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(references|scripts|assets)/[\w./-]+").unwrap());

/// Lazy iterator over the packages of one skills root.
///
/// Directory names are collected and sorted up front; file contents are
/// read only as entries are consumed. A scan holds no cross-run state, so
/// calling [`scan`] again re-reads everything from disk.
#[derive(Debug)]
pub struct Scan {
    root: PathBuf,
    names: std::vec::IntoIter<String>,
}

impl Iterator for Scan {
    type Item = PackageEntry;

    fn next(&mut self) -> Option<PackageEntry> {
        let directory_name = self.names.next()?;
        let outcome = load_package(&self.root, &directory_name);
        if let Err(err) = &outcome {
            debug!(package = %directory_name, error = %err, "package failed to load");
        }
        Some(PackageEntry { directory_name, outcome })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.names.size_hint()
    }
}

impl ExactSizeIterator for Scan {}

/// Enumerate candidate package directories under `root`.
///
/// Every immediate subdirectory is a candidate except hidden ones
/// (leading dot). Plain files in the root are ignored. The returned
/// iterator yields entries sorted by directory name.
pub fn scan(root: &Path) -> Result<Scan, ScanError> {
    match fs::metadata(root) {
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return Err(ScanError::RootNotFound { path: root.to_path_buf() });
        }
        Err(err) => {
            return Err(ScanError::RootUnreadable { path: root.to_path_buf(), source: err });
        }
        Ok(meta) if !meta.is_dir() => {
            return Err(ScanError::RootNotDirectory { path: root.to_path_buf() });
        }
        Ok(_) => {}
    }

    let mut names = Vec::new();
    for entry in WalkDir::new(root).min_depth(1).max_depth(1) {
        match entry {
            Ok(entry) if entry.file_type().is_dir() => {
                let name = entry.file_name().to_string_lossy().into_owned();
                if name.starts_with('.') {
                    debug!(directory = %name, "skipping hidden directory");
                    continue;
                }
                names.push(name);
            }
            Ok(_) => {}
            Err(err) => {
                if err.path() == Some(root) {
                    let source = err
                        .into_io_error()
                        .unwrap_or_else(|| io::Error::other("directory walk failed"));
                    return Err(ScanError::RootUnreadable { path: root.to_path_buf(), source });
                }
                warn!(error = %err, "skipping unreadable directory entry");
            }
        }
    }
    names.sort_unstable();

    debug!(root = %root.display(), candidates = names.len(), "scanned skills root");
    Ok(Scan { root: root.to_path_buf(), names: names.into_iter() })
}

/// Load and parse one package's SKILL.md.
fn load_package(root: &Path, directory_name: &str) -> Result<SkillPackage, LoadError> {
    let package_dir = root.join(directory_name);
    let text = match fs::read_to_string(package_dir.join(SKILL_MD_FILENAME)) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            return Err(LoadError::MissingSkillFile);
        }
        Err(err) => return Err(LoadError::Io(err)),
    };
    let parsed = parser::parse_document(&text)?;
    check_aux_references(&package_dir, directory_name, &parsed.body);
    Ok(SkillPackage {
        directory_name: directory_name.to_string(),
        frontmatter: parsed.frontmatter,
        body: parsed.body,
        line_count: text.lines().count(),
    })
}

/// Best-effort check that auxiliary paths mentioned in the body exist.
///
/// Missing targets are logged, never reported as violations: auxiliary
/// content sits outside the rule table.
fn check_aux_references(package_dir: &Path, directory_name: &str, body: &str) {
    for target in aux_references(body) {
        if !package_dir.join(target).exists() {
            warn!(package = %directory_name, path = %target, "referenced file not found");
        }
    }
}

/// Auxiliary paths (`references/`, `scripts/`, `assets/`) mentioned in a
/// body, with trailing sentence punctuation stripped.
fn aux_references(body: &str) -> Vec<&str> {
    AUX_REFERENCE
        .find_iter(body)
        .map(|found| found.as_str().trim_end_matches(['.', ',', ':']))
        .collect()
}

// ─────────────────────────────────────────────────────────────────────────────
