//! Report assembly and rendering.
//!
//! A report is a pure fold over per-package results: same results in, same
//! bytes out, with no timestamps or environment details. Running the
//! validator twice over an unchanged tree produces identical output.

use std::fmt::Write;

use serde::ser::{Serialize, SerializeStruct, Serializer};
use skillcheck_core::types::ValidationResult;

/// Aggregate outcome of one validation run.
#[derive(Debug)]
pub struct Report {
    /// Per-package results, sorted by directory name by the scanner.
    pub packages: Vec<ValidationResult>,
    /// Number of packages checked.
    pub checked: usize,
    /// Number of packages with at least one violation.
    pub failed: usize,
}

impl Report {
    /// Fold per-package results into a report.
    ///
    /// Results keep their incoming order; callers are expected to hand
    /// over the scanner's sorted sequence.
    pub fn from_results(packages: Vec<ValidationResult>) -> Self {
        let checked = packages.len();
        let failed = packages.iter().filter(|result| !result.passed()).count();
        Self { packages, checked, failed }
    }

    /// Whether the run as a whole succeeded.
    ///
    /// True only when every package passed and at least one package was
    /// found; an empty skills root is a failed run.
    pub fn success(&self) -> bool {
        self.failed == 0 && self.checked > 0
    }

    /// Plain-text rendering.
    ///
    /// One `PASS`/`FAIL` line per package, indented `rule: message` lines
    /// under each failure, and a closing summary line. No trailing
    /// newline.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        for result in &self.packages {
            if result.passed() {
                let _ = writeln!(out, "PASS {}", result.package);
            } else {
                let _ = writeln!(out, "FAIL {}", result.package);
                for violation in &result.violations {
                    let _ = writeln!(out, "  {}: {}", violation.rule, violation.message);
                }
            }
        }
        if !self.packages.is_empty() {
            out.push('\n');
        }
        let unit = if self.checked == 1 { "package" } else { "packages" };
        let _ = write!(
            out,
            "checked {} {unit}: {} passed, {} failed",
            self.checked,
            self.checked - self.failed,
            self.failed,
        );
        out
    }

    /// Pretty-printed JSON rendering with camelCase fields.
    pub fn render_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

// `success` is derived state, so it is computed at serialization time
// rather than stored.
impl Serialize for Report {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Report", 4)?;
        state.serialize_field("packages", &self.packages)?;
        state.serialize_field("checked", &self.checked)?;
        state.serialize_field("failed", &self.failed)?;
        state.serialize_field("success", &self.success())?;
        state.end()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
