//! Core value types shared across the validator pipeline.
//!
//! All report-facing types serialize with `camelCase` field names so the
//! JSON output is stable for machine consumers.

use indexmap::IndexMap;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

use crate::constants::DEFAULT_LICENSE;
use crate::errors::LoadError;
use crate::rules::Rule;

/// One parsed frontmatter value.
///
/// The parser supports a deliberately narrow subset: scalars everywhere, and
/// one flat level of nesting under `metadata` (a mapping or a list).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrontmatterValue {
    /// Plain `key: value` scalar, surrounding quotes stripped.
    Scalar(String),
    /// One level of nested `key: value` pairs.
    Map(IndexMap<String, String>),
    /// One level of `- item` entries.
    List(Vec<String>),
}

/// Parsed frontmatter block: an ordered key-to-value mapping.
///
/// Unknown keys are retained in source order; only the four schema fields
/// (`name`, `description`, `license`, `metadata`) have typed accessors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frontmatter {
    entries: IndexMap<String, FrontmatterValue>,
}

impl Frontmatter {
    /// Wrap an already-parsed mapping.
    pub fn from_entries(entries: IndexMap<String, FrontmatterValue>) -> Self {
        Self { entries }
    }

    /// Raw value for `key`, if present.
    pub fn get(&self, key: &str) -> Option<&FrontmatterValue> {
        self.entries.get(key)
    }

    /// Scalar value for `key`; `None` when absent or not a scalar.
    fn scalar(&self, key: &str) -> Option<&str> {
        match self.entries.get(key) {
            Some(FrontmatterValue::Scalar(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    /// The `name` field, when present.
    pub fn name(&self) -> Option<&str> {
        self.scalar("name")
    }

    /// The `description` field, when present.
    pub fn description(&self) -> Option<&str> {
        self.scalar("description")
    }

    /// The `license` field, substituting `"MIT"` when absent.
    pub fn license(&self) -> &str {
        self.scalar("license").unwrap_or(DEFAULT_LICENSE)
    }

    /// The `metadata` field in whatever shape it parsed as.
    ///
    /// The `metadata-type` rule fires when this is not a [`FrontmatterValue::Map`].
    pub fn metadata(&self) -> Option<&FrontmatterValue> {
        self.entries.get("metadata")
    }

    /// Keys in source order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Number of top-level keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the block held no keys at all.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One skill package read from disk, ready for rule checking.
///
/// Read-only value object: constructed fresh per run, never mutated.
#[derive(Debug, Clone)]
pub struct SkillPackage {
    /// Directory name under the skills root; the expected identifier.
    pub directory_name: String,
    /// Parsed frontmatter block.
    pub frontmatter: Frontmatter,
    /// Markdown body after the frontmatter block.
    pub body: String,
    /// Line count of the full `SKILL.md` file.
    pub line_count: usize,
}

impl SkillPackage {
    /// One-line summary for listings: `name: description`.
    ///
    /// Falls back to the directory name when the frontmatter omits `name`.
    pub fn summary(&self) -> String {
        let name = self.frontmatter.name().unwrap_or(self.directory_name.as_str());
        match self.frontmatter.description() {
            Some(desc) => format!("{name}: {desc}"),
            None => name.to_string(),
        }
    }
}

/// A scanned candidate directory: either a loaded package or its load failure.
#[derive(Debug)]
pub struct PackageEntry {
    /// Directory name under the skills root.
    pub directory_name: String,
    /// Load outcome; an `Err` becomes a single package-level violation.
    pub outcome: Result<SkillPackage, LoadError>,
}

/// A single rule failure attributed to one package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Violation {
    /// Which rule failed.
    pub rule: Rule,
    /// Human-readable message naming the offending value or absence.
    pub message: String,
}

impl Violation {
    /// Build a violation for `rule` with the given message.
    pub fn new(rule: Rule, message: impl Into<String>) -> Self {
        Self {
            rule,
            message: message.into(),
        }
    }
}

/// Validation outcome for one package.
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// Directory name the result is attributed to.
    pub package: String,
    /// Violations in fixed rule order; empty means the package passed.
    pub violations: Vec<Violation>,
}

impl ValidationResult {
    /// Build a result for `package` with the given violations.
    pub fn new(package: impl Into<String>, violations: Vec<Violation>) -> Self {
        Self {
            package: package.into(),
            violations,
        }
    }

    /// Whether the package passed every rule.
    pub fn passed(&self) -> bool {
        self.violations.is_empty()
    }
}

impl Serialize for ValidationResult {
    // `passed` is derived from the violations, so it is computed at
    // serialization time instead of stored alongside them.
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("ValidationResult", 3)?;
        state.serialize_field("package", &self.package)?;
        state.serialize_field("passed", &self.passed())?;
        state.serialize_field("violations", &self.violations)?;
        state.end()
    }
}
