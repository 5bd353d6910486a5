//! The fixed rule catalog.
//!
//! Violations are always reported in the order rules are declared here,
//! independent of frontmatter key order in the source file, so reports are
//! deterministic and diffable across runs.

use serde::{Deserialize, Serialize};

/// Identifier for one validation rule or package-level failure class.
///
/// The first eight variants are the schema rules, in report order. The last
/// three are package-level failures: a package that fails to load gets
/// exactly one of them and the schema rules are skipped (there is no parsed
/// data to check).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Rule {
    /// `name` field absent.
    MissingName,
    /// `description` field absent.
    MissingDescription,
    /// `name` length outside 1-64 characters.
    NameLength,
    /// `name` outside `^[a-z0-9]+(-[a-z0-9]+)*$`.
    NameCharset,
    /// `name` does not equal the directory name exactly.
    NameDirMismatch,
    /// `description` length outside 1-1024 characters.
    DescriptionLength,
    /// `SKILL.md` exceeds 500 lines.
    FileTooLong,
    /// `metadata` present but not a flat string-to-string mapping.
    MetadataType,
    /// Frontmatter block missing, unterminated, or unparseable.
    MalformedFrontmatter,
    /// Candidate directory holds no `SKILL.md`.
    MissingSkillFile,
    /// `SKILL.md` could not be read.
    IoError,
}

impl Rule {
    /// Every rule, in report order.
    pub const ALL: [Self; 11] = [
        Self::MissingName,
        Self::MissingDescription,
        Self::NameLength,
        Self::NameCharset,
        Self::NameDirMismatch,
        Self::DescriptionLength,
        Self::FileTooLong,
        Self::MetadataType,
        Self::MalformedFrontmatter,
        Self::MissingSkillFile,
        Self::IoError,
    ];

    /// Stable kebab-case identifier used in reports.
    pub fn id(self) -> &'static str {
        match self {
            Self::MissingName => "missing-name",
            Self::MissingDescription => "missing-description",
            Self::NameLength => "name-length",
            Self::NameCharset => "name-charset",
            Self::NameDirMismatch => "name-dir-mismatch",
            Self::DescriptionLength => "description-length",
            Self::FileTooLong => "file-too-long",
            Self::MetadataType => "metadata-type",
            Self::MalformedFrontmatter => "malformed-frontmatter",
            Self::MissingSkillFile => "missing-skill-file",
            Self::IoError => "io-error",
        }
    }
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}
