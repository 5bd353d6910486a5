//! Error hierarchy for parsing, loading, and scanning skill packages.
//!
//! Everything except [`ScanError`] is recovered per package: the failure
//! becomes a single violation attributed to that directory and the run
//! continues for all siblings.

use std::io;
use std::path::PathBuf;

/// Why a frontmatter block failed to parse.
///
/// Line numbers are 1-based positions in the full `SKILL.md` file, not in
/// the frontmatter block, so authors can jump straight to the line.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// The file does not begin with a `---` delimiter line.
    #[error("file does not start with a '---' delimiter line")]
    MissingOpeningDelimiter,

    /// No closing `---` delimiter after the opening one.
    #[error("closing '---' delimiter not found")]
    UnterminatedBlock,

    /// A top-level block line is not a `key: value` pair.
    #[error("line {line}: expected a 'key: value' pair")]
    InvalidEntry {
        /// Offending file line.
        line: usize,
    },

    /// An indented line appeared under a key other than `metadata`.
    #[error("line {line}: indented values are only allowed under 'metadata'")]
    UnexpectedIndent {
        /// Offending file line.
        line: usize,
    },

    /// A `metadata` child is not a flat `key: value` pair or `- item` line,
    /// mixes the two forms, or changes indentation mid-block.
    #[error("line {line}: 'metadata' entries must be one flat level of 'key: value' pairs or '- item' lines")]
    InvalidMetadataEntry {
        /// Offending file line.
        line: usize,
    },
}

impl ParseError {
    /// The file line this error points at, when one applies.
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::MissingOpeningDelimiter | Self::UnterminatedBlock => None,
            Self::InvalidEntry { line }
            | Self::UnexpectedIndent { line }
            | Self::InvalidMetadataEntry { line } => Some(*line),
        }
    }
}

/// Why one candidate directory failed to load as a package.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The directory holds no `SKILL.md`.
    #[error("SKILL.md not found")]
    MissingSkillFile,

    /// The frontmatter block is missing, unterminated, or unparseable.
    #[error("malformed frontmatter: {0}")]
    MalformedFrontmatter(#[from] ParseError),

    /// The file exists but could not be read.
    #[error("failed to read SKILL.md: {0}")]
    Io(#[from] io::Error),
}

/// The only run-aborting failure: the skills root itself cannot be scanned.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    /// The root path does not exist.
    #[error("skills root not found: {}", path.display())]
    RootNotFound {
        /// The path that was checked.
        path: PathBuf,
    },

    /// The root path exists but is not a directory.
    #[error("skills root is not a directory: {}", path.display())]
    RootNotDirectory {
        /// The path that was checked.
        path: PathBuf,
    },

    /// The root directory could not be enumerated.
    #[error("failed to read skills root {}: {source}", path.display())]
    RootUnreadable {
        /// The path that was being enumerated.
        path: PathBuf,
        /// The underlying I/O failure.
        #[source]
        source: io::Error,
    },
}
