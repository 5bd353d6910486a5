//! Shared constants for the validator.

/// Expected filename for skill definitions.
pub const SKILL_MD_FILENAME: &str = "SKILL.md";

/// Default skills root, relative to the working directory.
pub const DEFAULT_SKILLS_ROOT: &str = "skills";

/// Maximum allowed skill name length (in characters).
pub const MAX_NAME_CHARS: usize = 64;

/// Maximum allowed description length (in characters).
pub const MAX_DESCRIPTION_CHARS: usize = 1024;

/// Maximum allowed `SKILL.md` length (in lines).
pub const MAX_SKILL_FILE_LINES: usize = 500;

/// License assumed when the frontmatter omits one.
pub const DEFAULT_LICENSE: &str = "MIT";

/// Longest value excerpt quoted inside a violation message.
pub const MESSAGE_SNIPPET_CHARS: usize = 48;
