//! The fixed rule table applied to scanned packages.
//!
//! Every rule is evaluated independently against an in-memory
//! [`SkillPackage`]; there is no short-circuiting, so one package can
//! collect several violations in a single pass. Violations come back in
//! catalog order regardless of frontmatter key order, which keeps reports
//! stable across author edits that only reorder fields.

use std::sync::LazyLock;

use regex::Regex;
use skillcheck_core::constants::{
    MAX_DESCRIPTION_CHARS, MAX_NAME_CHARS, MAX_SKILL_FILE_LINES, MESSAGE_SNIPPET_CHARS,
};
use skillcheck_core::errors::LoadError;
use skillcheck_core::rules::Rule;
use skillcheck_core::text::snippet;
use skillcheck_core::types::{
    FrontmatterValue, PackageEntry, SkillPackage, ValidationResult, Violation,
};

/// Lowercase alphanumeric segments joined by single hyphens.
static NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9]+(-[a-z0-9]+)*$").unwrap());

/// Check one scanned entry, load failures included.
///
/// A package that failed to load gets exactly one package-level violation
/// describing the failure; a loaded package is run through the whole rule
/// table.
pub fn check_entry(entry: &PackageEntry) -> ValidationResult {
    let violations = match &entry.outcome {
        Ok(package) => check_package(package),
        Err(err) => vec![load_violation(err)],
    };
    ValidationResult::new(entry.directory_name.clone(), violations)
}

/// Run the full rule table against one loaded package.
pub fn check_package(package: &SkillPackage) -> Vec<Violation> {
    let mut violations = Vec::new();
    let frontmatter = &package.frontmatter;
    let name = frontmatter.name();
    let description = frontmatter.description();

    if name.is_none() {
        violations.push(Violation::new(Rule::MissingName, "name field is required"));
    }
    if description.is_none() {
        violations.push(Violation::new(Rule::MissingDescription, "description field is required"));
    }

    if let Some(name) = name {
        let chars = name.chars().count();
        if chars < 1 || chars > MAX_NAME_CHARS {
            violations.push(Violation::new(
                Rule::NameLength,
                format!("name must be 1-{MAX_NAME_CHARS} characters (got {chars})"),
            ));
        }
        if !NAME_PATTERN.is_match(name) {
            violations.push(Violation::new(Rule::NameCharset, name_charset_message(name)));
        }
        if name != package.directory_name {
            violations.push(Violation::new(
                Rule::NameDirMismatch,
                format!(
                    "name must match directory name exactly (name \"{}\", directory \"{}\")",
                    snippet(name, MESSAGE_SNIPPET_CHARS),
                    snippet(&package.directory_name, MESSAGE_SNIPPET_CHARS),
                ),
            ));
        }
    }

    if let Some(description) = description {
        let chars = description.chars().count();
        if chars < 1 || chars > MAX_DESCRIPTION_CHARS {
            violations.push(Violation::new(
                Rule::DescriptionLength,
                format!("description must be 1-{MAX_DESCRIPTION_CHARS} characters (got {chars})"),
            ));
        }
    }

    if package.line_count > MAX_SKILL_FILE_LINES {
        violations.push(Violation::new(
            Rule::FileTooLong,
            format!(
                "SKILL.md exceeds {MAX_SKILL_FILE_LINES} lines (got {})",
                package.line_count
            ),
        ));
    }

    if let Some(metadata) = frontmatter.metadata() {
        if let Some(violation) = metadata_violation(metadata) {
            violations.push(violation);
        }
    }

    violations
}

/// Map a load failure to its single package-level violation.
fn load_violation(err: &LoadError) -> Violation {
    let rule = match err {
        LoadError::MissingSkillFile => Rule::MissingSkillFile,
        LoadError::MalformedFrontmatter(_) => Rule::MalformedFrontmatter,
        LoadError::Io(_) => Rule::IoError,
    };
    Violation::new(rule, err.to_string())
}

/// Explain which part of a name breaks the charset rule.
fn name_charset_message(name: &str) -> String {
    const BASE: &str = "name must be lowercase alphanumeric with single hyphens";
    if name.is_empty() {
        return BASE.to_string();
    }
    let offender = name
        .chars()
        .enumerate()
        .find(|&(_, c)| !(c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'));
    let detail = if let Some((position, ch)) = offender {
        format!("found {ch:?} at position {position}")
    } else if name.starts_with('-') {
        "leading hyphen".to_string()
    } else if name.ends_with('-') {
        "trailing hyphen".to_string()
    } else if name.contains("--") {
        "consecutive hyphens".to_string()
    } else {
        "invalid format".to_string()
    };
    format!("{BASE} ({detail} in \"{}\")", snippet(name, MESSAGE_SNIPPET_CHARS))
}

/// Flag metadata values that are not a flat string-to-string mapping.
fn metadata_violation(metadata: &FrontmatterValue) -> Option<Violation> {
    const BASE: &str = "metadata must be a flat key-value mapping";
    match metadata {
        FrontmatterValue::Map(_) => None,
        FrontmatterValue::List(items) => Some(Violation::new(
            Rule::MetadataType,
            format!("{BASE} (found a list with {} items)", items.len()),
        )),
        FrontmatterValue::Scalar(value) => Some(Violation::new(
            Rule::MetadataType,
            format!("{BASE} (found scalar \"{}\")", snippet(value, MESSAGE_SNIPPET_CHARS)),
        )),
    }
}

// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser;

    /// Build an in-memory package from raw SKILL.md text.
    fn package(directory_name: &str, text: &str) -> SkillPackage {
        let parsed = parser::parse_document(text).expect("test document should parse");
        SkillPackage {
            directory_name: directory_name.to_string(),
            frontmatter: parsed.frontmatter,
            body: parsed.body,
            line_count: text.lines().count(),
        }
    }

    fn rules(violations: &[Violation]) -> Vec<Rule> {
        violations.iter().map(|v| v.rule).collect()
    }

    #[test]
    fn valid_package_has_no_violations() {
        let package = package(
            "page-cro",
            "---\nname: page-cro\ndescription: Improves conversion rates on landing pages\nlicense: MIT\nmetadata:\n  type: conversion\n---\n# Page CRO\n",
        );
        assert!(check_package(&package).is_empty());
    }

    #[test]
    fn missing_name_is_reported() {
        let package = package("page-cro", "---\ndescription: Something useful\n---\n");
        assert_eq!(rules(&check_package(&package)), [Rule::MissingName]);
    }

    #[test]
    fn missing_description_is_reported() {
        let package = package("page-cro", "---\nname: page-cro\n---\n");
        assert_eq!(rules(&check_package(&package)), [Rule::MissingDescription]);
    }

    #[test]
    fn missing_both_fields_reports_both() {
        let package = package("page-cro", "---\nlicense: MIT\n---\n");
        assert_eq!(
            rules(&check_package(&package)),
            [Rule::MissingName, Rule::MissingDescription],
        );
    }

    #[test]
    fn empty_name_is_present_but_fails_length_and_charset() {
        let package = package("page-cro", "---\nname:\ndescription: d\n---\n");
        assert_eq!(
            rules(&check_package(&package)),
            [Rule::NameLength, Rule::NameCharset, Rule::NameDirMismatch],
        );
    }

    #[test]
    fn name_at_the_length_limit_passes() {
        let name = "a".repeat(64);
        let text = format!("---\nname: {name}\ndescription: d\n---\n");
        let package = package(&name, &text);
        assert!(check_package(&package).is_empty());
    }

    #[test]
    fn name_over_the_length_limit_fails() {
        let name = "a".repeat(65);
        let text = format!("---\nname: {name}\ndescription: d\n---\n");
        let package = package(&name, &text);
        let violations = check_package(&package);
        assert_eq!(rules(&violations), [Rule::NameLength]);
        assert!(violations[0].message.contains("got 65"));
    }

    #[test]
    fn uppercase_name_names_the_offending_character() {
        let package = package("Page-CRO", "---\nname: Page-CRO\ndescription: d\n---\n");
        let violations = check_package(&package);
        assert_eq!(rules(&violations), [Rule::NameCharset]);
        assert!(violations[0].message.contains("found 'P' at position 0"));
    }

    #[test]
    fn leading_hyphen_is_called_out() {
        let package = package("-page", "---\nname: -page\ndescription: d\n---\n");
        let violations = check_package(&package);
        assert_eq!(rules(&violations), [Rule::NameCharset]);
        assert!(violations[0].message.contains("leading hyphen"));
    }

    #[test]
    fn trailing_hyphen_is_called_out() {
        let package = package("page-", "---\nname: page-\ndescription: d\n---\n");
        let violations = check_package(&package);
        assert!(violations[0].message.contains("trailing hyphen"));
    }

    #[test]
    fn consecutive_hyphens_are_called_out() {
        let package = package("page--cro", "---\nname: page--cro\ndescription: d\n---\n");
        let violations = check_package(&package);
        assert_eq!(rules(&violations), [Rule::NameCharset]);
        assert!(violations[0].message.contains("consecutive hyphens"));
    }

    #[test]
    fn digits_and_single_hyphens_pass_the_charset() {
        let package = package("page-cro-2", "---\nname: page-cro-2\ndescription: d\n---\n");
        assert!(check_package(&package).is_empty());
    }

    #[test]
    fn name_directory_mismatch_quotes_both_sides() {
        let package = package("page-cro", "---\nname: landing-page-cro\ndescription: d\n---\n");
        let violations = check_package(&package);
        assert_eq!(rules(&violations), [Rule::NameDirMismatch]);
        assert!(violations[0].message.contains("\"landing-page-cro\""));
        assert!(violations[0].message.contains("\"page-cro\""));
    }

    #[test]
    fn description_over_the_limit_fails() {
        let description = "d".repeat(1025);
        let text = format!("---\nname: page-cro\ndescription: {description}\n---\n");
        let package = package("page-cro", &text);
        let violations = check_package(&package);
        assert_eq!(rules(&violations), [Rule::DescriptionLength]);
        assert!(violations[0].message.contains("got 1025"));
    }

    #[test]
    fn description_length_counts_characters_not_bytes() {
        // 1024 two-byte characters stay within the limit.
        let description = "é".repeat(1024);
        let text = format!("---\nname: page-cro\ndescription: {description}\n---\n");
        let package = package("page-cro", &text);
        assert!(check_package(&package).is_empty());
    }

    #[test]
    fn file_over_the_line_limit_fails() {
        let text = format!("---\nname: page-cro\ndescription: d\n---\n{}", "line\n".repeat(497));
        let package = package("page-cro", &text);
        assert_eq!(package.line_count, 501);
        let violations = check_package(&package);
        assert_eq!(rules(&violations), [Rule::FileTooLong]);
        assert!(violations[0].message.contains("got 501"));
    }

    #[test]
    fn file_at_the_line_limit_passes() {
        let text = format!("---\nname: page-cro\ndescription: d\n---\n{}", "line\n".repeat(496));
        let package = package("page-cro", &text);
        assert_eq!(package.line_count, 500);
        assert!(check_package(&package).is_empty());
    }

    #[test]
    fn metadata_list_fails_the_type_rule() {
        let package = package(
            "page-cro",
            "---\nname: page-cro\ndescription: d\nmetadata:\n  - one\n  - two\n---\n",
        );
        let violations = check_package(&package);
        assert_eq!(rules(&violations), [Rule::MetadataType]);
        assert!(violations[0].message.contains("list with 2 items"));
    }

    #[test]
    fn metadata_scalar_fails_the_type_rule() {
        let package = package(
            "page-cro",
            "---\nname: page-cro\ndescription: d\nmetadata: just-a-string\n---\n",
        );
        let violations = check_package(&package);
        assert_eq!(rules(&violations), [Rule::MetadataType]);
        assert!(violations[0].message.contains("just-a-string"));
    }

    #[test]
    fn absent_metadata_is_not_a_violation() {
        let package = package("page-cro", "---\nname: page-cro\ndescription: d\n---\n");
        assert!(check_package(&package).is_empty());
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let package = package(
            "page-cro",
            "---\nname: page-cro\ndescription: d\nauthor: someone\nhomepage: https://example.com\n---\n",
        );
        assert!(check_package(&package).is_empty());
    }

    #[test]
    fn violations_come_back_in_catalog_order() {
        // Frontmatter order (description before name) must not leak into
        // the violation order.
        let text = format!(
            "---\ndescription: {}\nname: Page--CRO-\nmetadata: scalar\n---\n{}",
            "d".repeat(1025),
            "line\n".repeat(500),
        );
        let package = package("page-cro", &text);
        assert_eq!(
            rules(&check_package(&package)),
            [
                Rule::NameCharset,
                Rule::NameDirMismatch,
                Rule::DescriptionLength,
                Rule::FileTooLong,
                Rule::MetadataType,
            ],
        );
    }

    #[test]
    fn check_entry_maps_missing_skill_file() {
        let entry = PackageEntry {
            directory_name: "empty-dir".to_string(),
            outcome: Err(LoadError::MissingSkillFile),
        };
        let result = check_entry(&entry);
        assert_eq!(result.package, "empty-dir");
        assert!(!result.passed());
        assert_eq!(rules(&result.violations), [Rule::MissingSkillFile]);
    }

    #[test]
    fn check_entry_maps_malformed_frontmatter() {
        let parse_err = parser::parse_document("no delimiter\n").unwrap_err();
        let entry = PackageEntry {
            directory_name: "broken".to_string(),
            outcome: Err(LoadError::MalformedFrontmatter(parse_err)),
        };
        let result = check_entry(&entry);
        assert_eq!(rules(&result.violations), [Rule::MalformedFrontmatter]);
        assert!(result.violations[0].message.contains("malformed frontmatter"));
    }

    #[test]
    fn check_entry_maps_io_failure() {
        let entry = PackageEntry {
            directory_name: "locked".to_string(),
            outcome: Err(LoadError::Io(std::io::Error::other("read denied"))),
        };
        let result = check_entry(&entry);
        assert_eq!(rules(&result.violations), [Rule::IoError]);
        assert!(result.violations[0].message.contains("read denied"));
    }

    #[test]
    fn check_entry_passes_a_valid_package_through() {
        let entry = PackageEntry {
            directory_name: "page-cro".to_string(),
            outcome: Ok(package(
                "page-cro",
                "---\nname: page-cro\ndescription: d\n---\n",
            )),
        };
        assert!(check_entry(&entry).passed());
    }

    #[test]
    fn generated_frontmatter_round_trips_clean() {
        let name = "wordpress-vip";
        let description = "Deploys and reviews WordPress VIP sites";
        let text = format!(
            "---\nname: {name}\ndescription: {description}\nlicense: MIT\nmetadata:\n  type: deployment\n  version: 1\n---\n# Skill\n\nBody text.\n",
        );
        let package = package(name, &text);
        assert_eq!(package.frontmatter.name(), Some(name));
        assert_eq!(package.frontmatter.description(), Some(description));
        assert!(check_package(&package).is_empty());
    }
}
