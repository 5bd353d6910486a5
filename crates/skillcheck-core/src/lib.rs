//! # skillcheck-core
//!
//! Foundation types for the skill package validator.
//!
//! This crate provides the shared vocabulary the pipeline and CLI crates
//! depend on:
//!
//! - **Frontmatter**: [`types::Frontmatter`] as an ordered key/value mapping
//!   with [`types::FrontmatterValue`] scalars, flat maps, and flat lists
//! - **Packages**: [`types::SkillPackage`] and [`types::PackageEntry`] (a
//!   scanned directory with its load outcome)
//! - **Rules**: [`rules::Rule`] — the fixed catalog with stable kebab-case
//!   ids and a fixed report order
//! - **Results**: [`types::Violation`] and [`types::ValidationResult`]
//! - **Errors**: [`errors::ParseError`], [`errors::LoadError`],
//!   [`errors::ScanError`] via `thiserror`
//! - **Constants**: [`constants`] — filenames, length limits, defaults
//!
//! ## Crate Position
//!
//! Foundation crate. Depended on by `skillcheck-lint` and `skillcheck-cli`.

#![deny(unsafe_code)]

pub mod constants;
pub mod errors;
pub mod rules;
pub mod text;
pub mod types;
