#![cfg_attr(test, allow(unused_crate_dependencies))]
//! Language classification for playground documents.
//!
//! Every document carries a language identifier that editor widgets use to
//! pick a grammar. The identifier is never stored independently: it is always
//! derived from the document name through [`classify`] (or a custom
//! [`LanguageTable`] built from configuration).
//!
//! Classification is total. Names without an extension, or with an extension
//! no language claims, map to the table's fallback identifier.

pub mod config;

pub use config::{DEFAULT_FALLBACK, LanguageConfig, LanguageId, LanguageTable, builtin};

/// Classifies `name` against the built-in language table.
///
/// Pure and deterministic: the same name always yields the same identifier.
pub fn classify(name: &str) -> &'static str {
	builtin().classify(name)
}
