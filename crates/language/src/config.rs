//! Language table connecting document names to language identifiers.
//!
//! A [`LanguageTable`] holds registered [`LanguageConfig`]s and indexes them by
//! extension and exact filename. Lookups never fail: unmatched names resolve to
//! the table's fallback identifier.

use std::collections::HashMap;
use std::sync::LazyLock;

use serde::Deserialize;

/// Identifier returned for names no registered language claims.
pub const DEFAULT_FALLBACK: &str = "javascript";

/// Index of a registered language within its [`LanguageTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LanguageId(pub u32);

impl LanguageId {
	#[inline]
	pub fn idx(self) -> usize {
		self.0 as usize
	}
}

/// Configuration for a single language.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LanguageConfig {
	/// Language identifier handed to the editor widget (e.g., "typescript").
	#[serde(rename = "id")]
	pub language_id: String,

	/// File extensions without the leading dot.
	#[serde(default)]
	pub extensions: Vec<String>,

	/// Exact document names (e.g., "Makefile").
	#[serde(default)]
	pub filenames: Vec<String>,
}

impl LanguageConfig {
	pub fn new(language_id: &str, extensions: &[&str]) -> Self {
		Self {
			language_id: language_id.to_string(),
			extensions: extensions.iter().map(|s| s.to_string()).collect(),
			filenames: Vec::new(),
		}
	}
}

/// Registered languages plus the lookups used by [`LanguageTable::classify`].
#[derive(Debug, Clone)]
pub struct LanguageTable {
	languages: Vec<LanguageConfig>,
	by_extension: HashMap<String, LanguageId>,
	by_filename: HashMap<String, LanguageId>,
	fallback: String,
}

impl Default for LanguageTable {
	fn default() -> Self {
		Self::new(DEFAULT_FALLBACK)
	}
}

impl LanguageTable {
	/// Creates an empty table resolving every name to `fallback`.
	pub fn new(fallback: impl Into<String>) -> Self {
		Self {
			languages: Vec::new(),
			by_extension: HashMap::new(),
			by_filename: HashMap::new(),
			fallback: fallback.into(),
		}
	}

	/// Creates a table preloaded with the playground's built-in languages.
	pub fn with_builtins() -> Self {
		let mut table = Self::default();
		table.register(LanguageConfig::new("javascript", &["js", "jsx"]));
		table.register(LanguageConfig::new("typescript", &["ts", "tsx"]));
		table.register(LanguageConfig::new("json", &["json"]));
		table.register(LanguageConfig::new("css", &["css"]));
		table
	}

	/// Registers a language configuration.
	///
	/// Later registrations take over extensions and filenames claimed by
	/// earlier ones.
	pub fn register(&mut self, config: LanguageConfig) -> LanguageId {
		let id = LanguageId(self.languages.len() as u32);

		for ext in &config.extensions {
			self.by_extension.insert(ext.to_ascii_lowercase(), id);
		}

		for name in &config.filenames {
			self.by_filename.insert(name.clone(), id);
		}

		self.languages.push(config);
		id
	}

	/// Replaces the fallback identifier.
	pub fn set_fallback(&mut self, fallback: impl Into<String>) {
		self.fallback = fallback.into();
	}

	pub fn fallback(&self) -> &str {
		&self.fallback
	}

	/// Gets a language configuration by ID.
	pub fn get(&self, id: LanguageId) -> Option<&LanguageConfig> {
		self.languages.get(id.idx())
	}

	/// Finds a language by document name (exact filename, then extension).
	pub fn language_for_name(&self, name: &str) -> Option<LanguageId> {
		if let Some(id) = self.by_filename.get(name) {
			return Some(*id);
		}

		name.rsplit_once('.')
			.map(|(_, ext)| ext)
			.filter(|ext| !ext.is_empty())
			.and_then(|ext| self.by_extension.get(&ext.to_ascii_lowercase()).copied())
	}

	/// Returns the language identifier for `name`, or the fallback.
	pub fn classify(&self, name: &str) -> &str {
		self.language_for_name(name)
			.and_then(|id| self.get(id))
			.map_or(self.fallback.as_str(), |config| config.language_id.as_str())
	}
}

static BUILTIN: LazyLock<LanguageTable> = LazyLock::new(LanguageTable::with_builtins);

/// The process-wide built-in table.
pub fn builtin() -> &'static LanguageTable {
	&BUILTIN
}
