//! Session configuration loaded from TOML.
//!
//! Every key is optional:
//!
//! ```toml
//! theme = "dark"
//! active_document = "App.tsx"
//! base_url = "http://localhost:5173/"
//!
//! [codec]
//! quality = 9
//! window = 22
//!
//! [languages]
//! fallback = "javascript"
//!
//! [[languages.entries]]
//! id = "markdown"
//! extensions = ["md"]
//! ```

use std::path::{Path, PathBuf};

use playpen_codec::CodecOptions;
use playpen_language::{DEFAULT_FALLBACK, LanguageConfig, LanguageTable};
use serde::Deserialize;

use crate::defaults::APP_DOCUMENT;
use crate::store::Theme;

/// Link base used when neither the config nor the caller provides one.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5173/";

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	#[error("failed to read {}: {source}", path.display())]
	Read {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},
	#[error("failed to parse {}: {source}", path.display())]
	Parse {
		path: PathBuf,
		#[source]
		source: toml::de::Error,
	},
}

/// Language table overrides.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LanguagesConfig {
	/// Identifier for names no language claims.
	pub fallback: String,
	/// Extra languages, registered after the built-ins.
	pub entries: Vec<LanguageConfig>,
}

impl Default for LanguagesConfig {
	fn default() -> Self {
		Self {
			fallback: DEFAULT_FALLBACK.to_string(),
			entries: Vec::new(),
		}
	}
}

/// Settings applied when a session is opened.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionConfig {
	/// Initial theme.
	pub theme: Theme,
	/// Document selected when the session opens.
	pub active_document: String,
	/// Link that share fragments are attached to.
	pub base_url: String,
	pub codec: CodecOptions,
	pub languages: LanguagesConfig,
}

impl Default for SessionConfig {
	fn default() -> Self {
		Self {
			theme: Theme::default(),
			active_document: APP_DOCUMENT.to_string(),
			base_url: DEFAULT_BASE_URL.to_string(),
			codec: CodecOptions::default(),
			languages: LanguagesConfig::default(),
		}
	}
}

impl SessionConfig {
	/// Parses a configuration document.
	pub fn parse(content: &str, path: &Path) -> Result<Self, ConfigError> {
		toml::from_str(content).map_err(|source| ConfigError::Parse {
			path: path.to_path_buf(),
			source,
		})
	}

	/// Loads the configuration at `path`.
	pub fn load(path: &Path) -> Result<Self, ConfigError> {
		let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
			path: path.to_path_buf(),
			source,
		})?;
		Self::parse(&content, path)
	}

	/// Loads `path` if it exists, otherwise returns the defaults.
	pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
		if !path.exists() {
			tracing::debug!(path = %path.display(), "no session config; using defaults");
			return Ok(Self::default());
		}
		Self::load(path)
	}

	/// Builds the language table: built-ins, then configured entries.
	pub fn language_table(&self) -> LanguageTable {
		let mut table = LanguageTable::with_builtins();
		table.set_fallback(self.languages.fallback.clone());
		for entry in &self.languages.entries {
			table.register(entry.clone());
		}
		table
	}
}
