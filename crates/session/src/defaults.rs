//! Starter documents used when a session cannot be restored from a link.

use playpen_language::LanguageTable;

use crate::document::{Document, Documents};

/// Entry module that mounts the app component.
pub const ENTRY_DOCUMENT: &str = "main.tsx";
/// The app component, selected when a fresh session opens.
pub const APP_DOCUMENT: &str = "App.tsx";
/// Stylesheet imported by the entry module.
pub const STYLES_DOCUMENT: &str = "App.css";
/// Module import map resolving bare specifiers.
pub const IMPORT_MAP_DOCUMENT: &str = "import-map.json";

const TEMPLATES: [(&str, &str); 4] = [
	(ENTRY_DOCUMENT, include_str!("../templates/main.tsx")),
	(APP_DOCUMENT, include_str!("../templates/App.tsx")),
	(STYLES_DOCUMENT, include_str!("../templates/App.css")),
	(IMPORT_MAP_DOCUMENT, include_str!("../templates/import-map.json")),
];

/// Builds the built-in starter collection, classified by `languages`.
pub fn starter_documents(languages: &LanguageTable) -> Documents {
	TEMPLATES
		.iter()
		.map(|(name, content)| Document::classified(*name, *content, languages))
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn starter_collection_contents() {
		let docs = starter_documents(playpen_language::builtin());

		let names: Vec<_> = docs.names().collect();
		assert_eq!(names, [ENTRY_DOCUMENT, APP_DOCUMENT, STYLES_DOCUMENT, IMPORT_MAP_DOCUMENT]);
		assert_eq!(docs.get(APP_DOCUMENT).unwrap().language_id(), "typescript");
		assert_eq!(docs.get(STYLES_DOCUMENT).unwrap().language_id(), "css");
		assert_eq!(docs.get(IMPORT_MAP_DOCUMENT).unwrap().language_id(), "json");
		assert!(docs.iter().all(|doc| !doc.content().is_empty()));
	}

	#[test]
	fn import_map_is_valid_json() {
		let docs = starter_documents(playpen_language::builtin());
		let map: serde_json::Value = serde_json::from_str(docs.get(IMPORT_MAP_DOCUMENT).unwrap().content()).unwrap();
		assert!(map["imports"]["react"].is_string());
	}
}
