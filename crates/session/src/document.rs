//! Documents and the name-keyed document collection.
//!
//! A [`Document`]'s language identifier is derived from its name and has no
//! setter; it changes only when the name does.

use indexmap::IndexMap;
use playpen_language::LanguageTable;
use serde::Serialize;

/// A named in-memory text document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
	name: String,
	#[serde(rename = "value")]
	content: String,
	#[serde(rename = "language")]
	language_id: String,
}

impl Document {
	/// Creates a document classified by the built-in language table.
	pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
		Self::classified(name, content, playpen_language::builtin())
	}

	/// Creates a document classified by `languages`.
	pub fn classified(name: impl Into<String>, content: impl Into<String>, languages: &LanguageTable) -> Self {
		let name = name.into();
		Self {
			language_id: languages.classify(&name).to_string(),
			content: content.into(),
			name,
		}
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn content(&self) -> &str {
		&self.content
	}

	pub fn language_id(&self) -> &str {
		&self.language_id
	}

	/// Returns this document under `name`, keeping its content.
	pub(crate) fn renamed(self, name: &str, languages: &LanguageTable) -> Self {
		Self::classified(name, self.content, languages)
	}

	pub(crate) fn reclassify(&mut self, languages: &LanguageTable) {
		let language_id = languages.classify(&self.name);
		if self.language_id != language_id {
			self.language_id = language_id.to_string();
		}
	}
}

/// Document collection keyed by document name.
///
/// Iteration follows insertion order, but equality compares as a map: two
/// collections with the same entries in a different order are equal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Documents(IndexMap<String, Document>);

impl Documents {
	pub fn new() -> Self {
		Self::default()
	}

	/// Builder form of [`Self::insert`] for a name and content.
	pub fn with_document(mut self, name: impl Into<String>, content: impl Into<String>) -> Self {
		self.insert(Document::new(name, content));
		self
	}

	/// Inserts `document` under its own name, returning any document it replaced.
	pub fn insert(&mut self, document: Document) -> Option<Document> {
		self.0.insert(document.name.clone(), document)
	}

	/// Removes the document called `name`.
	pub fn remove(&mut self, name: &str) -> Option<Document> {
		self.0.shift_remove(name)
	}

	/// Replaces the content of `name`. Returns `false` if there is no such document.
	pub fn set_content(&mut self, name: &str, content: impl Into<String>) -> bool {
		match self.0.get_mut(name) {
			Some(document) => {
				document.content = content.into();
				true
			}
			None => false,
		}
	}

	pub fn get(&self, name: &str) -> Option<&Document> {
		self.0.get(name)
	}

	pub fn contains(&self, name: &str) -> bool {
		self.0.contains_key(name)
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn names(&self) -> impl Iterator<Item = &str> {
		self.0.keys().map(String::as_str)
	}

	pub fn iter(&self) -> impl Iterator<Item = &Document> {
		self.0.values()
	}

	/// Returns a copy with `old` replaced by `new` in the same slot.
	///
	/// A different document already called `new` is dropped.
	pub(crate) fn renamed(&self, old: &str, new: &str, languages: &LanguageTable) -> Self {
		let mut next = IndexMap::with_capacity(self.0.len());
		for (name, document) in &self.0 {
			if name == old {
				next.insert(new.to_string(), document.clone().renamed(new, languages));
			} else if name != new {
				next.insert(name.clone(), document.clone());
			}
		}
		Self(next)
	}

	/// Recomputes every language identifier against `languages`.
	pub(crate) fn reclassify(&mut self, languages: &LanguageTable) {
		for document in self.0.values_mut() {
			document.reclassify(languages);
		}
	}
}

impl FromIterator<Document> for Documents {
	fn from_iter<I: IntoIterator<Item = Document>>(iter: I) -> Self {
		let mut documents = Self::new();
		for document in iter {
			documents.insert(document);
		}
		documents
	}
}

impl<'a> IntoIterator for &'a Documents {
	type Item = &'a Document;
	type IntoIter = indexmap::map::Values<'a, String, Document>;

	fn into_iter(self) -> Self::IntoIter {
		self.0.values()
	}
}

#[cfg(test)]
mod tests {
	use playpen_language::LanguageConfig;

	use super::*;

	#[test]
	fn new_document_is_classified() {
		let doc = Document::new("App.tsx", "");
		assert_eq!(doc.name(), "App.tsx");
		assert_eq!(doc.content(), "");
		assert_eq!(doc.language_id(), "typescript");
	}

	#[test]
	fn rename_keeps_slot_and_content() {
		let docs = Documents::new()
			.with_document("a.ts", "a")
			.with_document("b.css", "b")
			.with_document("c.json", "{}");

		let renamed = docs.renamed("b.css", "b.ts", playpen_language::builtin());

		let names: Vec<_> = renamed.names().collect();
		assert_eq!(names, ["a.ts", "b.ts", "c.json"]);
		let doc = renamed.get("b.ts").unwrap();
		assert_eq!(doc.content(), "b");
		assert_eq!(doc.language_id(), "typescript");
	}

	#[test]
	fn rename_onto_existing_name_drops_target() {
		let docs = Documents::new().with_document("a.ts", "a").with_document("b.ts", "b");

		let renamed = docs.renamed("a.ts", "b.ts", playpen_language::builtin());

		assert_eq!(renamed.len(), 1);
		assert_eq!(renamed.get("b.ts").unwrap().content(), "a");
	}

	#[test]
	fn equality_ignores_order() {
		let forward = Documents::new().with_document("a.ts", "").with_document("b.ts", "");
		let backward = Documents::new().with_document("b.ts", "").with_document("a.ts", "");
		assert_eq!(forward, backward);
	}

	#[test]
	fn set_content_reports_missing() {
		let mut docs = Documents::new().with_document("a.ts", "");
		assert!(docs.set_content("a.ts", "let a = 1;"));
		assert!(!docs.set_content("ghost.ts", "x"));
		assert_eq!(docs.get("a.ts").unwrap().content(), "let a = 1;");
	}

	#[test]
	fn reclassify_follows_custom_table() {
		let mut table = LanguageTable::with_builtins();
		table.register(LanguageConfig::new("vue", &["vue"]));

		let mut docs = Documents::new().with_document("Widget.vue", "");
		assert_eq!(docs.get("Widget.vue").unwrap().language_id(), "javascript");

		docs.reclassify(&table);
		assert_eq!(docs.get("Widget.vue").unwrap().language_id(), "vue");
	}
}
