//! JSON snapshots of a document collection.
//!
//! The wire shape is an object keyed by document name:
//!
//! ```json
//! { "App.tsx": { "name": "App.tsx", "value": "...", "language": "typescript" } }
//! ```
//!
//! Parsing checks that shape explicitly. The `language` field is accepted but
//! never trusted; identifiers are recomputed from the name.

use indexmap::IndexMap;
use playpen_codec::{CodecError, FragmentCodec};
use playpen_language::LanguageTable;
use serde::Deserialize;

use crate::document::{Document, Documents};

/// Errors produced while reading a snapshot.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
	/// The text is not JSON, or not the expected object shape.
	#[error("snapshot is malformed: {0}")]
	Json(#[from] serde_json::Error),
	/// An entry's key disagrees with the `name` it carries.
	#[error("snapshot entry '{key}' is named '{name}'")]
	NameMismatch { key: String, name: String },
}

/// Errors produced while recovering documents from a fragment.
#[derive(Debug, thiserror::Error)]
pub enum RestoreError {
	#[error(transparent)]
	Codec(#[from] CodecError),
	#[error(transparent)]
	Snapshot(#[from] SnapshotError),
}

#[derive(Deserialize)]
struct WireDocument {
	name: String,
	value: String,
}

/// Serializes `documents` to canonical snapshot text.
pub fn to_json(documents: &Documents) -> Result<String, SnapshotError> {
	Ok(serde_json::to_string(documents)?)
}

/// Parses snapshot text, classifying every document with `languages`.
pub fn from_json(text: &str, languages: &LanguageTable) -> Result<Documents, SnapshotError> {
	let entries: IndexMap<String, WireDocument> = serde_json::from_str(text)?;

	let mut documents = Documents::new();
	for (key, entry) in entries {
		if key != entry.name {
			return Err(SnapshotError::NameMismatch { key, name: entry.name });
		}
		documents.insert(Document::classified(entry.name, entry.value, languages));
	}
	Ok(documents)
}

/// Decodes a fragment and parses the snapshot inside it.
pub fn restore_documents(fragment: &str, codec: &impl FragmentCodec, languages: &LanguageTable) -> Result<Documents, RestoreError> {
	let text = codec.decompress(fragment)?;
	Ok(from_json(&text, languages)?)
}

/// Serializes and encodes `documents` into a fragment.
pub fn encode_documents(documents: &Documents, codec: &impl FragmentCodec) -> Result<String, RestoreError> {
	let text = to_json(documents)?;
	Ok(codec.compress(&text)?)
}

#[cfg(test)]
mod tests {
	use playpen_codec::BrotliCodec;
	use pretty_assertions::assert_eq;
	use proptest::collection::vec;
	use proptest::prelude::*;

	use super::*;

	fn table() -> &'static LanguageTable {
		playpen_language::builtin()
	}

	#[test]
	fn serializes_wire_shape() {
		let docs = Documents::new().with_document("App.css", "body {}");
		assert_eq!(
			to_json(&docs).unwrap(),
			r#"{"App.css":{"name":"App.css","value":"body {}","language":"css"}}"#
		);
	}

	#[test]
	fn parses_wire_shape() {
		let text = r#"{"main.ts":{"name":"main.ts","value":"let x = 1;","language":"typescript"}}"#;
		let docs = from_json(text, table()).unwrap();
		assert_eq!(docs, Documents::new().with_document("main.ts", "let x = 1;"));
	}

	#[test]
	fn recorded_language_is_recomputed() {
		let text = r#"{"main.ts":{"name":"main.ts","value":"","language":"cobol"}}"#;
		let docs = from_json(text, table()).unwrap();
		assert_eq!(docs.get("main.ts").unwrap().language_id(), "typescript");
	}

	#[test]
	fn missing_language_is_accepted() {
		let text = r#"{"a.json":{"name":"a.json","value":"[]"}}"#;
		let docs = from_json(text, table()).unwrap();
		assert_eq!(docs.get("a.json").unwrap().language_id(), "json");
	}

	#[test]
	fn empty_object_is_an_empty_collection() {
		assert!(from_json("{}", table()).unwrap().is_empty());
	}

	#[test]
	fn shape_mismatches_are_rejected() {
		for text in [
			"[]",
			"null",
			r#""App.tsx""#,
			r#"{"App.tsx":"content"}"#,
			r#"{"App.tsx":{"name":"App.tsx"}}"#,
			r#"{"App.tsx":{"name":"App.tsx","value":42}}"#,
			r#"{"App.tsx":{"name":null,"value":""}}"#,
			"{not json",
		] {
			assert!(matches!(from_json(text, table()), Err(SnapshotError::Json(_))), "accepted {text}");
		}
	}

	#[test]
	fn key_name_disagreement_is_rejected() {
		let text = r#"{"App.tsx":{"name":"Other.tsx","value":""}}"#;
		let err = from_json(text, table()).unwrap_err();
		assert!(matches!(err, SnapshotError::NameMismatch { ref key, ref name } if key == "App.tsx" && name == "Other.tsx"));
	}

	#[test]
	fn restore_reports_codec_failures() {
		let err = restore_documents("%%%", &BrotliCodec::default(), table()).unwrap_err();
		assert!(matches!(err, RestoreError::Codec(_)));
	}

	#[test]
	fn restore_reports_snapshot_failures() {
		let codec = BrotliCodec::default();
		let fragment = codec.compress("[1, 2, 3]").unwrap();
		let err = restore_documents(&fragment, &codec, table()).unwrap_err();
		assert!(matches!(err, RestoreError::Snapshot(_)));
	}

	fn arb_documents() -> impl Strategy<Value = Documents> {
		vec(("[A-Za-z0-9_-]{1,12}\\.(ts|tsx|js|css|json|md)", "\\PC*"), 0..8)
			.prop_map(|entries| entries.into_iter().map(|(name, content)| Document::new(name, content)).collect())
	}

	proptest! {
		#[test]
		fn prop_documents_roundtrip(docs in arb_documents()) {
			let codec = BrotliCodec::default();
			let fragment = encode_documents(&docs, &codec).unwrap();
			let restored = restore_documents(&fragment, &codec, table()).unwrap();
			prop_assert_eq!(restored, docs);
		}
	}
}
