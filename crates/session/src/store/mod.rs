//! The session store: documents, selection and theme for one editor session.
//!
//! [`SessionStore`] is the only writer of the document collection. Callers
//! mutate it through the operation set below; every operation that commits a
//! collection change notifies the registered [`SnapshotObserver`]s once, after
//! the new collection is in place. The [`FragmentPublisher`] registered at
//! construction re-encodes the collection into the address bar, so the link
//! always describes the latest committed state.
//!
//! Selection and theme are not part of the snapshot and never touch the
//! address bar.
//!
//! # Bootstrap
//!
//! [`SessionStore::open_with`] tries to recover documents from the address
//! bar's fragment. Any failure is logged and the built-in starter documents
//! are used instead; opening a session never fails.


use std::sync::Arc;

use playpen_codec::{BrotliCodec, FragmentCodec};
use playpen_language::LanguageTable;
use serde::{Deserialize, Serialize};

use crate::address_bar::UrlAddressBar;
use crate::config::SessionConfig;
use crate::defaults::starter_documents;
use crate::document::{Document, Documents};
use crate::observer::{FragmentPublisher, SnapshotObserver};
use crate::snapshot::restore_documents;

/// Rename target that is always refused.
pub const RESERVED_NAME: &str = "null";

/// Display theme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, strum_macros::Display, strum_macros::EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Theme {
	#[default]
	Light,
	Dark,
}

/// Where the initial documents of a session came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestoreSource {
	/// Decoded from the address-bar fragment.
	Fragment,
	/// The built-in starter documents.
	Defaults,
}

/// Owned state of one editor session.
pub struct SessionStore {
	documents: Documents,
	active: Option<String>,
	theme: Theme,
	languages: Arc<LanguageTable>,
	address_bar: UrlAddressBar,
	source: RestoreSource,
	observers: Vec<Box<dyn SnapshotObserver>>,
}

impl std::fmt::Debug for SessionStore {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("SessionStore")
			.field("documents", &self.documents)
			.field("active", &self.active)
			.field("theme", &self.theme)
			.field("source", &self.source)
			.field("observers", &self.observers.len())
			.finish()
	}
}

impl SessionStore {
	/// Opens a session with the default configuration and codec.
	pub fn open(address_bar: UrlAddressBar) -> Self {
		let config = SessionConfig::default();
		Self::open_with(address_bar, BrotliCodec::new(config.codec), &config)
	}

	/// Opens a session, restoring documents from `address_bar` when possible.
	///
	/// The initial collection is published once before this returns.
	pub fn open_with<C>(address_bar: UrlAddressBar, codec: C, config: &SessionConfig) -> Self
	where
		C: FragmentCodec + 'static,
	{
		let languages = Arc::new(config.language_table());
		let fragment = address_bar.fragment();

		let (documents, source) = match restore_documents(&fragment, &codec, &languages) {
			Ok(documents) => {
				tracing::info!(documents = documents.len(), "restored session from fragment");
				(documents, RestoreSource::Fragment)
			}
			Err(error) if fragment.is_empty() => {
				tracing::debug!(%error, "no session fragment; using starter documents");
				(starter_documents(&languages), RestoreSource::Defaults)
			}
			Err(error) => {
				tracing::warn!(%error, "could not restore session from fragment; using starter documents");
				(starter_documents(&languages), RestoreSource::Defaults)
			}
		};

		let publisher: Box<dyn SnapshotObserver> = Box::new(FragmentPublisher::new(codec, address_bar.clone()));
		let mut store = Self {
			documents,
			active: Some(config.active_document.clone()),
			theme: config.theme,
			languages,
			address_bar,
			source,
			observers: vec![publisher],
		};
		store.reconcile_active();
		store.notify();
		store
	}

	/// Registers an observer for subsequent commits.
	pub fn observe(&mut self, observer: impl SnapshotObserver + 'static) {
		self.observers.push(Box::new(observer));
	}

	/// Adds an empty document called `name`, replacing any document of that name.
	pub fn add_document(&mut self, name: &str) {
		let document = Document::classified(name, "", &self.languages);
		if self.documents.insert(document).is_some() {
			tracing::debug!(name, "replaced document with empty document");
		} else {
			tracing::debug!(name, "added document");
		}
		self.notify();
	}

	/// Removes the document called `name`; absent names leave the collection as is.
	///
	/// When the removed document was active, the selection moves to the first
	/// remaining document, or to none. Any other selection is left alone, even
	/// one that names a missing document.
	pub fn remove_document(&mut self, name: &str) {
		if self.documents.remove(name).is_some() {
			tracing::debug!(name, "removed document");
			if self.active.as_deref() == Some(name) {
				self.reconcile_active();
			}
		}
		self.notify();
	}

	/// Renames `old_name` to `new_name`, keeping its content.
	///
	/// Nothing changes when `old_name` does not exist or `new_name` is empty or
	/// [`RESERVED_NAME`]. A different document already called `new_name` is
	/// replaced. The rename is committed as a single change.
	pub fn rename_document(&mut self, old_name: &str, new_name: &str) {
		if !self.documents.contains(old_name) || new_name.is_empty() || new_name == RESERVED_NAME {
			tracing::debug!(old_name, new_name, "ignored rename");
			return;
		}

		self.documents = self.documents.renamed(old_name, new_name, &self.languages);
		if self.active.as_deref() == Some(old_name) {
			self.active = Some(new_name.to_string());
		}
		tracing::debug!(old_name, new_name, "renamed document");
		self.notify();
	}

	/// Replaces the whole collection.
	///
	/// Language identifiers are recomputed with this session's language table.
	pub fn replace_all_documents(&mut self, mut documents: Documents) {
		documents.reclassify(&self.languages);
		self.documents = documents;
		tracing::debug!(documents = self.documents.len(), "replaced all documents");
		self.reconcile_active();
		self.notify();
	}

	/// Selects `name` without checking that it exists.
	pub fn set_active_document(&mut self, name: &str) {
		self.active = Some(name.to_string());
	}

	pub fn set_theme(&mut self, theme: Theme) {
		self.theme = theme;
	}

	pub fn documents(&self) -> &Documents {
		&self.documents
	}

	pub fn document(&self, name: &str) -> Option<&Document> {
		self.documents.get(name)
	}

	pub fn active_document_name(&self) -> Option<&str> {
		self.active.as_deref()
	}

	/// The active document, if the selection names one that exists.
	pub fn active_document(&self) -> Option<&Document> {
		self.active.as_deref().and_then(|name| self.documents.get(name))
	}

	pub fn theme(&self) -> Theme {
		self.theme
	}

	pub fn languages(&self) -> &LanguageTable {
		&self.languages
	}

	pub fn restore_source(&self) -> RestoreSource {
		self.source
	}

	/// The fragment currently published in the address bar.
	pub fn fragment(&self) -> String {
		self.address_bar.fragment()
	}

	/// The full share link for the latest committed collection.
	pub fn share_link(&self) -> String {
		self.address_bar.href()
	}

	fn reconcile_active(&mut self) {
		if self.active.as_deref().is_some_and(|name| self.documents.contains(name)) {
			return;
		}
		let next = self.documents.names().next().map(str::to_string);
		if next != self.active {
			tracing::debug!(from = ?self.active, to = ?next, "moved selection");
			self.active = next;
		}
	}

	fn notify(&mut self) {
		for observer in &mut self.observers {
			observer.on_commit(&self.documents);
		}
	}
}
