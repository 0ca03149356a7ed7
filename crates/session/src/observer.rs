//! Post-commit observers on the document collection.
//!
//! The store notifies observers once per committed collection change, after
//! the new collection is in place. [`FragmentPublisher`] is the observer that
//! keeps the address bar in step with the collection.

use playpen_codec::FragmentCodec;

use crate::address_bar::UrlAddressBar;
use crate::document::Documents;
use crate::snapshot::encode_documents;

/// Receives the committed collection after every change.
pub trait SnapshotObserver {
	fn on_commit(&mut self, documents: &Documents);
}

impl<F> SnapshotObserver for F
where
	F: FnMut(&Documents),
{
	fn on_commit(&mut self, documents: &Documents) {
		self(documents)
	}
}

/// Re-encodes the collection and replaces the address-bar fragment.
pub struct FragmentPublisher<C> {
	codec: C,
	address_bar: UrlAddressBar,
}

impl<C: FragmentCodec> FragmentPublisher<C> {
	pub fn new(codec: C, address_bar: UrlAddressBar) -> Self {
		Self { codec, address_bar }
	}
}

impl<C: FragmentCodec> SnapshotObserver for FragmentPublisher<C> {
	fn on_commit(&mut self, documents: &Documents) {
		match encode_documents(documents, &self.codec) {
			Ok(fragment) => {
				tracing::debug!(documents = documents.len(), fragment_len = fragment.len(), "published session fragment");
				self.address_bar.replace_fragment(&fragment);
			}
			Err(error) => {
				tracing::warn!(%error, "failed to encode session; keeping previous fragment");
			}
		}
	}
}
