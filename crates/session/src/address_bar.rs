//! Shareable address bar holding the session fragment.

use std::sync::Arc;

use parking_lot::Mutex;
use url::Url;

/// Clonable handle to a URL whose fragment carries the encoded session.
///
/// Clones share the same URL, so a host can keep one handle while the store's
/// publisher writes through another.
#[derive(Debug, Clone)]
pub struct UrlAddressBar {
	url: Arc<Mutex<Url>>,
}

impl UrlAddressBar {
	pub fn new(url: Url) -> Self {
		Self {
			url: Arc::new(Mutex::new(url)),
		}
	}

	/// Parses `href`, keeping any fragment it already carries.
	pub fn parse(href: &str) -> Result<Self, url::ParseError> {
		Ok(Self::new(Url::parse(href)?))
	}

	/// Returns the current fragment without the leading `#`, or `""`.
	pub fn fragment(&self) -> String {
		self.url.lock().fragment().unwrap_or_default().to_string()
	}

	/// Replaces the whole fragment.
	pub fn replace_fragment(&self, fragment: &str) {
		self.url.lock().set_fragment(Some(fragment));
	}

	/// Returns the full link, fragment included.
	pub fn href(&self) -> String {
		self.url.lock().as_str().to_string()
	}
}
