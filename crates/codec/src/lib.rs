#![cfg_attr(test, allow(unused_crate_dependencies))]
//! Fragment codec for shareable session links.
//!
//! Serialized session snapshots are compressed with brotli and wrapped in
//! URL-safe, unpadded base64 so the result can live in a URL fragment without
//! escaping.
//!
//! The codec is reversible: `decompress(compress(s)) == s` for every string.
//! Malformed fragments produce a [`CodecError`] rather than garbage text, which
//! lets session bootstrap tell a recoverable link apart from a broken one.

use std::io::{Read, Write};

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::Deserialize;

/// Size of the internal brotli read/write buffers.
const BUFFER_SIZE: usize = 4096;

/// Errors produced while turning a fragment back into snapshot text.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
	/// The fragment was empty.
	#[error("fragment is empty")]
	Empty,
	/// The fragment is not valid URL-safe base64.
	#[error("fragment is not valid base64: {0}")]
	Base64(#[from] base64::DecodeError),
	/// The decoded bytes are not a valid brotli stream.
	#[error("fragment payload failed to decompress: {0}")]
	Decompress(#[source] std::io::Error),
	/// The decompressed payload is not UTF-8 text.
	#[error("fragment payload is not UTF-8: {0}")]
	Utf8(#[from] std::string::FromUtf8Error),
	/// The compressor failed to write its output.
	#[error("snapshot failed to compress: {0}")]
	Compress(#[source] std::io::Error),
}

/// Reversible transform between snapshot text and a compact fragment.
pub trait FragmentCodec {
	/// Encodes snapshot text into a fragment.
	fn compress(&self, snapshot: &str) -> Result<String, CodecError>;

	/// Decodes a fragment back into snapshot text.
	///
	/// # Errors
	///
	/// Returns a [`CodecError`] for empty, non-base64, corrupt or non-UTF-8
	/// payloads.
	fn decompress(&self, fragment: &str) -> Result<String, CodecError>;
}

/// Brotli tuning knobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CodecOptions {
	/// Compression quality, 0 (fastest) to 11 (smallest).
	pub quality: u32,
	/// Log2 of the sliding window size, 10 to 24.
	pub window: u32,
}

impl Default for CodecOptions {
	fn default() -> Self {
		Self { quality: 9, window: 22 }
	}
}

impl CodecOptions {
	/// Clamps both knobs into the ranges brotli accepts.
	pub fn normalized(self) -> Self {
		Self {
			quality: self.quality.min(11),
			window: self.window.clamp(10, 24),
		}
	}
}

/// Brotli + base64url codec used for share links.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrotliCodec {
	options: CodecOptions,
}

impl BrotliCodec {
	pub fn new(options: CodecOptions) -> Self {
		Self {
			options: options.normalized(),
		}
	}
}

impl FragmentCodec for BrotliCodec {
	fn compress(&self, snapshot: &str) -> Result<String, CodecError> {
		let mut writer = brotli::CompressorWriter::new(Vec::new(), BUFFER_SIZE, self.options.quality, self.options.window);
		writer.write_all(snapshot.as_bytes()).map_err(CodecError::Compress)?;
		let compressed = writer.into_inner();

		let fragment = URL_SAFE_NO_PAD.encode(&compressed);
		tracing::trace!(snapshot_len = snapshot.len(), fragment_len = fragment.len(), "compressed snapshot");
		Ok(fragment)
	}

	fn decompress(&self, fragment: &str) -> Result<String, CodecError> {
		if fragment.is_empty() {
			return Err(CodecError::Empty);
		}

		let compressed = URL_SAFE_NO_PAD.decode(fragment)?;
		let mut decoder = brotli::Decompressor::new(compressed.as_slice(), BUFFER_SIZE);
		let mut bytes = Vec::new();
		decoder.read_to_end(&mut bytes).map_err(CodecError::Decompress)?;

		Ok(String::from_utf8(bytes)?)
	}
}
