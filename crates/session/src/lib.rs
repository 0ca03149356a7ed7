#![cfg_attr(test, allow(unused_crate_dependencies))]
//! Session state for a multi-file playground editor.
//!
//! A session holds a collection of named text documents, the active document
//! and a theme. The document collection is mirrored into the fragment of a
//! shareable URL after every change, and a session opened from such a URL
//! recovers the same documents.
//!
//! # Main Types
//!
//! - [`SessionStore`] - owns the session and exposes the mutation operations
//! - [`Documents`] / [`Document`] - the name-keyed document collection
//! - [`UrlAddressBar`] - the link whose fragment carries the encoded documents
//! - [`SnapshotObserver`] - post-commit hook; [`FragmentPublisher`] keeps the link fresh
//! - [`SessionConfig`] - TOML configuration for theme, codec and languages
//!
//! ```text
//! UI event ──► SessionStore::{add,remove,rename,replace_all}_document(s)
//!                    │ commit
//!                    ▼
//!              SnapshotObserver::on_commit ──► FragmentPublisher
//!                                                 │ json → brotli → base64url
//!                                                 ▼
//!                                          UrlAddressBar#fragment
//! ```

pub mod address_bar;
pub mod config;
pub mod defaults;
pub mod document;
pub mod observer;
pub mod snapshot;
pub mod store;

pub use address_bar::UrlAddressBar;
pub use config::{ConfigError, DEFAULT_BASE_URL, LanguagesConfig, SessionConfig};
pub use document::{Document, Documents};
pub use observer::{FragmentPublisher, SnapshotObserver};
pub use snapshot::{RestoreError, SnapshotError, encode_documents, restore_documents};
pub use store::{RESERVED_NAME, RestoreSource, SessionStore, Theme};
