//! Subcommand implementations.
//!
//! Each command writes its report to `out` so tests can capture it.

use std::fs;
use std::io::Write;
use std::path::{Component, Path, PathBuf};

use anyhow::{Context, bail};
use playpen_codec::BrotliCodec;
use playpen_session::{Document, Documents, RestoreSource, SessionConfig, SessionStore, UrlAddressBar, restore_documents};

/// Address bar for `base_url` with any fragment removed.
fn fresh_address_bar(base_url: &str) -> anyhow::Result<UrlAddressBar> {
	let bar = UrlAddressBar::parse(base_url).with_context(|| format!("invalid base URL '{base_url}'"))?;
	bar.replace_fragment("");
	Ok(bar)
}

/// Address bar for a full link, or for `base_url` carrying a bare fragment.
fn link_address_bar(link: &str, base_url: &str) -> anyhow::Result<UrlAddressBar> {
	if let Ok(bar) = UrlAddressBar::parse(link) {
		return Ok(bar);
	}
	let bar = fresh_address_bar(base_url)?;
	bar.replace_fragment(link.strip_prefix('#').unwrap_or(link));
	Ok(bar)
}

fn open_store(config: &SessionConfig, bar: UrlAddressBar) -> SessionStore {
	SessionStore::open_with(bar, BrotliCodec::new(config.codec), config)
}

pub fn new_session(config: &SessionConfig, base_url: &str, out: &mut impl Write) -> anyhow::Result<()> {
	let store = open_store(config, fresh_address_bar(base_url)?);
	writeln!(out, "{}", store.share_link())?;
	Ok(())
}

pub fn pack(config: &SessionConfig, base_url: &str, files: &[PathBuf], out: &mut impl Write) -> anyhow::Result<()> {
	let mut documents = Documents::new();
	for path in files {
		let name = path
			.file_name()
			.and_then(|name| name.to_str())
			.with_context(|| format!("{} has no usable file name", path.display()))?;
		let content = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
		if documents.insert(Document::new(name, content)).is_some() {
			tracing::warn!(name, "duplicate document name; keeping the last file");
		}
	}

	let mut store = open_store(config, fresh_address_bar(base_url)?);
	store.replace_all_documents(documents);
	writeln!(out, "{}", store.share_link())?;
	Ok(())
}

pub fn open(config: &SessionConfig, base_url: &str, link: &str, out: &mut impl Write) -> anyhow::Result<()> {
	let store = open_store(config, link_address_bar(link, base_url)?);

	let source = match store.restore_source() {
		RestoreSource::Fragment => "link",
		RestoreSource::Defaults => "defaults",
	};
	writeln!(out, "source:  {source}")?;
	writeln!(out, "theme:   {}", store.theme())?;
	writeln!(out, "active:  {}", store.active_document_name().unwrap_or("-"))?;
	writeln!(out)?;

	let width = store.documents().names().map(str::len).max().unwrap_or(0).max("NAME".len());
	writeln!(out, "{:<width$}  {:<12}  BYTES", "NAME", "LANGUAGE")?;
	for document in store.documents() {
		writeln!(
			out,
			"{:<width$}  {:<12}  {}",
			document.name(),
			document.language_id(),
			document.content().len()
		)?;
	}
	Ok(())
}

pub fn unpack(config: &SessionConfig, base_url: &str, link: &str, dir: &Path, out: &mut impl Write) -> anyhow::Result<()> {
	let bar = link_address_bar(link, base_url)?;
	let documents = restore_documents(&bar.fragment(), &BrotliCodec::new(config.codec), &config.language_table())
		.context("link does not carry a readable session")?;

	let targets = documents
		.iter()
		.map(|document| -> anyhow::Result<_> { Ok((document_path(dir, document.name())?, document)) })
		.collect::<anyhow::Result<Vec<_>>>()?;

	fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
	for (path, document) in targets {
		fs::write(&path, document.content()).with_context(|| format!("writing {}", path.display()))?;
		writeln!(out, "{}", path.display())?;
	}
	Ok(())
}

/// Joins `name` onto `dir`, refusing anything but a plain file name.
fn document_path(dir: &Path, name: &str) -> anyhow::Result<PathBuf> {
	let mut components = Path::new(name).components();
	match (components.next(), components.next()) {
		(Some(Component::Normal(_)), None) => Ok(dir.join(name)),
		_ => bail!("refusing to write document '{name}' outside {}", dir.display()),
	}
}

#[cfg(test)]
mod tests {
	use playpen_session::encode_documents;

	use super::*;

	const BASE: &str = "http://localhost:5173/";

	fn run<F>(command: F) -> String
	where
		F: FnOnce(&mut Vec<u8>) -> anyhow::Result<()>,
	{
		let mut out = Vec::new();
		command(&mut out).unwrap();
		String::from_utf8(out).unwrap()
	}

	#[test]
	fn new_prints_starter_link() {
		let config = SessionConfig::default();
		let output = run(|out| new_session(&config, "http://localhost:5173/#stale", out));

		let link = output.trim();
		assert!(link.starts_with("http://localhost:5173/#"));
		assert_ne!(link, "http://localhost:5173/#stale");
	}

	#[test]
	fn pack_then_unpack_roundtrips_files() {
		let config = SessionConfig::default();
		let src = tempfile::tempdir().unwrap();
		let a = src.path().join("App.tsx");
		let b = src.path().join("styles.css");
		fs::write(&a, "export default 1;\n").unwrap();
		fs::write(&b, "body { margin: 0 }\n").unwrap();

		let link = run(|out| pack(&config, BASE, &[a, b], out)).trim().to_string();

		let dest = tempfile::tempdir().unwrap();
		let written = run(|out| unpack(&config, BASE, &link, dest.path(), out));
		assert_eq!(written.lines().count(), 2);
		assert_eq!(fs::read_to_string(dest.path().join("App.tsx")).unwrap(), "export default 1;\n");
		assert_eq!(fs::read_to_string(dest.path().join("styles.css")).unwrap(), "body { margin: 0 }\n");
	}

	#[test]
	fn pack_reports_missing_files() {
		let config = SessionConfig::default();
		let dir = tempfile::tempdir().unwrap();
		let mut out = Vec::new();
		let err = pack(&config, BASE, &[dir.path().join("absent.ts")], &mut out).unwrap_err();
		assert!(err.to_string().contains("absent.ts"));
	}

	#[test]
	fn open_describes_linked_session() {
		let config = SessionConfig::default();
		let docs = Documents::new().with_document("index.js", "alert(1)");
		let fragment = encode_documents(&docs, &BrotliCodec::default()).unwrap();

		let output = run(|out| open(&config, BASE, &fragment, out));

		assert!(output.contains("source:  link"));
		assert!(output.contains("active:  index.js"));
		assert!(output.lines().any(|line| line.starts_with("index.js") && line.contains("javascript") && line.ends_with('8')));
	}

	#[test]
	fn open_falls_back_for_broken_links() {
		let config = SessionConfig::default();
		let output = run(|out| open(&config, BASE, "http://localhost:5173/#garbage", out));

		assert!(output.contains("source:  defaults"));
		assert!(output.contains("App.tsx"));
	}

	#[test]
	fn unpack_rejects_broken_links() {
		let config = SessionConfig::default();
		let dest = tempfile::tempdir().unwrap();
		let mut out = Vec::new();
		assert!(unpack(&config, BASE, "#garbage", dest.path(), &mut out).is_err());
	}

	#[test]
	fn unpack_refuses_paths_outside_target() {
		let config = SessionConfig::default();
		let docs = Documents::new().with_document("../escape.ts", "x");
		let fragment = encode_documents(&docs, &BrotliCodec::default()).unwrap();
		let dest = tempfile::tempdir().unwrap();

		let mut out = Vec::new();
		let err = unpack(&config, BASE, &fragment, &dest.path().join("out"), &mut out).unwrap_err();

		assert!(err.to_string().contains("../escape.ts"));
		assert!(!dest.path().join("out").exists());
	}
}
