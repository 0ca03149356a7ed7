//! Playpen command-line front end.
//!
//! Drives a [`playpen_session::SessionStore`] from the terminal: builds share
//! links from files on disk, opens links the way a browser would, and
//! extracts the documents a link carries.

mod cli;
mod commands;

use std::io;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use cli::{Cli, Command};
use playpen_session::SessionConfig;

fn main() -> anyhow::Result<()> {
	let cli = Cli::parse();

	setup_tracing(cli.verbose);

	let config = load_config(cli.config.as_deref())?;
	let base_url = cli.base_url.unwrap_or_else(|| config.base_url.clone());
	let mut out = io::stdout().lock();

	match cli.command {
		Command::New => commands::new_session(&config, &base_url, &mut out),
		Command::Pack { files } => commands::pack(&config, &base_url, &files, &mut out),
		Command::Open { link } => commands::open(&config, &base_url, &link, &mut out),
		Command::Unpack { link, out: dir } => commands::unpack(&config, &base_url, &link, &dir, &mut out),
	}
}

fn default_config_path() -> Option<PathBuf> {
	dirs::config_dir().map(|dir| dir.join("playpen").join("config.toml"))
}

fn load_config(explicit: Option<&Path>) -> anyhow::Result<SessionConfig> {
	if let Some(path) = explicit {
		return SessionConfig::load(path).with_context(|| format!("loading config {}", path.display()));
	}

	match default_config_path() {
		Some(path) => Ok(SessionConfig::load_or_default(&path)?),
		None => Ok(SessionConfig::default()),
	}
}

fn setup_tracing(verbose: bool) {
	use tracing_subscriber::EnvFilter;

	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
		if verbose {
			EnvFilter::new("playpen=debug,playpen_session=debug,playpen_codec=debug,info")
		} else {
			EnvFilter::new("warn")
		}
	});

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(io::stderr)
		.with_target(verbose)
		.init();
}
