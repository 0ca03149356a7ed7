use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Build and open shareable playground session links.
#[derive(Parser, Debug)]
#[command(name = "playpen", version, about)]
pub struct Cli {
	/// Session config file (defaults to the user config directory)
	#[arg(long, value_name = "PATH", global = true)]
	pub config: Option<PathBuf>,

	/// Link that session fragments are attached to
	#[arg(long, value_name = "URL", global = true)]
	pub base_url: Option<String>,

	/// Verbose logging
	#[arg(short, long, global = true)]
	pub verbose: bool,

	#[command(subcommand)]
	pub command: Command,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
	/// Print the link for a fresh starter session
	New,
	/// Build a session from files and print its link
	Pack {
		/// Files to include; each becomes a document named after the file
		#[arg(required = true, value_name = "FILE")]
		files: Vec<PathBuf>,
	},
	/// Open a link (or bare fragment) and describe the session
	Open {
		/// Share link or fragment
		link: String,
	},
	/// Decode a link and write its documents to a directory
	Unpack {
		/// Share link or fragment
		link: String,
		/// Output directory
		#[arg(short, long, value_name = "DIR")]
		out: PathBuf,
	},
}
