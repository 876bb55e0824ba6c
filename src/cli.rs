//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::Parser;

/// Batch-download shared drive folders and files from a link list.
///
/// Drivegrab reads a newline-delimited list of share links, names each
/// local directory after the remote folder's real title, and delegates the
/// actual transfer to external tools (gdown, with an optional rclone
/// fallback).
#[derive(Parser, Debug)]
#[command(name = "drivegrab")]
#[command(author, version, about)]
pub struct Args {
    /// Link-list file: one URL per line; blank lines and `#` comments are ignored
    #[arg(short = 'i', long)]
    pub input: PathBuf,

    /// Root directory download targets are created under
    #[arg(short = 'o', long, default_value = "downloads_named")]
    pub out: PathBuf,

    /// Cookie-jar file for authenticated first attempts (used only if present on disk)
    #[arg(long, default_value = "cookies.txt")]
    pub cookies: PathBuf,

    /// Sync-tool remote profile name; enables the rclone fallback for folders
    #[arg(long)]
    pub remote: Option<String>,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long)]
    pub quiet: bool,
}
