//! Link-list file reading.

use std::fs;
use std::io;
use std::path::Path;

/// Lines starting with this marker are treated as comments.
const COMMENT_MARKER: char = '#';

/// Reads a newline-delimited link list, skipping blank lines and comment
/// lines, preserving input order.
///
/// # Errors
///
/// Returns the underlying I/O error when the file cannot be read; a missing
/// link list is fatal for the run.
pub fn read_link_list(path: &Path) -> io::Result<Vec<String>> {
    let text = fs::read_to_string(path)?;
    Ok(text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with(COMMENT_MARKER))
        .map(ToString::to_string)
        .collect())
}
