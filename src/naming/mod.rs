//! Filesystem-safe name sanitization for remote folder titles.
//!
//! Remote titles are arbitrary user-entered strings; this module reduces
//! them to names that are legal on every filesystem we target. Sanitization
//! is a total function: any input string (including empty) yields a usable
//! directory name.

/// Default maximum length for a sanitized name, in characters.
pub const DEFAULT_MAX_NAME_LEN: usize = 180;

/// Placeholder returned when sanitization leaves nothing usable.
const EMPTY_NAME_PLACEHOLDER: &str = "untitled";

/// Device names reserved by Windows; a bare match (any case) is rewritten
/// by wrapping in underscores so the directory can be created everywhere.
const RESERVED_NAMES: [&str; 22] = [
    "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
    "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
];

/// Sanitizes `raw` into a filesystem-safe name using the default length cap.
#[must_use]
pub fn sanitize_name_default(raw: &str) -> String {
    sanitize_name(raw, DEFAULT_MAX_NAME_LEN)
}

/// Sanitizes an arbitrary string into a filesystem-safe directory name.
///
/// Steps, in order:
/// 1. Replace characters illegal in filenames (`<>:"/\|?*` and
///    non-whitespace control characters) with `_`.
/// 2. Collapse whitespace runs to a single space and trim.
/// 3. Strip trailing spaces and periods (illegal at end of name on Windows).
/// 4. Wrap platform-reserved device names (`CON`, `NUL`, `COM1`, ...) in
///    underscores.
/// 5. Truncate to `max_len` characters, re-stripping any trailing space or
///    period the cut exposes.
/// 6. Fall back to a fixed placeholder if nothing remains.
///
/// Idempotent for inputs already within the length cap.
#[must_use]
pub fn sanitize_name(raw: &str, max_len: usize) -> String {
    let replaced: String = raw
        .chars()
        .map(|c| match c {
            '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*' => '_',
            // Whitespace (tabs, newlines) collapses below; only
            // non-whitespace control characters are illegal.
            c if c.is_whitespace() => c,
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    // split_whitespace both collapses runs and trims the ends.
    let collapsed = replaced.split_whitespace().collect::<Vec<_>>().join(" ");

    // Trailing strip happens before the reserved check so "CON." cannot
    // slip through as a bare device name.
    let mut name = collapsed.trim_end_matches([' ', '.']).to_string();

    if RESERVED_NAMES.iter().any(|r| name.eq_ignore_ascii_case(r)) {
        name = format!("_{name}_");
    }

    if name.chars().count() > max_len {
        name = name.chars().take(max_len).collect();
    }

    let trimmed = name.trim_end_matches([' ', '.']);
    if trimmed.is_empty() {
        EMPTY_NAME_PLACEHOLDER.to_string()
    } else {
        trimmed.to_string()
    }
}
