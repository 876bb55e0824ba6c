//! URL classification for shared-drive links.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;
use url::Url;

/// Matches the canonical shared-folder path shape.
#[allow(clippy::expect_used)]
static FOLDER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"/drive/folders/([A-Za-z0-9_-]+)").expect("folder regex is valid")
    // Static pattern, safe to panic
});

/// Matches the canonical single-file path shape.
#[allow(clippy::expect_used)]
static FILE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/file/d/([A-Za-z0-9_-]+)").expect("file regex is valid"));

/// Generic `id=<id>` fallback for viewer/export style URLs. The word
/// boundary keeps parameters like `uuid=` from matching.
#[allow(clippy::expect_used)]
static ID_PARAM_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\bid=([A-Za-z0-9_-]+)").expect("id regex is valid"));

/// Kind of remote object a link points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    /// Shared folder (directory tree of items)
    Folder,
    /// Single shared file
    File,
}

impl fmt::Display for LinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Folder => write!(f, "folder"),
            Self::File => write!(f, "file"),
        }
    }
}

/// A successfully classified link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedLink {
    /// Kind of remote object.
    pub kind: LinkKind,
    /// Opaque remote identifier extracted from the URL.
    pub id: String,
    /// Optional `resourcekey` captured from the query string. Only
    /// populated for folders; some restricted-but-shared folders need it.
    pub access_key: Option<String>,
}

/// Classifies a raw URL string into a [`ClassifiedLink`].
///
/// Patterns are tried in order: folder path, file path, then a generic
/// `id=` query fallback (treated as a file). Returns `None` when nothing
/// matches; the caller treats that as a skip, not an error.
#[must_use]
pub fn classify(raw_url: &str) -> Option<ClassifiedLink> {
    if let Some(caps) = FOLDER_PATTERN.captures(raw_url) {
        let id = caps[1].to_string();
        trace!(url = %raw_url, id = %id, "classified as folder");
        return Some(ClassifiedLink {
            kind: LinkKind::Folder,
            id,
            access_key: extract_access_key(raw_url),
        });
    }

    if let Some(caps) = FILE_PATTERN.captures(raw_url) {
        let id = caps[1].to_string();
        trace!(url = %raw_url, id = %id, "classified as file");
        return Some(ClassifiedLink {
            kind: LinkKind::File,
            id,
            access_key: None,
        });
    }

    if let Some(caps) = ID_PARAM_PATTERN.captures(raw_url) {
        let id = caps[1].to_string();
        trace!(url = %raw_url, id = %id, "classified as file via id= fallback");
        return Some(ClassifiedLink {
            kind: LinkKind::File,
            id,
            access_key: None,
        });
    }

    None
}

/// Extracts the optional `resourcekey` query parameter, case-insensitively.
#[must_use]
pub fn extract_access_key(raw_url: &str) -> Option<String> {
    let parsed = Url::parse(raw_url).ok()?;
    parsed
        .query_pairs()
        .find(|(key, _)| key.eq_ignore_ascii_case("resourcekey"))
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_folder_url() {
        let link = classify("https://drive.google.com/drive/folders/ABC123").unwrap();
        assert_eq!(link.kind, LinkKind::Folder);
        assert_eq!(link.id, "ABC123");
        assert!(link.access_key.is_none());
    }

    #[test]
    fn test_classify_folder_url_with_suffix() {
        let link = classify("https://drive.google.com/drive/folders/ABC123?usp=sharing").unwrap();
        assert_eq!(link.kind, LinkKind::Folder);
        assert_eq!(link.id, "ABC123");
    }

    #[test]
    fn test_classify_file_url() {
        let link = classify("https://drive.google.com/file/d/XYZ789?x=1").unwrap();
        assert_eq!(link.kind, LinkKind::File);
        assert_eq!(link.id, "XYZ789");
    }

    #[test]
    fn test_classify_file_url_view_suffix() {
        let link = classify("https://drive.google.com/file/d/XYZ789/view").unwrap();
        assert_eq!(link.kind, LinkKind::File);
        assert_eq!(link.id, "XYZ789");
    }

    #[test]
    fn test_classify_generic_id_fallback_is_file() {
        let link = classify("https://example.com/id=QQQ&foo=1").unwrap();
        assert_eq!(link.kind, LinkKind::File);
        assert_eq!(link.id, "QQQ");
    }

    #[test]
    fn test_classify_open_id_query() {
        let link = classify("https://drive.google.com/open?id=OPEN42").unwrap();
        assert_eq!(link.kind, LinkKind::File);
        assert_eq!(link.id, "OPEN42");
    }

    #[test]
    fn test_classify_unrecognized_returns_none() {
        assert!(classify("https://example.com/nothing").is_none());
    }

    #[test]
    fn test_classify_folder_wins_over_id_param() {
        // Folder pattern is tried first even when an id= parameter exists.
        let link = classify("https://drive.google.com/drive/folders/FOLD1?id=OTHER").unwrap();
        assert_eq!(link.kind, LinkKind::Folder);
        assert_eq!(link.id, "FOLD1");
    }

    #[test]
    fn test_id_fallback_ignores_uuid_parameter() {
        assert!(classify("https://example.com/page?uuid=abc").is_none());
    }

    #[test]
    fn test_classify_folder_captures_resource_key() {
        let link =
            classify("https://drive.google.com/drive/folders/ABC?resourcekey=KEY123&x=1").unwrap();
        assert_eq!(link.access_key.as_deref(), Some("KEY123"));
    }

    #[test]
    fn test_classify_file_never_carries_resource_key() {
        let link = classify("https://drive.google.com/file/d/F1?resourcekey=KEY").unwrap();
        assert!(link.access_key.is_none());
    }

    #[test]
    fn test_extract_access_key_present() {
        let key = extract_access_key("https://x.test/f?resourcekey=KEY123&x=1");
        assert_eq!(key.as_deref(), Some("KEY123"));
    }

    #[test]
    fn test_extract_access_key_case_insensitive() {
        let key = extract_access_key("https://x.test/f?ResourceKey=KEY123");
        assert_eq!(key.as_deref(), Some("KEY123"));
    }

    #[test]
    fn test_extract_access_key_absent_returns_none() {
        assert!(extract_access_key("https://x.test/f?x=1").is_none());
    }

    #[test]
    fn test_extract_access_key_empty_value_returns_none() {
        assert!(extract_access_key("https://x.test/f?resourcekey=").is_none());
    }
}
