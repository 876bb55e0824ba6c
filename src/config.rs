//! Immutable run configuration built once at startup.

use std::path::{Path, PathBuf};

use tracing::debug;

/// Configuration for one batch run. Built from CLI arguments before the
/// batch loop starts and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Path to the newline-delimited link-list file.
    pub input: PathBuf,
    /// Root directory download targets are created under.
    pub out: PathBuf,
    /// Cookie-jar file for authenticated primary attempts. `None` when the
    /// configured path does not exist on disk at startup.
    pub cookies: Option<PathBuf>,
    /// Sync-tool remote profile name; enables the fallback backend.
    pub remote: Option<String>,
}

impl RunConfig {
    /// Builds a run configuration, keeping the cookie path only when the
    /// file actually exists.
    #[must_use]
    pub fn new(
        input: PathBuf,
        out: PathBuf,
        cookies: PathBuf,
        remote: Option<String>,
    ) -> Self {
        let cookies = resolve_cookie_file(&cookies);
        Self {
            input,
            out,
            cookies,
            remote,
        }
    }
}

/// Returns the cookie path when the file is present on disk, `None`
/// otherwise. Absence is normal (unauthenticated runs), so it is only a
/// debug-level event.
fn resolve_cookie_file(path: &Path) -> Option<PathBuf> {
    if path.is_file() {
        Some(path.to_path_buf())
    } else {
        debug!(path = %path.display(), "Cookie file not found; proceeding without cookies");
        None
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_config_keeps_existing_cookie_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let config = RunConfig::new(
            PathBuf::from("links.txt"),
            PathBuf::from("out"),
            file.path().to_path_buf(),
            None,
        );
        assert_eq!(config.cookies.as_deref(), Some(file.path()));
    }

    #[test]
    fn test_config_drops_missing_cookie_file() {
        let config = RunConfig::new(
            PathBuf::from("links.txt"),
            PathBuf::from("out"),
            PathBuf::from("/nonexistent/cookies.txt"),
            Some("gdrive".to_string()),
        );
        assert!(config.cookies.is_none());
        assert_eq!(config.remote.as_deref(), Some("gdrive"));
    }
}
