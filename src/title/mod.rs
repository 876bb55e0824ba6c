//! Best-effort remote folder title scraping.
//!
//! Fetches a shared folder's public viewer page and recovers the
//! human-readable folder name from the document title. Every failure here
//! is non-fatal for callers: they fall back to naming the download target
//! after the raw identifier.

use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;
use reqwest::Client;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::naming::sanitize_name_default;

const DEFAULT_BASE_URL: &str = "https://drive.google.com";
const REQUEST_TIMEOUT_SECS: u64 = 20;
const CONNECT_TIMEOUT_SECS: u64 = 10;

/// The viewer page titles follow the `NAME - Google Drive` convention.
#[allow(clippy::expect_used)]
static TITLE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<title>(.*?) - Google Drive</title>").expect("title regex is valid")
});

/// Errors produced while fetching a remote title.
#[derive(Debug, Error)]
pub enum TitleError {
    /// HTTP client construction failed.
    #[error("HTTP client construction failed: {0}")]
    Client(#[source] reqwest::Error),
    /// Request failed: network error, timeout, or non-2xx status.
    #[error("title request failed: {0}")]
    Request(#[from] reqwest::Error),
}

/// Scrapes folder titles from the public viewer page.
#[derive(Debug, Clone)]
pub struct TitleFetcher {
    client: Client,
    base_url: String,
}

impl TitleFetcher {
    /// Creates a fetcher against the production viewer host.
    ///
    /// # Errors
    ///
    /// Returns [`TitleError::Client`] when the HTTP client cannot be built.
    pub fn new() -> Result<Self, TitleError> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Creates a fetcher against an alternate base URL (used by tests).
    ///
    /// # Errors
    ///
    /// Returns [`TitleError::Client`] when the HTTP client cannot be built.
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, TitleError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .build()
            .map_err(TitleError::Client)?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    /// Fetches the folder's viewer page and extracts its sanitized title.
    ///
    /// Returns `Ok(None)` when the page loads but carries no recognizable
    /// title.
    ///
    /// # Errors
    ///
    /// Returns [`TitleError::Request`] on network errors, timeouts, and
    /// non-2xx responses.
    #[instrument(skip(self))]
    pub async fn fetch_folder_title(
        &self,
        folder_id: &str,
        access_key: Option<&str>,
    ) -> Result<Option<String>, TitleError> {
        let url = format!("{}/drive/folders/{folder_id}", self.base_url);
        let mut request = self.client.get(&url);
        if let Some(key) = access_key {
            // query() percent-encodes, so unusual key values cannot corrupt
            // the request line.
            request = request.query(&[("resourcekey", key)]);
        }

        let response = request.send().await?.error_for_status()?;
        let html = response.text().await?;

        let title = extract_title(&html);
        debug!(folder_id = %folder_id, title = ?title, "title fetch finished");
        Ok(title)
    }
}

/// Extracts and sanitizes the folder name from viewer-page HTML.
fn extract_title(html: &str) -> Option<String> {
    let raw = TITLE_PATTERN.captures(html)?.get(1)?.as_str();
    let unescaped = html_unescape_basic(raw.trim());
    if unescaped.is_empty() {
        return None;
    }
    Some(sanitize_name_default(&unescaped))
}

/// Decodes the handful of HTML entities that show up in page titles.
fn html_unescape_basic(value: &str) -> String {
    value
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#x27;", "'")
        .replace("&nbsp;", "\u{00a0}")
        .replace("&#160;", "\u{00a0}")
}
