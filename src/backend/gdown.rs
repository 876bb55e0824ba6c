//! Primary download backend wrapping the `gdown` CLI.
//!
//! Handles both folders and single files. When a cookie file was supplied,
//! the cookie-authenticated attempt runs first and an identical
//! unauthenticated attempt follows on non-zero exit; share links that
//! stopped requiring auth keep working when the cookie jar has gone stale.

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use super::exec::{Invocation, run_first_success};
use super::{Backend, BackendError, DownloadJob};
use crate::parser::LinkKind;

/// Binary name of the primary downloader tool.
pub const GDOWN_TOOL: &str = "gdown";

/// Primary backend; shells out to `gdown`.
#[derive(Debug, Clone)]
pub struct GdownBackend {
    cookies: Option<PathBuf>,
}

impl GdownBackend {
    /// Creates the backend. `cookies` should already be filtered to an
    /// existing file (see `RunConfig`).
    #[must_use]
    pub fn new(cookies: Option<PathBuf>) -> Self {
        Self { cookies }
    }

    /// Builds the ordered attempt list for `job`: cookie-authenticated
    /// first (when a cookie file is configured), then bare.
    fn invocations(&self, job: &DownloadJob) -> Vec<Invocation> {
        let base = match job.kind {
            LinkKind::Folder => folder_args(&job.id, &job.dest),
            LinkKind::File => file_args(&job.id, &job.dest),
        };

        match &self.cookies {
            Some(cookie_path) => {
                let mut with_cookies = base.clone();
                with_cookies.push(OsString::from("--cookies"));
                with_cookies.push(cookie_path.clone().into_os_string());
                vec![
                    Invocation::new("cookie", GDOWN_TOOL, with_cookies),
                    Invocation::new("no-cookie", GDOWN_TOOL, base),
                ]
            }
            None => vec![Invocation::new("no-cookie", GDOWN_TOOL, base)],
        }
    }
}

/// Folder download: whole-tree fetch against the share URL, tolerating
/// partially failed items and resolving fuzzy URL/ID forms.
fn folder_args(id: &str, dest: &Path) -> Vec<OsString> {
    vec![
        OsString::from("--folder"),
        OsString::from(folder_url(id)),
        OsString::from("-O"),
        dest.as_os_str().to_os_string(),
        OsString::from("--remaining-ok"),
        OsString::from("--fuzzy"),
    ]
}

/// File download: direct identifier argument, output into the target
/// directory (trailing separator marks it as a directory for the tool).
fn file_args(id: &str, dest: &Path) -> Vec<OsString> {
    let mut dir = dest.as_os_str().to_os_string();
    dir.push(std::path::MAIN_SEPARATOR_STR);
    vec![OsString::from(id), OsString::from("-O"), dir]
}

fn folder_url(id: &str) -> String {
    format!("https://drive.google.com/drive/folders/{id}")
}

#[async_trait]
impl Backend for GdownBackend {
    fn name(&self) -> &'static str {
        GDOWN_TOOL
    }

    fn available(&self) -> bool {
        which::which(GDOWN_TOOL).is_ok()
    }

    async fn run(&self, job: &DownloadJob) -> Result<(), BackendError> {
        if !self.available() {
            return Err(BackendError::ToolMissing { tool: GDOWN_TOOL });
        }
        fs::create_dir_all(&job.dest).map_err(|source| BackendError::CreateDir {
            path: job.dest.clone(),
            source,
        })?;

        let invocations = self.invocations(job);
        debug!(id = %job.id, attempts = invocations.len(), "gdown attempt list built");
        run_first_success(&invocations)
            .await
            .map_err(|last_exit| BackendError::Exhausted {
                tool: GDOWN_TOOL,
                last_exit,
            })
    }
}
