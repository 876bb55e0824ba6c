//! Per-link orchestration: classify, name, download, fall back.
//!
//! One [`LinkProcessor`] is built per run and handles each link to
//! completion before the next begins. Backends are trait objects so the
//! fallback chain can be exercised in tests with scripted fakes.

use std::path::PathBuf;

use tracing::{error, info, instrument, warn};

use crate::backend::{Backend, DownloadJob, GdownBackend, RcloneBackend};
use crate::config::RunConfig;
use crate::parser::{ClassifiedLink, LinkKind, classify};
use crate::title::{TitleError, TitleFetcher};

/// Terminal state of one processed link. Never an error: per-link failures
/// are logged and summarized, not propagated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkOutcome {
    /// Some backend in the chain succeeded.
    Downloaded {
        /// Name of the backend that won.
        backend: &'static str,
    },
    /// The URL matched no known link shape.
    Skipped,
    /// Every applicable backend failed.
    Failed,
}

/// Processes one link at a time: classification, target naming, backend
/// invocation, and the primary-then-fallback chain.
pub struct LinkProcessor {
    out_root: PathBuf,
    /// `None` disables the best-effort title lookup (targets are then named
    /// after the raw identifier).
    title_fetcher: Option<TitleFetcher>,
    primary: Box<dyn Backend>,
    fallback: Option<Box<dyn Backend>>,
}

impl LinkProcessor {
    /// Builds the production processor: `gdown` primary, `rclone` fallback
    /// when a remote profile is configured.
    ///
    /// # Errors
    ///
    /// Returns [`TitleError`] when the title-fetch HTTP client cannot be
    /// built.
    pub fn from_config(config: &RunConfig) -> Result<Self, TitleError> {
        let fetcher = TitleFetcher::new()?;
        let primary: Box<dyn Backend> = Box::new(GdownBackend::new(config.cookies.clone()));
        let fallback: Option<Box<dyn Backend>> = config
            .remote
            .as_ref()
            .map(|remote| Box::new(RcloneBackend::new(remote.clone())) as Box<dyn Backend>);
        Ok(Self::with_parts(
            config.out.clone(),
            Some(fetcher),
            primary,
            fallback,
        ))
    }

    /// Assembles a processor from explicit parts.
    #[must_use]
    pub fn with_parts(
        out_root: PathBuf,
        title_fetcher: Option<TitleFetcher>,
        primary: Box<dyn Backend>,
        fallback: Option<Box<dyn Backend>>,
    ) -> Self {
        Self {
            out_root,
            title_fetcher,
            primary,
            fallback,
        }
    }

    /// Processes one link to completion. Never returns an error; the
    /// outcome feeds the batch summary.
    #[instrument(skip(self))]
    pub async fn process_link(&self, raw_url: &str) -> LinkOutcome {
        let Some(link) = classify(raw_url) else {
            info!(url = %raw_url, "Unrecognized link shape; skipping");
            return LinkOutcome::Skipped;
        };

        match link.kind {
            LinkKind::Folder => self.process_folder(raw_url, &link).await,
            LinkKind::File => self.process_file(raw_url, &link).await,
        }
    }

    async fn process_folder(&self, raw_url: &str, link: &ClassifiedLink) -> LinkOutcome {
        let title = self.lookup_title(link).await;
        let dir_name = format!(
            "{} ({})",
            title.as_deref().unwrap_or(&link.id),
            link.id
        );
        let job = DownloadJob {
            kind: LinkKind::Folder,
            id: link.id.clone(),
            access_key: link.access_key.clone(),
            dest: self.out_root.join(dir_name),
        };

        match self.primary.run(&job).await {
            Ok(()) => {
                info!(url = %raw_url, dest = %job.dest.display(), backend = self.primary.name(), "Folder downloaded");
                return LinkOutcome::Downloaded {
                    backend: self.primary.name(),
                };
            }
            Err(err) => {
                warn!(url = %raw_url, error = %err, backend = self.primary.name(), "Primary backend failed");
            }
        }

        let Some(fallback) = &self.fallback else {
            error!(url = %raw_url, "Folder download failed; no fallback configured");
            return LinkOutcome::Failed;
        };

        match fallback.run(&job).await {
            Ok(()) => {
                info!(url = %raw_url, dest = %job.dest.display(), backend = fallback.name(), "Folder downloaded via fallback");
                LinkOutcome::Downloaded {
                    backend: fallback.name(),
                }
            }
            Err(err) => {
                error!(url = %raw_url, error = %err, backend = fallback.name(), "Folder download failed; attempts exhausted");
                LinkOutcome::Failed
            }
        }
    }

    // Single files have no sync-tool fallback; the primary chain is the
    // whole chain.
    async fn process_file(&self, raw_url: &str, link: &ClassifiedLink) -> LinkOutcome {
        let job = DownloadJob {
            kind: LinkKind::File,
            id: link.id.clone(),
            access_key: None,
            dest: self.out_root.join(format!("file_{}", link.id)),
        };

        match self.primary.run(&job).await {
            Ok(()) => {
                info!(url = %raw_url, dest = %job.dest.display(), backend = self.primary.name(), "File downloaded");
                LinkOutcome::Downloaded {
                    backend: self.primary.name(),
                }
            }
            Err(err) => {
                error!(url = %raw_url, error = %err, backend = self.primary.name(), "File download failed");
                LinkOutcome::Failed
            }
        }
    }

    /// Best-effort title lookup; any fetch error degrades to `None`.
    async fn lookup_title(&self, link: &ClassifiedLink) -> Option<String> {
        let fetcher = self.title_fetcher.as_ref()?;
        match fetcher
            .fetch_folder_title(&link.id, link.access_key.as_deref())
            .await
        {
            Ok(title) => title,
            Err(err) => {
                warn!(id = %link.id, error = %err, "Title fetch failed; using identifier for naming");
                None
            }
        }
    }
}
