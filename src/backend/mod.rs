//! External download tool wrappers.
//!
//! Each backend wraps one pre-built command-line tool and follows the same
//! contract: report unavailability when the tool is absent from `PATH`,
//! create the target directory idempotently, run the tool as a blocked
//! child process that streams its own progress to the console, and treat
//! exit code 0 as success.
//!
//! The [`Backend`] trait keeps the fallback chain in the link processor
//! testable with substituted fakes instead of real binaries.

mod exec;
mod gdown;
mod rclone;

pub use gdown::{GDOWN_TOOL, GdownBackend};
pub use rclone::{RCLONE_TOOL, RcloneBackend};

use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;

use crate::parser::LinkKind;

/// One unit of download work handed to a backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadJob {
    /// Kind of remote object.
    pub kind: LinkKind,
    /// Remote identifier of the folder or file.
    pub id: String,
    /// Optional access key captured from the source URL.
    pub access_key: Option<String>,
    /// Local directory the tool downloads into. Created if absent.
    pub dest: PathBuf,
}

/// Errors produced by backend invocation.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The external tool is not present on `PATH`; nothing was invoked.
    #[error("`{tool}` not found on PATH")]
    ToolMissing {
        /// Tool binary name.
        tool: &'static str,
    },
    /// The target directory could not be created.
    #[error("failed to create target directory {path}: {source}")]
    CreateDir {
        /// Directory that could not be created.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// Every attempt in the backend's ordered list exited non-zero.
    #[error("all `{tool}` attempts failed (last exit code {last_exit})")]
    Exhausted {
        /// Tool binary name.
        tool: &'static str,
        /// Exit code of the final attempt.
        last_exit: i32,
    },
    /// The backend does not handle this link kind.
    #[error("`{tool}` does not handle {kind} links")]
    UnsupportedKind {
        /// Tool binary name.
        tool: &'static str,
        /// Offending link kind.
        kind: LinkKind,
    },
}

/// Capability interface over one external download tool.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Short backend name for logs.
    fn name(&self) -> &'static str;

    /// Whether the wrapped tool is present on `PATH`.
    fn available(&self) -> bool;

    /// Runs the backend's ordered attempt list for `job`; the first attempt
    /// that exits 0 wins.
    ///
    /// # Errors
    ///
    /// Returns [`BackendError`] when the tool is missing, the target
    /// directory cannot be created, or every attempt exits non-zero.
    async fn run(&self, job: &DownloadJob) -> Result<(), BackendError>;
}
