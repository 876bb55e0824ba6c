//! Fallback download backend wrapping the `rclone` CLI.
//!
//! Folders only; single files have no sync-tool fallback. The copy is
//! scoped to the shared folder via `--drive-root-folder-id`, so the
//! configured remote profile does not need per-folder setup.

use std::ffi::OsString;
use std::fs;

use async_trait::async_trait;
use tracing::debug;

use super::exec::{Invocation, run_first_success};
use super::{Backend, BackendError, DownloadJob};
use crate::parser::LinkKind;

/// Binary name of the fallback sync tool.
pub const RCLONE_TOOL: &str = "rclone";

/// Native-format files are exported to common office formats.
const EXPORT_FORMATS: &str = "docx,xlsx,pptx,pdf";
const TRANSFERS: &str = "8";
const CHECKERS: &str = "8";
const TPS_LIMIT: &str = "4";

/// Fallback backend; shells out to `rclone copy`.
#[derive(Debug, Clone)]
pub struct RcloneBackend {
    remote: String,
}

impl RcloneBackend {
    /// Creates the backend for the named remote profile.
    #[must_use]
    pub fn new(remote: impl Into<String>) -> Self {
        Self {
            remote: remote.into(),
        }
    }

    fn invocation(&self, job: &DownloadJob) -> Invocation {
        let mut args = vec![
            OsString::from("copy"),
            OsString::from(format!("{}:", self.remote)),
            job.dest.as_os_str().to_os_string(),
            OsString::from("--drive-root-folder-id"),
            OsString::from(&job.id),
            OsString::from("--drive-export-formats"),
            OsString::from(EXPORT_FORMATS),
            OsString::from("--transfers"),
            OsString::from(TRANSFERS),
            OsString::from("--checkers"),
            OsString::from(CHECKERS),
            OsString::from("--tpslimit"),
            OsString::from(TPS_LIMIT),
        ];
        if let Some(key) = &job.access_key {
            args.push(OsString::from("--drive-resource-key"));
            args.push(OsString::from(key));
        }
        Invocation::new("sync", RCLONE_TOOL, args)
    }
}

#[async_trait]
impl Backend for RcloneBackend {
    fn name(&self) -> &'static str {
        RCLONE_TOOL
    }

    fn available(&self) -> bool {
        which::which(RCLONE_TOOL).is_ok()
    }

    async fn run(&self, job: &DownloadJob) -> Result<(), BackendError> {
        if job.kind != LinkKind::Folder {
            return Err(BackendError::UnsupportedKind {
                tool: RCLONE_TOOL,
                kind: job.kind,
            });
        }
        if !self.available() {
            return Err(BackendError::ToolMissing { tool: RCLONE_TOOL });
        }
        fs::create_dir_all(&job.dest).map_err(|source| BackendError::CreateDir {
            path: job.dest.clone(),
            source,
        })?;

        let invocation = self.invocation(job);
        debug!(id = %job.id, remote = %self.remote, "rclone fallback invocation built");
        run_first_success(std::slice::from_ref(&invocation))
            .await
            .map_err(|last_exit| BackendError::Exhausted {
                tool: RCLONE_TOOL,
                last_exit,
            })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn job(access_key: Option<&str>) -> DownloadJob {
        DownloadJob {
            kind: LinkKind::Folder,
            id: "ABC123".to_string(),
            access_key: access_key.map(String::from),
            dest: PathBuf::from("/tmp/out/Folder (ABC123)"),
        }
    }

    fn args_of(invocation: &Invocation) -> Vec<String> {
        invocation
            .args
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_copy_is_scoped_to_root_folder_id() {
        let backend = RcloneBackend::new("gdrive");
        let args = args_of(&backend.invocation(&job(None)));
        assert_eq!(args[0], "copy");
        assert_eq!(args[1], "gdrive:");
        let root_flag = args.iter().position(|a| a == "--drive-root-folder-id");
        assert_eq!(args[root_flag.unwrap() + 1], "ABC123");
    }

    #[test]
    fn test_export_formats_and_concurrency_are_fixed() {
        let backend = RcloneBackend::new("gdrive");
        let args = args_of(&backend.invocation(&job(None)));
        let find = |flag: &str| {
            args.iter()
                .position(|a| a == flag)
                .map(|i| args[i + 1].clone())
        };
        assert_eq!(find("--drive-export-formats").as_deref(), Some("docx,xlsx,pptx,pdf"));
        assert_eq!(find("--transfers").as_deref(), Some("8"));
        assert_eq!(find("--checkers").as_deref(), Some("8"));
        assert_eq!(find("--tpslimit").as_deref(), Some("4"));
    }

    #[test]
    fn test_access_key_forwarded_when_present() {
        let backend = RcloneBackend::new("gdrive");
        let args = args_of(&backend.invocation(&job(Some("KEY123"))));
        let key_flag = args.iter().position(|a| a == "--drive-resource-key");
        assert_eq!(args[key_flag.unwrap() + 1], "KEY123");
    }

    #[test]
    fn test_access_key_flag_absent_without_key() {
        let backend = RcloneBackend::new("gdrive");
        let args = args_of(&backend.invocation(&job(None)));
        assert!(!args.contains(&"--drive-resource-key".to_string()));
    }

    #[tokio::test]
    async fn test_file_jobs_are_rejected() {
        let backend = RcloneBackend::new("gdrive");
        let file_job = DownloadJob {
            kind: LinkKind::File,
            id: "XYZ".to_string(),
            access_key: None,
            dest: PathBuf::from("/tmp/out/file_XYZ"),
        };
        let result = backend.run(&file_job).await;
        assert!(matches!(
            result,
            Err(BackendError::UnsupportedKind { .. })
        ));
    }
}
