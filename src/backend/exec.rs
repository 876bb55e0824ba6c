//! Child-process execution for external download tools.

use std::ffi::OsString;
use std::io::ErrorKind;

use tokio::process::Command;
use tracing::{info, warn};

/// Sentinel exit code reported when the tool binary cannot be spawned.
/// Mirrors the shell convention for "command not found".
pub(crate) const TOOL_MISSING_EXIT: i32 = 127;

/// One fully built command line in a backend's ordered attempt list.
#[derive(Debug, Clone)]
pub(crate) struct Invocation {
    /// Attempt label for logs, e.g. `"cookie"` / `"no-cookie"`.
    pub label: &'static str,
    /// Tool binary name, resolved via `PATH`.
    pub program: &'static str,
    /// Argument list.
    pub args: Vec<OsString>,
}

impl Invocation {
    pub(crate) fn new<I, A>(label: &'static str, program: &'static str, args: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<OsString>,
    {
        Self {
            label,
            program,
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

/// Runs `invocations` in order until one exits 0.
///
/// Returns `Err(last_exit)` with the final attempt's exit code when every
/// attempt fails. The child inherits stdio so the tool's own progress
/// output reaches the console.
pub(crate) async fn run_first_success(invocations: &[Invocation]) -> Result<(), i32> {
    let mut last_exit = TOOL_MISSING_EXIT;
    for invocation in invocations {
        let exit = run_tool(invocation).await;
        if exit == 0 {
            return Ok(());
        }
        warn!(
            tool = invocation.program,
            attempt = invocation.label,
            exit_code = exit,
            "external tool attempt failed"
        );
        last_exit = exit;
    }
    Err(last_exit)
}

/// Runs one invocation to completion and returns its exit code.
///
/// A spawn failure of kind `NotFound` maps to [`TOOL_MISSING_EXIT`]; other
/// spawn failures and signal terminations map to `-1`.
async fn run_tool(invocation: &Invocation) -> i32 {
    info!(
        tool = invocation.program,
        attempt = invocation.label,
        "running external tool"
    );
    match Command::new(invocation.program)
        .args(&invocation.args)
        .status()
        .await
    {
        Ok(status) => status.code().unwrap_or(-1),
        Err(error) if error.kind() == ErrorKind::NotFound => TOOL_MISSING_EXIT,
        Err(error) => {
            warn!(tool = invocation.program, error = %error, "failed to spawn external tool");
            -1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_run_tool_missing_program_maps_to_sentinel() {
        let invocation = Invocation::new("bare", "drivegrab-no-such-tool", ["--version"]);
        assert_eq!(run_tool(&invocation).await, TOOL_MISSING_EXIT);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_run_first_success_first_zero_wins() {
        let invocations = [
            Invocation::new("first", "sh", ["-c", "exit 0"]),
            Invocation::new("second", "sh", ["-c", "exit 1"]),
        ];
        assert!(run_first_success(&invocations).await.is_ok());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_run_first_success_falls_through_to_later_attempt() {
        let invocations = [
            Invocation::new("cookie", "sh", ["-c", "exit 3"]),
            Invocation::new("no-cookie", "sh", ["-c", "exit 0"]),
        ];
        assert!(run_first_success(&invocations).await.is_ok());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_run_first_success_reports_last_exit_code() {
        let invocations = [
            Invocation::new("cookie", "sh", ["-c", "exit 3"]),
            Invocation::new("no-cookie", "sh", ["-c", "exit 5"]),
        ];
        assert_eq!(run_first_success(&invocations).await, Err(5));
    }

    #[tokio::test]
    async fn test_run_first_success_empty_list_fails() {
        assert!(run_first_success(&[]).await.is_err());
    }
}
