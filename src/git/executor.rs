//! Running the `git` binary.

use std::path::PathBuf;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::io::AsyncReadExt;
use tokio::process::Command;
use tracing::debug;

use crate::error::GitError;

/// Trait for executing git commands.
///
/// This abstraction allows mocking git in tests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GitExecutor: Send + Sync {
    /// Run git with `args` and return its stdout.
    async fn run(&self, args: &[String]) -> Result<String, GitError>;
}

/// Executor that runs the system `git` inside a repository.
#[derive(Debug, Clone)]
pub struct SystemGit {
    repo_root: PathBuf,
    max_buffer_bytes: u64,
}

impl SystemGit {
    pub fn new(repo_root: impl Into<PathBuf>, max_buffer_bytes: u64) -> Self {
        Self {
            repo_root: repo_root.into(),
            max_buffer_bytes,
        }
    }
}

#[async_trait]
impl GitExecutor for SystemGit {
    /// Stdout beyond `max_buffer_bytes` kills the process and fails with
    /// `GitError::OutputTooLarge`.
    async fn run(&self, args: &[String]) -> Result<String, GitError> {
        debug!("Running git {}", args.join(" "));

        let mut child = Command::new("git")
            .args(args)
            .current_dir(&self.repo_root)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(GitError::SpawnFailed)?;

        let (Some(stdout), Some(mut stderr)) = (child.stdout.take(), child.stderr.take()) else {
            return Err(GitError::ReadFailed(std::io::Error::other(
                "git output pipes were not captured",
            )));
        };

        // Drain stderr separately so a chatty stderr can't stall stdout.
        let stderr_task = tokio::spawn(async move {
            let mut buf = Vec::new();
            let _ = stderr.read_to_end(&mut buf).await;
            buf
        });

        let limit = self.max_buffer_bytes;
        let mut out = Vec::new();
        stdout
            .take(limit.saturating_add(1))
            .read_to_end(&mut out)
            .await
            .map_err(GitError::ReadFailed)?;

        if out.len() as u64 > limit {
            let _ = child.kill().await;
            return Err(GitError::OutputTooLarge { limit });
        }

        let status = child.wait().await.map_err(GitError::ReadFailed)?;
        let stderr = stderr_task.await.unwrap_or_default();

        if !status.success() {
            return Err(GitError::NonZeroExit {
                args: args.join(" "),
                code: status.code().unwrap_or(-1),
                stderr: String::from_utf8_lossy(&stderr).trim().to_string(),
            });
        }

        Ok(String::from_utf8_lossy(&out).into_owned())
    }
}

/// Check that `git` is on PATH.
pub fn check_git_installed() -> Result<(), GitError> {
    which::which("git")
        .map(|_| ())
        .map_err(|_| GitError::NotInstalled)
}
