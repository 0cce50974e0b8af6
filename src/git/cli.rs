//! [`Vcs`] implementation that shells out to the system `git` binary.
//!
//! Running the real binary inherits the user's git config, hooks, SSH agent
//! and credential store.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::debug;

use super::Vcs;
use super::branches::parse_branch_list;
use crate::error::{CommitError, DiffError, PushError};

/// Git driven through its command-line interface.
#[derive(Debug, Clone)]
pub struct GitCli {
    workdir: PathBuf,
}

impl GitCli {
    /// Run git commands inside `workdir`.
    pub fn new(workdir: impl Into<PathBuf>) -> Self {
        Self {
            workdir: workdir.into(),
        }
    }

    pub fn workdir(&self) -> &Path {
        &self.workdir
    }

    fn git(&self) -> Command {
        let mut cmd = Command::new("git");
        cmd.current_dir(&self.workdir);
        cmd
    }
}

/// Check that a `git` executable is on PATH.
pub fn check_git_installed() -> Result<(), DiffError> {
    which::which("git")
        .map(|_| ())
        .map_err(|_| DiffError::GitNotInstalled)
}

#[async_trait]
impl Vcs for GitCli {
    async fn staged_diff(&self) -> Result<String, DiffError> {
        check_git_installed()?;

        // `output()` buffers all of stdout, so large diffs are never truncated.
        let output = self
            .git()
            .args(["diff", "--cached"])
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(DiffError::SpawnFailed)?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let code = output.status.code().unwrap_or(-1);
            return Err(DiffError::NonZeroExit { code, stderr });
        }

        let diff = String::from_utf8_lossy(&output.stdout).into_owned();
        debug!("Staged diff: {} bytes", diff.len());
        Ok(diff)
    }

    async fn commit(&self, message: &str) -> Result<(), CommitError> {
        // The message is a single argv element; no shell ever parses it.
        let status = self
            .git()
            .args(["commit", "-m"])
            .arg(message)
            .status()
            .await
            .map_err(CommitError::SpawnFailed)?;

        if !status.success() {
            return Err(CommitError::NonZeroExit {
                exit_code: status.code(),
            });
        }
        Ok(())
    }

    async fn list_branches(&self) -> Result<Vec<String>, PushError> {
        let output = self
            .git()
            .args(["branch", "--no-color"])
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| PushError::ListBranchesFailed(e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(PushError::ListBranchesFailed(stderr.trim().to_string()));
        }

        let branches = parse_branch_list(&String::from_utf8_lossy(&output.stdout));
        debug!("Found {} local branches", branches.len());
        Ok(branches)
    }

    async fn push(&self, remote: &str, branch: &str) -> Result<(), PushError> {
        let status = self
            .git()
            .args(["push", remote, branch])
            .status()
            .await
            .map_err(PushError::SpawnFailed)?;

        if !status.success() {
            return Err(PushError::NonZeroExit {
                remote: remote.to_string(),
                branch: branch.to_string(),
                exit_code: status.code(),
            });
        }
        Ok(())
    }
}
