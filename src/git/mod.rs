//! Git operations: staged diff, commit, branch listing and push.

pub mod branches;
pub mod cli;
pub mod diff;

use async_trait::async_trait;

use crate::error::{CommitError, DiffError, PushError};

pub use branches::{format_branch_menu, parse_branch_list, select_branch};
pub use cli::GitCli;
pub use diff::{DEFAULT_DENIED_EXTENSIONS, DenyList, FilteredDiff, filter_diff};

/// The four version-control capabilities the commit workflow needs.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Vcs: Send + Sync {
    /// Unified diff of the staged changes. Empty when nothing is staged.
    async fn staged_diff(&self) -> Result<String, DiffError>;

    /// Create a commit with `message`, streaming git's output to the terminal.
    async fn commit(&self, message: &str) -> Result<(), CommitError>;

    /// Names of the local branches.
    async fn list_branches(&self) -> Result<Vec<String>, PushError>;

    /// Push `branch` to `remote`, streaming git's output to the terminal.
    async fn push(&self, remote: &str, branch: &str) -> Result<(), PushError>;
}
