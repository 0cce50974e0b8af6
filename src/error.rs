//! Error types for stagecommit modules using thiserror.

use thiserror::Error;

/// Errors from reading the staged diff.
#[derive(Error, Debug)]
pub enum DiffError {
    #[error("git CLI not found in PATH. Install git to use stagecommit")]
    GitNotInstalled,

    #[error("Failed to run git diff: {0}")]
    SpawnFailed(#[source] std::io::Error),

    #[error("git diff exited with code {code}: {stderr}")]
    NonZeroExit { code: i32, stderr: String },
}

/// Errors from the message generation backends.
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Backend responded with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("No response received from {url}: {reason}")]
    NoResponse { url: String, reason: String },

    #[error("Request setup failed: {0}")]
    RequestSetup(String),

    #[error("Backend returned a malformed response: {reason}. Body: {body}")]
    MalformedResponse { reason: String, body: String },

    #[error("Backend returned an empty commit message")]
    EmptyMessage,
}

/// Errors from `git commit`.
#[derive(Error, Debug)]
pub enum CommitError {
    #[error("Failed to run git commit: {0}")]
    SpawnFailed(#[source] std::io::Error),

    #[error("git commit exited with {}", exit_code.map_or("unknown status".to_string(), |c| format!("code {c}")))]
    NonZeroExit { exit_code: Option<i32> },
}

/// Errors from listing branches or `git push`.
#[derive(Error, Debug)]
pub enum PushError {
    #[error("Failed to list branches: {0}")]
    ListBranchesFailed(String),

    #[error("Failed to run git push: {0}")]
    SpawnFailed(#[source] std::io::Error),

    #[error("git push to {remote}/{branch} exited with {}", exit_code.map_or("unknown status".to_string(), |c| format!("code {c}")))]
    NonZeroExit {
        remote: String,
        branch: String,
        exit_code: Option<i32>,
    },
}

/// Errors from building the startup configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("GEMINI_API_KEY is not set. Export it or use --backend http")]
    MissingApiKey,

    #[error("Unknown backend '{0}'. Expected 'http' or 'gemini'")]
    UnknownBackend(String),

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
}

/// Errors from reading an interactive answer.
#[derive(Error, Debug)]
pub enum PromptError {
    #[error("Failed to read from terminal: {0}")]
    ReadFailed(#[source] std::io::Error),

    #[error("Interactive prompt failed: {0}")]
    Interactive(#[source] dialoguer::Error),
}

/// Any failure that ends the commit workflow.
#[derive(Error, Debug)]
pub enum WorkflowError {
    #[error(transparent)]
    Diff(#[from] DiffError),

    #[error("Failed to generate commit message: {0}")]
    Generation(#[from] GenerationError),

    #[error(transparent)]
    Commit(#[from] CommitError),

    #[error(transparent)]
    Push(#[from] PushError),

    #[error(transparent)]
    Prompt(#[from] PromptError),
}
