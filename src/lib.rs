//! stagecommit - A CLI tool that writes commit messages for staged changes.
//!
//! # Overview
//!
//! stagecommit reads `git diff --cached`, drops binary and asset files from it,
//! asks a generation backend (an HTTP service or Gemini) for a commit message,
//! confirms it with the user, commits, and optionally pushes a chosen branch.

pub mod config;
pub mod error;
pub mod git;
pub mod interact;
pub mod llm;
pub mod workflow;

// Re-export commonly used types
pub use config::{BackendConfig, CliOptions, Config};
pub use error::{CommitError, ConfigError, DiffError, GenerationError, PromptError, PushError, WorkflowError};
pub use git::{DenyList, FilteredDiff, GitCli, Vcs};
pub use interact::{LinePrompter, Prompter, TerminalPrompter};
pub use llm::{GeminiBackend, HttpBackend, MessageGenerator};
pub use workflow::{Outcome, run};
