//! The commit workflow: diff, generate, confirm, commit, push.
//!
//! Each step returns a `Result`, so the first failure ends the run. Normal
//! early exits (nothing staged, user declined, push skipped) are [`Outcome`]s.

use tracing::{debug, info};

use crate::config::Config;
use crate::error::WorkflowError;
use crate::git::{DenyList, Vcs, filter_diff, format_branch_menu, select_branch};
use crate::interact::{Prompter, confirm};
use crate::llm::MessageGenerator;

/// Printed when there is nothing to commit.
pub const NO_CHANGES_MESSAGE: &str = "no staged changes";
/// Printed when the user declines the proposed message.
pub const CANCELLED_MESSAGE: &str = "commit cancelled";
/// Printed when the branch answer does not match the menu.
pub const INVALID_SELECTION_MESSAGE: &str = "invalid selection, push skipped";

/// How a run that did not fail ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The staged diff was empty, or only held denied files.
    NoChanges,
    /// `--dry-run`: the message was generated and shown, nothing else.
    DryRun { message: String },
    /// The user did not answer `y`.
    Declined,
    /// Committed, but no valid branch was chosen (or none exist).
    PushSkipped,
    /// Committed and pushed.
    Pushed { branch: String },
}

/// Run the whole workflow once.
pub async fn run<V, G, P>(
    vcs: &V,
    generator: &G,
    prompter: &mut P,
    config: &Config,
) -> Result<Outcome, WorkflowError>
where
    V: Vcs + ?Sized,
    G: MessageGenerator + ?Sized,
    P: Prompter + ?Sized,
{
    // Step 1: Staged diff
    let raw = vcs.staged_diff().await?;
    if raw.trim().is_empty() {
        eprintln!("{NO_CHANGES_MESSAGE}");
        return Ok(Outcome::NoChanges);
    }

    let no_filter = DenyList::empty();
    let deny = config.deny_list.as_ref().unwrap_or(&no_filter);
    let diff = filter_diff(&raw, deny);

    if !diff.skipped.is_empty() {
        eprintln!("skipped {} binary/asset file(s)", diff.skipped.len());
        debug!("Skipped files: {:?}", diff.skipped);
    }
    if diff.is_empty() {
        eprintln!("{NO_CHANGES_MESSAGE}");
        return Ok(Outcome::NoChanges);
    }

    if config.show_diff {
        eprintln!("Analyzing the following staged diff:\n");
        println!("{}", diff.text);
    }

    // Step 2: Generate
    eprintln!("Generating commit message with the {} backend...", generator.name());
    let message = generator.generate(&diff.text).await?;
    info!("Generated message: {} chars", message.len());

    println!("\n{message}\n");

    if config.dry_run {
        return Ok(Outcome::DryRun { message });
    }

    // Step 3: Confirm
    if !confirm(prompter, "Commit with this message?")? {
        eprintln!("{CANCELLED_MESSAGE}");
        return Ok(Outcome::Declined);
    }

    // Step 4: Commit
    vcs.commit(&message).await?;

    // Step 5: Choose a branch and push
    let branches = vcs.list_branches().await?;
    if branches.is_empty() {
        eprintln!("no local branches found, push skipped");
        return Ok(Outcome::PushSkipped);
    }

    eprintln!("Local branches:\n{}", format_branch_menu(&branches));
    let answer = prompter.ask("Select a branch to push (number)")?;

    let Some(branch) = select_branch(&branches, answer.as_deref()) else {
        eprintln!("{INVALID_SELECTION_MESSAGE}");
        return Ok(Outcome::PushSkipped);
    };

    eprintln!("Pushing {} to {}...", branch, config.remote);
    vcs.push(&config.remote, branch).await?;

    Ok(Outcome::Pushed {
        branch: branch.to_string(),
    })
}
