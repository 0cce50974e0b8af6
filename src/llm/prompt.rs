//! Prompt construction for backends that take free-form instructions.

/// Build the instruction prompt sent to a generative model.
///
/// The diff is embedded verbatim inside a fenced block. The model is asked for
/// plain text so the answer can be used as the commit message directly.
pub fn build_commit_prompt(diff: &str) -> String {
    format!(
        r#"You are writing a Git commit message for the staged changes below.

## Rules
- Follow the Conventional Commits format: `type(scope): description`
- Type: one of feat, fix, build, chore, ci, docs, style, refactor, perf, test
- Subject line in imperative mood, at most 72 characters, no period at the end
- If the change needs explanation, add a blank line and a short body saying WHY
- Lines like `[stagecommit] skipped <path>` mark binary or asset files whose content was omitted

## Output Format
Respond with ONLY the commit message text. No markdown, no code fences, no commentary.

## Staged Diff
```diff
{diff}
```"#
    )
}
