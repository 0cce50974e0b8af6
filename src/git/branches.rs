//! Parsing `git branch` output and resolving menu selections.

/// Parse `git branch` output into branch names.
///
/// Skips blank lines and strips the `*` (current) and `+` (checked out in
/// another worktree) markers. A detached HEAD is listed as
/// `(HEAD detached at ...)` and is not a branch, so it is dropped.
pub fn parse_branch_list(output: &str) -> Vec<String> {
    output
        .lines()
        .map(|line| line.trim().trim_start_matches(['*', '+']).trim())
        .filter(|name| !name.is_empty() && !name.starts_with('('))
        .map(String::from)
        .collect()
}

/// Render the 1-based branch menu.
pub fn format_branch_menu(branches: &[String]) -> String {
    branches
        .iter()
        .enumerate()
        .map(|(i, name)| format!("  {}) {}", i + 1, name))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Map a 1-based numeric answer to a branch name.
///
/// Returns `None` for missing, non-numeric, zero or out-of-range input.
pub fn select_branch<'a>(branches: &'a [String], answer: Option<&str>) -> Option<&'a str> {
    let index: usize = answer?.trim().parse().ok()?;
    index
        .checked_sub(1)
        .and_then(|i| branches.get(i))
        .map(String::as_str)
}
