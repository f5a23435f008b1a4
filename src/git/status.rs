//! Working tree status checking

use std::path::Path;

use crate::error::Result;
use crate::git::runner::{run_git_checked, run_git_stdout};

/// Status codes that leave a porcelain column unchanged: unmodified,
/// untracked and ignored.
const UNCHANGED_STATUSES: [char; 3] = [' ', '?', '!'];

/// Paths with staged or unstaged changes, from `git status --porcelain`.
///
/// Untracked and ignored files are not reported; they never block
/// navigation.
pub fn dirty_paths(repo_root: &Path) -> Result<Vec<String>> {
    let stdout = run_git_stdout(&["status", "--porcelain", "--untracked-files=no"], repo_root)?;
    Ok(parse_dirty_paths(&stdout))
}

/// Every path `commit_all` would record, untracked files included.
pub fn pending_paths(repo_root: &Path) -> Result<Vec<String>> {
    let stdout = run_git_stdout(&["status", "--porcelain"], repo_root)?;
    Ok(stdout
        .lines()
        .filter_map(|line| line.get(3..))
        .map(String::from)
        .collect())
}

/// Check if the working tree has no staged or unstaged changes.
pub fn is_working_tree_clean(repo_root: &Path) -> Result<bool> {
    Ok(dirty_paths(repo_root)?.is_empty())
}

/// Paths whose index or worktree column reports a change.
///
/// Porcelain format: `XY path`, X = index status, Y = worktree status.
fn parse_dirty_paths(output: &str) -> Vec<String> {
    output
        .lines()
        .filter_map(|line| {
            let mut chars = line.chars();
            let index_status = chars.next()?;
            let worktree_status = chars.next()?;
            let changed = !(UNCHANGED_STATUSES.contains(&index_status)
                && UNCHANGED_STATUSES.contains(&worktree_status));
            changed.then(|| line.get(3..).unwrap_or_default().to_string())
        })
        .collect()
}

/// Files left unmerged by a stopped rebase or merge.
pub fn conflicted_paths(repo_root: &Path) -> Result<Vec<String>> {
    let stdout = run_git_checked(&["diff", "--name-only", "--diff-filter=U"], repo_root)?;
    Ok(stdout
        .lines()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect())
}
