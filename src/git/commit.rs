//! Commit, checkout and merge operations on the working tree

use std::path::Path;

use crate::error::{Result, TutError};
use crate::git::refs::resolve;
use crate::git::runner::{run_git, run_git_checked};
use crate::git::status::conflicted_paths;

/// Switch the working tree to a branch or commit
pub fn checkout(target: &str, repo_root: &Path) -> Result<()> {
    run_git_checked(&["checkout", "--quiet", target, "--"], repo_root)?;
    Ok(())
}

/// Detach HEAD at its current commit, carrying local changes along
pub fn detach_head(repo_root: &Path) -> Result<()> {
    run_git_checked(&["checkout", "--quiet", "--detach"], repo_root)?;
    Ok(())
}

/// Stage everything (untracked files included) and commit it.
///
/// Returns the new commit id.
pub fn commit_all(message: &str, allow_empty: bool, repo_root: &Path) -> Result<String> {
    run_git_checked(&["add", "--all"], repo_root)?;

    let mut args = vec!["commit", "--quiet", "-m", message];
    if allow_empty {
        args.push("--allow-empty");
    }
    run_git_checked(&args, repo_root)?;

    resolve("HEAD", repo_root)
}

/// Commit whatever is staged, allowing an empty commit.
pub fn commit_empty(message: &str, repo_root: &Path) -> Result<String> {
    run_git_checked(&["commit", "--quiet", "--allow-empty", "-m", message], repo_root)?;
    resolve("HEAD", repo_root)
}

/// Check out `target` and merge `source` into it.
///
/// A conflicting merge is left in place for the user to resolve and
/// reported as `MergeConflict`.
pub fn merge_into(source: &str, target: &str, repo_root: &Path) -> Result<()> {
    checkout(target, repo_root)?;

    let output = run_git(&["merge", "--no-edit", source], repo_root)?;
    if output.status.success() {
        return Ok(());
    }

    let files = conflicted_paths(repo_root)?;
    if files.is_empty() {
        return Err(TutError::adapter(
            "merge",
            String::from_utf8_lossy(&output.stderr),
        ));
    }

    Err(TutError::MergeConflict {
        source_marker: source.to_string(),
        target: target.to_string(),
        files,
    })
}
