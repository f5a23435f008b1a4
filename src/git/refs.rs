//! Markers (branches) and revision queries

use std::path::Path;

use crate::error::{Result, TutError};
use crate::git::runner::{run_git, run_git_bool, run_git_checked};

fn branch_ref(name: &str) -> String {
    format!("refs/heads/{name}")
}

/// Check if a branch exists
pub fn marker_exists(name: &str, repo_root: &Path) -> bool {
    run_git_bool(
        &["rev-parse", "--verify", "--quiet", &branch_ref(name)],
        repo_root,
    )
}

/// Create a new branch at `at` without switching to it
pub fn create_marker(name: &str, at: &str, repo_root: &Path) -> Result<()> {
    run_git_checked(&["branch", "--no-track", name, at], repo_root)?;
    Ok(())
}

/// Delete a branch regardless of merge status
pub fn delete_marker(name: &str, repo_root: &Path) -> Result<()> {
    run_git_checked(&["branch", "-D", name], repo_root)?;
    Ok(())
}

/// Point a branch at `to`.
///
/// When `expected` is given the update only happens if the branch still
/// points there, so a marker moved behind our back is never clobbered.
pub fn force_move_marker(
    name: &str,
    to: &str,
    expected: Option<&str>,
    repo_root: &Path,
) -> Result<()> {
    let refname = branch_ref(name);
    let message = format!("tut: move {name}");
    let mut args = vec!["update-ref", "-m", message.as_str(), refname.as_str(), to];
    if let Some(old) = expected {
        args.push(old);
    }
    run_git_checked(&args, repo_root)?;
    Ok(())
}

/// Branch names, optionally restricted to those under `prefix`.
///
/// Git lists refs sorted by name.
pub fn list_markers(prefix: Option<&str>, repo_root: &Path) -> Result<Vec<String>> {
    let pattern = match prefix {
        Some(p) => branch_ref(p),
        None => "refs/heads/".to_string(),
    };
    let stdout = run_git_checked(
        &["for-each-ref", "--format=%(refname)", pattern.as_str()],
        repo_root,
    )?;
    Ok(stdout
        .lines()
        .filter_map(|line| line.trim().strip_prefix("refs/heads/"))
        .map(String::from)
        .collect())
}

/// Name of the checked-out branch, `None` when HEAD is detached
pub fn current_branch(repo_root: &Path) -> Result<Option<String>> {
    let output = run_git(&["symbolic-ref", "--quiet", "--short", "HEAD"], repo_root)?;
    if output.status.success() {
        let branch = String::from_utf8_lossy(&output.stdout).trim().to_string();
        Ok(Some(branch))
    } else {
        Ok(None)
    }
}

/// Resolve a revision to a full commit id
pub fn resolve(rev: &str, repo_root: &Path) -> Result<String> {
    let object = format!("{rev}^{{commit}}");
    run_git_checked(&["rev-parse", "--verify", "--quiet", &object], repo_root)
        .map_err(|_| TutError::adapter("rev-parse", format!("unknown revision '{rev}'")))
}

/// Whether HEAD has no commit yet (freshly initialized repository)
pub fn head_is_unborn(repo_root: &Path) -> bool {
    !run_git_bool(&["rev-parse", "--verify", "--quiet", "HEAD"], repo_root)
}

/// Check if `ancestor` is reachable from (or equal to) `descendant`.
pub fn is_ancestor(ancestor: &str, descendant: &str, repo_root: &Path) -> Result<bool> {
    let output = run_git(
        &["merge-base", "--is-ancestor", ancestor, descendant],
        repo_root,
    )?;
    match output.status.code() {
        Some(0) => Ok(true),
        Some(1) => Ok(false),
        _ => Err(TutError::adapter(
            "merge-base",
            String::from_utf8_lossy(&output.stderr),
        )),
    }
}

/// Non-merge commits in `upstream..tip`, oldest first.
///
/// This is the order a rebase replays them in.
pub fn commits_between(upstream: &str, tip: &str, repo_root: &Path) -> Result<Vec<String>> {
    let range = format!("{upstream}..{tip}");
    let stdout = run_git_checked(
        &["rev-list", "--reverse", "--topo-order", "--no-merges", &range],
        repo_root,
    )?;
    Ok(stdout
        .lines()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect())
}
