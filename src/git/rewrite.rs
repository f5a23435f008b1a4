//! History rewrite: replay a range of commits onto a new base
//!
//! The rewrite runs `git rebase --onto` on a detached HEAD so no branch moves
//! as a side effect. The old→new commit mapping is returned to the caller,
//! which decides which markers to move.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Result, TutError};
use crate::git::refs::{commits_between, current_branch, is_ancestor, resolve};
use crate::git::runner::{run_git, run_git_checked};
use crate::git::status::conflicted_paths;

/// One replayed commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewrittenCommit {
    pub old: String,
    pub new: String,
}

/// Result of a rewrite attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RewriteOutcome {
    /// Every commit was replayed
    Completed(Vec<RewrittenCommit>),
    /// The replay stopped on a content conflict; the rebase is left in
    /// progress for the user to resolve
    Conflict { at_commit: String, files: Vec<String> },
    /// No rewrite is in progress and HEAD does not hold its result, e.g.
    /// after a manual `git rebase --abort`
    Interrupted,
}

const REBASE_ARGS: &[&str] = &[
    "-c",
    "rebase.updateRefs=false",
    "rebase",
    "--quiet",
    "--empty=keep",
    "--keep-empty",
    "--reapply-cherry-picks",
];

/// Replay `upstream..tip` onto `onto`, leaving HEAD detached at the result.
pub fn rewrite_history(
    upstream: &str,
    onto: &str,
    tip: &str,
    repo_root: &Path,
) -> Result<RewriteOutcome> {
    let replayed = commits_between(upstream, tip, repo_root)?;
    debug!(upstream, onto, tip, count = replayed.len(), "rewriting");

    let mut args = REBASE_ARGS.to_vec();
    args.extend(["--onto", onto, upstream, tip]);
    let output = run_git(&args, repo_root)?;

    if !output.status.success() {
        return stopped_outcome("rebase", &output.stderr, repo_root);
    }

    finished_outcome(&replayed, onto, tip, repo_root)
}

/// Continue a rewrite stopped on a conflict the user has since resolved.
///
/// `replayed` is the commit list the original rewrite started with. When
/// no rebase is in progress, HEAD is only taken as the result if it is a
/// detached commit built on `onto` that no longer contains `tip`.
pub fn continue_rewrite(
    replayed: &[String],
    onto: &str,
    tip: &str,
    repo_root: &Path,
) -> Result<RewriteOutcome> {
    if rewrite_in_progress(repo_root)? {
        let output = run_git(&["rebase", "--continue"], repo_root)?;
        if !output.status.success() {
            return stopped_outcome("rebase --continue", &output.stderr, repo_root);
        }
    } else if !head_holds_rewrite(replayed, onto, tip, repo_root)? {
        warn!(onto, tip, "no rewrite in progress and HEAD is not its result");
        return Ok(RewriteOutcome::Interrupted);
    }

    finished_outcome(replayed, onto, tip, repo_root)
}

fn head_holds_rewrite(
    replayed: &[String],
    onto: &str,
    tip: &str,
    repo_root: &Path,
) -> Result<bool> {
    if current_branch(repo_root)?.is_some() {
        return Ok(false);
    }

    let head = resolve("HEAD", repo_root)?;
    if !replayed.is_empty() && head == resolve(onto, repo_root)? {
        return Ok(false);
    }
    Ok(is_ancestor(onto, &head, repo_root)? && !is_ancestor(tip, &head, repo_root)?)
}

/// Abandon a stopped rewrite, restoring HEAD to where it started.
pub fn abort_rewrite(repo_root: &Path) -> Result<()> {
    if rewrite_in_progress(repo_root)? {
        run_git_checked(&["rebase", "--abort"], repo_root)?;
    }
    Ok(())
}

/// Whether a rebase is stopped in this repository
pub fn rewrite_in_progress(repo_root: &Path) -> Result<bool> {
    for state_dir in ["rebase-merge", "rebase-apply"] {
        let path = run_git_checked(&["rev-parse", "--git-path", state_dir], repo_root)?;
        if repo_root.join(path).is_dir() {
            return Ok(true);
        }
    }
    Ok(false)
}

fn stopped_outcome(command: &str, stderr: &[u8], repo_root: &Path) -> Result<RewriteOutcome> {
    if !rewrite_in_progress(repo_root)? {
        return Err(TutError::adapter(command, String::from_utf8_lossy(stderr)));
    }

    let at_commit = resolve("REBASE_HEAD", repo_root).unwrap_or_else(|_| "unknown".to_string());
    let files = conflicted_paths(repo_root)?;
    Ok(RewriteOutcome::Conflict { at_commit, files })
}

fn finished_outcome(
    replayed: &[String],
    onto: &str,
    tip: &str,
    repo_root: &Path,
) -> Result<RewriteOutcome> {
    let new_tip = resolve("HEAD", repo_root)?;
    let rewritten = commits_between(onto, &new_tip, repo_root)?;
    Ok(RewriteOutcome::Completed(pair_rewritten(
        replayed, &rewritten, tip, &new_tip,
    )))
}

/// Pair replayed commits with their rewritten counterparts by position.
///
/// The tip pair is always present. Interior pairs are only trusted when both
/// lists have the same length; otherwise git dropped or merged commits and
/// positions no longer line up.
pub fn pair_rewritten(
    replayed: &[String],
    rewritten: &[String],
    old_tip: &str,
    new_tip: &str,
) -> Vec<RewrittenCommit> {
    let mut pairs: Vec<RewrittenCommit> = if replayed.len() == rewritten.len() {
        replayed
            .iter()
            .zip(rewritten)
            .map(|(old, new)| RewrittenCommit {
                old: old.clone(),
                new: new.clone(),
            })
            .collect()
    } else {
        warn!(
            replayed = replayed.len(),
            rewritten = rewritten.len(),
            "rewrite changed the commit count; only the tip is remapped"
        );
        Vec::new()
    };

    if !pairs.iter().any(|p| p.old == old_tip) {
        pairs.push(RewrittenCommit {
            old: old_tip.to_string(),
            new: new_tip.to_string(),
        });
    }

    pairs
}
