//! Object plumbing for metadata kept on its own line of history
//!
//! Files are written with `hash-object`/`mktree`/`commit-tree` and the branch
//! advanced with `update-ref`, so neither the index nor the working tree is
//! touched.

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::git::refs::{marker_exists, resolve};
use crate::git::runner::{
    run_git, run_git_bool, run_git_checked, run_git_stdout, run_git_with_input,
};

/// Read `path` as stored in `rev`, `None` when the file or revision is missing.
///
/// Any other failure to read an existing object is an `AdapterFailure`.
pub fn read_file(rev: &str, path: &str, repo_root: &Path) -> Result<Option<String>> {
    let object = format!("{rev}:{path}");
    if !run_git_bool(&["rev-parse", "--verify", "--quiet", &object], repo_root) {
        return Ok(None);
    }
    run_git_stdout(&["show", &object], repo_root).map(Some)
}

/// Commit a single-file tree holding `contents` at `path` onto `branch`.
///
/// The branch is created as an orphan when it does not exist yet. Returns
/// the new commit id.
pub fn commit_file(
    branch: &str,
    path: &str,
    contents: &str,
    message: &str,
    repo_root: &Path,
) -> Result<String> {
    let blob = run_git_with_input(&["hash-object", "-w", "--stdin"], contents, repo_root)?;
    let tree = run_git_with_input(&["mktree"], &format!("100644 blob {blob}\t{path}\n"), repo_root)?;

    let refname = format!("refs/heads/{branch}");
    let parent = if marker_exists(branch, repo_root) {
        Some(resolve(&refname, repo_root)?)
    } else {
        None
    };

    let mut args = vec!["commit-tree", tree.as_str(), "-m", message];
    if let Some(p) = &parent {
        args.extend(["-p", p.as_str()]);
    }
    let commit = run_git_checked(&args, repo_root)?;

    let mut update = vec!["update-ref", refname.as_str(), commit.as_str()];
    if let Some(p) = &parent {
        update.push(p.as_str());
    }
    run_git_checked(&update, repo_root)?;

    Ok(commit)
}

/// Absolute path of the repository's git directory
pub fn git_dir(repo_root: &Path) -> Result<PathBuf> {
    run_git_checked(&["rev-parse", "--absolute-git-dir"], repo_root).map(PathBuf::from)
}

/// Top-level directory of the work tree containing `path`
pub fn show_toplevel(path: &Path) -> Result<PathBuf> {
    run_git_checked(&["rev-parse", "--show-toplevel"], path).map(PathBuf::from)
}

/// Whether `path` lies inside a git work tree
pub fn is_repository(path: &Path) -> bool {
    run_git(&["rev-parse", "--is-inside-work-tree"], path)
        .map(|output| output.status.success())
        .unwrap_or(false)
}

/// Create an empty repository at `path`
pub fn init_repository(path: &Path) -> Result<()> {
    run_git_checked(&["init", "--quiet"], path)?;
    Ok(())
}
