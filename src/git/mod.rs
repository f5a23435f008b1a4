//! Git adapter for checkpoint management
//!
//! This module provides:
//! - A command runner that pins every call to an explicit repository root
//! - Marker (branch) creation, deletion and compare-and-swap moves
//! - Working tree status, commit, checkout and merge
//! - History rewrite with an old→new commit mapping
//! - Object plumbing for the registry's own line of history
//!
//! The [`Vcs`] trait is the contract the lifecycle and propagation code is
//! written against; [`GitRepo`] implements it by shelling out to `git`.

pub mod commit;
pub mod objects;
pub mod refs;
pub mod rewrite;
pub mod runner;
pub mod status;

use std::path::{Path, PathBuf};

use crate::error::{Result, TutError};

pub use rewrite::{RewriteOutcome, RewrittenCommit};

/// Primitives the checkpoint core needs from the version-control system.
pub trait Vcs {
    fn dirty_paths(&self) -> Result<Vec<String>>;
    fn pending_paths(&self) -> Result<Vec<String>>;

    fn is_working_tree_clean(&self) -> Result<bool> {
        Ok(self.dirty_paths()?.is_empty())
    }

    fn current_branch(&self) -> Result<Option<String>>;
    fn resolve(&self, rev: &str) -> Result<String>;
    fn head_is_unborn(&self) -> bool;

    fn marker_exists(&self, name: &str) -> bool;
    fn create_marker(&self, name: &str, at: &str) -> Result<()>;
    fn delete_marker(&self, name: &str) -> Result<()>;
    fn force_move_marker(&self, name: &str, to: &str, expected: Option<&str>) -> Result<()>;
    fn list_markers(&self, prefix: Option<&str>) -> Result<Vec<String>>;

    fn checkout(&self, target: &str) -> Result<()>;
    fn detach_head(&self) -> Result<()>;
    fn commit_all(&self, message: &str, allow_empty: bool) -> Result<String>;
    fn commit_empty(&self, message: &str) -> Result<String>;
    fn merge_into(&self, source: &str, target: &str) -> Result<()>;

    fn is_ancestor(&self, ancestor: &str, descendant: &str) -> Result<bool>;
    fn commits_between(&self, upstream: &str, tip: &str) -> Result<Vec<String>>;
    fn rewrite_history(&self, upstream: &str, onto: &str, tip: &str) -> Result<RewriteOutcome>;
    fn continue_rewrite(&self, replayed: &[String], onto: &str, tip: &str)
        -> Result<RewriteOutcome>;
    fn abort_rewrite(&self) -> Result<()>;
    fn rewrite_in_progress(&self) -> Result<bool>;

    fn read_file(&self, rev: &str, path: &str) -> Result<Option<String>>;
    fn commit_file(&self, branch: &str, path: &str, contents: &str, message: &str)
        -> Result<String>;
    fn git_dir(&self) -> Result<PathBuf>;
}

/// A git work tree addressed by its root directory.
#[derive(Debug, Clone)]
pub struct GitRepo {
    root: PathBuf,
}

impl GitRepo {
    /// Open the repository containing `path`, resolving its work-tree root.
    pub fn open(path: &Path) -> Result<Self> {
        check_git_available()?;
        let root = objects::show_toplevel(path)?;
        Ok(Self { root })
    }

    /// Open `path`, creating a repository there first if there is none.
    pub fn open_or_init(path: &Path) -> Result<Self> {
        check_git_available()?;
        if !objects::is_repository(path) {
            std::fs::create_dir_all(path)
                .map_err(|e| TutError::adapter("init", format!("{}: {e}", path.display())))?;
            objects::init_repository(path)?;
        }
        Self::open(path)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// Check that a `git` executable is on PATH
pub fn check_git_available() -> Result<()> {
    which::which("git")
        .map(|_| ())
        .map_err(|e| TutError::adapter("--version", format!("git is not installed or not in PATH: {e}")))
}

impl Vcs for GitRepo {
    fn dirty_paths(&self) -> Result<Vec<String>> {
        status::dirty_paths(&self.root)
    }

    fn pending_paths(&self) -> Result<Vec<String>> {
        status::pending_paths(&self.root)
    }

    fn current_branch(&self) -> Result<Option<String>> {
        refs::current_branch(&self.root)
    }

    fn resolve(&self, rev: &str) -> Result<String> {
        refs::resolve(rev, &self.root)
    }

    fn head_is_unborn(&self) -> bool {
        refs::head_is_unborn(&self.root)
    }

    fn marker_exists(&self, name: &str) -> bool {
        refs::marker_exists(name, &self.root)
    }

    fn create_marker(&self, name: &str, at: &str) -> Result<()> {
        refs::create_marker(name, at, &self.root)
    }

    fn delete_marker(&self, name: &str) -> Result<()> {
        refs::delete_marker(name, &self.root)
    }

    fn force_move_marker(&self, name: &str, to: &str, expected: Option<&str>) -> Result<()> {
        refs::force_move_marker(name, to, expected, &self.root)
    }

    fn list_markers(&self, prefix: Option<&str>) -> Result<Vec<String>> {
        refs::list_markers(prefix, &self.root)
    }

    fn checkout(&self, target: &str) -> Result<()> {
        commit::checkout(target, &self.root)
    }

    fn detach_head(&self) -> Result<()> {
        commit::detach_head(&self.root)
    }

    fn commit_all(&self, message: &str, allow_empty: bool) -> Result<String> {
        commit::commit_all(message, allow_empty, &self.root)
    }

    fn commit_empty(&self, message: &str) -> Result<String> {
        commit::commit_empty(message, &self.root)
    }

    fn merge_into(&self, source: &str, target: &str) -> Result<()> {
        commit::merge_into(source, target, &self.root)
    }

    fn is_ancestor(&self, ancestor: &str, descendant: &str) -> Result<bool> {
        refs::is_ancestor(ancestor, descendant, &self.root)
    }

    fn commits_between(&self, upstream: &str, tip: &str) -> Result<Vec<String>> {
        refs::commits_between(upstream, tip, &self.root)
    }

    fn rewrite_history(&self, upstream: &str, onto: &str, tip: &str) -> Result<RewriteOutcome> {
        rewrite::rewrite_history(upstream, onto, tip, &self.root)
    }

    fn continue_rewrite(
        &self,
        replayed: &[String],
        onto: &str,
        tip: &str,
    ) -> Result<RewriteOutcome> {
        rewrite::continue_rewrite(replayed, onto, tip, &self.root)
    }

    fn abort_rewrite(&self) -> Result<()> {
        rewrite::abort_rewrite(&self.root)
    }

    fn rewrite_in_progress(&self) -> Result<bool> {
        rewrite::rewrite_in_progress(&self.root)
    }

    fn read_file(&self, rev: &str, path: &str) -> Result<Option<String>> {
        objects::read_file(rev, path, &self.root)
    }

    fn commit_file(
        &self,
        branch: &str,
        path: &str,
        contents: &str,
        message: &str,
    ) -> Result<String> {
        objects::commit_file(branch, path, contents, message, &self.root)
    }

    fn git_dir(&self) -> Result<PathBuf> {
        objects::git_dir(&self.root)
    }
}
