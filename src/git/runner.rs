//! Git command runner
//!
//! Centralized functions for running git commands with consistent error
//! handling. Every call runs in an explicit repository root; the process
//! working directory is never changed.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

use tracing::debug;

use crate::error::{Result, TutError};

fn git_command(args: &[&str], repo_root: &Path) -> Command {
    let mut cmd = Command::new("git");
    cmd.args(args)
        .current_dir(repo_root)
        .env("GIT_EDITOR", "true")
        .env("GIT_TERMINAL_PROMPT", "0");
    cmd
}

/// Run a git command and return the raw Output.
///
/// Only spawn failures are errors here; a non-zero exit is left for the
/// caller to interpret.
pub fn run_git(args: &[&str], repo_root: &Path) -> Result<Output> {
    debug!(args = %args.join(" "), "git");
    git_command(args, repo_root)
        .output()
        .map_err(|e| TutError::adapter(args.join(" "), e.to_string()))
}

/// Run a git command, check for success, and return stdout as a trimmed String.
///
/// On failure, returns `AdapterFailure` with the stderr content.
pub fn run_git_checked(args: &[&str], repo_root: &Path) -> Result<String> {
    let output = run_git(args, repo_root)?;
    checked_stdout(args, output)
}

/// Like [`run_git_checked`] but keeps leading whitespace, which is
/// significant in porcelain output.
pub fn run_git_stdout(args: &[&str], repo_root: &Path) -> Result<String> {
    let output = run_git(args, repo_root)?;
    if !output.status.success() {
        let cmd = args.first().copied().unwrap_or("");
        return Err(TutError::adapter(cmd, String::from_utf8_lossy(&output.stderr)));
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Run a git command feeding `input` on stdin, returning trimmed stdout.
pub fn run_git_with_input(args: &[&str], input: &str, repo_root: &Path) -> Result<String> {
    debug!(args = %args.join(" "), "git (stdin)");
    let spawn_err = |e: std::io::Error| TutError::adapter(args.join(" "), e.to_string());

    let mut child = git_command(args, repo_root)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(spawn_err)?;

    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(input.as_bytes()).map_err(spawn_err)?;
    }

    let output = child.wait_with_output().map_err(spawn_err)?;
    checked_stdout(args, output)
}

/// Run a git command and return true if exit code is 0.
///
/// Spawn failures count as `false`. Use this for status checks like
/// `rev-parse --verify` or `merge-base --is-ancestor`.
pub fn run_git_bool(args: &[&str], repo_root: &Path) -> bool {
    run_git(args, repo_root)
        .map(|output| output.status.success())
        .unwrap_or(false)
}

fn checked_stdout(args: &[&str], output: Output) -> Result<String> {
    if !output.status.success() {
        let cmd = args.first().copied().unwrap_or("");
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(TutError::adapter(cmd, stderr));
    }
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}
