//! Shared test helpers for checkpoint workflow integration tests

use std::fs;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

use tut::git::Vcs;
use tut::Tut;

/// Test helper: Run a git command in `repo_root`, returning trimmed stdout
pub fn git(args: &[&str], repo_root: &Path) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(repo_root)
        .output()
        .expect("Failed to run git");
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

/// Test helper: Create a git repository on `main` with a README commit and
/// initialize tut in it
pub fn init_test_repo() -> (TempDir, Tut) {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let repo_root = temp_dir.path();

    git(&["init"], repo_root);
    git(&["config", "user.email", "test@test.com"], repo_root);
    git(&["config", "user.name", "Test User"], repo_root);

    fs::write(repo_root.join("README.md"), "# Test Repository\n")
        .expect("Failed to write README.md");
    git(&["add", "."], repo_root);
    git(&["commit", "-m", "Initial commit"], repo_root);
    git(&["branch", "-M", "main"], repo_root);

    let tut = Tut::init(repo_root).expect("Failed to initialize tut");
    (temp_dir, tut)
}

/// Test helper: Write a file in the work tree
pub fn write_file(tut: &Tut, filename: &str, content: &str) {
    fs::write(tut.vcs().root().join(filename), content).expect("Failed to write file");
}

/// Test helper: Write and commit a file on the current branch
pub fn commit_file(tut: &Tut, filename: &str, content: &str) -> String {
    write_file(tut, filename, content);
    tut.vcs()
        .commit_all(&format!("Add {filename}"), false)
        .expect("Failed to commit")
}

/// Test helper: Content of `filename` at `rev`, `None` if absent
pub fn file_at(tut: &Tut, rev: &str, filename: &str) -> Option<String> {
    tut.vcs()
        .read_file(rev, filename)
        .expect("Failed to read file from git")
}

/// Test helper: Snapshot of every local branch and where it points
pub fn branch_snapshot(tut: &Tut) -> String {
    git(
        &["for-each-ref", "--format=%(refname) %(objectname)", "refs/heads"],
        tut.vcs().root(),
    )
}
