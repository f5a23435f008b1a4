//! Ordering and uniqueness of the checkpoint registry

use serial_test::serial;
use tut::git::Vcs;
use tut::TutError;

use super::helpers::{branch_snapshot, commit_file, git, init_test_repo, write_file};

#[test]
#[serial]
fn test_points_follow_creation_relative_to_current() {
    let (_temp, tut) = init_test_repo();

    tut.start("intro", None).unwrap();
    tut.start("setup", None).unwrap();
    tut.start("finish", None).unwrap();
    assert_eq!(tut.points().unwrap(), vec!["intro", "setup", "finish"]);

    tut.vcs().checkout("intro").unwrap();
    tut.start("prereqs", None).unwrap();
    assert_eq!(
        tut.points().unwrap(),
        vec!["intro", "prereqs", "setup", "finish"]
    );
}

#[test]
#[serial]
fn test_registry_survives_reopen() {
    let (temp, tut) = init_test_repo();
    tut.start("a", None).unwrap();
    tut.start("b", None).unwrap();
    drop(tut);

    let reopened = tut::Tut::open(temp.path()).unwrap();
    assert_eq!(reopened.points().unwrap(), vec!["a", "b"]);
    assert_eq!(reopened.current().unwrap().as_deref(), Some("b"));
}

#[test]
#[serial]
fn test_registry_lives_on_config_branch() {
    let (_temp, tut) = init_test_repo();
    tut.start("a", None).unwrap();

    let doc = git(&["show", "tut:tut.cfg"], tut.vcs().root());
    assert!(doc.contains("points"));
    assert!(doc.contains("- a"));
    assert!(doc.contains("head: main"));

    // checkpoint content never sees the registry file
    assert!(!tut.vcs().root().join("tut.cfg").exists());
}

#[test]
#[serial]
fn test_duplicate_start_changes_nothing() {
    let (_temp, tut) = init_test_repo();
    tut.start("a", None).unwrap();
    commit_file(&tut, "a.txt", "a\n");
    let before = branch_snapshot(&tut);

    let err = tut.start("a", None).unwrap_err();

    assert!(matches!(err, TutError::DuplicateCheckpoint(ref n) if n == "a"));
    assert_eq!(tut.points().unwrap(), vec!["a"]);
    assert_eq!(branch_snapshot(&tut), before);
}

#[test]
#[serial]
fn test_dirty_tree_blocks_start_and_edit() {
    let (_temp, tut) = init_test_repo();
    tut.start("a", None).unwrap();
    write_file(&tut, "README.md", "changed\n");
    let before = branch_snapshot(&tut);

    assert!(matches!(
        tut.start("b", None),
        Err(TutError::DirtyTree { .. })
    ));
    assert!(matches!(tut.edit("a"), Err(TutError::DirtyTree { .. })));

    assert_eq!(tut.points().unwrap(), vec!["a"]);
    assert_eq!(branch_snapshot(&tut), before);
    assert_eq!(
        std::fs::read_to_string(tut.vcs().root().join("README.md")).unwrap(),
        "changed\n"
    );
}

#[test]
#[serial]
fn test_untracked_files_do_not_block_start() {
    let (_temp, tut) = init_test_repo();
    write_file(&tut, "notes.txt", "scratch\n");

    tut.start("a", None).unwrap();
    assert_eq!(tut.points().unwrap(), vec!["a"]);
}
