//! Moving through checkpoints with `next`

use serial_test::serial;
use tut::git::Vcs;
use tut::TutError;

use super::helpers::{commit_file, file_at, init_test_repo, write_file};

#[test]
#[serial]
fn test_next_from_last_checkpoint_is_idempotent() {
    let (_temp, tut) = init_test_repo();
    tut.start("a", None).unwrap();
    tut.start("b", None).unwrap();

    for _ in 0..3 {
        assert_eq!(tut.next(false).unwrap(), "main");
        assert_eq!(tut.vcs().current_branch().unwrap().as_deref(), Some("main"));
    }
}

#[test]
#[serial]
fn test_next_walks_registry_order() {
    let (_temp, tut) = init_test_repo();
    tut.start("a", None).unwrap();
    tut.start("c", None).unwrap();
    tut.vcs().checkout("a").unwrap();
    tut.start("b", None).unwrap();
    tut.vcs().checkout("a").unwrap();

    assert_eq!(tut.next(false).unwrap(), "b");
    assert_eq!(tut.next(false).unwrap(), "c");
    assert_eq!(tut.next(false).unwrap(), "main");
}

#[test]
#[serial]
fn test_next_merge_carries_current_content() {
    let (_temp, tut) = init_test_repo();
    tut.start("a", None).unwrap();
    tut.start("b", None).unwrap();
    tut.vcs().checkout("a").unwrap();
    commit_file(&tut, "late.txt", "added after b was started\n");

    assert_eq!(tut.next(true).unwrap(), "b");
    assert_eq!(
        file_at(&tut, "b", "late.txt").as_deref(),
        Some("added after b was started\n")
    );
}

#[test]
#[serial]
fn test_next_merge_conflict_is_reported() {
    let (_temp, tut) = init_test_repo();
    tut.start("a", None).unwrap();
    tut.start("b", None).unwrap();
    commit_file(&tut, "README.md", "b version\n");
    tut.vcs().checkout("a").unwrap();
    commit_file(&tut, "README.md", "a version\n");

    let err = tut.next(true).unwrap_err();
    match err {
        TutError::MergeConflict {
            source_marker,
            target,
            files,
        } => {
            assert_eq!(source_marker, "a");
            assert_eq!(target, "b");
            assert_eq!(files, vec!["README.md"]);
        }
        other => panic!("expected MergeConflict, got {other:?}"),
    }
}

#[test]
#[serial]
fn test_next_blocked_while_editing() {
    let (_temp, tut) = init_test_repo();
    tut.start("a", None).unwrap();
    tut.edit("a").unwrap();

    assert!(matches!(
        tut.next(false),
        Err(TutError::EditInProgress(ref n)) if n == "a"
    ));
}

#[test]
#[serial]
fn test_next_blocked_by_dirty_tree() {
    let (_temp, tut) = init_test_repo();
    tut.start("a", None).unwrap();
    write_file(&tut, "README.md", "dirty\n");

    assert!(matches!(tut.next(false), Err(TutError::DirtyTree { .. })));
    assert_eq!(tut.current().unwrap().as_deref(), Some("a"));
}
