//! Editing a checkpoint and propagating the change to later ones

use serial_test::serial;
use tut::git::Vcs;
use tut::models::LifecycleState;
use tut::{CheckpointOutcome, TutError};

use super::helpers::{commit_file, file_at, init_test_repo, write_file};

#[test]
#[serial]
fn test_end_to_end_edit_reaches_later_checkpoint() {
    let (_temp, tut) = init_test_repo();

    tut.start("step1", None).unwrap();
    commit_file(&tut, "f1", "first\n");
    tut.start("step2", None).unwrap();
    commit_file(&tut, "f2", "second\n");

    tut.edit("step1").unwrap();
    write_file(&tut, "f1", "first, revised\n");
    tut.finish_edit(None).unwrap();

    assert_eq!(file_at(&tut, "step2", "f1").as_deref(), Some("first, revised\n"));
    assert_eq!(file_at(&tut, "step2", "f2").as_deref(), Some("second\n"));
    assert_eq!(file_at(&tut, "step1", "f2"), None);
    assert_eq!(tut.points().unwrap(), vec!["step1", "step2"]);
    assert!(!tut.vcs().marker_exists("tut-edit/step1"));
    assert_eq!(
        tut.state().unwrap(),
        LifecycleState::AtCheckpoint("step1".into())
    );
}

#[test]
#[serial]
fn test_edit_reaches_every_later_checkpoint_and_main() {
    let (_temp, tut) = init_test_repo();

    tut.start("a", None).unwrap();
    commit_file(&tut, "a.txt", "a\n");
    tut.start("b", None).unwrap();
    commit_file(&tut, "b.txt", "b\n");
    tut.start("c", None).unwrap();
    commit_file(&tut, "c.txt", "c\n");
    tut.next(true).unwrap();

    tut.edit("a").unwrap();
    write_file(&tut, "a.txt", "a edited\n");
    let report = tut.finish_edit(Some("Revise a")).unwrap();

    let moved: Vec<&str> = report.moved.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(moved, vec!["b", "c", "main"]);

    for rev in ["a", "b", "c", "main"] {
        assert_eq!(file_at(&tut, rev, "a.txt").as_deref(), Some("a edited\n"));
    }
    assert_eq!(file_at(&tut, "b", "b.txt").as_deref(), Some("b\n"));
    assert_eq!(file_at(&tut, "c", "b.txt").as_deref(), Some("b\n"));
    assert_eq!(file_at(&tut, "c", "c.txt").as_deref(), Some("c\n"));
    assert_eq!(file_at(&tut, "b", "c.txt"), None);

    // each checkpoint still builds on the previous one
    let vcs = tut.vcs();
    assert!(vcs.is_ancestor(&vcs.resolve("a").unwrap(), &vcs.resolve("b").unwrap()).unwrap());
    assert!(vcs.is_ancestor(&vcs.resolve("b").unwrap(), &vcs.resolve("c").unwrap()).unwrap());
    assert!(vcs.is_ancestor(&vcs.resolve("c").unwrap(), &vcs.resolve("main").unwrap()).unwrap());
}

#[test]
#[serial]
fn test_edit_of_last_checkpoint_moves_only_main() {
    let (_temp, tut) = init_test_repo();

    tut.start("a", None).unwrap();
    commit_file(&tut, "a.txt", "a\n");
    tut.start("b", None).unwrap();
    commit_file(&tut, "b.txt", "b\n");
    tut.next(true).unwrap();
    let a_before = tut.vcs().resolve("a").unwrap();

    tut.edit("b").unwrap();
    write_file(&tut, "b.txt", "b edited\n");
    let report = tut.finish_edit(None).unwrap();

    let moved: Vec<&str> = report.moved.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(moved, vec!["main"]);
    assert_eq!(tut.vcs().resolve("a").unwrap(), a_before);
    assert_eq!(file_at(&tut, "main", "b.txt").as_deref(), Some("b edited\n"));
}

#[test]
#[serial]
fn test_unrelated_checkpoint_keeps_its_commit() {
    let (_temp, tut) = init_test_repo();

    tut.start("a", None).unwrap();
    commit_file(&tut, "a.txt", "a\n");
    tut.start("side", Some("main")).unwrap();
    commit_file(&tut, "side.txt", "side\n");
    let side_before = tut.vcs().resolve("side").unwrap();

    tut.edit("a").unwrap();
    write_file(&tut, "a.txt", "a edited\n");
    let report = tut.finish_edit(None).unwrap();

    assert!(report.moved.is_empty());
    assert!(report.untouched.contains(&"side".to_string()));
    assert_eq!(tut.vcs().resolve("side").unwrap(), side_before);
    assert_eq!(file_at(&tut, "side", "a.txt"), None);
}

#[test]
#[serial]
fn test_only_one_edit_session() {
    let (_temp, tut) = init_test_repo();
    tut.start("a", None).unwrap();
    tut.start("b", None).unwrap();

    tut.edit("a").unwrap();
    assert!(matches!(
        tut.edit("b"),
        Err(TutError::EditInProgress(ref n)) if n == "a"
    ));
    assert!(matches!(
        tut.start("c", None),
        Err(TutError::EditInProgress(_))
    ));
    assert_eq!(tut.points().unwrap(), vec!["a", "b"]);
}

#[test]
#[serial]
fn test_checkpoint_command_creates_and_finishes() {
    let (_temp, tut) = init_test_repo();

    tut.start("a", None).unwrap();
    write_file(&tut, "b.txt", "b\n");
    assert_eq!(
        tut.checkpoint(Some("b"), Some("Add b")).unwrap(),
        CheckpointOutcome::Created("b".into())
    );
    assert_eq!(tut.points().unwrap(), vec!["a", "b"]);
    assert_eq!(file_at(&tut, "a", "b.txt"), None);

    tut.edit("a").unwrap();
    write_file(&tut, "a.txt", "a\n");
    let outcome = tut.checkpoint(None, None).unwrap();
    match outcome {
        CheckpointOutcome::Finished { target, report } => {
            assert_eq!(target, "a");
            // main still pointed at a's old commit, so it moves too
            let moved: Vec<&str> = report.moved.iter().map(|m| m.name.as_str()).collect();
            assert_eq!(moved, vec!["b", "main"]);
        }
        other => panic!("expected Finished, got {other:?}"),
    }
    assert_eq!(file_at(&tut, "b", "a.txt").as_deref(), Some("a\n"));
    assert_eq!(file_at(&tut, "b", "b.txt").as_deref(), Some("b\n"));
}
