//! Propagation halted by a rewrite conflict: resume and abort

use serial_test::serial;
use tut::git::Vcs;
use tut::models::LifecycleState;
use tut::TutError;

use super::helpers::{commit_file, file_at, git, init_test_repo, write_file};

/// Checkpoints `a` and `b` both writing `shared.txt`, with an edit of `a`
/// that cannot be replayed under `b` cleanly.
fn halted_propagation() -> (tempfile::TempDir, tut::Tut, TutError) {
    let (temp, tut) = init_test_repo();

    tut.start("a", None).unwrap();
    commit_file(&tut, "shared.txt", "a\n");
    tut.start("b", None).unwrap();
    commit_file(&tut, "shared.txt", "b\n");

    tut.edit("a").unwrap();
    write_file(&tut, "shared.txt", "a edited\n");
    let err = tut.finish_edit(None).unwrap_err();
    (temp, tut, err)
}

#[test]
#[serial]
fn test_conflict_halts_with_context() {
    let (_temp, tut, err) = halted_propagation();

    match &err {
        TutError::RewriteConflict { marker, files, .. } => {
            assert_eq!(marker, "b");
            assert_eq!(files, &vec!["shared.txt".to_string()]);
        }
        other => panic!("expected RewriteConflict, got {other:?}"),
    }
    assert!(tut.vcs().marker_exists("tut-edit/a"));
    assert_eq!(
        tut.state().unwrap(),
        LifecycleState::Propagating { target: "a".into() }
    );
    assert!(matches!(
        tut.checkpoint(None, None),
        Err(TutError::PropagationHalted(_))
    ));
    assert!(matches!(tut.next(false), Err(TutError::EditInProgress(_))));
}

#[test]
#[serial]
fn test_resume_after_resolution() {
    let (_temp, tut, _err) = halted_propagation();

    write_file(&tut, "shared.txt", "a edited\nb\n");
    git(&["add", "shared.txt"], tut.vcs().root());

    let report = tut.resume().unwrap();

    let moved: Vec<&str> = report.moved.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(moved, vec!["b"]);
    assert_eq!(file_at(&tut, "a", "shared.txt").as_deref(), Some("a edited\n"));
    assert_eq!(
        file_at(&tut, "b", "shared.txt").as_deref(),
        Some("a edited\nb\n")
    );
    assert!(!tut.vcs().marker_exists("tut-edit/a"));
    assert_eq!(tut.state().unwrap(), LifecycleState::AtCheckpoint("a".into()));
}

#[test]
#[serial]
fn test_abort_restores_checkpoint_and_session() {
    let (_temp, tut, _err) = halted_propagation();
    let b_before = tut.vcs().resolve("b").unwrap();

    let session = tut.abort().unwrap();

    assert_eq!(session.target, "a");
    assert_eq!(tut.vcs().resolve("a").unwrap(), session.base_commit);
    assert_eq!(file_at(&tut, "a", "shared.txt").as_deref(), Some("a\n"));
    assert_eq!(tut.vcs().resolve("b").unwrap(), b_before);
    assert_eq!(
        file_at(&tut, "tut-edit/a", "shared.txt").as_deref(),
        Some("a edited\n")
    );
    assert!(matches!(tut.state().unwrap(), LifecycleState::Editing(_)));
}

#[test]
#[serial]
fn test_resume_without_propagation() {
    let (_temp, tut) = init_test_repo();
    assert!(matches!(tut.resume(), Err(TutError::NoPropagation)));
    assert!(matches!(tut.abort(), Err(TutError::NoPropagation)));
}

#[test]
#[serial]
fn test_resume_after_manual_rebase_abort_is_refused() {
    let (_temp, tut, _err) = halted_propagation();
    let b_before = tut.vcs().resolve("b").unwrap();
    git(&["rebase", "--abort"], tut.vcs().root());

    let err = tut.resume().unwrap_err();

    assert!(matches!(err, TutError::RewriteInterrupted { ref marker } if marker == "b"));
    assert_eq!(tut.vcs().resolve("b").unwrap(), b_before);
    assert_eq!(
        tut.state().unwrap(),
        LifecycleState::Propagating { target: "a".into() }
    );

    // abort still gets back to a consistent edit session
    let session = tut.abort().unwrap();
    assert_eq!(tut.vcs().resolve("a").unwrap(), session.base_commit);
    assert!(matches!(tut.state().unwrap(), LifecycleState::Editing(_)));
    assert_eq!(
        file_at(&tut, "tut-edit/a", "shared.txt").as_deref(),
        Some("a edited\n")
    );
}
