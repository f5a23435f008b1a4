//! Propagation engine: re-derive later checkpoints after an edit
//!
//! Markers are processed in registry order, then the main line. A marker
//! whose commit is already in the old→new mapping needs no rewrite. One that
//! descends from the edited commit has its own commits replayed onto the
//! rewritten counterpart of its closest already-rewritten ancestor, so
//! commits shared with earlier checkpoints are replayed once. Anything else
//! is unrelated history and left alone.
//!
//! Markers are moved only after every rewrite succeeded.

mod journal;

pub use journal::{PendingRewrite, PropagationJournal};

use tracing::{debug, info};

use crate::error::{Result, TutError};
use crate::git::{RewriteOutcome, RewrittenCommit, Vcs};

/// A marker moved to its rewritten commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovedMarker {
    pub name: String,
    pub from: String,
    pub to: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropagationReport {
    pub moved: Vec<MovedMarker>,
    /// Markers not descending from the edited commit
    pub untouched: Vec<String>,
}

/// Propagate the change `old_commit → new_commit` of `target` to `later`
/// checkpoints and the `head` main line.
pub fn propagate(
    vcs: &impl Vcs,
    target: &str,
    later: &[String],
    head: &str,
    old_commit: &str,
    new_commit: &str,
) -> Result<PropagationReport> {
    let mut markers = later.to_vec();
    if vcs.marker_exists(head) && !markers.iter().any(|m| m == head) {
        markers.push(head.to_string());
    }

    info!(checkpoint = target, markers = markers.len(), "propagating edit");
    let journal = PropagationJournal::new(target, old_commit, new_commit, markers);
    journal.save(vcs)?;
    run(vcs, journal)
}

/// Continue a propagation halted by a rewrite conflict.
pub fn resume(vcs: &impl Vcs, mut journal: PropagationJournal) -> Result<PropagationReport> {
    if let Some(pending) = journal.pending.clone() {
        info!(marker = %pending.marker, "continuing halted rewrite");
        let outcome = vcs.continue_rewrite(&pending.replayed, &pending.onto, &pending.tip)?;
        let pairs = completed_or_conflict(outcome, &pending.marker)?;
        journal.record(pairs);
        journal.pending = None;
        journal.remaining.retain(|m| m != &pending.marker);
        journal.save(vcs)?;
    }
    run(vcs, journal)
}

/// Abandon a halted propagation.
///
/// Later markers have not been moved yet; the edited checkpoint is put back
/// on its pre-edit commit if it still points at the edit.
pub fn abort(vcs: &impl Vcs, journal: &PropagationJournal) -> Result<()> {
    vcs.abort_rewrite()?;

    if vcs.resolve(&journal.target)? == journal.new_commit {
        vcs.force_move_marker(
            &journal.target,
            &journal.old_commit,
            Some(&journal.new_commit),
        )?;
        info!(checkpoint = %journal.target, "restored pre-edit commit");
    }

    PropagationJournal::clear(vcs)
}

fn run(vcs: &impl Vcs, mut journal: PropagationJournal) -> Result<PropagationReport> {
    while let Some(marker) = journal.remaining.first().cloned() {
        let tip = vcs.resolve(&marker)?;

        if journal.lookup(&tip).is_some() {
            debug!(marker = %marker, "already rewritten");
        } else if vcs.is_ancestor(&journal.old_commit, &tip)? {
            let (upstream, onto) = closest_rewritten_ancestor(vcs, &journal.mapping, &tip)?;
            let replayed = vcs.commits_between(&upstream, &tip)?;
            info!(marker = %marker, commits = replayed.len(), "replaying");

            journal.pending = Some(PendingRewrite {
                marker: marker.clone(),
                upstream: upstream.clone(),
                onto: onto.clone(),
                tip: tip.clone(),
                replayed,
            });
            journal.save(vcs)?;

            let outcome = match vcs.rewrite_history(&upstream, &onto, &tip) {
                Ok(outcome) => outcome,
                Err(err) => {
                    // nothing was replayed; resume starts this marker over
                    journal.pending = None;
                    journal.save(vcs)?;
                    return Err(err);
                }
            };
            let pairs = completed_or_conflict(outcome, &marker)?;
            journal.record(pairs);
            journal.pending = None;
        } else {
            debug!(marker = %marker, "unrelated history, leaving as is");
        }

        journal.remaining.remove(0);
        journal.save(vcs)?;
    }

    let report = remap_markers(vcs, &journal)?;
    PropagationJournal::clear(vcs)?;
    Ok(report)
}

fn completed_or_conflict(outcome: RewriteOutcome, marker: &str) -> Result<Vec<RewrittenCommit>> {
    match outcome {
        RewriteOutcome::Completed(pairs) => Ok(pairs),
        RewriteOutcome::Conflict { at_commit, files } => Err(TutError::RewriteConflict {
            marker: marker.to_string(),
            at_commit,
            files,
        }),
        RewriteOutcome::Interrupted => Err(TutError::RewriteInterrupted {
            marker: marker.to_string(),
        }),
    }
}

/// The most-descendant rewritten commit that `tip` builds on, with its
/// replacement.
fn closest_rewritten_ancestor(
    vcs: &impl Vcs,
    mapping: &[RewrittenCommit],
    tip: &str,
) -> Result<(String, String)> {
    let mut best: Option<&RewrittenCommit> = None;
    for pair in mapping {
        if !vcs.is_ancestor(&pair.old, tip)? {
            continue;
        }
        best = match best {
            Some(current) if !vcs.is_ancestor(&current.old, &pair.old)? => Some(current),
            _ => Some(pair),
        };
    }

    best.map(|pair| (pair.old.clone(), pair.new.clone()))
        .ok_or_else(|| TutError::adapter("merge-base", format!("{tip} has no rewritten ancestor")))
}

fn remap_markers(vcs: &impl Vcs, journal: &PropagationJournal) -> Result<PropagationReport> {
    let mut report = PropagationReport::default();

    for marker in &journal.markers {
        let tip = vcs.resolve(marker)?;
        match journal.lookup(&tip) {
            Some(new) if new != tip => {
                vcs.force_move_marker(marker, new, Some(&tip))?;
                info!(marker = %marker, from = %tip, to = %new, "remapped");
                report.moved.push(MovedMarker {
                    name: marker.clone(),
                    from: tip,
                    to: new.to_string(),
                });
            }
            _ => report.untouched.push(marker.clone()),
        }
    }

    Ok(report)
}
