//! Edit sessions, new checkpoints from pending changes, and finishing edits

use tracing::{info, warn};

use super::Tut;
use crate::error::{Result, TutError};
use crate::git::Vcs;
use crate::models::constants::messages;
use crate::models::EditSession;
use crate::propagation::{self, PropagationJournal, PropagationReport};
use crate::validation::validate_name;

/// What `checkpoint` ended up doing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckpointOutcome {
    /// A new checkpoint was created from the pending changes
    Created(String),
    /// The open edit session was finished
    Finished {
        target: String,
        report: PropagationReport,
    },
}

impl<V: Vcs> Tut<V> {
    /// Open an edit session on checkpoint `name`.
    pub fn edit(&self, name: &str) -> Result<EditSession> {
        let registry = self.registry()?;
        registry.position_of(name)?;
        self.require_no_edit()?;
        self.require_clean()?;

        let base_commit = self.vcs.resolve(name)?;
        let scratch_marker = EditSession::scratch_name(name);
        self.vcs.create_marker(&scratch_marker, &base_commit)?;
        self.checkout_new_marker(&scratch_marker)?;

        info!(checkpoint = name, base = %base_commit, "editing");
        Ok(EditSession {
            target: name.to_string(),
            scratch_marker,
            base_commit,
        })
    }

    /// Turn pending changes into checkpoint `name`, or finish the open edit.
    pub fn checkpoint(&self, name: Option<&str>, message: Option<&str>) -> Result<CheckpointOutcome> {
        if let Some(journal) = PropagationJournal::load(&self.vcs)? {
            return Err(TutError::PropagationHalted(journal.target));
        }

        if let Some(session) = self.edit_session()? {
            return match name {
                Some(other) if other != session.target => {
                    Err(TutError::EditInProgress(session.target))
                }
                _ => {
                    let report = self.finish_edit(message)?;
                    Ok(CheckpointOutcome::Finished {
                        target: session.target,
                        report,
                    })
                }
            };
        }

        let name = name.ok_or(TutError::MissingName)?;
        let mut registry = self.registry()?;
        validate_name(name, registry.head())?;
        self.require_unused_name(&registry, name)?;
        if self.vcs.pending_paths()?.is_empty() {
            return Err(TutError::NothingToCheckpoint);
        }

        let after = match self.current_in(&registry)? {
            Some(current) => Some(registry.position_of(&current)?),
            None => None,
        };

        let default_message = messages::checkpoint_commit(name);
        self.vcs.detach_head()?;
        let commit = self
            .vcs
            .commit_all(message.unwrap_or(&default_message), false)?;
        self.vcs.create_marker(name, &commit)?;
        let position = registry.insert(name, after)?;
        registry.save(&self.vcs, &messages::new_point(name))?;
        self.vcs.checkout(name)?;

        info!(name, position, commit = %commit, "created checkpoint");
        Ok(CheckpointOutcome::Created(name.to_string()))
    }

    /// Commit the open edit, move its checkpoint and propagate to every
    /// later checkpoint and the main line.
    pub fn finish_edit(&self, message: Option<&str>) -> Result<PropagationReport> {
        if let Some(journal) = PropagationJournal::load(&self.vcs)? {
            return Err(TutError::PropagationHalted(journal.target));
        }
        let session = self.edit_session()?.ok_or(TutError::NotEditing)?;
        let registry = self.registry()?;

        if self.vcs.current_branch()?.as_deref() != Some(session.scratch_marker.as_str()) {
            self.vcs.checkout(&session.scratch_marker)?;
        }

        if !self.vcs.pending_paths()?.is_empty() {
            let default_message = messages::edit_commit(&session.target);
            self.vcs
                .commit_all(message.unwrap_or(&default_message), false)?;
        }

        let new_commit = self.vcs.resolve(&session.scratch_marker)?;
        if new_commit == session.base_commit {
            info!(checkpoint = %session.target, "edit produced no changes");
            self.close_session(&session.target)?;
            return Ok(PropagationReport::default());
        }

        self.vcs.force_move_marker(
            &session.target,
            &new_commit,
            Some(&session.base_commit),
        )?;
        let report = propagation::propagate(
            &self.vcs,
            &session.target,
            registry.later_than(&session.target)?,
            registry.head(),
            &session.base_commit,
            &new_commit,
        )?;
        self.close_session(&session.target)?;

        info!(checkpoint = %session.target, moved = report.moved.len(), "finished edit");
        Ok(report)
    }

    /// Finish a propagation halted on a conflict the user has resolved and
    /// staged.
    pub fn resume(&self) -> Result<PropagationReport> {
        let journal = PropagationJournal::load(&self.vcs)?.ok_or(TutError::NoPropagation)?;
        let target = journal.target.clone();

        let report = propagation::resume(&self.vcs, journal)?;
        self.close_session(&target)?;

        info!(checkpoint = %target, moved = report.moved.len(), "resumed propagation");
        Ok(report)
    }

    /// Drop a halted propagation and return to the edit session.
    pub fn abort(&self) -> Result<EditSession> {
        let journal = PropagationJournal::load(&self.vcs)?.ok_or(TutError::NoPropagation)?;
        propagation::abort(&self.vcs, &journal)?;

        let scratch_marker = EditSession::scratch_name(&journal.target);
        self.vcs.checkout(&scratch_marker)?;

        info!(checkpoint = %journal.target, "aborted propagation");
        Ok(EditSession {
            target: journal.target,
            scratch_marker,
            base_commit: journal.old_commit,
        })
    }

    fn close_session(&self, target: &str) -> Result<()> {
        self.vcs.checkout(target)?;

        let scratch_marker = EditSession::scratch_name(target);
        if self.vcs.marker_exists(&scratch_marker) {
            self.vcs.delete_marker(&scratch_marker)?;
        } else {
            warn!(marker = %scratch_marker, "edit session marker already gone");
        }
        Ok(())
    }
}
