//! Error taxonomy for checkpoint operations
//!
//! Every precondition violation surfaces as its own variant so callers can
//! tell a dirty tree from an unknown name without parsing messages.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, TutError>;

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum TutError {
    #[error("working tree has uncommitted changes: {}", .paths.join(", "))]
    DirtyTree { paths: Vec<String> },

    #[error("checkpoint '{0}' already exists")]
    DuplicateCheckpoint(String),

    #[error("unknown checkpoint '{0}'")]
    UnknownCheckpoint(String),

    #[error("checkpoint '{0}' is being edited; finish the edit first")]
    EditInProgress(String),

    #[error(
        "rewriting '{marker}' stopped at commit {at_commit} with conflicts in: {}",
        .files.join(", ")
    )]
    RewriteConflict {
        marker: String,
        at_commit: String,
        files: Vec<String>,
    },

    #[error(
        "rewriting '{marker}' is no longer in progress and its result is gone; run `tut abort` and finish the edit again"
    )]
    RewriteInterrupted { marker: String },

    #[error("merging '{source_marker}' into '{target}' produced conflicts in: {}", .files.join(", "))]
    MergeConflict {
        source_marker: String,
        target: String,
        files: Vec<String>,
    },

    #[error("git {command} failed: {stderr}")]
    AdapterFailure { command: String, stderr: String },

    #[error("repository is not initialized for tut (missing '{0}' branch)")]
    NotInitialized(String),

    #[error("repository is already initialized for tut")]
    AlreadyInitialized,

    #[error("invalid checkpoint name '{name}': {reason}")]
    InvalidName { name: String, reason: String },

    #[error("a checkpoint name is required when no edit is in progress")]
    MissingName,

    #[error("nothing to checkpoint: working tree is clean")]
    NothingToCheckpoint,

    #[error("no checkpoint is being edited")]
    NotEditing,

    #[error(
        "propagating the edit of '{0}' halted on a conflict; resolve it and run `tut resume`, or `tut abort`"
    )]
    PropagationHalted(String),

    #[error("no halted propagation to resume or abort")]
    NoPropagation,

    #[error("failed to read or write {what}: {reason}")]
    Journal { what: String, reason: String },
}

impl TutError {
    pub(crate) fn adapter(command: impl Into<String>, stderr: impl Into<String>) -> Self {
        TutError::AdapterFailure {
            command: command.into(),
            stderr: stderr.into().trim().to_string(),
        }
    }

    pub(crate) fn journal(what: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        TutError::Journal {
            what: what.into(),
            reason: reason.to_string(),
        }
    }

    /// Whether the user can fix this by hand and then `resume`.
    pub fn is_resumable(&self) -> bool {
        matches!(self, TutError::RewriteConflict { .. })
    }
}
