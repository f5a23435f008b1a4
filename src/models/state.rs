//! Lifecycle states derived from the repository on demand

use std::fmt;

use super::constants::SCRATCH_PREFIX;

/// An open edit of an existing checkpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSession {
    /// Checkpoint being edited
    pub target: String,
    /// Side branch holding the in-progress edit
    pub scratch_marker: String,
    /// Commit the edit started from; the target marker still points here
    pub base_commit: String,
}

impl EditSession {
    pub fn scratch_name(target: &str) -> String {
        format!("{SCRATCH_PREFIX}{target}")
    }

    /// Checkpoint name encoded in a scratch branch, if it is one.
    pub fn target_of(marker: &str) -> Option<&str> {
        marker
            .strip_prefix(SCRATCH_PREFIX)
            .filter(|name| !name.is_empty())
    }
}

/// Where the working tree stands with respect to the checkpoint sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleState {
    /// HEAD is a checkpoint marker and no edit is open
    AtCheckpoint(String),
    /// HEAD is not a checkpoint (main line, detached, other branch)
    Unnamed,
    /// An edit session is open
    Editing(EditSession),
    /// Propagation of a finished edit halted on a conflict
    Propagating { target: String },
}

impl LifecycleState {
    pub fn is_clean_state(&self) -> bool {
        matches!(self, LifecycleState::AtCheckpoint(_) | LifecycleState::Unnamed)
    }

    /// Name of the checkpoint currently being edited or propagated.
    pub fn edit_target(&self) -> Option<&str> {
        match self {
            LifecycleState::Editing(session) => Some(&session.target),
            LifecycleState::Propagating { target } => Some(target),
            _ => None,
        }
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LifecycleState::AtCheckpoint(name) => write!(f, "clean at checkpoint {name}"),
            LifecycleState::Unnamed => write!(f, "clean, not at a checkpoint"),
            LifecycleState::Editing(session) => write!(f, "editing {}", session.target),
            LifecycleState::Propagating { target } => {
                write!(f, "propagating edit of {target} (halted)")
            }
        }
    }
}
