//! Checkpoint lifecycle state machine
//!
//! [`Tut`] is the entry point for every user-facing operation. State is never
//! cached between calls: each operation reads the registry, the edit session
//! and the working tree fresh from the repository, checks its preconditions,
//! and only then mutates.
//!
//! Mutations are ordered commit → marker → registry, so an interrupted
//! operation leaves at worst an unregistered branch behind.

mod editing;
mod navigation;

pub use editing::CheckpointOutcome;

use std::path::Path;

use tracing::{info, warn};

use crate::error::{Result, TutError};
use crate::git::{GitRepo, Vcs};
use crate::models::constants::{messages, CONFIG_BRANCH, DEFAULT_HEAD, SCRATCH_PREFIX};
use crate::models::{EditSession, LifecycleState};
use crate::propagation::PropagationJournal;
use crate::registry::{Registry, RegistryDocument};

/// Checkpoint operations over one repository.
#[derive(Debug, Clone)]
pub struct Tut<V: Vcs = GitRepo> {
    vcs: V,
}

impl Tut<GitRepo> {
    /// Open the repository containing `path`.
    pub fn open(path: &Path) -> Result<Self> {
        Ok(Self::new(GitRepo::open(path)?))
    }

    /// Create (if needed) and initialize a repository at `path`.
    pub fn init(path: &Path) -> Result<Self> {
        let tut = Self::new(GitRepo::open_or_init(path)?);
        tut.initialize()?;
        Ok(tut)
    }
}

impl<V: Vcs> Tut<V> {
    pub fn new(vcs: V) -> Self {
        Self { vcs }
    }

    pub fn vcs(&self) -> &V {
        &self.vcs
    }

    /// Record an empty registry on the config branch.
    ///
    /// A repository without commits gets an empty initial commit first so the
    /// main line exists.
    pub fn initialize(&self) -> Result<()> {
        if self.vcs.marker_exists(CONFIG_BRANCH) {
            return Err(TutError::AlreadyInitialized);
        }

        if self.vcs.head_is_unborn() {
            self.vcs.commit_empty(messages::INITIAL_COMMIT)?;
        }

        let head = self
            .vcs
            .current_branch()?
            .unwrap_or_else(|| DEFAULT_HEAD.to_string());
        RegistryDocument::new(head.clone()).save(&self.vcs, messages::INITIAL_CONFIG)?;

        info!(head = %head, "initialized");
        Ok(())
    }

    fn registry(&self) -> Result<Registry> {
        Registry::load(&self.vcs)
    }

    /// Checkpoint names, oldest first.
    pub fn points(&self) -> Result<Vec<String>> {
        Ok(self.registry()?.list().to_vec())
    }

    /// The checkpoint HEAD is on, if any.
    pub fn current(&self) -> Result<Option<String>> {
        let registry = self.registry()?;
        self.current_in(&registry)
    }

    fn current_in(&self, registry: &Registry) -> Result<Option<String>> {
        Ok(self
            .vcs
            .current_branch()?
            .filter(|branch| registry.contains(branch)))
    }

    /// The open edit session, found by its scratch marker.
    pub fn edit_session(&self) -> Result<Option<EditSession>> {
        let scratch = self.vcs.list_markers(Some(SCRATCH_PREFIX))?;
        if scratch.len() > 1 {
            warn!(markers = ?scratch, "more than one edit session marker");
        }

        let Some(marker) = scratch.into_iter().next() else {
            return Ok(None);
        };
        let Some(target) = EditSession::target_of(&marker).map(String::from) else {
            return Ok(None);
        };

        let base_commit = self.vcs.resolve(&target)?;
        Ok(Some(EditSession {
            target,
            scratch_marker: marker,
            base_commit,
        }))
    }

    /// Where the repository stands in the lifecycle.
    pub fn state(&self) -> Result<LifecycleState> {
        if let Some(journal) = PropagationJournal::load(&self.vcs)? {
            return Ok(LifecycleState::Propagating {
                target: journal.target,
            });
        }

        if let Some(session) = self.edit_session()? {
            return Ok(LifecycleState::Editing(session));
        }

        Ok(match self.current()? {
            Some(name) => LifecycleState::AtCheckpoint(name),
            None => LifecycleState::Unnamed,
        })
    }

    /// Fail with `EditInProgress` while an edit (or its propagation) is open.
    fn require_no_edit(&self) -> Result<()> {
        if let Some(journal) = PropagationJournal::load(&self.vcs)? {
            return Err(TutError::EditInProgress(journal.target));
        }
        if let Some(session) = self.edit_session()? {
            return Err(TutError::EditInProgress(session.target));
        }
        Ok(())
    }

    fn require_clean(&self) -> Result<()> {
        let paths = self.vcs.dirty_paths()?;
        if paths.is_empty() {
            Ok(())
        } else {
            Err(TutError::DirtyTree { paths })
        }
    }

    /// Switch to a marker just created, deleting it again if the switch
    /// fails so no half-made checkpoint or session is left behind.
    fn checkout_new_marker(&self, marker: &str) -> Result<()> {
        let Err(err) = self.vcs.checkout(marker) else {
            return Ok(());
        };
        if let Err(cleanup) = self.vcs.delete_marker(marker) {
            warn!(marker, error = %cleanup, "could not remove marker after failed checkout");
        }
        Err(err)
    }

    fn require_unused_name(&self, registry: &Registry, name: &str) -> Result<()> {
        if registry.contains(name) || self.vcs.marker_exists(name) {
            return Err(TutError::DuplicateCheckpoint(name.to_string()));
        }
        Ok(())
    }
}
