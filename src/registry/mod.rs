//! Checkpoint registry: the ordered list of checkpoint names
//!
//! The persisted document is the only source of ordering. A `Registry` is a
//! snapshot loaded for one operation; mutations are written back with
//! [`Registry::save`] after the corresponding marker exists.

mod document;

pub use document::RegistryDocument;

use crate::error::{Result, TutError};
use crate::git::Vcs;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registry {
    doc: RegistryDocument,
}

impl Registry {
    pub fn load(vcs: &impl Vcs) -> Result<Self> {
        RegistryDocument::load(vcs).map(Self::from_document)
    }

    pub fn from_document(doc: RegistryDocument) -> Self {
        Self { doc }
    }

    pub fn save(&self, vcs: &impl Vcs, message: &str) -> Result<()> {
        self.doc.save(vcs, message)?;
        Ok(())
    }

    /// Checkpoint names, oldest first.
    pub fn list(&self) -> &[String] {
        &self.doc.points
    }

    pub fn contains(&self, name: &str) -> bool {
        self.doc.points.iter().any(|p| p == name)
    }

    pub fn position_of(&self, name: &str) -> Result<usize> {
        self.doc
            .points
            .iter()
            .position(|p| p == name)
            .ok_or_else(|| TutError::UnknownCheckpoint(name.to_string()))
    }

    /// Insert `name` right after position `after`, or append when there is
    /// no current position. Returns the new position.
    pub fn insert(&mut self, name: &str, after: Option<usize>) -> Result<usize> {
        if self.contains(name) {
            return Err(TutError::DuplicateCheckpoint(name.to_string()));
        }

        let position = match after {
            Some(index) if index < self.doc.points.len() => index + 1,
            _ => self.doc.points.len(),
        };
        self.doc.points.insert(position, name.to_string());
        Ok(position)
    }

    /// The checkpoint following `name`, `None` if it is the last one.
    pub fn next_after(&self, name: &str) -> Result<Option<&str>> {
        let position = self.position_of(name)?;
        Ok(self.doc.points.get(position + 1).map(String::as_str))
    }

    /// Checkpoints after `name`, in order.
    pub fn later_than(&self, name: &str) -> Result<&[String]> {
        let position = self.position_of(name)?;
        Ok(&self.doc.points[position + 1..])
    }

    /// Main-line branch recorded at init.
    pub fn head(&self) -> &str {
        &self.doc.head
    }
}
