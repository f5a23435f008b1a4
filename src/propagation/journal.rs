//! Progress record of an in-flight propagation
//!
//! Stored at `<git-dir>/tut/propagation.yml`. Written before every rewrite so
//! that a conflict leaves enough behind to resume or abort from a new process.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, TutError};
use crate::git::{RewrittenCommit, Vcs};
use crate::models::constants::{JOURNAL_FILE, STATE_DIR};

/// A rewrite that stopped on a conflict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingRewrite {
    pub marker: String,
    pub upstream: String,
    pub onto: String,
    pub tip: String,
    /// Commits the rewrite set out to replay, oldest first
    pub replayed: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropagationJournal {
    /// Checkpoint whose edit is being propagated
    pub target: String,
    pub old_commit: String,
    pub new_commit: String,
    /// Every marker considered, in processing order
    pub markers: Vec<String>,
    /// Markers not processed yet
    pub remaining: Vec<String>,
    /// Old→new commit pairs accumulated so far
    pub mapping: Vec<RewrittenCommit>,
    #[serde(default)]
    pub pending: Option<PendingRewrite>,
}

impl PropagationJournal {
    pub fn new(target: &str, old_commit: &str, new_commit: &str, markers: Vec<String>) -> Self {
        Self {
            target: target.to_string(),
            old_commit: old_commit.to_string(),
            new_commit: new_commit.to_string(),
            remaining: markers.clone(),
            markers,
            mapping: vec![RewrittenCommit {
                old: old_commit.to_string(),
                new: new_commit.to_string(),
            }],
            pending: None,
        }
    }

    /// Rewritten counterpart of `commit`, if it has been replayed.
    pub fn lookup(&self, commit: &str) -> Option<&str> {
        self.mapping
            .iter()
            .find(|pair| pair.old == commit)
            .map(|pair| pair.new.as_str())
    }

    /// Add pairs from a finished rewrite, keeping the first mapping seen
    /// for any commit.
    pub fn record(&mut self, pairs: Vec<RewrittenCommit>) {
        for pair in pairs {
            if self.lookup(&pair.old).is_none() {
                self.mapping.push(pair);
            }
        }
    }

    pub fn path(vcs: &impl Vcs) -> Result<PathBuf> {
        Ok(vcs.git_dir()?.join(STATE_DIR).join(JOURNAL_FILE))
    }

    pub fn exists(vcs: &impl Vcs) -> Result<bool> {
        Ok(Self::path(vcs)?.is_file())
    }

    pub fn load(vcs: &impl Vcs) -> Result<Option<Self>> {
        let path = Self::path(vcs)?;
        if !path.is_file() {
            return Ok(None);
        }
        let content = fs::read_to_string(&path).map_err(|e| journal_error(&path, e))?;
        let journal = serde_yaml::from_str(&content).map_err(|e| journal_error(&path, e))?;
        Ok(Some(journal))
    }

    pub fn save(&self, vcs: &impl Vcs) -> Result<()> {
        let path = Self::path(vcs)?;
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).map_err(|e| journal_error(dir, e))?;
        }
        let yaml = serde_yaml::to_string(self).map_err(|e| journal_error(&path, e))?;
        fs::write(&path, yaml).map_err(|e| journal_error(&path, e))
    }

    pub fn clear(vcs: &impl Vcs) -> Result<()> {
        let path = Self::path(vcs)?;
        if path.is_file() {
            fs::remove_file(&path).map_err(|e| journal_error(&path, e))?;
        }
        Ok(())
    }
}

fn journal_error(path: &Path, reason: impl std::fmt::Display) -> TutError {
    TutError::journal(path.display().to_string(), reason)
}
