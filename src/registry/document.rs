//! The persisted registry document (`tut.cfg` on the `tut` branch)

use serde::{Deserialize, Serialize};

use crate::error::{Result, TutError};
use crate::git::Vcs;
use crate::models::constants::{CONFIG_BRANCH, CONFIG_FILE, DEFAULT_HEAD};

fn default_head() -> String {
    DEFAULT_HEAD.to_string()
}

/// Ordered checkpoint names plus the main line they lead to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryDocument {
    /// Checkpoint names, oldest first
    #[serde(default)]
    pub points: Vec<String>,
    /// Main-line branch that `next` lands on after the last checkpoint
    #[serde(default = "default_head")]
    pub head: String,
}

impl RegistryDocument {
    pub fn new(head: impl Into<String>) -> Self {
        Self {
            points: Vec::new(),
            head: head.into(),
        }
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| TutError::journal(CONFIG_FILE, e))
    }

    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| TutError::journal(CONFIG_FILE, e))
    }

    /// Read the document from the tip of the config branch.
    pub fn load(vcs: &impl Vcs) -> Result<Self> {
        let content = vcs
            .read_file(CONFIG_BRANCH, CONFIG_FILE)?
            .ok_or_else(|| TutError::NotInitialized(CONFIG_BRANCH.to_string()))?;
        Self::from_yaml(&content)
    }

    /// Commit the document as a new revision of the config branch.
    pub fn save(&self, vcs: &impl Vcs, message: &str) -> Result<String> {
        let yaml = self.to_yaml()?;
        vcs.commit_file(CONFIG_BRANCH, CONFIG_FILE, &yaml, message)
    }
}
