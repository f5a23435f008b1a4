//! Creating checkpoints and moving between them

use tracing::info;

use super::Tut;
use crate::error::Result;
use crate::git::Vcs;
use crate::models::constants::messages;
use crate::validation::validate_name;

impl<V: Vcs> Tut<V> {
    /// Create checkpoint `name` at `starting_point` (default: HEAD), right
    /// after the current checkpoint, and switch to it.
    pub fn start(&self, name: &str, starting_point: Option<&str>) -> Result<()> {
        let mut registry = self.registry()?;
        validate_name(name, registry.head())?;
        self.require_unused_name(&registry, name)?;
        self.require_clean()?;
        self.require_no_edit()?;

        let at = self.vcs.resolve(starting_point.unwrap_or("HEAD"))?;
        let after = match self.current_in(&registry)? {
            Some(current) => Some(registry.position_of(&current)?),
            None => None,
        };

        self.vcs.create_marker(name, &at)?;
        self.checkout_new_marker(name)?;
        let position = registry.insert(name, after)?;
        registry.save(&self.vcs, &messages::new_point(name))?;

        info!(name, position, commit = %at, "started checkpoint");
        Ok(())
    }

    /// Step to the checkpoint after the current one, or to the main line
    /// when there is none. Returns where the working tree landed.
    ///
    /// With `merge`, the current checkpoint is merged into the destination
    /// instead of assuming the destination already builds on it.
    pub fn next(&self, merge: bool) -> Result<String> {
        let registry = self.registry()?;
        self.require_no_edit()?;
        self.require_clean()?;

        let current = self.current_in(&registry)?;
        let target = match &current {
            Some(name) => registry
                .next_after(name)?
                .unwrap_or(registry.head())
                .to_string(),
            None => registry.head().to_string(),
        };

        match &current {
            Some(source) if merge => self.vcs.merge_into(source, &target)?,
            _ => self.vcs.checkout(&target)?,
        }

        info!(from = ?current, to = %target, merge, "moved to next");
        Ok(target)
    }
}
