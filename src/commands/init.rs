use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;

use crate::lifecycle::Tut;

/// Initialize checkpoint tracking in the repository at `repo`, creating it
/// if needed.
pub fn execute(repo: &Path) -> Result<()> {
    let tut = Tut::init(repo).context("Failed to initialize repository")?;

    println!(
        "{} Initialized tut in {}",
        "✓".green().bold(),
        tut.vcs().root().display().to_string().dimmed()
    );
    Ok(())
}
