use std::path::Path;

use anyhow::Result;
use colored::Colorize;

use super::{open, short};

/// Open an edit session on an existing checkpoint
pub fn execute(repo: &Path, name: &str) -> Result<()> {
    let tut = open(repo)?;
    let session = tut.edit(name)?;

    println!(
        "{} Editing {} on {} from {}",
        "→".cyan().bold(),
        session.target.bold(),
        session.scratch_marker,
        short(&session.base_commit).dimmed()
    );
    println!(
        "  Make your changes, then run {} to propagate them.",
        "tut checkpoint".bold()
    );
    Ok(())
}
