use std::path::Path;

use anyhow::Result;
use colored::Colorize;

use super::{open, print_report};
use crate::lifecycle::CheckpointOutcome;

/// Record pending changes as a new checkpoint, or finish the open edit
pub fn execute(repo: &Path, name: Option<&str>, message: Option<&str>) -> Result<()> {
    let tut = open(repo)?;

    match tut.checkpoint(name, message)? {
        CheckpointOutcome::Created(name) => {
            println!("{} Created checkpoint {}", "✓".green().bold(), name.bold());
        }
        CheckpointOutcome::Finished { target, report } => {
            println!("{} Finished editing {}", "✓".green().bold(), target.bold());
            print_report(&report);
        }
    }
    Ok(())
}
