use std::path::Path;

use anyhow::Result;
use colored::Colorize;

use super::open;

/// Move to the next checkpoint, or the main line after the last one
pub fn execute(repo: &Path, merge: bool) -> Result<()> {
    let tut = open(repo)?;
    let target = tut.next(merge)?;

    let how = if merge { "Merged into" } else { "Now at" };
    println!("{} {} {}", "→".cyan().bold(), how, target.bold());
    Ok(())
}
