use std::path::Path;

use anyhow::Result;
use colored::Colorize;

use super::open;

/// Create a checkpoint and switch to it
pub fn execute(repo: &Path, name: &str, from: Option<&str>) -> Result<()> {
    let tut = open(repo)?;
    tut.start(name, from)?;

    println!("{} Started checkpoint {}", "✓".green().bold(), name.bold());
    Ok(())
}
