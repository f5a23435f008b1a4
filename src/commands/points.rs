use std::path::Path;

use anyhow::Result;
use colored::Colorize;

use super::open;

/// List checkpoints in order, marking the current one
pub fn execute(repo: &Path) -> Result<()> {
    let tut = open(repo)?;
    let points = tut.points()?;
    let current = tut.current()?;

    if points.is_empty() {
        println!("{} No checkpoints yet", "─".dimmed());
        return Ok(());
    }

    for point in &points {
        if current.as_deref() == Some(point.as_str()) {
            println!("{} {}", "*".green().bold(), point.green().bold());
        } else {
            println!("  {point}");
        }
    }
    Ok(())
}

/// Print the checkpoint HEAD is on, or the one being edited
pub fn current(repo: &Path) -> Result<()> {
    let tut = open(repo)?;

    if let Some(session) = tut.edit_session()? {
        println!("{} {}", session.target, "(editing)".yellow());
    } else if let Some(name) = tut.current()? {
        println!("{name}");
    }
    Ok(())
}
