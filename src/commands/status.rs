use std::path::Path;

use anyhow::Result;
use colored::Colorize;

use super::open;
use crate::git::Vcs;
use crate::models::LifecycleState;

/// Show the lifecycle state, the checkpoint list and uncommitted paths
pub fn execute(repo: &Path) -> Result<()> {
    let tut = open(repo)?;
    let state = tut.state()?;

    println!("{}", "tut status".bold().blue());
    println!("{}", "─".repeat(40).dimmed());

    let label = match &state {
        LifecycleState::AtCheckpoint(_) | LifecycleState::Unnamed => state.to_string().green(),
        LifecycleState::Editing(_) => state.to_string().yellow(),
        LifecycleState::Propagating { .. } => state.to_string().red(),
    };
    println!("  State: {label}");

    let points = tut.points()?;
    println!("  Checkpoints: {}", points.len());

    let pending = tut.vcs().pending_paths()?;
    if !pending.is_empty() {
        println!("\n{}", "Uncommitted".bold());
        for path in &pending {
            println!("  {path}");
        }
    }

    if let LifecycleState::Propagating { target } = &state {
        println!(
            "\n{} Edit of {} halted on a conflict. Resolve, stage, then run {} or {}.",
            "!".red().bold(),
            target.bold(),
            "tut resume".bold(),
            "tut abort".bold()
        );
    }
    Ok(())
}
