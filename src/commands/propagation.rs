//! Recovery from a propagation halted on a rewrite conflict

use std::path::Path;

use anyhow::Result;
use colored::Colorize;

use super::{open, print_report};

/// Continue after the user resolved and staged the conflict
pub fn resume(repo: &Path) -> Result<()> {
    let tut = open(repo)?;
    let report = tut.resume()?;

    println!("{} Propagation finished", "✓".green().bold());
    print_report(&report);
    Ok(())
}

/// Give up on the propagation and return to the edit session
pub fn abort(repo: &Path) -> Result<()> {
    let tut = open(repo)?;
    let session = tut.abort()?;

    println!(
        "{} Propagation aborted, back to editing {}",
        "✓".green().bold(),
        session.target.bold()
    );
    Ok(())
}
