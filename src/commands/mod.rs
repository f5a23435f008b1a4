//! Command handlers for the `tut` binary
//!
//! Each module exposes an `execute` function taking the repository path from
//! `-C/--repo` and printing a human-readable result.

pub mod checkpoint;
pub mod completions;
pub mod edit;
pub mod init;
pub mod next;
pub mod points;
pub mod propagation;
pub mod start;
pub mod status;

use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;

use crate::lifecycle::Tut;
use crate::propagation::PropagationReport;

/// Open the repository at `repo` for a command.
pub(crate) fn open(repo: &Path) -> Result<Tut> {
    Tut::open(repo).with_context(|| format!("Failed to open repository at {}", repo.display()))
}

pub(crate) fn short(commit: &str) -> &str {
    commit.get(..8).unwrap_or(commit)
}

/// Print which markers a propagation moved.
pub(crate) fn print_report(report: &PropagationReport) {
    for moved in &report.moved {
        println!(
            "  {} {} {}..{}",
            "↻".cyan().bold(),
            moved.name.bold(),
            short(&moved.from).dimmed(),
            short(&moved.to).dimmed()
        );
    }
    for name in &report.untouched {
        println!("  {} {} {}", "─".dimmed(), name, "(unchanged)".dimmed());
    }
}
