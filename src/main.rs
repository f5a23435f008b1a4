use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use colored::Colorize;
use tut::commands::{
    checkpoint, completions, edit, init, next, points, propagation, start, status,
};
use tut::logging::init_logging;
use tut::validation::clap_name_validator;

#[derive(Parser)]
#[command(name = "tut")]
#[command(about = "Step through, edit and re-derive tutorial checkpoints", long_about = None)]
#[command(version)]
struct Cli {
    /// Run as if started in this directory
    #[arg(short = 'C', long = "repo", global = true, default_value = ".")]
    repo: PathBuf,

    /// Increase log output (-v info, -vv debug); TUT_LOG overrides
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start tracking checkpoints in a repository (created if missing)
    Init,

    /// Create a checkpoint after the current one and switch to it
    Start {
        /// Checkpoint name (letters, digits, '-', '_', '.')
        #[arg(value_parser = clap_name_validator)]
        name: String,

        /// Commit or branch to start from (default: HEAD)
        #[arg(long)]
        from: Option<String>,
    },

    /// Edit an existing checkpoint on a scratch branch
    Edit {
        #[arg(value_parser = clap_name_validator)]
        name: String,
    },

    /// Commit pending changes as a new checkpoint, or finish the open edit
    Checkpoint {
        /// Name of the new checkpoint (optional while editing)
        #[arg(value_parser = clap_name_validator)]
        name: Option<String>,

        /// Commit message
        #[arg(short, long)]
        message: Option<String>,
    },

    /// Move to the next checkpoint, or the main line after the last one
    Next {
        /// Merge the current checkpoint into the next one
        #[arg(long)]
        merge: bool,
    },

    /// List checkpoints in order
    Points,

    /// Print the current checkpoint
    Current,

    /// Show lifecycle state and uncommitted paths
    Status,

    /// Continue a propagation halted on a conflict
    Resume,

    /// Abandon a halted propagation and return to editing
    Abort,

    /// Generate shell completion script
    Completions {
        /// Shell to generate completions for (bash, zsh, fish)
        shell: String,
    },
}

fn run(cli: Cli) -> Result<()> {
    let repo = cli.repo.as_path();

    match cli.command {
        Commands::Init => init::execute(repo),
        Commands::Start { name, from } => start::execute(repo, &name, from.as_deref()),
        Commands::Edit { name } => edit::execute(repo, &name),
        Commands::Checkpoint { name, message } => {
            checkpoint::execute(repo, name.as_deref(), message.as_deref())
        }
        Commands::Next { merge } => next::execute(repo, merge),
        Commands::Points => points::execute(repo),
        Commands::Current => points::current(repo),
        Commands::Status => status::execute(repo),
        Commands::Resume => propagation::resume(repo),
        Commands::Abort => propagation::abort(repo),
        Commands::Completions { shell } => completions::execute(&mut Cli::command(), &shell),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {err:#}", "error:".red().bold());
            ExitCode::FAILURE
        }
    }
}
