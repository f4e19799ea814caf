//! Main CLI application structure

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::output::{Output, OutputFormat};
use super::replay;

#[derive(Parser)]
#[command(name = "kanban")]
#[command(author, version, about = "In-memory kanban board engine with a scriptable harness")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Replay a board command script against a seed board
    Run {
        /// Script file (reads stdin when omitted)
        script: Option<PathBuf>,

        /// Seed board JSON (defaults to the built-in sample board)
        #[arg(long, env = "KANBAN_SEED")]
        seed: Option<PathBuf>,

        /// Abort on the first refused operation instead of skipping it
        #[arg(long)]
        strict: bool,
    },

    /// Print the built-in sample board
    Sample,

    /// Check a board JSON file against the board invariants
    Validate {
        /// Board file to check
        board: PathBuf,
    },
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(cli.format, cli.verbose);

    output.verbose("Kanban CLI starting");

    match cli.command {
        Commands::Run {
            script,
            seed,
            strict,
        } => replay::run(&output, script.as_deref(), seed.as_deref(), strict)?,
        Commands::Sample => replay::sample(&output)?,
        Commands::Validate { board } => replay::validate(&output, &board)?,
    }

    Ok(())
}
