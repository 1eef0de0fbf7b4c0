//! Ultra-Doc CLI
//!
//! Keeps a machine-optimized documentation track and its human-readable
//! mirror consistent with each other and with the project's source.

mod cli;
mod commands;
mod error;
mod interactive;
mod logging;

use std::path::PathBuf;

use clap::Parser;
use colored::Colorize;
use doc_core::Workflow;

use cli::{Cli, Commands};
use commands::RunOptions;
use error::{CliError, Result};

fn main() {
    if let Err(e) = run() {
        match e {
            CliError::Failed { message } => eprintln!("{}: {}", "failed".red().bold(), message),
            other => eprintln!("{}: {}", "error".red().bold(), other),
        }
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    if let Err(e) = logging::init(cli.verbose) {
        eprintln!("{}: could not initialize logging: {}", "warning".yellow(), e);
    }
    tracing::debug!(?cli, "Parsed arguments");

    let root = match cli.root {
        Some(root) => root,
        None => std::env::current_dir()?,
    };
    if !root.is_dir() {
        return Err(CliError::user(format!(
            "Project root is not a directory: {}",
            root.display()
        )));
    }
    let options = RunOptions {
        skip_parity: cli.skip_parity,
        changed: cli.changed,
        auto_action: cli.auto_action,
    };

    match cli.command {
        Some(cmd) => execute_command(cmd, root, &options),
        None => commands::run_orchestrator(&root, &options),
    }
}

fn execute_command(cmd: Commands, root: PathBuf, options: &RunOptions) -> Result<()> {
    match cmd {
        Commands::Run => commands::run_orchestrator(&root, options),
        Commands::Status { json } => commands::run_status(&root, json),
        Commands::Lint { json, rules } => commands::run_lint(&root, json, rules),
        Commands::Pointers { json } => commands::run_pointers(&root, json),
        Commands::Graph { json } => commands::run_graph(&root, json),
        Commands::Parity { json } => commands::run_parity(&root, options, json),
        Commands::Mirror => commands::run_mirror(&root),
        Commands::Sync { json } => commands::run_workflow(&root, Workflow::Sync, options, json),
        Commands::Quick { json } => commands::run_workflow(&root, Workflow::Quick, options, json),
        Commands::Validate { json } => {
            commands::run_workflow(&root, Workflow::Validate, options, json)
        }
        Commands::Summary => commands::run_workflow(&root, Workflow::Summary, options, false),
    }
}
