//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Ultra-Doc - keep machine and human documentation consistent
#[derive(Parser, Debug)]
#[command(name = "ultra-doc")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Project root (defaults to the current directory)
    #[arg(short = 'C', long, global = true)]
    pub root: Option<PathBuf>,

    /// Defer the human mirror parity check
    #[arg(
        long,
        global = true,
        env = "ULTRA_DOC_SKIP_PARITY",
        value_parser = clap::builder::BoolishValueParser::new()
    )]
    pub skip_parity: bool,

    /// Changed files, relative to the project root (repeatable or comma-separated)
    #[arg(long, global = true, value_delimiter = ',')]
    pub changed: Vec<String>,

    /// Workflow to run without asking (sync, quick, validate, summary)
    #[arg(long, env = "ULTRA_DOC_AUTO_ACTION")]
    pub auto_action: Option<String>,

    /// The command to run; the orchestrator runs when omitted
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Check health, pick a workflow and run it
    Run,

    /// Show documentation health
    Status {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Lint the machine track
    Lint {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,

        /// List registered rules instead of linting
        #[arg(long)]
        rules: bool,
    },

    /// Regenerate CODE_POINTERS.json
    Pointers {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Regenerate RELATIONSHIPS.json
    Graph {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Compare the human track against the machine track
    Parity {
        /// Output as JSON for scripting
        #[arg(long)]
        json: bool,
    },

    /// Write missing or outdated human mirrors
    Mirror,

    /// Full sync: timestamps, changelog, pointers, graph, mirrors, lint, parity
    ///
    /// Examples:
    ///   ultra-doc sync
    ///   ultra-doc sync --changed context_for_llms/api.md
    Sync {
        /// Output as JSON for CI/CD integration
        #[arg(long)]
        json: bool,
    },

    /// Quick sync: timestamps, lint with parity deferred, mirrors
    Quick {
        /// Output as JSON for CI/CD integration
        #[arg(long)]
        json: bool,
    },

    /// Validate pointers, graph and lint without touching documents
    Validate {
        /// Output as JSON for CI/CD integration
        #[arg(long)]
        json: bool,
    },

    /// Write the summary report
    Summary,
}
