//! The synchronization orchestrator
//!
//! Checks the installation, shows documentation health, picks a workflow
//! (preset or menu), runs it and shows health again.

use std::path::Path;

use chrono::Utc;
use colored::Colorize;
use doc_core::workflow::{Menu, PresetReason, preset};
use doc_core::{DocConfig, Workflow};
use doc_fs::DocPath;

use super::render::{print_health, print_report};
use super::workflow::{check_outcome, execute};
use super::{RunOptions, open_engine};
use crate::error::Result;
use crate::interactive;

/// Version of this binary, compared against the installed config
const TOOL_VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn run_orchestrator(root: &Path, options: &RunOptions) -> Result<()> {
    if !root.join(DocPath::Config.as_str()).is_file() {
        println!("{}", "Ultra-Doc is not installed in this project".yellow().bold());
        println!();
        println!(
            "Create {} and a {} directory to get started.",
            DocPath::Config.as_str().cyan(),
            DocPath::MachineTrack.as_str().cyan()
        );
        return Ok(());
    }

    let engine = open_engine(root)?;
    warn_on_version_mismatch(engine.config());

    let snapshot = engine.analyze_and_persist(Utc::now())?;
    print_health(&snapshot);
    println!();

    let workflow = match preset(options.auto_action.as_deref(), &snapshot) {
        Some(chosen) => {
            let why = match chosen.reason {
                PresetReason::AutoAction => "auto action",
                PresetReason::StaleDocs => "stale documents detected",
            };
            println!(
                "{} Running {} ({})",
                "=>".blue().bold(),
                chosen.workflow.label().cyan(),
                why
            );
            chosen.workflow
        }
        None => interactive::select_workflow(&Menu::for_snapshot(&snapshot))?,
    };

    if workflow == Workflow::Exit {
        println!("No action taken.");
        return Ok(());
    }

    let report = execute(&engine, workflow, options)?;
    println!();
    print_report(&report, engine.config().lint.preview_limit);

    println!();
    println!("{}", "Re-checking health...".dimmed());
    let after = engine.analyze_and_persist(Utc::now())?;
    print_health(&after);

    check_outcome(&report)
}

/// Warn when the project was installed by a different version.
fn warn_on_version_mismatch(config: &DocConfig) {
    if let Some(installed) = config.version.as_deref()
        && installed != TOOL_VERSION
    {
        tracing::warn!(installed, running = TOOL_VERSION, "Version mismatch");
        eprintln!(
            "{}: project was installed with version {} but this is {}",
            "warning".yellow().bold(),
            installed,
            TOOL_VERSION
        );
    }
}
