//! Direct workflow commands (`sync`, `quick`, `validate`, `summary`)

use std::path::Path;

use chrono::Utc;
use doc_core::{DocEngine, HeaderTranslator, RunContext, StaticChanges, Workflow, WorkflowReport};

use super::render::print_report;
use super::{RunOptions, open_engine, print_json};
use crate::error::{CliError, Result};

/// Run one workflow on an engine and return its report.
pub(crate) fn execute(
    engine: &DocEngine,
    workflow: Workflow,
    options: &RunOptions,
) -> Result<WorkflowReport> {
    let changes = StaticChanges::new(options.changed.iter().cloned());
    let translator = HeaderTranslator::new();
    let ctx = RunContext {
        changes: &changes,
        translator: &translator,
        skip_parity: options.skip_parity,
        now: Utc::now(),
    };
    Ok(engine.run(workflow, &ctx)?)
}

/// Turn a fatal outcome into a non-zero exit.
pub(crate) fn check_outcome(report: &WorkflowReport) -> Result<()> {
    if report.outcome.is_fatal() {
        return Err(CliError::failed(format!(
            "Workflow {} surfaced errors",
            report.workflow
        )));
    }
    Ok(())
}

pub fn run_workflow(root: &Path, workflow: Workflow, options: &RunOptions, json: bool) -> Result<()> {
    let engine = open_engine(root)?;
    let report = execute(&engine, workflow, options)?;

    if json {
        print_json(&report)?;
    } else {
        print_report(&report, engine.config().lint.preview_limit);
    }
    check_outcome(&report)
}
