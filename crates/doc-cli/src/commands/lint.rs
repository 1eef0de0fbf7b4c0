//! Lint command

use std::path::Path;

use colored::Colorize;
use doc_core::LintDigest;

use super::render::print_digest;
use super::{open_engine, print_json};
use crate::error::{CliError, Result};

/// Lint the machine track and write `LINT_WARNINGS.md`.
///
/// Fails when any error-severity issue is found.
pub fn run_lint(root: &Path, json: bool, list_rules: bool) -> Result<()> {
    let engine = open_engine(root)?;

    if list_rules {
        println!("{}", "Registered rules".bold());
        for (id, description) in engine.registry().describe() {
            println!("  {} {}", id.cyan(), description.dimmed());
        }
        return Ok(());
    }

    let corpus = engine.load_corpus()?;
    let report = engine.lint(&corpus);
    let digest = LintDigest::from_report(&report);
    engine.write_digest(&digest, None)?;

    if json {
        print_json(&report)?;
    } else {
        println!(
            "Checked {} document(s): {} error(s), {} warning(s), {} info",
            report.documents_checked,
            report.totals.errors,
            report.totals.warnings,
            report.totals.infos
        );
        print_digest(&digest, usize::MAX);
    }

    if report.has_errors() {
        return Err(CliError::failed(format!(
            "Lint found {} error(s)",
            report.totals.errors
        )));
    }
    Ok(())
}
