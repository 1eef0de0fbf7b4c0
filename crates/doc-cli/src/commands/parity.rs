//! Parity and mirror commands

use std::path::Path;

use colored::Colorize;
use doc_core::HeaderTranslator;
use doc_core::mirror::MirrorWriter;

use super::render::print_parity;
use super::{RunOptions, open_engine, print_json};
use crate::error::{CliError, Result};

/// Verify the human track. Fails on an un-skipped failing verdict.
pub fn run_parity(root: &Path, options: &RunOptions, json: bool) -> Result<()> {
    let engine = open_engine(root)?;
    let corpus = engine.load_corpus()?;
    let verdict = engine.verify_parity(&corpus, options.skip_parity);

    if json {
        print_json(&verdict)?;
    } else {
        print_parity(&verdict);
    }

    if !verdict.passed() {
        return Err(CliError::failed(format!(
            "{} human mirror(s) out of sync",
            verdict.failures().count()
        )));
    }
    Ok(())
}

/// Write missing or outdated human mirrors.
pub fn run_mirror(root: &Path) -> Result<()> {
    let engine = open_engine(root)?;
    let corpus = engine.load_corpus()?;
    let translator = HeaderTranslator::new();
    let summary = MirrorWriter::new(engine.layout(), &translator).sync(&corpus)?;

    for name in &summary.written {
        println!("  {} {}", "+".green(), name.cyan());
    }
    println!(
        "{} Wrote {} mirror(s), {} already up to date",
        "OK".green().bold(),
        summary.written.len(),
        summary.up_to_date
    );
    Ok(())
}
