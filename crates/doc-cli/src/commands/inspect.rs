//! Status, pointer and graph commands

use std::path::Path;

use chrono::Utc;
use colored::Colorize;

use super::render::print_health;
use super::{open_engine, print_json};
use crate::error::Result;

/// Show the health snapshot without persisting it.
pub fn run_status(root: &Path, json: bool) -> Result<()> {
    let engine = open_engine(root)?;
    let snapshot = engine.analyze(Utc::now())?;

    if json {
        return print_json(&snapshot);
    }
    print_health(&snapshot);
    Ok(())
}

/// Regenerate and persist `CODE_POINTERS.json`.
pub fn run_pointers(root: &Path, json: bool) -> Result<()> {
    let engine = open_engine(root)?;
    let corpus = engine.load_corpus()?;
    let pointers = engine.generate_pointers(&corpus, Utc::now());
    let path = engine.write_pointers(&pointers)?;

    if json {
        return print_json(&pointers);
    }
    println!(
        "{} Generated {} code pointer(s) for {} document(s)",
        "OK".green().bold(),
        pointers.total_entries,
        pointers.documents().len()
    );
    println!("{}: {}", "Written".dimmed(), path);
    Ok(())
}

/// Rebuild and persist `RELATIONSHIPS.json`.
pub fn run_graph(root: &Path, json: bool) -> Result<()> {
    let engine = open_engine(root)?;
    let graph = engine.build_graph();
    let path = engine.write_graph(&graph)?;

    if json {
        return print_json(&graph);
    }
    println!(
        "{} Mapped {} dependencies across {} file(s)",
        "OK".green().bold(),
        graph.edge_count(),
        graph.nodes.len()
    );
    println!("{}: {}", "Written".dimmed(), path);
    Ok(())
}
