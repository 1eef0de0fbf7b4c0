//! Command implementations for doc-cli

pub mod inspect;
pub mod lint;
pub mod orchestrate;
pub mod parity;
pub mod render;
pub mod workflow;

pub use inspect::{run_graph, run_pointers, run_status};
pub use lint::run_lint;
pub use orchestrate::run_orchestrator;
pub use parity::{run_mirror, run_parity};
pub use workflow::run_workflow;

use std::path::Path;

use doc_core::DocEngine;
use serde::Serialize;

use crate::error::Result;

/// Switches shared by every command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOptions {
    pub skip_parity: bool,
    pub changed: Vec<String>,
    pub auto_action: Option<String>,
}

pub(crate) fn open_engine(root: &Path) -> Result<DocEngine> {
    Ok(DocEngine::open(root)?)
}

pub(crate) fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
