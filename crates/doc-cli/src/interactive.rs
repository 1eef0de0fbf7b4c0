//! Interactive workflow selection
//!
//! Uses dialoguer when a terminal is attached; otherwise the recommended
//! option is taken without waiting for input.

use std::io::IsTerminal;

use colored::Colorize;
use dialoguer::Select;
use doc_core::workflow::Menu;
use doc_core::Workflow;

use crate::error::Result;

/// True when both stdin and stderr (where dialoguer draws) are terminals.
pub fn is_interactive() -> bool {
    std::io::stdin().is_terminal() && std::io::stderr().is_terminal()
}

/// Ask which workflow to run.
pub fn select_workflow(menu: &Menu) -> Result<Workflow> {
    if !is_interactive() {
        let choice = menu.default_option().workflow;
        println!(
            "{} No terminal attached, using recommended option: {}",
            "=>".blue().bold(),
            choice.label().cyan()
        );
        return Ok(choice);
    }

    let index = Select::new()
        .with_prompt("What would you like to do?")
        .items(&menu.labels())
        .default(menu.default_index)
        .interact()?;

    Ok(menu.options[index].workflow)
}
