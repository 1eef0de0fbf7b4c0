//! Named workflows and the choice between them
//!
//! The orchestrator reads the health snapshot, offers a menu with one
//! recommended entry, and runs the chosen [`Workflow`] through a
//! [`DocEngine`]. A preset (from the environment, or forced by stale
//! documents) bypasses the menu.

mod engine;
mod state;

pub use engine::{DocEngine, RunContext, WorkflowReport};
pub use state::{Outcome, PhaseTracker, SyncPhase};

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::Error;
use crate::health::HealthSnapshot;

/// A named sequence of engine operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Workflow {
    /// Timestamps, changelog, pointers, graph, mirrors, lint, scoring, parity
    Sync,
    /// Timestamps, lint with parity deferred, mirrors
    Quick,
    /// Pointers, graph and lint without touching documents
    Validate,
    /// Summary report only
    Summary,
    /// Do nothing
    Exit,
}

impl Workflow {
    pub const ALL: [Workflow; 5] = [
        Self::Sync,
        Self::Quick,
        Self::Validate,
        Self::Summary,
        Self::Exit,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Self::Sync => "sync",
            Self::Quick => "quick",
            Self::Validate => "validate",
            Self::Summary => "summary",
            Self::Exit => "exit",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Sync => "Run full sync (metadata + pointers + mirrors + lint)",
            Self::Quick => "Run quick sync (timestamps + lint + mirrors)",
            Self::Validate => "Validate accuracy & code references",
            Self::Summary => "Generate summary report only",
            Self::Exit => "Exit without taking action",
        }
    }

    /// Workflows that do something (everything but `exit`).
    pub fn is_runnable(self) -> bool {
        self != Self::Exit
    }
}

impl std::fmt::Display for Workflow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl FromStr for Workflow {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|w| w.id() == wanted)
            .ok_or(Error::UnknownWorkflow {
                name: s.to_string(),
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuOption {
    pub workflow: Workflow,
    pub recommended: bool,
}

/// The interactive choice offered after a health check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Menu {
    pub options: Vec<MenuOption>,
    /// Index of the recommended option, used when no input is available
    pub default_index: usize,
}

impl Menu {
    /// Full sync is recommended when anything is stale or prioritized,
    /// otherwise the summary report.
    pub fn for_snapshot(snapshot: &HealthSnapshot) -> Self {
        let recommended = if snapshot.needs_full_sync() {
            Workflow::Sync
        } else {
            Workflow::Summary
        };
        let options: Vec<MenuOption> = Workflow::ALL
            .into_iter()
            .map(|workflow| MenuOption {
                workflow,
                recommended: workflow == recommended,
            })
            .collect();
        let default_index = options
            .iter()
            .position(|o| o.recommended)
            .unwrap_or_default();
        Self {
            options,
            default_index,
        }
    }

    pub fn default_option(&self) -> MenuOption {
        self.options[self.default_index]
    }

    pub fn labels(&self) -> Vec<String> {
        self.options
            .iter()
            .map(|o| {
                if o.recommended {
                    format!("{} (recommended)", o.workflow.label())
                } else {
                    o.workflow.label().to_string()
                }
            })
            .collect()
    }
}

/// Why a workflow was chosen without asking
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresetReason {
    /// Named by the auto-action setting
    AutoAction,
    /// Stale documents force a full sync
    StaleDocs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preset {
    pub workflow: Workflow,
    pub reason: PresetReason,
}

/// Decide whether to skip the menu.
///
/// A runnable auto action wins; unknown or `exit` values are ignored. Without
/// one, stale documents trigger a full sync.
pub fn preset(auto_action: Option<&str>, snapshot: &HealthSnapshot) -> Option<Preset> {
    if let Some(action) = auto_action.filter(|a| !a.trim().is_empty()) {
        match action.parse::<Workflow>() {
            Ok(workflow) if workflow.is_runnable() => {
                return Some(Preset {
                    workflow,
                    reason: PresetReason::AutoAction,
                });
            }
            _ => tracing::warn!(action, "Ignoring unrecognized auto action"),
        }
    }

    (snapshot.metrics.stale_docs > 0).then_some(Preset {
        workflow: Workflow::Sync,
        reason: PresetReason::StaleDocs,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::health::{HealthMetrics, Impact, Priority};
    use chrono::Utc;
    use rstest::rstest;

    fn snapshot(stale_docs: usize, priorities: usize) -> HealthSnapshot {
        HealthSnapshot {
            generated: Utc::now(),
            metrics: HealthMetrics {
                total_docs: 3,
                stale_docs,
                coverage_percentage: 100,
                total_relationships: 0,
            },
            priorities: (0..priorities)
                .map(|i| Priority {
                    file: format!("{}.md", i),
                    reason: "no code pointers".to_string(),
                    impact: Impact::Medium,
                })
                .collect(),
        }
    }

    #[rstest]
    #[case("sync", Workflow::Sync)]
    #[case(" Quick ", Workflow::Quick)]
    #[case("VALIDATE", Workflow::Validate)]
    #[case("summary", Workflow::Summary)]
    #[case("exit", Workflow::Exit)]
    fn parses_workflow_ids(#[case] input: &str, #[case] expected: Workflow) {
        assert_eq!(input.parse::<Workflow>().unwrap(), expected);
    }

    #[test]
    fn unknown_workflow_is_an_error() {
        let err = "deploy".parse::<Workflow>().unwrap_err();
        assert_eq!(err.to_string(), "Unknown workflow: deploy");
    }

    #[test]
    fn menu_recommends_sync_when_priorities_exist() {
        let menu = Menu::for_snapshot(&snapshot(0, 1));
        assert_eq!(menu.default_option().workflow, Workflow::Sync);
        assert_eq!(menu.options.iter().filter(|o| o.recommended).count(), 1);
        assert!(menu.labels()[0].ends_with("(recommended)"));
    }

    #[test]
    fn menu_recommends_summary_when_healthy() {
        let menu = Menu::for_snapshot(&snapshot(0, 0));
        assert_eq!(menu.default_option().workflow, Workflow::Summary);
        assert_eq!(menu.default_index, 3);
    }

    #[test]
    fn auto_action_beats_stale_docs() {
        let p = preset(Some("quick"), &snapshot(2, 0)).unwrap();
        assert_eq!(p.workflow, Workflow::Quick);
        assert_eq!(p.reason, PresetReason::AutoAction);
    }

    #[test]
    fn stale_docs_force_full_sync() {
        let p = preset(Some("bogus"), &snapshot(1, 0)).unwrap();
        assert_eq!(p.workflow, Workflow::Sync);
        assert_eq!(p.reason, PresetReason::StaleDocs);
    }

    #[test]
    fn no_preset_for_healthy_docs_or_exit_action() {
        assert!(preset(None, &snapshot(0, 3)).is_none());
        assert!(preset(Some("exit"), &snapshot(0, 0)).is_none());
        assert!(preset(Some(""), &snapshot(0, 0)).is_none());
    }
}
