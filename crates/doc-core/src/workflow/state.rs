//! Synchronization phases and run outcome

use serde::{Deserialize, Serialize};

use crate::lint::LintReport;
use crate::parity::ParityVerdict;
use crate::{Error, Result};

/// Phase of a synchronization run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SyncPhase {
    Idle,
    ChangeDetection,
    RuleEvaluation,
    Scoring,
    ParityCheck,
    SurfacedError,
}

impl SyncPhase {
    /// Legal successors of this phase.
    pub fn successors(self) -> &'static [SyncPhase] {
        match self {
            Self::Idle => &[Self::ChangeDetection],
            Self::ChangeDetection => &[Self::RuleEvaluation],
            Self::RuleEvaluation => &[Self::Scoring],
            Self::Scoring => &[Self::ParityCheck],
            Self::ParityCheck => &[Self::Idle, Self::SurfacedError],
            Self::SurfacedError => &[Self::Idle],
        }
    }

    pub fn can_advance_to(self, next: SyncPhase) -> bool {
        self.successors().contains(&next)
    }
}

impl std::fmt::Display for SyncPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::ChangeDetection => "change-detection",
            Self::RuleEvaluation => "rule-evaluation",
            Self::Scoring => "scoring",
            Self::ParityCheck => "parity-check",
            Self::SurfacedError => "surfaced-error",
        };
        write!(f, "{}", name)
    }
}

/// Records the phases a run moves through and rejects illegal jumps
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseTracker {
    current: SyncPhase,
    history: Vec<SyncPhase>,
}

impl Default for PhaseTracker {
    fn default() -> Self {
        Self {
            current: SyncPhase::Idle,
            history: vec![SyncPhase::Idle],
        }
    }
}

impl PhaseTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> SyncPhase {
        self.current
    }

    /// Every phase visited, starting with `Idle`.
    pub fn history(&self) -> &[SyncPhase] {
        &self.history
    }

    pub fn advance(&mut self, next: SyncPhase) -> Result<()> {
        if !self.current.can_advance_to(next) {
            return Err(Error::InvalidTransition {
                from: self.current.to_string(),
                to: next.to_string(),
            });
        }
        tracing::debug!(from = %self.current, to = %next, "Phase transition");
        self.current = next;
        self.history.push(next);
        Ok(())
    }
}

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Outcome {
    /// Nothing to surface
    Pass,
    /// Problems surfaced that do not fail the run (deferred parity)
    NonFatal,
    /// Error-severity issues or an un-skipped parity failure
    Fatal,
}

impl Outcome {
    pub fn evaluate(lint: &LintReport, parity: &ParityVerdict) -> Self {
        if lint.has_errors() || !parity.passed() {
            Self::Fatal
        } else if parity.failures().next().is_some() {
            Self::NonFatal
        } else {
            Self::Pass
        }
    }

    pub fn is_fatal(self) -> bool {
        self == Self::Fatal
    }

    /// Process exit code for this outcome.
    pub fn exit_code(self) -> i32 {
        if self.is_fatal() { 1 } else { 0 }
    }
}
