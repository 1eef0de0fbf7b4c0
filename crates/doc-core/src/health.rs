//! Health scoring
//!
//! Fuses pointer coverage, lint errors, graph size and mirror parity into a
//! [`HealthSnapshot`] with a ranked list of priorities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::document::Corpus;
use crate::lint::LintReport;
use crate::parity::{MirrorStatus, ParityVerdict};
use crate::pointers::PointerArtifact;

/// How urgently a priority needs attention
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    Low,
    Medium,
    High,
}

impl Impact {
    fn rank(self) -> u8 {
        match self {
            Self::High => 0,
            Self::Medium => 1,
            Self::Low => 2,
        }
    }
}

impl std::fmt::Display for Impact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Priority {
    pub file: String,
    pub reason: String,
    pub impact: Impact,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthMetrics {
    pub total_docs: usize,
    pub stale_docs: usize,
    pub coverage_percentage: u32,
    pub total_relationships: usize,
}

/// The persisted health state (`DOC_STATE.json`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthSnapshot {
    pub generated: DateTime<Utc>,
    pub metrics: HealthMetrics,
    pub priorities: Vec<Priority>,
}

impl HealthSnapshot {
    /// Stale documents or open priorities call for a full sync.
    pub fn needs_full_sync(&self) -> bool {
        self.metrics.stale_docs > 0 || !self.priorities.is_empty()
    }

    /// Highest-ranked priorities.
    pub fn top_priorities(&self, limit: usize) -> &[Priority] {
        &self.priorities[..limit.min(self.priorities.len())]
    }
}

/// Signals the scorer fuses
#[derive(Debug, Clone, Copy)]
pub struct HealthInputs<'a> {
    pub corpus: &'a Corpus,
    pub pointers: &'a PointerArtifact,
    pub lint: &'a LintReport,
    pub relationships: usize,
    pub parity: Option<&'a ParityVerdict>,
}

/// `round(100 * covered / total)`, 0 for an empty corpus.
pub fn coverage_percentage(covered: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((covered as f64 * 100.0) / total as f64).round() as u32
}

/// Compute the health snapshot.
pub fn score(inputs: HealthInputs<'_>, now: DateTime<Utc>) -> HealthSnapshot {
    let mut total_docs = 0;
    let mut covered = 0;
    let mut stale_docs = 0;
    let mut priorities = Vec::new();

    for doc in inputs.corpus.tracked() {
        total_docs += 1;
        let has_pointers = inputs.pointers.covers(&doc.name);
        if has_pointers {
            covered += 1;
        } else {
            priorities.push(Priority {
                file: doc.name.clone(),
                reason: "no code pointers".to_string(),
                impact: Impact::Medium,
            });
        }

        // Stale: never validated, or validated before the last edit
        let validated_after_edit = inputs
            .pointers
            .earliest_validation(&doc.name)
            .is_some_and(|validated| validated >= DateTime::<Utc>::from(doc.modified));
        if !has_pointers || !validated_after_edit {
            stale_docs += 1;
        }

        let errors = inputs.lint.error_count_for(&doc.name);
        if errors > 0 {
            priorities.push(Priority {
                file: doc.name.clone(),
                reason: format!("{} error(s) reported by lint", errors),
                impact: Impact::High,
            });
        }

        match inputs.parity.and_then(|v| v.status_of(&doc.name)) {
            Some(MirrorStatus::MissingMirror) => priorities.push(Priority {
                file: doc.name.clone(),
                reason: "human mirror missing".to_string(),
                impact: Impact::Medium,
            }),
            Some(MirrorStatus::StaleMirror) => priorities.push(Priority {
                file: doc.name.clone(),
                reason: "human mirror outdated".to_string(),
                impact: Impact::Medium,
            }),
            _ => {}
        }
    }

    priorities.sort_by(|a, b| {
        a.impact
            .rank()
            .cmp(&b.impact.rank())
            .then_with(|| a.file.cmp(&b.file))
            .then_with(|| a.reason.cmp(&b.reason))
    });

    let metrics = HealthMetrics {
        total_docs,
        stale_docs,
        coverage_percentage: coverage_percentage(covered, total_docs),
        total_relationships: inputs.relationships,
    };
    tracing::info!(
        total_docs,
        stale_docs,
        coverage = metrics.coverage_percentage,
        priorities = priorities.len(),
        "Scored documentation health"
    );

    HealthSnapshot {
        generated: now,
        metrics,
        priorities,
    }
}
