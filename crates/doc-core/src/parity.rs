//! Dual-track parity
//!
//! Every tracked machine-track document must have a same-named human-track
//! mirror that is not older than the source. A small tolerance absorbs
//! filesystem timestamp jitter; the content-hash strategy additionally
//! compares the source hash recorded in the mirror's front matter.

use std::fs;
use std::path::Path;
use std::time::Duration;

use doc_fs::checksum;
use doc_fs::{DocLayout, io};
use serde::{Deserialize, Serialize};

use crate::config::{ParitySettings, ParityStrategy};
use crate::document::{Corpus, Document};
use crate::metadata::front_matter_value;

/// State of one document's mirror
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MirrorStatus {
    Synced,
    MissingMirror,
    StaleMirror,
}

impl std::fmt::Display for MirrorStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Synced => write!(f, "synced"),
            Self::MissingMirror => write!(f, "missing-mirror"),
            Self::StaleMirror => write!(f, "stale-mirror"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MirrorCheck {
    pub document: String,
    pub status: MirrorStatus,
}

/// Outcome of a parity pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParityVerdict {
    /// One entry per tracked document, in name order
    pub checks: Vec<MirrorCheck>,
    /// The caller deferred the check; statuses are informational only
    pub skipped: bool,
    /// The human track directory does not exist
    pub human_track_missing: bool,
}

impl ParityVerdict {
    /// True if the check was skipped or every mirror is synced.
    pub fn passed(&self) -> bool {
        self.skipped || self.failures().next().is_none()
    }

    pub fn failures(&self) -> impl Iterator<Item = &MirrorCheck> {
        self.checks
            .iter()
            .filter(|c| c.status != MirrorStatus::Synced)
    }

    pub fn status_of(&self, document: &str) -> Option<MirrorStatus> {
        self.checks
            .iter()
            .find(|c| c.document == document)
            .map(|c| c.status)
    }

    /// `passed`, `failed` or `skipped`.
    pub fn status_label(&self) -> &'static str {
        if self.skipped {
            "skipped"
        } else if self.passed() {
            "passed"
        } else {
            "failed"
        }
    }

    /// Human-readable problem lines.
    pub fn issue_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        if self.human_track_missing {
            lines.push("Human track directory missing".to_string());
        }
        lines.extend(self.failures().map(|check| match check.status {
            MirrorStatus::MissingMirror => {
                format!("Missing human documentation for: {}", check.document)
            }
            _ => format!("Human documentation outdated for: {}", check.document),
        }));
        lines
    }
}

/// Explicit parity options; nothing is read from the environment here
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParityOptions {
    /// Defer the check: statuses are computed but never fail
    pub skip: bool,
    /// How much older than its source a mirror may be
    pub tolerance: Duration,
    pub strategy: ParityStrategy,
}

impl ParityOptions {
    pub fn from_settings(settings: &ParitySettings) -> Self {
        Self {
            skip: false,
            tolerance: Duration::from_millis(settings.tolerance_ms),
            strategy: settings.strategy,
        }
    }

    pub fn skipped(mut self, skip: bool) -> Self {
        self.skip = skip;
        self
    }
}

impl Default for ParityOptions {
    fn default() -> Self {
        Self::from_settings(&ParitySettings::default())
    }
}

/// Compares the machine track against its human mirror
pub struct ParityVerifier<'a> {
    layout: &'a DocLayout,
    options: ParityOptions,
}

impl<'a> ParityVerifier<'a> {
    pub fn new(layout: &'a DocLayout, options: ParityOptions) -> Self {
        Self { layout, options }
    }

    /// Check every tracked document of the corpus.
    pub fn verify(&self, corpus: &Corpus) -> ParityVerdict {
        let human_track_missing = !self.layout.human_dir().is_dir();
        if human_track_missing {
            tracing::warn!(path = %self.layout.human_dir().display(), "Human track directory missing");
        }

        let checks: Vec<MirrorCheck> = corpus
            .tracked()
            .map(|doc| MirrorCheck {
                document: doc.name.clone(),
                status: if human_track_missing {
                    MirrorStatus::MissingMirror
                } else {
                    self.check_document(doc)
                },
            })
            .collect();

        let verdict = ParityVerdict {
            checks,
            skipped: self.options.skip,
            human_track_missing,
        };
        tracing::info!(
            documents = verdict.checks.len(),
            failures = verdict.failures().count(),
            status = verdict.status_label(),
            "Parity check complete"
        );
        verdict
    }

    /// Status of a single document's mirror.
    pub fn check_document(&self, doc: &Document) -> MirrorStatus {
        let mirror = self.layout.mirror_of(&doc.name);
        if !mirror.is_file() {
            return MirrorStatus::MissingMirror;
        }

        let mirror_time = match io::modified_time(&mirror) {
            Ok(time) => time,
            Err(e) => {
                tracing::warn!(document = %doc.name, error = %e, "Cannot stat mirror");
                return MirrorStatus::StaleMirror;
            }
        };

        // Mirror older than source beyond the tolerance window
        if let Ok(lag) = doc.modified.duration_since(mirror_time)
            && lag > self.options.tolerance
        {
            return MirrorStatus::StaleMirror;
        }

        if self.options.strategy == ParityStrategy::ContentHash && !hash_matches(&mirror, doc) {
            return MirrorStatus::StaleMirror;
        }

        MirrorStatus::Synced
    }
}

/// True when the mirror records no hash or records the source's current one.
fn hash_matches(mirror: &Path, doc: &Document) -> bool {
    let Ok(text) = fs::read_to_string(mirror) else {
        return false;
    };
    match front_matter_value(&text, "source_hash") {
        Some(recorded) => checksum::matches_content(recorded, &doc.text),
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(document: &str, status: MirrorStatus) -> MirrorCheck {
        MirrorCheck {
            document: document.to_string(),
            status,
        }
    }

    #[test]
    fn verdict_fails_on_any_non_synced_mirror() {
        let verdict = ParityVerdict {
            checks: vec![
                check("a.md", MirrorStatus::Synced),
                check("b.md", MirrorStatus::MissingMirror),
                check("c.md", MirrorStatus::StaleMirror),
            ],
            ..Default::default()
        };

        assert!(!verdict.passed());
        assert_eq!(verdict.status_label(), "failed");
        assert_eq!(
            verdict.issue_lines(),
            vec![
                "Missing human documentation for: b.md",
                "Human documentation outdated for: c.md",
            ]
        );
        assert_eq!(verdict.status_of("a.md"), Some(MirrorStatus::Synced));
    }

    #[test]
    fn skipped_verdict_passes_but_keeps_statuses() {
        let verdict = ParityVerdict {
            checks: vec![check("a.md", MirrorStatus::MissingMirror)],
            skipped: true,
            human_track_missing: false,
        };
        assert!(verdict.passed());
        assert_eq!(verdict.status_label(), "skipped");
        assert_eq!(verdict.failures().count(), 1);
    }

    #[test]
    fn status_serializes_kebab_case() {
        let json = serde_json::to_string(&MirrorStatus::StaleMirror).unwrap();
        assert_eq!(json, "\"stale-mirror\"");
    }
}
