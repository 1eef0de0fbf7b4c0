//! Summary report (`reports/ultra-doc-summary.md`)

use std::fmt::Write as _;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use doc_fs::{DocLayout, DocPath, io};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::Result;

static ISSUE_COUNT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Found (\d+) issues").expect("Invalid issue count regex"));

const CHANGELOG_EXCERPT_LINES: usize = 10;

/// Lint state as recorded in the persisted digest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LintStatus {
    /// No digest has been written yet
    Unknown,
    Healthy,
    NeedsAttention,
}

impl LintStatus {
    fn label(self) -> &'static str {
        match self {
            Self::Unknown => "Unknown",
            Self::Healthy => "Healthy",
            Self::NeedsAttention => "Needs Attention",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangelogExcerpt {
    pub file: String,
    pub excerpt: String,
}

/// Facts gathered for the summary report
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryReport {
    pub machine_docs: usize,
    pub human_docs: usize,
    pub lint_issues: usize,
    pub lint_status: LintStatus,
    pub latest_changelog: Option<ChangelogExcerpt>,
}

/// Markdown documents in `dir`, excluding the index and generated artifacts.
pub fn count_docs(dir: &Path, index_name: &str) -> usize {
    let Ok(entries) = fs::read_dir(dir) else {
        return 0;
    };
    entries
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().to_string())
        .filter(|name| {
            name.ends_with(".md") && name != index_name && !DocPath::is_generated_artifact(name)
        })
        .count()
}

/// Issue count recorded in a rendered lint digest.
pub fn parse_issue_count(digest: &str) -> usize {
    ISSUE_COUNT
        .captures(digest)
        .and_then(|caps| caps[1].parse().ok())
        .unwrap_or(0)
}

impl SummaryReport {
    /// Gather the report facts from disk.
    pub fn gather(layout: &DocLayout) -> Result<Self> {
        let digest_path = layout.artifact(DocPath::LintDigest);
        let (lint_issues, lint_status) = if digest_path.to_native().is_file() {
            let count = parse_issue_count(&io::read_text(&digest_path)?);
            let status = if count == 0 {
                LintStatus::Healthy
            } else {
                LintStatus::NeedsAttention
            };
            (count, status)
        } else {
            (0, LintStatus::Unknown)
        };

        Ok(Self {
            machine_docs: count_docs(layout.machine_dir(), layout.index_name()),
            human_docs: count_docs(layout.human_dir(), layout.index_name()),
            lint_issues,
            lint_status,
            latest_changelog: latest_changelog(layout.changelog_dir())?,
        })
    }

    pub fn mirrors_in_sync(&self) -> bool {
        self.machine_docs == self.human_docs
    }

    pub fn render(&self, generated: DateTime<Utc>) -> String {
        let mut out = String::from("# Ultra-Doc Summary Report\n");
        let _ = writeln!(out, "Generated: {}\n", generated.format("%Y-%m-%d %H:%M:%S UTC"));

        out.push_str("## Metrics\n\n");
        out.push_str("| Metric | Value | Status |\n| :--- | :--- | :--- |\n");
        let _ = writeln!(out, "| **Machine Docs** | {} | Active |", self.machine_docs);
        let _ = writeln!(
            out,
            "| **Human Docs** | {} | {} |",
            self.human_docs,
            if self.mirrors_in_sync() { "Synced" } else { "Sync Pending" }
        );
        let _ = writeln!(
            out,
            "| **Lint Issues** | {} | {} |",
            self.lint_issues,
            self.lint_status.label()
        );

        out.push_str("\n## Recent Changes\n\n");
        match &self.latest_changelog {
            Some(entry) => {
                let _ = writeln!(out, "[{0}](../changelog/{0})\n", entry.file);
                let _ = writeln!(out, "{}", entry.excerpt);
            }
            None => out.push_str("No changelogs found.\n"),
        }

        out.push_str("\n## Quick Links\n\n");
        out.push_str("- [Machine Docs](../context_for_llms/INDEX.md)\n");
        out.push_str("- [Human Docs](../context_for_humans/)\n");
        out.push_str("- [Full Changelog](../changelog/)\n");
        out
    }

    /// Render and write the report; returns its path.
    pub fn write(&self, layout: &DocLayout, generated: DateTime<Utc>) -> Result<doc_fs::NormalizedPath> {
        let path = layout.artifact(DocPath::SummaryReport);
        io::write_text(&path, &self.render(generated))?;
        tracing::info!(path = %path, "Wrote summary report");
        Ok(path)
    }
}

/// Newest `docs-*` changelog file and its first lines.
fn latest_changelog(dir: &Path) -> Result<Option<ChangelogExcerpt>> {
    let Ok(entries) = fs::read_dir(dir) else {
        return Ok(None);
    };
    let latest = entries
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().to_string())
        .filter(|name| name.starts_with("docs-"))
        .max();
    let Some(file) = latest else {
        return Ok(None);
    };

    let path = dir.join(&file);
    let content = fs::read_to_string(&path).map_err(|e| doc_fs::Error::io(&path, e))?;
    let excerpt = content
        .lines()
        .take(CHANGELOG_EXCERPT_LINES)
        .collect::<Vec<_>>()
        .join("\n");
    Ok(Some(ChangelogExcerpt { file, excerpt }))
}
