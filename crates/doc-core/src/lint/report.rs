//! Running the registry over a corpus and summarizing the result

use std::collections::BTreeMap;
use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use super::registry::RuleRegistry;
use super::rule::RuleContext;
use super::{Issue, READ_ERROR_RULE, Severity};
use crate::document::{Corpus, Document};
use crate::parity::ParityVerdict;

/// Issue counts by severity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityTotals {
    pub errors: usize,
    pub warnings: usize,
    pub infos: usize,
}

impl SeverityTotals {
    pub fn add(&mut self, severity: Severity) {
        match severity {
            Severity::Error => self.errors += 1,
            Severity::Warning => self.warnings += 1,
            Severity::Info => self.infos += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.errors + self.warnings + self.infos
    }
}

/// Issues of one lint pass, grouped by file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LintReport {
    /// Files with at least one issue
    pub files: BTreeMap<String, Vec<Issue>>,
    pub totals: SeverityTotals,
    /// Number of documents the rules ran over
    pub documents_checked: usize,
}

impl LintReport {
    pub fn push(&mut self, issue: Issue) {
        self.totals.add(issue.severity);
        self.files.entry(issue.file.clone()).or_default().push(issue);
    }

    /// Every issue, files in name order, issues in rule then document order.
    pub fn issues(&self) -> impl Iterator<Item = &Issue> {
        self.files.values().flatten()
    }

    pub fn issues_for(&self, file: &str) -> &[Issue] {
        self.files.get(file).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn error_count_for(&self, file: &str) -> usize {
        self.issues_for(file)
            .iter()
            .filter(|i| i.severity == Severity::Error)
            .count()
    }

    pub fn has_errors(&self) -> bool {
        self.totals.errors > 0
    }

    pub fn is_clean(&self) -> bool {
        self.totals.total() == 0
    }
}

/// Runs a registry with a fixed context
pub struct Linter<'a> {
    registry: &'a RuleRegistry,
    ctx: RuleContext<'a>,
}

impl<'a> Linter<'a> {
    pub fn new(registry: &'a RuleRegistry, ctx: RuleContext<'a>) -> Self {
        Self { registry, ctx }
    }

    pub fn lint_document(&self, doc: &Document) -> Vec<Issue> {
        self.registry.lint_text(&self.ctx, &doc.text, &doc.name)
    }

    /// Lint every readable document; unreadable ones become `read-error` issues.
    pub fn lint_corpus(&self, corpus: &Corpus) -> LintReport {
        let mut report = LintReport::default();

        for doc in corpus.documents() {
            for issue in self.lint_document(doc) {
                report.push(issue);
            }
            report.documents_checked += 1;
        }

        for skipped in corpus.skipped() {
            report.push(Issue {
                rule: READ_ERROR_RULE.to_string(),
                severity: Severity::Warning,
                line: 1,
                message: format!("Could not read document: {}", skipped.reason),
                file: skipped.name.clone(),
            });
        }

        tracing::info!(
            documents = report.documents_checked,
            errors = report.totals.errors,
            warnings = report.totals.warnings,
            infos = report.totals.infos,
            "Lint pass complete"
        );
        report
    }
}

/// Actionable issues (warnings and errors), errors first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LintDigest {
    entries: Vec<Issue>,
}

impl LintDigest {
    pub fn from_report(report: &LintReport) -> Self {
        let mut entries: Vec<Issue> = report
            .issues()
            .filter(|i| i.is_actionable())
            .cloned()
            .collect();
        // Stable: within one file, issues keep rule registration order
        entries.sort_by(|a, b| b.severity.cmp(&a.severity).then_with(|| a.file.cmp(&b.file)));
        Self { entries }
    }

    pub fn entries(&self) -> &[Issue] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The top `limit` entries.
    pub fn preview(&self, limit: usize) -> &[Issue] {
        &self.entries[..limit.min(self.entries.len())]
    }

    /// Entries beyond the preview.
    pub fn remaining(&self, limit: usize) -> usize {
        self.entries.len().saturating_sub(limit)
    }

    /// Render `LINT_WARNINGS.md`, optionally with a parity snapshot section.
    pub fn render_markdown(&self, parity: Option<&ParityVerdict>) -> String {
        let mut out = String::from("# Documentation Lint Warnings\n\n");

        if self.entries.is_empty() {
            out.push_str("No warnings or errors found.\n");
        } else {
            let _ = writeln!(out, "Found {} issues that need attention.\n", self.entries.len());
            for issue in &self.entries {
                let _ = writeln!(
                    out,
                    "- [{}] **{}** (Line {}): {} [{}]",
                    issue.severity, issue.file, issue.line, issue.message, issue.rule
                );
            }
        }

        if let Some(verdict) = parity {
            let _ = writeln!(out, "\n## Parity Snapshot\n\nStatus: {}\n", verdict.status_label());
            let lines = verdict.issue_lines();
            if lines.is_empty() {
                out.push_str("All human mirrors are in sync.\n");
            } else {
                for line in lines {
                    let _ = writeln!(out, "- {}", line);
                }
            }
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issue(file: &str, line: usize, severity: Severity) -> Issue {
        Issue {
            rule: "r".to_string(),
            severity,
            line,
            message: "m".to_string(),
            file: file.to_string(),
        }
    }

    fn report(issues: Vec<Issue>) -> LintReport {
        let mut report = LintReport::default();
        for i in issues {
            report.push(i);
        }
        report
    }

    #[test]
    fn totals_track_severity() {
        let report = report(vec![
            issue("a.md", 1, Severity::Error),
            issue("a.md", 2, Severity::Info),
            issue("b.md", 1, Severity::Warning),
        ]);
        assert_eq!(report.totals.total(), 3);
        assert_eq!(report.error_count_for("a.md"), 1);
        assert_eq!(report.error_count_for("b.md"), 0);
        assert!(report.has_errors());
    }

    #[test]
    fn digest_orders_errors_first_then_file_keeping_rule_order() {
        let report = report(vec![
            issue("b.md", 1, Severity::Warning),
            issue("a.md", 9, Severity::Warning),
            issue("c.md", 5, Severity::Error),
            issue("a.md", 2, Severity::Info),
            issue("a.md", 3, Severity::Warning),
        ]);
        let digest = LintDigest::from_report(&report);

        let order: Vec<_> = digest
            .entries()
            .iter()
            .map(|i| (i.file.as_str(), i.line))
            .collect();
        assert_eq!(order, vec![("c.md", 5), ("a.md", 9), ("a.md", 3), ("b.md", 1)]);
        assert_eq!(digest.preview(2).len(), 2);
        assert_eq!(digest.remaining(2), 2);
        assert_eq!(digest.preview(10).len(), 4);
    }

    #[test]
    fn empty_digest_renders_clean_message() {
        let digest = LintDigest::from_report(&LintReport::default());
        assert_eq!(
            digest.render_markdown(None),
            "# Documentation Lint Warnings\n\nNo warnings or errors found.\n"
        );
    }
}
