//! Rule-based documentation lint
//!
//! A [`RuleRegistry`] holds independent [`LintRule`]s; a [`Linter`] runs the
//! registry over a corpus and aggregates the issues into a [`LintReport`].
//! [`LintDigest`] renders the actionable subset as `LINT_WARNINGS.md`.

pub mod builtins;
mod registry;
mod report;
mod rule;

pub use registry::RuleRegistry;
pub use report::{LintDigest, LintReport, Linter, SeverityTotals};
pub use rule::{FnRule, LintRule, RuleContext};

use serde::{Deserialize, Serialize};

/// Rule id used for documents that could not be read
pub const READ_ERROR_RULE: &str = "read-error";

/// Issue severity; only errors fail a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// What a rule reports, before the registry stamps it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub severity: Severity,
    /// 1-based line number
    pub line: usize,
    pub message: String,
}

/// A classified problem in one document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub rule: String,
    pub severity: Severity,
    pub line: usize,
    pub message: String,
    pub file: String,
}

impl Issue {
    pub fn from_finding(rule: &str, file: &str, finding: Finding) -> Self {
        Self {
            rule: rule.to_string(),
            severity: finding.severity,
            line: finding.line,
            message: finding.message,
            file: file.to_string(),
        }
    }

    /// True for warnings and errors, the issues listed in the digest.
    pub fn is_actionable(&self) -> bool {
        self.severity >= Severity::Warning
    }
}
