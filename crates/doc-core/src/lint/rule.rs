//! The lint rule contract

use std::path::Path;

use super::{Finding, Severity};
use crate::document::ReferencePattern;
use crate::resolver::ExistenceResolver;

/// Read-only inputs shared by every rule during one pass
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    /// Resolves symbolic file references
    pub resolver: &'a ExistenceResolver,
    /// Machine-track directory; internal links resolve against it
    pub machine_root: &'a Path,
    /// Maximum line length in characters
    pub max_line_length: usize,
    /// Matcher for inline file references
    pub references: &'a ReferencePattern,
}

/// A pure check over one document's text.
///
/// Rules must not keep state between calls; the registry stamps each
/// finding with the rule's id.
pub trait LintRule: Send + Sync {
    /// Stable identifier, e.g. `heading-structure`
    fn id(&self) -> &str;

    /// One-line description for listings
    fn description(&self) -> &str;

    /// Findings for `text`, in document order.
    fn check(&self, ctx: &RuleContext<'_>, text: &str, file: &str) -> Vec<Finding>;
}

type CheckFn = dyn Fn(&RuleContext<'_>, &str, &str) -> Vec<Finding> + Send + Sync;

/// A rule built from a closure
pub struct FnRule {
    id: String,
    description: String,
    check: Box<CheckFn>,
}

impl FnRule {
    pub fn new<F>(id: impl Into<String>, description: impl Into<String>, check: F) -> Self
    where
        F: Fn(&RuleContext<'_>, &str, &str) -> Vec<Finding> + Send + Sync + 'static,
    {
        Self {
            id: id.into(),
            description: description.into(),
            check: Box::new(check),
        }
    }
}

impl std::fmt::Debug for FnRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnRule").field("id", &self.id).finish()
    }
}

impl LintRule for FnRule {
    fn id(&self) -> &str {
        &self.id
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn check(&self, ctx: &RuleContext<'_>, text: &str, file: &str) -> Vec<Finding> {
        (self.check)(ctx, text, file)
    }
}

impl Finding {
    pub fn new(severity: Severity, line: usize, message: impl Into<String>) -> Self {
        Self {
            severity,
            line,
            message: message.into(),
        }
    }

    pub fn error(line: usize, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, line, message)
    }

    pub fn warning(line: usize, message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, line, message)
    }

    pub fn info(line: usize, message: impl Into<String>) -> Self {
        Self::new(Severity::Info, line, message)
    }
}
