//! Rule registry
//!
//! An ordered, open set of rules keyed by id. Rules run in registration
//! order; replacing a rule keeps its position.

use super::builtins;
use super::rule::{FnRule, LintRule, RuleContext};
use super::{Finding, Issue};

/// Ordered collection of lint rules
#[derive(Default)]
pub struct RuleRegistry {
    rules: Vec<Box<dyn LintRule>>,
}

impl RuleRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every built-in rule.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for rule in builtins::all() {
            registry.register(rule);
        }
        registry
    }

    /// Add a rule, replacing any rule with the same id in place.
    pub fn register(&mut self, rule: Box<dyn LintRule>) {
        match self.rules.iter().position(|r| r.id() == rule.id()) {
            Some(pos) => self.rules[pos] = rule,
            None => self.rules.push(rule),
        }
    }

    /// Add a closure-based rule.
    pub fn register_fn<F>(&mut self, id: &str, description: &str, check: F)
    where
        F: Fn(&RuleContext<'_>, &str, &str) -> Vec<Finding> + Send + Sync + 'static,
    {
        self.register(Box::new(FnRule::new(id, description, check)));
    }

    /// Remove a rule by id.
    pub fn remove(&mut self, id: &str) -> Option<Box<dyn LintRule>> {
        let pos = self.rules.iter().position(|r| r.id() == id)?;
        Some(self.rules.remove(pos))
    }

    /// Remove every listed rule; unknown ids are logged and ignored.
    pub fn disable_all(&mut self, ids: &[String]) {
        for id in ids {
            if self.remove(id).is_none() {
                tracing::warn!(rule = %id, "Cannot disable unknown lint rule");
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<&dyn LintRule> {
        self.rules.iter().find(|r| r.id() == id).map(|r| r.as_ref())
    }

    /// Rule ids in registration order.
    pub fn ids(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.id()).collect()
    }

    /// `(id, description)` pairs in registration order.
    pub fn describe(&self) -> Vec<(&str, &str)> {
        self.rules.iter().map(|r| (r.id(), r.description())).collect()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Run every rule over one document, stamping findings with rule id and file.
    pub fn lint_text(&self, ctx: &RuleContext<'_>, text: &str, file: &str) -> Vec<Issue> {
        self.rules
            .iter()
            .flat_map(|rule| {
                rule.check(ctx, text, file)
                    .into_iter()
                    .map(move |finding| Issue::from_finding(rule.id(), file, finding))
            })
            .collect()
    }
}

impl std::fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.ids()).finish()
    }
}
