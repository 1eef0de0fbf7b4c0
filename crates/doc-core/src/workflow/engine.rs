//! The engine behind every workflow
//!
//! `DocEngine` owns the resolved configuration, the layout and the rule
//! registry. Each operation reads the filesystem fresh; artifacts are
//! regenerated wholesale.

use std::path::Path;

use chrono::{DateTime, Utc};
use doc_fs::{DocLayout, DocPath, NormalizedPath, io};
use serde::Serialize;

use super::Workflow;
use super::state::{Outcome, PhaseTracker, SyncPhase};
use crate::artifact::{read_json, write_json};
use crate::collab::{ChangeSource, Translator};
use crate::config::{ConfigResolver, DocConfig};
use crate::document::{Corpus, ReferencePattern};
use crate::graph::{DependencyGraph, GraphBuilder};
use crate::health::{self, HealthInputs, HealthSnapshot};
use crate::lint::{LintDigest, LintReport, Linter, RuleContext, RuleRegistry};
use crate::mirror::{MirrorSummary, MirrorWriter};
use crate::parity::{ParityOptions, ParityVerdict, ParityVerifier};
use crate::pointers::{PointerArtifact, PointerGenerator};
use crate::resolver::ExistenceResolver;
use crate::summary::SummaryReport;
use crate::{Error, Result, changelog, metadata};

/// Collaborators and switches for one workflow run
pub struct RunContext<'a> {
    pub changes: &'a dyn ChangeSource,
    pub translator: &'a dyn Translator,
    /// Defer the parity check (fast iteration paths)
    pub skip_parity: bool,
    pub now: DateTime<Utc>,
}

/// Everything a workflow run produced
#[derive(Debug, Clone, Serialize)]
pub struct WorkflowReport {
    pub workflow: Workflow,
    /// Human-readable log of what was done
    pub actions: Vec<String>,
    pub phases: Vec<SyncPhase>,
    pub lint: Option<LintReport>,
    pub parity: Option<ParityVerdict>,
    pub health: Option<HealthSnapshot>,
    pub mirrors: Option<MirrorSummary>,
    pub outcome: Outcome,
}

impl WorkflowReport {
    fn new(workflow: Workflow) -> Self {
        Self {
            workflow,
            actions: Vec::new(),
            phases: Vec::new(),
            lint: None,
            parity: None,
            health: None,
            mirrors: None,
            outcome: Outcome::Pass,
        }
    }
}

/// Documentation consistency engine for one project
pub struct DocEngine {
    layout: DocLayout,
    config: DocConfig,
    registry: RuleRegistry,
    resolver: ExistenceResolver,
    references: ReferencePattern,
}

impl DocEngine {
    /// Engine for `root` with an already resolved configuration.
    ///
    /// # Errors
    ///
    /// [`Error::MachineTrackMissing`] when the machine track does not exist,
    /// or a regex error when the configured reference extensions are invalid.
    pub fn new(root: impl AsRef<Path>, config: DocConfig) -> Result<Self> {
        let layout = DocLayout::new(root, &config.layout);
        if layout.validate().is_err() {
            return Err(Error::MachineTrackMissing {
                path: layout.machine_dir().to_path_buf(),
            });
        }

        let mut registry = RuleRegistry::with_builtins();
        registry.disable_all(&config.lint.disabled_rules);

        Ok(Self {
            resolver: ExistenceResolver::from_layout(&layout),
            references: ReferencePattern::new(&config.lint.reference_extensions)?,
            registry,
            layout,
            config,
        })
    }

    /// Resolve the layered configuration of `root` and open an engine.
    pub fn open(root: impl AsRef<Path>) -> Result<Self> {
        let config = ConfigResolver::new(root.as_ref()).resolve()?;
        Self::new(root, config)
    }

    pub fn layout(&self) -> &DocLayout {
        &self.layout
    }

    pub fn config(&self) -> &DocConfig {
        &self.config
    }

    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    /// Mutable access for registering project-specific rules.
    pub fn registry_mut(&mut self) -> &mut RuleRegistry {
        &mut self.registry
    }

    pub fn load_corpus(&self) -> Result<Corpus> {
        Corpus::load(&self.layout)
    }

    pub fn build_graph(&self) -> DependencyGraph {
        GraphBuilder::new(self.layout.root(), self.config.graph.clone()).build()
    }

    pub fn generate_pointers(&self, corpus: &Corpus, now: DateTime<Utc>) -> PointerArtifact {
        PointerGenerator::new(self.references.clone(), &self.config.pointers).generate(corpus, now)
    }

    fn rule_context(&self) -> RuleContext<'_> {
        RuleContext {
            resolver: &self.resolver,
            machine_root: self.layout.machine_dir(),
            max_line_length: self.config.lint.max_line_length,
            references: &self.references,
        }
    }

    pub fn lint(&self, corpus: &Corpus) -> LintReport {
        Linter::new(&self.registry, self.rule_context()).lint_corpus(corpus)
    }

    pub fn parity_options(&self) -> ParityOptions {
        ParityOptions::from_settings(&self.config.parity)
    }

    pub fn verify_parity(&self, corpus: &Corpus, skip: bool) -> ParityVerdict {
        ParityVerifier::new(&self.layout, self.parity_options().skipped(skip)).verify(corpus)
    }

    pub fn read_pointers(&self) -> Result<Option<PointerArtifact>> {
        read_json(&self.layout.artifact(DocPath::PointersArtifact))
    }

    pub fn read_graph(&self) -> Result<Option<DependencyGraph>> {
        read_json(&self.layout.artifact(DocPath::GraphArtifact))
    }

    pub fn read_snapshot(&self) -> Result<Option<HealthSnapshot>> {
        read_json(&self.layout.artifact(DocPath::StateArtifact))
    }

    pub fn write_pointers(&self, pointers: &PointerArtifact) -> Result<NormalizedPath> {
        let path = self.layout.artifact(DocPath::PointersArtifact);
        write_json(&path, pointers)?;
        Ok(path)
    }

    pub fn write_graph(&self, graph: &DependencyGraph) -> Result<NormalizedPath> {
        let path = self.layout.artifact(DocPath::GraphArtifact);
        write_json(&path, graph)?;
        Ok(path)
    }

    pub fn write_snapshot(&self, snapshot: &HealthSnapshot) -> Result<NormalizedPath> {
        let path = self.layout.artifact(DocPath::StateArtifact);
        write_json(&path, snapshot)?;
        Ok(path)
    }

    /// Write `LINT_WARNINGS.md` with the parity snapshot appended.
    pub fn write_digest(
        &self,
        digest: &LintDigest,
        parity: Option<&ParityVerdict>,
    ) -> Result<NormalizedPath> {
        let path = self.layout.artifact(DocPath::LintDigest);
        io::write_text(&path, &digest.render_markdown(parity))?;
        Ok(path)
    }

    /// Persisted pointers if usable, otherwise freshly generated ones.
    pub fn current_pointers(&self, corpus: &Corpus, now: DateTime<Utc>) -> PointerArtifact {
        match self.read_pointers() {
            Ok(Some(pointers)) => pointers,
            Ok(None) => self.generate_pointers(corpus, now),
            Err(e) => {
                tracing::warn!(error = %e, "Regenerating unusable pointer artifact");
                self.generate_pointers(corpus, now)
            }
        }
    }

    /// Edge count of the persisted graph if usable, otherwise of a fresh one.
    pub fn current_relationships(&self) -> usize {
        match self.read_graph() {
            Ok(Some(graph)) => graph.edge_count(),
            Ok(None) => self.build_graph().edge_count(),
            Err(e) => {
                tracing::warn!(error = %e, "Rebuilding unusable graph artifact");
                self.build_graph().edge_count()
            }
        }
    }

    /// Health snapshot from the current state of the project.
    pub fn analyze(&self, now: DateTime<Utc>) -> Result<HealthSnapshot> {
        let corpus = self.load_corpus()?;
        let pointers = self.current_pointers(&corpus, now);
        let lint = self.lint(&corpus);
        let parity = self.verify_parity(&corpus, false);

        Ok(health::score(
            HealthInputs {
                corpus: &corpus,
                pointers: &pointers,
                lint: &lint,
                relationships: self.current_relationships(),
                parity: Some(&parity),
            },
            now,
        ))
    }

    /// [`analyze`](Self::analyze) and persist the snapshot as `DOC_STATE.json`.
    pub fn analyze_and_persist(&self, now: DateTime<Utc>) -> Result<HealthSnapshot> {
        let snapshot = self.analyze(now)?;
        self.write_snapshot(&snapshot)?;
        Ok(snapshot)
    }

    /// Run a named workflow.
    pub fn run(&self, workflow: Workflow, ctx: &RunContext<'_>) -> Result<WorkflowReport> {
        tracing::info!(workflow = %workflow, "Running workflow");
        let mut report = WorkflowReport::new(workflow);

        match workflow {
            Workflow::Sync => self.run_full_sync(ctx, &mut report)?,
            Workflow::Quick => self.run_quick_sync(ctx, &mut report)?,
            Workflow::Validate => self.run_validation(ctx, &mut report)?,
            Workflow::Summary => {
                let path = SummaryReport::gather(&self.layout)?.write(&self.layout, ctx.now)?;
                report.actions.push(format!("Wrote summary report to {}", path));
            }
            Workflow::Exit => report.actions.push("No action taken".to_string()),
        }

        Ok(report)
    }

    fn run_full_sync(&self, ctx: &RunContext<'_>, report: &mut WorkflowReport) -> Result<()> {
        let mut tracker = PhaseTracker::new();

        tracker.advance(SyncPhase::ChangeDetection)?;
        self.stamp_changes(ctx, report)?;
        if let Some(path) = changelog::append_entry(&self.layout, ctx.changes, ctx.now)? {
            report.actions.push(format!("Appended changelog entry to {}", path));
        }

        let corpus = self.load_corpus()?;
        let pointers = self.refresh_artifacts(&corpus, ctx.now, report)?;
        let mirrors = MirrorWriter::new(&self.layout, ctx.translator).sync(&corpus)?;
        report
            .actions
            .push(format!("Wrote {} human mirror(s)", mirrors.written.len()));
        report.mirrors = Some(mirrors);

        self.evaluate(&corpus, &pointers, ctx.skip_parity, ctx.now, &mut tracker, report)
    }

    fn run_quick_sync(&self, ctx: &RunContext<'_>, report: &mut WorkflowReport) -> Result<()> {
        let mut tracker = PhaseTracker::new();

        tracker.advance(SyncPhase::ChangeDetection)?;
        self.stamp_changes(ctx, report)?;

        let corpus = self.load_corpus()?;
        let pointers = self.current_pointers(&corpus, ctx.now);
        // Mirrors first, so the persisted snapshot and digest see them
        let mirrors = MirrorWriter::new(&self.layout, ctx.translator).sync(&corpus)?;
        report
            .actions
            .push(format!("Wrote {} human mirror(s)", mirrors.written.len()));
        report.mirrors = Some(mirrors);

        self.evaluate(&corpus, &pointers, true, ctx.now, &mut tracker, report)
    }

    fn run_validation(&self, ctx: &RunContext<'_>, report: &mut WorkflowReport) -> Result<()> {
        let mut tracker = PhaseTracker::new();

        tracker.advance(SyncPhase::ChangeDetection)?;
        let changed = ctx.changes.changed_documents()?;
        report
            .actions
            .push(format!("{} changed file(s) reported", changed.len()));

        let corpus = self.load_corpus()?;
        let pointers = self.refresh_artifacts(&corpus, ctx.now, report)?;
        self.evaluate(&corpus, &pointers, ctx.skip_parity, ctx.now, &mut tracker, report)
    }

    fn stamp_changes(&self, ctx: &RunContext<'_>, report: &mut WorkflowReport) -> Result<()> {
        let stamped = metadata::update_timestamps(&self.layout, ctx.changes, ctx.now.date_naive())?;
        report
            .actions
            .push(format!("Updated timestamps in {} document(s)", stamped.len()));
        Ok(())
    }

    /// Regenerate and persist the pointer and graph artifacts.
    fn refresh_artifacts(
        &self,
        corpus: &Corpus,
        now: DateTime<Utc>,
        report: &mut WorkflowReport,
    ) -> Result<PointerArtifact> {
        let pointers = self.generate_pointers(corpus, now);
        self.write_pointers(&pointers)?;
        report
            .actions
            .push(format!("Generated {} code pointer(s)", pointers.total_entries));

        let graph = self.build_graph();
        self.write_graph(&graph)?;
        report
            .actions
            .push(format!("Mapped {} dependencies", graph.edge_count()));

        Ok(pointers)
    }

    /// Rule evaluation, scoring and the parity gate.
    fn evaluate(
        &self,
        corpus: &Corpus,
        pointers: &PointerArtifact,
        skip_parity: bool,
        now: DateTime<Utc>,
        tracker: &mut PhaseTracker,
        report: &mut WorkflowReport,
    ) -> Result<()> {
        tracker.advance(SyncPhase::RuleEvaluation)?;
        let lint = self.lint(corpus);
        let parity = self.verify_parity(corpus, skip_parity);
        let digest = LintDigest::from_report(&lint);
        self.write_digest(&digest, Some(&parity))?;
        report
            .actions
            .push(format!("Lint digest lists {} issue(s)", digest.len()));

        tracker.advance(SyncPhase::Scoring)?;
        let snapshot = health::score(
            HealthInputs {
                corpus,
                pointers,
                lint: &lint,
                relationships: self.current_relationships(),
                parity: Some(&parity),
            },
            now,
        );
        self.write_snapshot(&snapshot)?;

        tracker.advance(SyncPhase::ParityCheck)?;
        let outcome = Outcome::evaluate(&lint, &parity);
        let next = if outcome == Outcome::Pass {
            SyncPhase::Idle
        } else {
            SyncPhase::SurfacedError
        };
        tracker.advance(next)?;

        report.phases = tracker.history().to_vec();
        report.outcome = outcome;
        report.lint = Some(lint);
        report.parity = Some(parity);
        report.health = Some(snapshot);
        Ok(())
    }
}
