//! Workflow runs end to end

use chrono::{DateTime, Utc};
use doc_core::workflow::SyncPhase;
use doc_core::{
    DocEngine, HeaderTranslator, Outcome, RunContext, StaticChanges, Workflow, WorkflowReport,
};
use doc_test_utils::TestCorpus;
use pretty_assertions::assert_eq;
use rstest::rstest;

const ARTIFACTS: [&str; 3] = [
    "context_for_llms/CODE_POINTERS.json",
    "context_for_llms/RELATIONSHIPS.json",
    "context_for_llms/DOC_STATE.json",
];

fn project() -> TestCorpus {
    let mut fixture = TestCorpus::new();
    fixture.install();
    fixture.machine_doc("INDEX.md", "# Index\n\n- [API](api.md)\n");
    fixture.machine_doc("api.md", "# API\n\nEntry point is `src/app.js`.\n");
    fixture.source_file("src/app.js", "import { util } from './util';\n");
    fixture.source_file("src/util.js", "export const util = 1;\n");
    fixture
}

fn run(
    fixture: &TestCorpus,
    workflow: Workflow,
    changes: &StaticChanges,
    now: DateTime<Utc>,
) -> WorkflowReport {
    let engine = DocEngine::open(fixture.root()).unwrap();
    let translator = HeaderTranslator::at(now);
    let ctx = RunContext {
        changes,
        translator: &translator,
        skip_parity: false,
        now,
    };
    engine.run(workflow, &ctx).unwrap()
}

#[test]
fn full_sync_writes_artifacts_and_mirrors() {
    let fixture = project();
    let changes = StaticChanges::new(["context_for_llms/api.md", "src/app.js"]);

    let report = run(&fixture, Workflow::Sync, &changes, Utc::now());

    for artifact in ARTIFACTS {
        fixture.assert_file_exists(artifact);
    }
    fixture.assert_file_exists("context_for_llms/LINT_WARNINGS.md");
    fixture.assert_file_contains("context_for_humans/api.md", "# [Human Readable] api");
    fixture.assert_file_not_exists("context_for_humans/INDEX.md");
    fixture.assert_file_contains("context_for_llms/api.md", "Last Updated: ");
    fixture.assert_file_contains("context_for_llms/RELATIONSHIPS.json", "src/util.js");

    assert_eq!(report.outcome, Outcome::Pass);
    assert_eq!(
        report.phases,
        vec![
            SyncPhase::Idle,
            SyncPhase::ChangeDetection,
            SyncPhase::RuleEvaluation,
            SyncPhase::Scoring,
            SyncPhase::ParityCheck,
            SyncPhase::Idle,
        ]
    );
    let health = report.health.unwrap();
    assert_eq!(health.metrics.stale_docs, 0);
    assert_eq!(health.metrics.coverage_percentage, 100);
}

#[test]
fn full_sync_appends_changelog_for_documentation_changes_only() {
    let fixture = project();
    let changes = StaticChanges::new(["context_for_llms/api.md", "src/app.js"]);
    let now = Utc::now();

    run(&fixture, Workflow::Sync, &changes, now);

    let changelog = fixture.read(&format!("changelog/docs-{}.md", now.format("%Y-%m-%d")));
    assert!(changelog.contains("- `context_for_llms/api.md`"));
    assert!(!changelog.contains("src/app.js"));
}

#[test]
fn repeated_sync_produces_identical_artifacts() {
    let fixture = project();
    let changes = StaticChanges::new(["context_for_llms/api.md"]);
    let now = Utc::now();

    run(&fixture, Workflow::Sync, &changes, now);
    let first: Vec<String> = ARTIFACTS.iter().map(|a| fixture.read(a)).collect();
    let first_digest = fixture.read("context_for_llms/LINT_WARNINGS.md");

    let second_report = run(&fixture, Workflow::Sync, &changes, now);
    let second: Vec<String> = ARTIFACTS.iter().map(|a| fixture.read(a)).collect();

    assert_eq!(first, second);
    assert_eq!(first_digest, fixture.read("context_for_llms/LINT_WARNINGS.md"));
    assert!(second_report.mirrors.unwrap().written.is_empty());
}

#[test]
fn quick_sync_writes_mirrors_before_persisting_health() {
    let fixture = project();

    let report = run(&fixture, Workflow::Quick, &StaticChanges::none(), Utc::now());

    assert_eq!(report.outcome, Outcome::Pass);
    let parity = report.parity.as_ref().unwrap();
    assert_eq!(parity.status_label(), "skipped");
    assert_eq!(parity.failures().count(), 0);
    assert_eq!(report.mirrors.unwrap().written, vec!["api.md".to_string()]);
    fixture.assert_file_exists("context_for_humans/api.md");
    fixture.assert_file_contains("context_for_llms/LINT_WARNINGS.md", "Status: skipped");

    let state = fixture.read("context_for_llms/DOC_STATE.json");
    assert!(!state.contains("human mirror missing"));
    let health = report.health.unwrap();
    assert!(health.priorities.iter().all(|p| !p.reason.contains("mirror")));
}

#[test]
fn validation_fails_on_missing_mirror_without_touching_documents() {
    let fixture = project();
    let before = fixture.read("context_for_llms/api.md");

    let report = run(
        &fixture,
        Workflow::Validate,
        &StaticChanges::new(["context_for_llms/api.md"]),
        Utc::now(),
    );

    assert_eq!(report.outcome, Outcome::Fatal);
    assert_eq!(report.outcome.exit_code(), 1);
    assert_eq!(report.phases.last(), Some(&SyncPhase::SurfacedError));
    assert!(report.mirrors.is_none());
    assert_eq!(fixture.read("context_for_llms/api.md"), before);
    fixture.assert_file_not_exists("context_for_humans/api.md");
    fixture.assert_file_contains(
        "context_for_llms/LINT_WARNINGS.md",
        "Missing human documentation for: api.md",
    );
}

#[test]
fn lint_errors_make_a_run_fatal() {
    let fixture = project();
    fixture.machine_doc("broken.md", "# Broken\n[nowhere](nowhere.md)\n");

    let report = run(&fixture, Workflow::Sync, &StaticChanges::none(), Utc::now());

    assert_eq!(report.outcome, Outcome::Fatal);
    assert!(report.lint.unwrap().has_errors());
    assert!(report.parity.unwrap().passed());
}

#[test]
fn summary_workflow_writes_report() {
    let fixture = project();
    fixture.human_doc("api.md", "mirror");

    let report = run(&fixture, Workflow::Summary, &StaticChanges::none(), Utc::now());

    assert_eq!(report.actions.len(), 1);
    fixture.assert_file_contains("reports/ultra-doc-summary.md", "# Ultra-Doc Summary Report");
}

#[rstest]
#[case(Workflow::Exit)]
#[case(Workflow::Summary)]
fn non_sync_workflows_leave_documents_alone(#[case] workflow: Workflow) {
    let fixture = project();
    let before = fixture.read("context_for_llms/api.md");

    let report = run(
        &fixture,
        workflow,
        &StaticChanges::new(["context_for_llms/api.md"]),
        Utc::now(),
    );

    assert_eq!(report.outcome, Outcome::Pass);
    assert_eq!(fixture.read("context_for_llms/api.md"), before);
    fixture.assert_file_not_exists("context_for_llms/CODE_POINTERS.json");
}

#[test]
fn opening_without_machine_track_fails() {
    let fixture = TestCorpus::new();
    let err = DocEngine::open(fixture.root()).err().unwrap();
    assert!(matches!(err, doc_core::Error::MachineTrackMissing { .. }));
}
