//! Rule engine over a real project layout

use doc_core::lint::{Finding, LintDigest, Severity};
use doc_core::{DocEngine, Issue};
use doc_test_utils::TestCorpus;
use pretty_assertions::assert_eq;

fn guide_and_broken() -> TestCorpus {
    let mut fixture = TestCorpus::new();
    fixture.install();
    fixture.machine_doc(
        "guide.md",
        "# Guide\n\n## Setup\nRun `scripts/setup.mjs`.\n\n## Setup\nAgain.\n",
    );
    fixture.machine_doc("broken.md", "# Broken\nSee [other](missing.md).\n\n#\n");
    fixture.source_file("scripts/setup.mjs", "export default {};\n");
    fixture
}

fn summary(issues: &[Issue]) -> Vec<(&str, usize, &str)> {
    issues
        .iter()
        .map(|i| (i.rule.as_str(), i.line, i.message.as_str()))
        .collect()
}

#[test]
fn duplicate_setup_heading_is_reported_once() {
    let fixture = guide_and_broken();
    let engine = DocEngine::open(fixture.root()).unwrap();
    let report = engine.lint(&engine.load_corpus().unwrap());

    assert_eq!(
        summary(report.issues_for("guide.md")),
        vec![(
            "duplicate-headings",
            6,
            "Duplicate heading: \"Setup\" (first seen at line 3)"
        )]
    );
    assert_eq!(report.error_count_for("guide.md"), 0);
}

#[test]
fn errors_are_attributed_to_their_document() {
    let fixture = guide_and_broken();
    let engine = DocEngine::open(fixture.root()).unwrap();
    let report = engine.lint(&engine.load_corpus().unwrap());

    assert_eq!(report.error_count_for("broken.md"), 2);
    assert_eq!(report.totals.errors, 2);
    assert_eq!(report.totals.warnings, 1);
    assert_eq!(report.documents_checked, 2);
    assert!(report.has_errors());
}

#[test]
fn digest_lists_errors_first_with_parity_snapshot() {
    let fixture = guide_and_broken();
    let engine = DocEngine::open(fixture.root()).unwrap();
    let corpus = engine.load_corpus().unwrap();
    let report = engine.lint(&corpus);
    let parity = engine.verify_parity(&corpus, false);

    let rendered = LintDigest::from_report(&report).render_markdown(Some(&parity));

    insta::assert_snapshot!(rendered, @r#"
    # Documentation Lint Warnings

    Found 3 issues that need attention.

    - [error] **broken.md** (Line 2): Broken internal link: missing.md [broken-internal-links]
    - [error] **broken.md** (Line 4): Empty heading found [empty-headings]
    - [warning] **guide.md** (Line 6): Duplicate heading: "Setup" (first seen at line 3) [duplicate-headings]

    ## Parity Snapshot

    Status: failed

    - Human track directory missing
    - Missing human documentation for: broken.md
    - Missing human documentation for: guide.md
    "#);
}

#[test]
fn dangling_reference_is_a_warning() {
    let mut fixture = TestCorpus::new();
    fixture.install();
    fixture.machine_doc("a.md", "# A\nSee `missing.js` and `missing.js` again.\n");

    let engine = DocEngine::open(fixture.root()).unwrap();
    let report = engine.lint(&engine.load_corpus().unwrap());
    let issues = report.issues_for("a.md");

    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].severity, Severity::Warning);
    assert_eq!(issues[0].message, "Dangling file reference: missing.js");
}

#[test]
fn placeholder_references_are_not_dangling() {
    let mut fixture = TestCorpus::new();
    fixture.install();
    fixture.machine_doc(
        "a.md",
        "# A\nLogs go to `changelog/docs-YYYY-MM-DD.md` and `src/*.js`.\n",
    );

    let engine = DocEngine::open(fixture.root()).unwrap();
    let report = engine.lint(&engine.load_corpus().unwrap());

    assert!(report.issues_for("a.md").is_empty());
}

#[test]
fn project_rules_join_the_registry() {
    let mut fixture = TestCorpus::new();
    fixture.install();
    fixture.machine_doc("a.md", "# A\nTODO: write this\n");

    let mut engine = DocEngine::open(fixture.root()).unwrap();
    engine
        .registry_mut()
        .register_fn("no-todo", "Documents should not contain TODO markers", |_, text, _| {
            text.lines()
                .enumerate()
                .filter(|(_, line)| line.contains("TODO"))
                .map(|(idx, _)| Finding::error(idx + 1, "TODO marker"))
                .collect()
        });
    let report = engine.lint(&engine.load_corpus().unwrap());

    assert_eq!(summary(report.issues_for("a.md")), vec![("no-todo", 2, "TODO marker")]);
}

#[test]
fn configured_rules_can_be_disabled() {
    let mut fixture = TestCorpus::new();
    fixture.install_with_config(
        "version = \"0.1.0\"\n\n[lint]\ndisabled_rules = [\"duplicate-headings\"]\n",
    );
    fixture.machine_doc("a.md", "# A\n## B\n## B\n");

    let engine = DocEngine::open(fixture.root()).unwrap();
    assert!(engine.registry().get("duplicate-headings").is_none());

    let report = engine.lint(&engine.load_corpus().unwrap());
    assert!(report.is_clean());
}

#[test]
fn unreadable_document_becomes_read_error() {
    let mut fixture = TestCorpus::new();
    fixture.install();
    std::fs::write(fixture.path("context_for_llms/bad.md"), [0xc3, 0x28]).unwrap();

    let engine = DocEngine::open(fixture.root()).unwrap();
    let report = engine.lint(&engine.load_corpus().unwrap());
    let issues = report.issues_for("bad.md");

    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].rule, "read-error");
    assert_eq!(issues[0].line, 1);
    assert!(issues[0].message.starts_with("Could not read document:"));
}
