//! Human mirror parity and the mirror writer

use std::time::{Duration, SystemTime};

use doc_core::config::ParityStrategy;
use doc_core::document::Document;
use doc_core::mirror::MirrorWriter;
use doc_core::{
    Corpus, HeaderTranslator, MirrorStatus, ParityOptions, ParityVerifier, Result, Translator,
};
use doc_fs::DocLayout;
use doc_test_utils::TestCorpus;
use pretty_assertions::assert_eq;

fn project(docs: &[&str]) -> TestCorpus {
    let mut fixture = TestCorpus::new();
    fixture.install();
    for name in docs {
        fixture.machine_doc(name, &format!("# {}\nBody.\n", name));
    }
    fixture
}

fn verify(fixture: &TestCorpus, options: ParityOptions) -> doc_core::ParityVerdict {
    let layout = DocLayout::with_defaults(fixture.root());
    let corpus = Corpus::load(&layout).unwrap();
    ParityVerifier::new(&layout, options).verify(&corpus)
}

fn pin(fixture: &TestCorpus, relative: &str, offset_secs: i64) {
    let base = SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000);
    let time = if offset_secs >= 0 {
        base + Duration::from_secs(offset_secs as u64)
    } else {
        base - Duration::from_secs(offset_secs.unsigned_abs())
    };
    fixture.set_mtime(relative, time);
}

#[test]
fn fresh_mirrors_pass() {
    let fixture = project(&["a.md", "b.md"]);
    fixture.human_doc("a.md", "mirror");
    fixture.human_doc("b.md", "mirror");

    let verdict = verify(&fixture, ParityOptions::default());

    assert!(verdict.passed());
    assert_eq!(verdict.status_label(), "passed");
    assert!(verdict.issue_lines().is_empty());
}

#[test]
fn missing_mirror_fails_the_verdict() {
    let fixture = project(&["a.md", "b.md"]);
    fixture.human_doc("a.md", "mirror");

    let verdict = verify(&fixture, ParityOptions::default());

    assert!(!verdict.passed());
    assert_eq!(verdict.status_of("b.md"), Some(MirrorStatus::MissingMirror));
    assert_eq!(
        verdict.issue_lines(),
        vec!["Missing human documentation for: b.md".to_string()]
    );
}

#[test]
fn index_is_never_required_to_have_a_mirror() {
    let fixture = project(&["INDEX.md", "a.md"]);
    fixture.human_doc("a.md", "mirror");

    let verdict = verify(&fixture, ParityOptions::default());

    assert!(verdict.passed());
    assert_eq!(verdict.checks.len(), 1);
}

#[test]
fn mirror_older_than_tolerance_is_stale() {
    let fixture = project(&["a.md"]);
    fixture.human_doc("a.md", "mirror");
    pin(&fixture, "context_for_llms/a.md", 0);
    pin(&fixture, "context_for_humans/a.md", -3600);

    let verdict = verify(&fixture, ParityOptions::default());

    assert_eq!(verdict.status_of("a.md"), Some(MirrorStatus::StaleMirror));
    assert_eq!(
        verdict.issue_lines(),
        vec!["Human documentation outdated for: a.md".to_string()]
    );
}

#[test]
fn lag_within_tolerance_is_synced() {
    let fixture = project(&["a.md"]);
    fixture.human_doc("a.md", "mirror");
    let base = SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000);
    fixture.set_mtime("context_for_humans/a.md", base);
    fixture.set_mtime("context_for_llms/a.md", base + Duration::from_millis(500));

    let verdict = verify(&fixture, ParityOptions::default());
    assert_eq!(verdict.status_of("a.md"), Some(MirrorStatus::Synced));

    let strict = ParityOptions {
        tolerance: Duration::ZERO,
        ..ParityOptions::default()
    };
    assert_eq!(
        verify(&fixture, strict).status_of("a.md"),
        Some(MirrorStatus::StaleMirror)
    );
}

#[test]
fn content_hash_catches_edits_that_keep_mtime_order() {
    let fixture = project(&["a.md"]);
    let outdated = Document::from_text("a.md", "# older text\n", SystemTime::now());
    fixture.human_doc("a.md", &HeaderTranslator::new().translate(&outdated).unwrap());
    pin(&fixture, "context_for_llms/a.md", 0);
    pin(&fixture, "context_for_humans/a.md", 60);

    let by_mtime = verify(&fixture, ParityOptions::default());
    assert_eq!(by_mtime.status_of("a.md"), Some(MirrorStatus::Synced));

    let by_hash = ParityOptions {
        strategy: ParityStrategy::ContentHash,
        ..ParityOptions::default()
    };
    assert_eq!(
        verify(&fixture, by_hash).status_of("a.md"),
        Some(MirrorStatus::StaleMirror)
    );
}

#[test]
fn missing_human_track_fails_every_document() {
    let fixture = project(&["a.md", "b.md"]);

    let verdict = verify(&fixture, ParityOptions::default());

    assert!(verdict.human_track_missing);
    assert_eq!(verdict.failures().count(), 2);
    assert_eq!(verdict.issue_lines()[0], "Human track directory missing");
}

#[test]
fn skipped_check_reports_but_never_fails() {
    let fixture = project(&["a.md"]);

    let verdict = verify(&fixture, ParityOptions::default().skipped(true));

    assert!(verdict.passed());
    assert_eq!(verdict.status_label(), "skipped");
    assert_eq!(verdict.status_of("a.md"), Some(MirrorStatus::MissingMirror));
}

#[test]
fn parity_check_is_read_only_and_repeatable() {
    let fixture = project(&["a.md"]);
    fixture.human_doc("a.md", "mirror");
    pin(&fixture, "context_for_humans/a.md", -3600);

    let first = verify(&fixture, ParityOptions::default());
    let second = verify(&fixture, ParityOptions::default());

    assert_eq!(first, second);
    assert_eq!(fixture.read("context_for_humans/a.md"), "mirror");
}

#[test]
fn writer_repairs_every_failure_and_is_then_idle() {
    let fixture = project(&["a.md", "b.md", "c.md"]);
    fixture.human_doc("a.md", "current");
    fixture.human_doc("b.md", "outdated");
    pin(&fixture, "context_for_humans/b.md", -3600);
    pin(&fixture, "context_for_llms/b.md", 0);

    let layout = DocLayout::with_defaults(fixture.root());
    let corpus = Corpus::load(&layout).unwrap();
    let translator = HeaderTranslator::new();
    let writer = MirrorWriter::new(&layout, &translator);

    let first = writer.sync(&corpus).unwrap();
    assert_eq!(first.written, vec!["b.md".to_string(), "c.md".to_string()]);
    assert_eq!(first.up_to_date, 1);
    fixture.assert_file_contains("context_for_humans/c.md", "# [Human Readable] c");
    fixture.assert_file_contains("context_for_humans/c.md", "source_file: c.md");

    let verdict = ParityVerifier::new(&layout, ParityOptions::default()).verify(&corpus);
    assert!(verdict.passed());

    let second = writer.sync(&corpus).unwrap();
    assert!(second.written.is_empty());
    assert_eq!(second.up_to_date, 3);
}

struct FailingTranslator;

impl Translator for FailingTranslator {
    fn translate(&self, _doc: &Document) -> Result<String> {
        Err(doc_core::Error::InvalidConfig {
            message: "translator offline".to_string(),
        })
    }
}

#[test]
fn translator_failure_surfaces_as_collaborator_error() {
    let fixture = project(&["a.md"]);
    let layout = DocLayout::with_defaults(fixture.root());
    let corpus = Corpus::load(&layout).unwrap();

    let err = MirrorWriter::new(&layout, &FailingTranslator)
        .sync(&corpus)
        .unwrap_err();

    assert!(matches!(
        err,
        doc_core::Error::Collaborator {
            collaborator: "translator",
            ..
        }
    ));
    fixture.assert_file_not_exists("context_for_humans/a.md");
}
