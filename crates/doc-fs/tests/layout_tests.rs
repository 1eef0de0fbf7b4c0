use assert_fs::TempDir;
use assert_fs::prelude::*;
use doc_fs::{DocLayout, DocPath, LayoutNames};
use predicates::prelude::*;
use rstest::rstest;

#[test]
fn test_validate_requires_machine_track() {
    let temp = TempDir::new().unwrap();
    let layout = DocLayout::with_defaults(temp.path());

    let err = layout.validate().unwrap_err();
    assert!(err.to_string().contains("context_for_llms"));

    temp.child("context_for_llms").create_dir_all().unwrap();
    assert!(layout.validate().is_ok());
}

#[test]
fn test_search_roots_order() {
    let temp = TempDir::new().unwrap();
    let layout = DocLayout::with_defaults(temp.path());
    let roots = layout.search_roots();

    assert_eq!(roots.len(), 6);
    assert_eq!(roots[0], layout.root());
    assert_eq!(roots[1], layout.scripts_dir());
    assert_eq!(roots[2], layout.machine_dir());
    assert_eq!(roots[3], layout.human_dir());
    assert_eq!(roots[4], layout.changelog_dir());
    assert_eq!(roots[5], layout.reports_dir());
}

#[rstest]
#[case(DocPath::PointersArtifact, "context_for_llms/CODE_POINTERS.json")]
#[case(DocPath::GraphArtifact, "context_for_llms/RELATIONSHIPS.json")]
#[case(DocPath::StateArtifact, "context_for_llms/DOC_STATE.json")]
#[case(DocPath::LintDigest, "context_for_llms/LINT_WARNINGS.md")]
#[case(DocPath::SummaryReport, "reports/ultra-doc-summary.md")]
#[case(DocPath::Config, ".ultra-doc.toml")]
fn test_artifact_locations(#[case] artifact: DocPath, #[case] suffix: &str) {
    let temp = TempDir::new().unwrap();
    let layout = DocLayout::with_defaults(temp.path());

    let path = layout.artifact(artifact);
    assert!(predicate::str::ends_with(suffix).eval(path.as_str()));
}

#[test]
fn test_custom_names() {
    let temp = TempDir::new().unwrap();
    let names = LayoutNames {
        machine: "docs/agents".to_string(),
        human: "docs/people".to_string(),
        ..LayoutNames::default()
    };
    let layout = DocLayout::new(temp.path(), &names);

    assert!(layout.machine_dir().ends_with("docs/agents"));
    assert!(layout.mirror_of("a.md").ends_with("docs/people/a.md"));
    assert_eq!(layout.index_name(), "INDEX.md");
}

#[rstest]
#[case("context_for_llms/api.md", Some("api.md"))]
#[case("./context_for_llms/api.md", Some("api.md"))]
#[case("context_for_llms/nested/api.md", None)]
#[case("context_for_llms/data.json", None)]
#[case("context_for_humans/api.md", None)]
#[case("README.md", None)]
fn test_machine_doc_name(#[case] relative: &str, #[case] expected: Option<&str>) {
    let temp = TempDir::new().unwrap();
    let layout = DocLayout::with_defaults(temp.path());

    assert_eq!(layout.machine_doc_name(relative).as_deref(), expected);
}

#[test]
fn test_is_in_tracks() {
    let temp = TempDir::new().unwrap();
    let layout = DocLayout::with_defaults(temp.path());

    assert!(layout.is_in_tracks("context_for_llms/a.md"));
    assert!(layout.is_in_tracks("context_for_humans/a.md"));
    assert!(!layout.is_in_tracks("src/app.js"));
    assert!(!layout.is_in_tracks("context_for_llms_old/a.md"));
}
