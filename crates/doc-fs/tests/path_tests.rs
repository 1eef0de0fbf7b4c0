use doc_fs::{NormalizedPath, normalize_lexical};
use proptest::prelude::*;
use std::path::Path;

#[test]
fn test_backslashes_are_normalized() {
    let path = NormalizedPath::new("context_for_llms\\guides\\setup.md");
    assert_eq!(path.as_str(), "context_for_llms/guides/setup.md");
    assert_eq!(path.to_string(), "context_for_llms/guides/setup.md");
}

#[test]
fn test_graph_ids_are_relative_to_root() {
    let root = Path::new("/project");
    let id = NormalizedPath::relative_to(&root.join("src").join("app.js"), root).unwrap();
    assert_eq!(id.as_str(), "src/app.js");
}

proptest! {
    #[test]
    fn normalize_is_idempotent(segments in prop::collection::vec("[a-z]{1,4}|\\.|\\.\\.", 0..8)) {
        let input = segments.join("/");
        let once = normalize_lexical(&input);
        prop_assert_eq!(normalize_lexical(&once), once.clone());
        prop_assert!(!once.split('/').any(|s| s == "."  ) || once == ".");
    }
}
