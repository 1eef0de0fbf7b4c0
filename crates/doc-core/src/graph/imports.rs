//! Textual import extraction
//!
//! Two forms are recognised: ES module `import ... from "x"` (including bare
//! `import "x"`) and CommonJS `require("x")`. Matching is purely textual;
//! imports inside comments or strings count too.

use regex::Regex;
use std::sync::LazyLock;

static ES_IMPORT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"import\s+(?:[^'"]+from\s+)?['"]([^'"]+)['"]"#).expect("Invalid import regex")
});

static REQUIRE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"require\(['"]([^'"]+)['"]\)"#).expect("Invalid require regex")
});

/// Raw import targets of a source file: ES imports first, then requires,
/// each in text order.
pub fn extract_imports(source: &str) -> Vec<String> {
    ES_IMPORT
        .captures_iter(source)
        .chain(REQUIRE.captures_iter(source))
        .map(|caps| caps[1].to_string())
        .collect()
}

/// True for targets resolved against the importing file's directory.
pub fn is_relative(target: &str) -> bool {
    target.starts_with('.')
}
