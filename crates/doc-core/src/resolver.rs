//! Existence resolution for symbolic file references
//!
//! A reference such as `` `scripts/lint.mjs` `` is probed against an ordered
//! list of base directories. Template-looking references (globs, `<name>`,
//! `YYYY` placeholders) are never real paths and always count as present.

use std::path::{Path, PathBuf};

use doc_fs::DocLayout;

const PLACEHOLDER_TOKENS: [&str; 3] = ["YYYY", "MM-DD", "XXX"];
const PLACEHOLDER_CHARS: [char; 6] = ['*', '?', '<', '>', '{', '}'];

/// Outcome of resolving one reference
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Found under the given base directory
    Exists(PathBuf),
    /// Looks like a template, not a path
    Placeholder,
    /// Not found under any base directory
    Missing,
}

impl Resolution {
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }
}

/// Resolves references against ordered base directories
#[derive(Debug, Clone)]
pub struct ExistenceResolver {
    bases: Vec<PathBuf>,
}

impl ExistenceResolver {
    pub fn new(bases: Vec<PathBuf>) -> Self {
        Self { bases }
    }

    /// Resolver over the layout's search roots: project root, scripts,
    /// machine track, human track, changelog, reports.
    pub fn from_layout(layout: &DocLayout) -> Self {
        Self::new(layout.search_roots())
    }

    pub fn bases(&self) -> &[PathBuf] {
        &self.bases
    }

    /// True for references that are template examples rather than paths.
    pub fn is_placeholder(reference: &str) -> bool {
        reference.chars().any(|c| c.is_whitespace() || PLACEHOLDER_CHARS.contains(&c))
            || PLACEHOLDER_TOKENS.iter().any(|t| reference.contains(t))
    }

    pub fn resolve(&self, reference: &str) -> Resolution {
        if Self::is_placeholder(reference) {
            return Resolution::Placeholder;
        }

        let relative = reference.strip_prefix("./").unwrap_or(reference);
        for base in &self.bases {
            let candidate = base.join(Path::new(relative));
            if candidate.exists() {
                return Resolution::Exists(candidate);
            }
        }

        tracing::trace!(reference, "Reference not found under any base");
        Resolution::Missing
    }

    /// Shorthand for `!resolve(reference).is_missing()`.
    pub fn exists(&self, reference: &str) -> bool {
        !self.resolve(reference).is_missing()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tempfile::TempDir;

    #[rstest]
    #[case("docs-YYYY-MM-DD.md")]
    #[case("scripts/*.mjs")]
    #[case("<name>.md")]
    #[case("{file}.json")]
    #[case("npm run lint.js")]
    #[case("report-XXX.md")]
    fn placeholders_always_exist(#[case] reference: &str) {
        let resolver = ExistenceResolver::new(vec![]);
        assert_eq!(resolver.resolve(reference), Resolution::Placeholder);
        assert!(resolver.exists(reference));
    }

    #[test]
    fn probes_bases_in_order() {
        let first = TempDir::new().unwrap();
        let second = TempDir::new().unwrap();
        std::fs::create_dir_all(second.path().join("src")).unwrap();
        std::fs::write(second.path().join("src/app.js"), "").unwrap();

        let resolver =
            ExistenceResolver::new(vec![first.path().to_path_buf(), second.path().to_path_buf()]);

        assert_eq!(
            resolver.resolve("./src/app.js"),
            Resolution::Exists(second.path().join("src/app.js"))
        );
        assert!(resolver.resolve("src/missing.js").is_missing());
    }
}
