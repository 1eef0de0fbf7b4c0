//! Inline file references
//!
//! A reference is a backtick-quoted token ending in a known file extension,
//! e.g. `` `scripts/lint.mjs` ``.

use regex::Regex;

use super::section::Section;
use crate::Result;

/// A symbolic file path found in a section body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    /// The path exactly as written between the backticks
    pub raw: String,
    /// Heading of the owning section (`None` for the implicit section)
    pub heading: Option<String>,
    /// 1-based line of the first occurrence in the document
    pub line: usize,
}

/// Compiled matcher for references with a given set of extensions
#[derive(Debug, Clone)]
pub struct ReferencePattern {
    regex: Regex,
}

impl ReferencePattern {
    /// Build a matcher for the given extensions (without leading dots).
    pub fn new(extensions: &[String]) -> Result<Self> {
        let alternatives = extensions
            .iter()
            .map(|ext| regex::escape(ext.trim_start_matches('.')))
            .collect::<Vec<_>>()
            .join("|");
        let regex = Regex::new(&format!(r"`([^`]+\.(?:{}))`", alternatives))?;
        Ok(Self { regex })
    }

    /// References in one section, deduplicated by raw string in
    /// first-encountered order.
    pub fn find_in(&self, section: &Section) -> Vec<Reference> {
        let mut refs: Vec<Reference> = Vec::new();

        for (line_number, line) in section.body_lines() {
            for caps in self.regex.captures_iter(line) {
                let raw = &caps[1];
                if refs.iter().any(|r| r.raw == raw) {
                    continue;
                }
                refs.push(Reference {
                    raw: raw.to_string(),
                    heading: section.heading.clone(),
                    line: line_number,
                });
            }
        }

        refs
    }

    /// References of every section, section order preserved.
    pub fn find_all(&self, sections: &[Section]) -> Vec<Reference> {
        sections.iter().flat_map(|s| self.find_in(s)).collect()
    }

    /// True if `token` (without backticks) would be recognised as a reference.
    pub fn matches_token(&self, token: &str) -> bool {
        self.regex.is_match(&format!("`{}`", token))
    }
}

impl Default for ReferencePattern {
    fn default() -> Self {
        let extensions = crate::config::LintSettings::default().reference_extensions;
        Self::new(&extensions).expect("Invalid default reference pattern")
    }
}
