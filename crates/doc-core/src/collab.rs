//! Collaborator contracts
//!
//! The engine does not detect changes or write prose itself. It asks a
//! [`ChangeSource`] which documents changed and a [`Translator`] for the
//! human-track text of a document.

use chrono::{DateTime, SecondsFormat, Utc};
use doc_fs::checksum::compute_content_checksum;

use crate::Result;
use crate::document::Document;

/// Supplies the documentation files changed since the last commit
pub trait ChangeSource {
    /// Paths relative to the project root.
    fn changed_documents(&self) -> Result<Vec<String>>;
}

/// A fixed list of changes, e.g. from the command line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticChanges(Vec<String>);

impl StaticChanges {
    pub fn new(paths: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self(paths.into_iter().map(Into::into).collect())
    }

    pub fn none() -> Self {
        Self::default()
    }
}

impl ChangeSource for StaticChanges {
    fn changed_documents(&self) -> Result<Vec<String>> {
        Ok(self.0.clone())
    }
}

/// Produces the human-track counterpart of a machine-track document
pub trait Translator {
    fn translate(&self, doc: &Document) -> Result<String>;
}

/// Wraps the machine text with front matter and a reader-facing title.
///
/// The front matter records `source_hash`, which the content-hash parity
/// strategy compares against the current source.
#[derive(Debug, Clone, Default)]
pub struct HeaderTranslator {
    fixed_time: Option<DateTime<Utc>>,
}

impl HeaderTranslator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Translator that stamps `generated_at` with a fixed time.
    pub fn at(time: DateTime<Utc>) -> Self {
        Self {
            fixed_time: Some(time),
        }
    }
}

impl Translator for HeaderTranslator {
    fn translate(&self, doc: &Document) -> Result<String> {
        let generated_at = self
            .fixed_time
            .unwrap_or_else(Utc::now)
            .to_rfc3339_opts(SecondsFormat::Secs, true);
        let title = doc.name.strip_suffix(".md").unwrap_or(&doc.name);

        Ok(format!(
            "---\n\
             source_file: {name}\n\
             generated_at: {generated_at}\n\
             source_hash: {hash}\n\
             ---\n\
             \n\
             # [Human Readable] {title}\n\
             \n\
             > **Note:** This document is automatically generated from the machine-optimized version.\n\
             \n\
             ---\n\
             \n\
             {body}",
            name = doc.name,
            hash = compute_content_checksum(&doc.text),
            body = doc.text,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::front_matter_value;
    use chrono::TimeZone;
    use std::time::SystemTime;

    #[test]
    fn header_translator_records_source_and_hash() {
        let doc = Document::from_text("api.md", "# API\nbody\n", SystemTime::now());
        let time = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();

        let text = HeaderTranslator::at(time).translate(&doc).unwrap();

        assert_eq!(front_matter_value(&text, "source_file"), Some("api.md"));
        assert_eq!(front_matter_value(&text, "generated_at"), Some("2024-05-01T12:00:00Z"));
        assert_eq!(
            front_matter_value(&text, "source_hash").map(str::to_string),
            Some(compute_content_checksum("# API\nbody\n"))
        );
        assert!(text.contains("# [Human Readable] api\n"));
        assert!(text.ends_with("# API\nbody\n"));
    }

    #[test]
    fn static_changes_return_their_list() {
        let changes = StaticChanges::new(["context_for_llms/a.md"]);
        assert_eq!(changes.changed_documents().unwrap(), vec!["context_for_llms/a.md"]);
        assert!(StaticChanges::none().changed_documents().unwrap().is_empty());
    }
}
