//! Code pointers: which source files each document section talks about
//!
//! Entries are keyed `<document>#<heading>` and regenerated wholesale on every
//! pass. Only sections with at least one reference produce an entry.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use doc_fs::normalize_lexical;
use serde::{Deserialize, Serialize};

use crate::config::PointerSettings;
use crate::document::{Corpus, Document, ReferencePattern};

/// One section's references
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointerEntry {
    /// Referenced files, normalized, first-occurrence order
    pub files: Vec<String>,
    #[serde(rename = "lastValidated")]
    pub last_validated: DateTime<Utc>,
    /// Headings covered by this entry
    pub sections: Vec<String>,
    #[serde(rename = "startLine")]
    pub start_line: usize,
}

/// The persisted pointer map (`CODE_POINTERS.json`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointerArtifact {
    pub generated: DateTime<Utc>,
    pub total_entries: usize,
    pub pointers: BTreeMap<String, PointerEntry>,
}

impl PointerArtifact {
    pub fn empty(generated: DateTime<Utc>) -> Self {
        Self {
            generated,
            total_entries: 0,
            pointers: BTreeMap::new(),
        }
    }

    /// Pointer key of a document section.
    pub fn key(document: &str, heading: &str) -> String {
        format!("{}#{}", document, heading)
    }

    /// Entries belonging to `document`.
    pub fn entries_for<'a>(
        &'a self,
        document: &'a str,
    ) -> impl Iterator<Item = (&'a String, &'a PointerEntry)> {
        self.pointers.iter().filter(move |(key, _)| {
            key.split_once('#')
                .is_some_and(|(doc, _)| doc == document)
        })
    }

    /// True if `document` has at least one entry with files.
    pub fn covers(&self, document: &str) -> bool {
        self.entries_for(document).any(|(_, e)| !e.files.is_empty())
    }

    /// Oldest validation time among the document's entries.
    pub fn earliest_validation(&self, document: &str) -> Option<DateTime<Utc>> {
        self.entries_for(document).map(|(_, e)| e.last_validated).min()
    }

    /// Documents with at least one entry.
    pub fn documents(&self) -> Vec<&str> {
        let mut docs: Vec<&str> = self
            .pointers
            .keys()
            .filter_map(|key| key.split_once('#').map(|(doc, _)| doc))
            .collect();
        docs.dedup();
        docs
    }
}

/// Builds a [`PointerArtifact`] from a corpus
#[derive(Debug, Clone)]
pub struct PointerGenerator {
    pattern: ReferencePattern,
    verbatim_prefixes: Vec<String>,
}

impl PointerGenerator {
    pub fn new(pattern: ReferencePattern, settings: &PointerSettings) -> Self {
        Self {
            pattern,
            verbatim_prefixes: settings.verbatim_prefixes.clone(),
        }
    }

    /// Normalize a raw reference for storage.
    ///
    /// References under a verbatim prefix are kept as written; everything
    /// else is lexically normalized.
    pub fn normalize_reference(&self, raw: &str) -> String {
        if self.verbatim_prefixes.iter().any(|p| raw.starts_with(p.as_str())) {
            raw.to_string()
        } else {
            normalize_lexical(raw)
        }
    }

    /// Entries of one document.
    ///
    /// Sections sharing a heading share a key; their files are merged and the
    /// earliest start line is kept.
    pub fn entries_for(
        &self,
        doc: &Document,
        validated: DateTime<Utc>,
    ) -> BTreeMap<String, PointerEntry> {
        let mut entries: BTreeMap<String, PointerEntry> = BTreeMap::new();

        for section in &doc.sections {
            let refs = self.pattern.find_in(section);
            if refs.is_empty() {
                continue;
            }

            let files: Vec<String> = refs
                .iter()
                .map(|r| self.normalize_reference(&r.raw))
                .collect();
            let key = PointerArtifact::key(&doc.name, section.key_heading());

            let entry = entries.entry(key).or_insert_with(|| PointerEntry {
                files: Vec::new(),
                last_validated: validated,
                sections: vec![section.key_heading().to_string()],
                start_line: section.start_line,
            });
            for file in files {
                if !entry.files.contains(&file) {
                    entry.files.push(file);
                }
            }
            entry.start_line = entry.start_line.min(section.start_line);
        }

        entries
    }

    /// Pointer artifact for every tracked document of the corpus.
    ///
    /// An entry is never validated earlier than the document content it was
    /// read from, so documents stamped during the same run stay fresh.
    pub fn generate(&self, corpus: &Corpus, now: DateTime<Utc>) -> PointerArtifact {
        let mut pointers = BTreeMap::new();
        for doc in corpus.tracked() {
            let validated = now.max(DateTime::<Utc>::from(doc.modified));
            pointers.extend(self.entries_for(doc, validated));
        }

        tracing::info!(entries = pointers.len(), "Generated code pointers");

        PointerArtifact {
            generated: now,
            total_entries: pointers.len(),
            pointers,
        }
    }
}

impl Default for PointerGenerator {
    fn default() -> Self {
        Self::new(ReferencePattern::default(), &PointerSettings::default())
    }
}
