//! Human-track mirror generation

use std::fs;

use doc_fs::checksum;
use doc_fs::{DocLayout, NormalizedPath, io};
use serde::{Deserialize, Serialize};

use crate::collab::Translator;
use crate::document::{Corpus, Document};
use crate::metadata::front_matter_value;
use crate::{Error, Result};

/// What a mirror pass did
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MirrorSummary {
    /// Documents whose mirror was (re)written
    pub written: Vec<String>,
    /// Documents whose mirror was already current
    pub up_to_date: usize,
}

/// Writes human-track mirrors through a [`Translator`]
pub struct MirrorWriter<'a> {
    layout: &'a DocLayout,
    translator: &'a dyn Translator,
}

impl<'a> MirrorWriter<'a> {
    pub fn new(layout: &'a DocLayout, translator: &'a dyn Translator) -> Self {
        Self { layout, translator }
    }

    /// True when the mirror is missing, older than the source, or records a
    /// different source hash.
    pub fn needs_update(&self, doc: &Document) -> bool {
        let mirror = self.layout.mirror_of(&doc.name);
        let Ok(mirror_time) = io::modified_time(&mirror) else {
            return true;
        };
        if mirror_time < doc.modified {
            return true;
        }
        match fs::read_to_string(&mirror) {
            Ok(text) => front_matter_value(&text, "source_hash")
                .is_some_and(|recorded| !checksum::matches_content(recorded, &doc.text)),
            Err(_) => true,
        }
    }

    /// Bring every tracked document's mirror up to date.
    ///
    /// A written mirror's modification time is never earlier than its
    /// source's, whatever the filesystem clock granularity.
    pub fn sync(&self, corpus: &Corpus) -> Result<MirrorSummary> {
        let human_dir = self.layout.human_dir();
        fs::create_dir_all(human_dir).map_err(|e| doc_fs::Error::io(human_dir, e))?;

        let mut summary = MirrorSummary::default();
        for doc in corpus.tracked() {
            if !self.needs_update(doc) {
                summary.up_to_date += 1;
                continue;
            }

            let content = self
                .translator
                .translate(doc)
                .map_err(|e| Error::Collaborator {
                    collaborator: "translator",
                    message: format!("{}: {}", doc.name, e),
                })?;
            let mirror = self.layout.mirror_of(&doc.name);
            io::write_text(&NormalizedPath::new(&mirror), &content)?;
            io::ensure_not_older(&mirror, doc.modified)?;

            tracing::info!(document = %doc.name, "Wrote human mirror");
            summary.written.push(doc.name.clone());
        }

        Ok(summary)
    }
}
