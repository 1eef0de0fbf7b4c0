//! Machine-track documents
//!
//! - **scan**: line classification (headings, fences, code)
//! - **section**: heading-delimited sections
//! - **reference**: backtick file references inside sections
//! - [`Corpus`]: every document of the machine track, read fresh per run

mod reference;
mod scan;
mod section;

pub use reference::{Reference, ReferencePattern};
pub use scan::{Heading, LineKind, ScannedLine, parse_heading, scan_lines};
pub use section::{Section, extract_sections};

use std::fs;
use std::path::Path;
use std::time::SystemTime;

use doc_fs::{DocLayout, DocPath, io};

use crate::{Error, Result};

/// A machine-track document
#[derive(Debug, Clone)]
pub struct Document {
    /// File name relative to the machine track
    pub name: String,
    /// Raw text
    pub text: String,
    /// Sections in document order
    pub sections: Vec<Section>,
    /// Last modification time
    pub modified: SystemTime,
}

impl Document {
    /// Build a document from text already in memory.
    pub fn from_text(name: impl Into<String>, text: impl Into<String>, modified: SystemTime) -> Self {
        let text = text.into();
        let sections = extract_sections(&text);
        Self {
            name: name.into(),
            text,
            sections,
            modified,
        }
    }

    /// Read a document from disk.
    pub fn load(path: &Path, name: impl Into<String>) -> Result<Self> {
        let modified = io::modified_time(path)?;
        let text = fs::read_to_string(path).map_err(|e| doc_fs::Error::io(path, e))?;
        Ok(Self::from_text(name, text, modified))
    }

    /// All references of the document, section by section.
    pub fn references(&self, pattern: &ReferencePattern) -> Vec<Reference> {
        pattern.find_all(&self.sections)
    }
}

/// A document that could not be read
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedDocument {
    pub name: String,
    pub reason: String,
}

/// The set of machine-track documents for one engine run
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    documents: Vec<Document>,
    skipped: Vec<SkippedDocument>,
    index_name: String,
}

impl Corpus {
    /// Read every `*.md` file directly under the machine track.
    ///
    /// Generated artifacts (the lint digest) are not documents. Unreadable
    /// files are recorded as skipped rather than failing the run.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MachineTrackMissing`] when the machine track does not
    /// exist, or an I/O error when it cannot be listed.
    pub fn load(layout: &DocLayout) -> Result<Self> {
        let dir = layout.machine_dir();
        if !dir.is_dir() {
            return Err(Error::MachineTrackMissing {
                path: dir.to_path_buf(),
            });
        }

        let mut names: Vec<String> = fs::read_dir(dir)
            .map_err(|e| doc_fs::Error::io(dir, e))?
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().map(|t| t.is_file()).unwrap_or(false))
            .map(|entry| entry.file_name().to_string_lossy().to_string())
            .filter(|name| name.ends_with(".md") && !DocPath::is_generated_artifact(name))
            .collect();
        names.sort();

        let mut documents = Vec::with_capacity(names.len());
        let mut skipped = Vec::new();

        for name in names {
            match Document::load(&dir.join(&name), name.clone()) {
                Ok(doc) => {
                    tracing::debug!(document = %name, sections = doc.sections.len(), "Loaded document");
                    documents.push(doc);
                }
                Err(e) => {
                    tracing::warn!(document = %name, error = %e, "Skipping unreadable document");
                    skipped.push(SkippedDocument {
                        name,
                        reason: e.to_string(),
                    });
                }
            }
        }

        Ok(Self {
            documents,
            skipped,
            index_name: layout.index_name().to_string(),
        })
    }

    /// Build a corpus from documents already in memory.
    pub fn from_documents(mut documents: Vec<Document>, index_name: impl Into<String>) -> Self {
        documents.sort_by(|a, b| a.name.cmp(&b.name));
        Self {
            documents,
            skipped: Vec::new(),
            index_name: index_name.into(),
        }
    }

    /// Every readable document, index included, sorted by name.
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    /// Documents subject to pointers, parity and scoring (index excluded).
    pub fn tracked(&self) -> impl Iterator<Item = &Document> {
        self.documents.iter().filter(|d| d.name != self.index_name)
    }

    /// Names of the tracked documents.
    pub fn tracked_names(&self) -> Vec<String> {
        self.tracked().map(|d| d.name.clone()).collect()
    }

    /// Documents that could not be read.
    pub fn skipped(&self) -> &[SkippedDocument] {
        &self.skipped
    }

    pub fn get(&self, name: &str) -> Option<&Document> {
        self.documents.iter().find(|d| d.name == name)
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}
