//! Documentation consistency engine for Ultra-Doc
//!
//! This crate keeps a two-track documentation corpus honest:
//!
//! - **Reference extraction**: sections and inline file references of every
//!   machine-track document, persisted as code pointers
//! - **Dependency graph**: import/require edges between project source files
//! - **Rule engine**: an open registry of independent lint rules
//! - **Health scoring**: coverage, staleness and a ranked priority list
//! - **Parity**: the human track as a derived replica of the machine track
//! - **Workflows**: full sync, quick sync, validation and summary runs
//!
//! # Architecture
//!
//! ```text
//!                  doc-cli (ultra-doc)
//!                          |
//!                      doc-core
//!   document -> pointers   graph   lint -> health <- parity
//!                          |
//!                       doc-fs
//! ```
//!
//! # Example
//!
//! ```ignore
//! use doc_core::DocEngine;
//!
//! let engine = DocEngine::open("/path/to/project")?;
//! let snapshot = engine.analyze(chrono::Utc::now())?;
//! println!("coverage: {}%", snapshot.metrics.coverage_percentage);
//! ```

pub mod artifact;
pub mod changelog;
pub mod collab;
pub mod config;
pub mod document;
pub mod error;
pub mod graph;
pub mod health;
pub mod lint;
pub mod metadata;
pub mod mirror;
pub mod parity;
pub mod pointers;
pub mod resolver;
pub mod summary;
pub mod workflow;

pub use collab::{ChangeSource, HeaderTranslator, StaticChanges, Translator};
pub use config::{ConfigResolver, DocConfig};
pub use document::{Corpus, Document, Reference, Section};
pub use error::{Error, Result};
pub use graph::{DependencyGraph, GraphBuilder};
pub use health::{HealthSnapshot, Impact, Priority};
pub use lint::{Issue, LintDigest, LintReport, RuleRegistry, Severity};
pub use parity::{MirrorStatus, ParityOptions, ParityVerdict, ParityVerifier};
pub use pointers::{PointerArtifact, PointerGenerator};
pub use resolver::{ExistenceResolver, Resolution};
pub use workflow::{DocEngine, Outcome, RunContext, Workflow, WorkflowReport};

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn machine_track_missing_names_the_path() {
        let error = Error::MachineTrackMissing {
            path: PathBuf::from("/project/context_for_llms"),
        };
        assert_eq!(
            error.to_string(),
            "Machine track not found at /project/context_for_llms"
        );
    }

    #[test]
    fn fs_errors_convert() {
        let fs_error = doc_fs::Error::LockFailed {
            path: PathBuf::from("/tmp/x"),
        };
        let error: Error = fs_error.into();
        assert!(matches!(error, Error::Fs(_)));
    }
}
