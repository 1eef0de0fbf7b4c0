//! Two-track project layout
//!
//! Resolves the machine track, human track and auxiliary directories of a
//! project from its root and the configured directory names.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{DocPath, Error, NormalizedPath, Result};

fn default_machine() -> String {
    DocPath::MachineTrack.as_str().to_string()
}

fn default_human() -> String {
    DocPath::HumanTrack.as_str().to_string()
}

fn default_changelog() -> String {
    DocPath::Changelog.as_str().to_string()
}

fn default_reports() -> String {
    DocPath::Reports.as_str().to_string()
}

fn default_scripts() -> String {
    DocPath::Scripts.as_str().to_string()
}

fn default_index() -> String {
    DocPath::IndexDoc.as_str().to_string()
}

/// Directory names, relative to the project root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutNames {
    #[serde(default = "default_machine")]
    pub machine: String,
    #[serde(default = "default_human")]
    pub human: String,
    #[serde(default = "default_changelog")]
    pub changelog: String,
    #[serde(default = "default_reports")]
    pub reports: String,
    #[serde(default = "default_scripts")]
    pub scripts: String,
    /// Index document excluded from parity, pointers and scoring
    #[serde(default = "default_index")]
    pub index: String,
}

impl Default for LayoutNames {
    fn default() -> Self {
        Self {
            machine: default_machine(),
            human: default_human(),
            changelog: default_changelog(),
            reports: default_reports(),
            scripts: default_scripts(),
            index: default_index(),
        }
    }
}

/// Absolute locations of every directory the engine reads or writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocLayout {
    root: PathBuf,
    machine: PathBuf,
    human: PathBuf,
    changelog: PathBuf,
    reports: PathBuf,
    scripts: PathBuf,
    index: String,
}

impl DocLayout {
    /// Build a layout rooted at `root`.
    ///
    /// The root is canonicalized when possible so relative paths computed
    /// later (graph node ids) do not depend on how the caller spelled it.
    pub fn new(root: impl AsRef<Path>, names: &LayoutNames) -> Self {
        let root = dunce::canonicalize(root.as_ref()).unwrap_or_else(|_| root.as_ref().to_path_buf());
        Self {
            machine: root.join(&names.machine),
            human: root.join(&names.human),
            changelog: root.join(&names.changelog),
            reports: root.join(&names.reports),
            scripts: root.join(&names.scripts),
            index: names.index.clone(),
            root,
        }
    }

    /// Layout with the default directory names.
    pub fn with_defaults(root: impl AsRef<Path>) -> Self {
        Self::new(root, &LayoutNames::default())
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn machine_dir(&self) -> &Path {
        &self.machine
    }

    pub fn human_dir(&self) -> &Path {
        &self.human
    }

    pub fn changelog_dir(&self) -> &Path {
        &self.changelog
    }

    pub fn reports_dir(&self) -> &Path {
        &self.reports
    }

    pub fn scripts_dir(&self) -> &Path {
        &self.scripts
    }

    /// File name of the index document.
    pub fn index_name(&self) -> &str {
        &self.index
    }

    /// Path of a machine-track document.
    pub fn machine_doc(&self, name: &str) -> PathBuf {
        self.machine.join(name)
    }

    /// Path of the human-track mirror of a machine-track document.
    pub fn mirror_of(&self, name: &str) -> PathBuf {
        self.human.join(name)
    }

    /// Machine-track document name for a path relative to the root.
    ///
    /// `context_for_llms/api.md` yields `api.md`; paths outside the machine
    /// track, in subdirectories of it, or not ending in `.md` yield `None`.
    pub fn machine_doc_name(&self, relative: &str) -> Option<String> {
        let path = self.root.join(relative.trim_start_matches("./"));
        let rest = path.strip_prefix(&self.machine).ok()?;
        let name = rest.to_str()?;
        if name.ends_with(".md") && rest.components().count() == 1 {
            Some(name.to_string())
        } else {
            None
        }
    }

    /// True if `relative` lies inside the machine or the human track.
    pub fn is_in_tracks(&self, relative: &str) -> bool {
        let path = self.root.join(relative.trim_start_matches("./"));
        path.starts_with(&self.machine) || path.starts_with(&self.human)
    }

    /// Location of a generated artifact inside the machine track.
    pub fn artifact(&self, artifact: DocPath) -> NormalizedPath {
        match artifact {
            DocPath::SummaryReport => NormalizedPath::new(self.reports.join(artifact.as_str())),
            DocPath::Config | DocPath::LocalConfig => {
                NormalizedPath::new(self.root.join(artifact.as_str()))
            }
            _ => NormalizedPath::new(self.machine.join(artifact.as_str())),
        }
    }

    /// Ordered base directories used to resolve symbolic file references.
    pub fn search_roots(&self) -> Vec<PathBuf> {
        vec![
            self.root.clone(),
            self.scripts.clone(),
            self.machine.clone(),
            self.human.clone(),
            self.changelog.clone(),
            self.reports.clone(),
        ]
    }

    /// Fail unless the machine track exists.
    ///
    /// Without it no analysis is possible.
    pub fn validate(&self) -> Result<()> {
        if self.machine.is_dir() {
            Ok(())
        } else {
            Err(Error::LayoutValidation {
                message: format!("machine track not found at {}", self.machine.display()),
            })
        }
    }
}
