//! Well-known file and directory names of an Ultra-Doc project.

use std::path::Path;

/// Default directory and artifact names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocPath {
    /// The machine track (`context_for_llms`)
    MachineTrack,
    /// The human track (`context_for_humans`)
    HumanTrack,
    /// The changelog directory
    Changelog,
    /// The report directory
    Reports,
    /// Directory holding the tool's own scripts
    Scripts,
    /// Repository configuration file
    Config,
    /// Git-ignored local configuration overrides
    LocalConfig,
    /// Index document excluded from parity and pointers
    IndexDoc,
    /// Pointer artifact
    PointersArtifact,
    /// Dependency graph artifact
    GraphArtifact,
    /// Health snapshot artifact
    StateArtifact,
    /// Markdown lint digest
    LintDigest,
    /// Summary report file name
    SummaryReport,
}

impl DocPath {
    /// Get the string representation of the path.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MachineTrack => "context_for_llms",
            Self::HumanTrack => "context_for_humans",
            Self::Changelog => "changelog",
            Self::Reports => "reports",
            Self::Scripts => "skills/ultra-doc/scripts",
            Self::Config => ".ultra-doc.toml",
            Self::LocalConfig => ".ultra-doc.local.toml",
            Self::IndexDoc => "INDEX.md",
            Self::PointersArtifact => "CODE_POINTERS.json",
            Self::GraphArtifact => "RELATIONSHIPS.json",
            Self::StateArtifact => "DOC_STATE.json",
            Self::LintDigest => "LINT_WARNINGS.md",
            Self::SummaryReport => "ultra-doc-summary.md",
        }
    }

    /// Artifacts generated into the machine track by the engine itself.
    ///
    /// These are never treated as documents.
    pub fn is_generated_artifact(name: &str) -> bool {
        [
            Self::PointersArtifact,
            Self::GraphArtifact,
            Self::StateArtifact,
            Self::LintDigest,
        ]
        .iter()
        .any(|p| p.as_str() == name)
    }
}

impl AsRef<Path> for DocPath {
    fn as_ref(&self) -> &Path {
        Path::new(self.as_str())
    }
}

impl AsRef<str> for DocPath {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for DocPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
