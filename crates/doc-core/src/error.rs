//! Error types for doc-core

use std::path::PathBuf;

/// Result type for doc-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in doc-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The machine track directory does not exist
    #[error("Machine track not found at {path}")]
    MachineTrackMissing { path: PathBuf },

    /// Configuration could not be interpreted
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// A persisted artifact exists but cannot be used
    #[error("Artifact {path} is unreadable: {reason}")]
    ArtifactUnreadable { path: PathBuf, reason: String },

    /// Unknown workflow name
    #[error("Unknown workflow: {name}")]
    UnknownWorkflow { name: String },

    /// The synchronization state machine was driven out of order
    #[error("Invalid phase transition: {from} -> {to}")]
    InvalidTransition { from: String, to: String },

    /// A collaborator (change detection, translation) failed
    #[error("{collaborator} failed: {message}")]
    Collaborator {
        collaborator: &'static str,
        message: String,
    },

    // Transparent wrappers for underlying crate errors
    /// Filesystem error from doc-fs
    #[error(transparent)]
    Fs(#[from] doc_fs::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// TOML deserialization error
    #[error(transparent)]
    TomlDe(#[from] toml::de::Error),

    /// Regex compilation error
    #[error(transparent)]
    Regex(#[from] regex::Error),
}
