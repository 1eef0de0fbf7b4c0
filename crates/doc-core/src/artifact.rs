//! JSON artifact persistence
//!
//! Artifacts are regenerated wholesale and written atomically; a reader never
//! observes a half-written file.

use serde::Serialize;
use serde::de::DeserializeOwned;

use doc_fs::{NormalizedPath, io};

use crate::{Error, Result};

/// Serialize `value` as pretty JSON (trailing newline) and write it atomically.
pub fn write_json<T: Serialize>(path: &NormalizedPath, value: &T) -> Result<()> {
    let mut content = serde_json::to_string_pretty(value)?;
    content.push('\n');
    io::write_text(path, &content)?;
    tracing::debug!(path = %path, "Wrote artifact");
    Ok(())
}

/// Read a JSON artifact.
///
/// Returns `Ok(None)` when the file does not exist and
/// [`Error::ArtifactUnreadable`] when it exists but does not parse.
pub fn read_json<T: DeserializeOwned>(path: &NormalizedPath) -> Result<Option<T>> {
    if !path.to_native().is_file() {
        return Ok(None);
    }
    let content = io::read_text(path)?;
    serde_json::from_str(&content)
        .map(Some)
        .map_err(|e| Error::ArtifactUnreadable {
            path: path.to_native(),
            reason: e.to_string(),
        })
}
