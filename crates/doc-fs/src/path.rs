//! Forward-slash paths for artifacts and document identities

use std::fmt;
use std::path::{Path, PathBuf};

/// A path stored with forward slashes.
///
/// Graph node ids, pointer file lists and artifact locations use this form so
/// persisted JSON is identical across platforms.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NormalizedPath(String);

impl NormalizedPath {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self(path.as_ref().to_string_lossy().replace('\\', "/"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Platform path for I/O.
    pub fn to_native(&self) -> PathBuf {
        PathBuf::from(&self.0)
    }

    /// `path` expressed relative to `base`, or `None` when it lies outside.
    pub fn relative_to(path: &Path, base: &Path) -> Option<Self> {
        path.strip_prefix(base).ok().map(Self::new)
    }
}

impl AsRef<Path> for NormalizedPath {
    fn as_ref(&self) -> &Path {
        Path::new(&self.0)
    }
}

impl fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Resolve `.` and `..` segments of a reference without touching the disk.
///
/// `..` that climbs above the start is kept for relative input (`../x` stays
/// `../x`) and dropped for absolute input. An empty result is `.`.
pub fn normalize_lexical(path: &str) -> String {
    let unified = path.replace('\\', "/");
    let absolute = unified.starts_with('/');
    let mut parts: Vec<&str> = Vec::new();

    for segment in unified.split('/') {
        match segment {
            "" | "." => {}
            ".." => match parts.last() {
                Some(&last) if last != ".." => {
                    parts.pop();
                }
                _ if absolute => {}
                _ => parts.push(".."),
            },
            other => parts.push(other),
        }
    }

    let body = parts.join("/");
    match (absolute, body.is_empty()) {
        (true, _) => format!("/{}", body),
        (false, true) => ".".to_string(),
        (false, false) => body,
    }
}
