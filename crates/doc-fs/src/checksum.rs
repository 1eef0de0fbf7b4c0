//! Content hashes recorded in human-track front matter
//!
//! Format: `sha256:<hex>`. A mirror stores the hash of the machine-track text
//! it was generated from, so an edited source is detectable even when
//! modification times are not.

use sha2::{Digest, Sha256};

const PREFIX: &str = "sha256:";

/// Hash of `content` in the recorded `sha256:<hex>` form.
pub fn compute_content_checksum(content: &str) -> String {
    format!("{}{:x}", PREFIX, Sha256::digest(content.as_bytes()))
}

/// True when `recorded` is the hash of `content`.
///
/// Surrounding whitespace and quotes left by front matter are ignored.
pub fn matches_content(recorded: &str, content: &str) -> bool {
    recorded.trim().trim_matches('"') == compute_content_checksum(content)
}
