//! Filesystem layer for Ultra-Doc
//!
//! Provides the two-track documentation layout, lexical path handling and
//! safe I/O (atomic writes, modification times, checksums).

pub mod checksum;
pub mod constants;
pub mod error;
pub mod io;
pub mod layout;
pub mod path;

pub use constants::DocPath;
pub use error::{Error, Result};
pub use layout::{DocLayout, LayoutNames};
pub use path::{NormalizedPath, normalize_lexical};
