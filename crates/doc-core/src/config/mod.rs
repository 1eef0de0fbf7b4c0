//! Configuration resolution
//!
//! Configuration is loaded and merged from these sources (later sources override earlier):
//!
//! 1. **Built-in defaults**
//! 2. **Global config** - `<config_dir>/ultra-doc/config.toml`
//! 3. **Repository config** - `.ultra-doc.toml` (its presence marks an installed project)
//! 4. **Local overrides** - `.ultra-doc.local.toml` (git-ignored)
//!
//! # Example
//!
//! ```ignore
//! use doc_core::config::ConfigResolver;
//!
//! let config = ConfigResolver::new("/path/to/project").resolve()?;
//! println!("Machine track: {}", config.layout.machine);
//! ```

mod manifest;
mod resolver;

pub use manifest::{
    DocConfig, GraphSettings, LintSettings, ParitySettings, ParityStrategy, PointerSettings,
};
pub use resolver::ConfigResolver;
