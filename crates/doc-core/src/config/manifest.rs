//! Parsed form of `.ultra-doc.toml`
//!
//! Every section has defaults, so an empty file (or no file at all) yields
//! the stock two-track layout with the stock lint thresholds.

use crate::{Error, Result};
use doc_fs::LayoutNames;
use serde::{Deserialize, Serialize};

fn default_max_line_length() -> usize {
    120
}

fn default_reference_extensions() -> Vec<String> {
    ["mjs", "js", "ts", "md", "json"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_preview_limit() -> usize {
    5
}

fn default_source_extensions() -> Vec<String> {
    ["js", "mjs", "ts"].iter().map(|s| s.to_string()).collect()
}

fn default_ignored_dirs() -> Vec<String> {
    vec!["node_modules".to_string()]
}

fn default_probe_suffixes() -> Vec<String> {
    [".js", ".mjs", ".ts"].iter().map(|s| s.to_string()).collect()
}

fn default_index_files() -> Vec<String> {
    ["index.js", "index.mjs", "index.ts"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_tolerance_ms() -> u64 {
    1000
}

fn default_verbatim_prefixes() -> Vec<String> {
    vec!["skills/".to_string()]
}

/// `[lint]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LintSettings {
    /// Lines longer than this many characters are reported
    #[serde(default = "default_max_line_length")]
    pub max_line_length: usize,

    /// File suffixes (without the dot) recognised as code references
    #[serde(default = "default_reference_extensions")]
    pub reference_extensions: Vec<String>,

    /// Rule ids removed from the registry before linting
    #[serde(default)]
    pub disabled_rules: Vec<String>,

    /// Number of digest entries shown interactively
    #[serde(default = "default_preview_limit")]
    pub preview_limit: usize,
}

impl Default for LintSettings {
    fn default() -> Self {
        Self {
            max_line_length: default_max_line_length(),
            reference_extensions: default_reference_extensions(),
            disabled_rules: Vec::new(),
            preview_limit: default_preview_limit(),
        }
    }
}

/// `[graph]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphSettings {
    /// Extensions of files that become graph nodes
    #[serde(default = "default_source_extensions")]
    pub source_extensions: Vec<String>,

    /// Directory names never descended into (hidden directories always are skipped)
    #[serde(default = "default_ignored_dirs")]
    pub ignored_dirs: Vec<String>,

    /// Suffixes probed, in order, after the bare import path
    #[serde(default = "default_probe_suffixes")]
    pub probe_suffixes: Vec<String>,

    /// Index files probed, in order, when an import names a directory
    #[serde(default = "default_index_files")]
    pub index_files: Vec<String>,
}

impl Default for GraphSettings {
    fn default() -> Self {
        Self {
            source_extensions: default_source_extensions(),
            ignored_dirs: default_ignored_dirs(),
            probe_suffixes: default_probe_suffixes(),
            index_files: default_index_files(),
        }
    }
}

/// How a mirror is judged stale
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ParityStrategy {
    /// Compare modification times with a tolerance window
    #[default]
    Mtime,
    /// Additionally compare the source hash recorded in the mirror's front matter
    ContentHash,
}

/// `[parity]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParitySettings {
    /// Mirror may be this many milliseconds older than its source
    #[serde(default = "default_tolerance_ms")]
    pub tolerance_ms: u64,

    #[serde(default)]
    pub strategy: ParityStrategy,
}

impl Default for ParitySettings {
    fn default() -> Self {
        Self {
            tolerance_ms: default_tolerance_ms(),
            strategy: ParityStrategy::default(),
        }
    }
}

/// `[pointers]` section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointerSettings {
    /// References starting with one of these are recorded verbatim
    #[serde(default = "default_verbatim_prefixes")]
    pub verbatim_prefixes: Vec<String>,
}

impl Default for PointerSettings {
    fn default() -> Self {
        Self {
            verbatim_prefixes: default_verbatim_prefixes(),
        }
    }
}

/// Full project configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocConfig {
    /// Tool version the project was installed with
    #[serde(default)]
    pub version: Option<String>,

    #[serde(default)]
    pub layout: LayoutNames,

    #[serde(default)]
    pub lint: LintSettings,

    #[serde(default)]
    pub graph: GraphSettings,

    #[serde(default)]
    pub parity: ParitySettings,

    #[serde(default)]
    pub pointers: PointerSettings,
}

impl DocConfig {
    /// Parse a configuration from TOML content
    ///
    /// ```
    /// use doc_core::config::DocConfig;
    ///
    /// let config = DocConfig::parse(r#"
    /// [lint]
    /// max_line_length = 100
    /// "#).unwrap();
    ///
    /// assert_eq!(config.lint.max_line_length, 100);
    /// assert_eq!(config.parity.tolerance_ms, 1000);
    /// ```
    pub fn parse(content: &str) -> Result<Self> {
        let config: DocConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the engine cannot run with.
    pub fn validate(&self) -> Result<()> {
        if self.lint.reference_extensions.is_empty() {
            return Err(Error::InvalidConfig {
                message: "lint.reference_extensions must not be empty".to_string(),
            });
        }
        if self.layout.machine == self.layout.human {
            return Err(Error::InvalidConfig {
                message: format!(
                    "machine and human tracks share the directory '{}'",
                    self.layout.machine
                ),
            });
        }
        Ok(())
    }
}
