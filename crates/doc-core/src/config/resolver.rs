//! Configuration resolution with hierarchical merge
//!
//! The `ConfigResolver` loads configuration layers and deep-merges them, later
//! layers overriding earlier ones key by key.

use crate::Result;
use std::fs;
use std::path::{Path, PathBuf};
use toml::Table;

use super::manifest::DocConfig;
use doc_fs::DocPath;

/// Resolves configuration by merging multiple sources
///
/// 1. Built-in defaults
/// 2. Global config (`<config_dir>/ultra-doc/config.toml`)
/// 3. Repository config (`.ultra-doc.toml`)
/// 4. Local overrides (`.ultra-doc.local.toml`)
pub struct ConfigResolver {
    /// Project root directory
    root: PathBuf,

    /// Override for the global config directory (used for testing).
    /// When `None`, the platform-appropriate directory is used via `dirs::config_dir()`.
    global_config_dir_override: Option<PathBuf>,
}

impl ConfigResolver {
    /// Create a new configuration resolver for the given project root
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            global_config_dir_override: None,
        }
    }

    /// Create a resolver with a custom global config directory.
    pub fn with_global_config_dir(root: impl Into<PathBuf>, global_config_dir: PathBuf) -> Self {
        Self {
            root: root.into(),
            global_config_dir_override: Some(global_config_dir),
        }
    }

    fn global_config_dir(&self) -> Option<PathBuf> {
        if let Some(ref override_dir) = self.global_config_dir_override {
            return Some(override_dir.clone());
        }
        dirs::config_dir().map(|d| d.join("ultra-doc"))
    }

    /// Resolve the configuration by merging all sources
    ///
    /// Missing layers are skipped. Invalid TOML in any layer is an error.
    pub fn resolve(&self) -> Result<DocConfig> {
        let mut merged = Table::new();

        if let Some(global_dir) = self.global_config_dir() {
            let global_config_path = global_dir.join("config.toml");
            Self::merge_layer(&mut merged, &global_config_path, "global")?;
        }

        Self::merge_layer(&mut merged, &self.repo_config_path(), "repository")?;
        Self::merge_layer(&mut merged, &self.local_config_path(), "local")?;

        let config: DocConfig = toml::Value::Table(merged).try_into()?;
        config.validate()?;
        Ok(config)
    }

    fn merge_layer(merged: &mut Table, path: &Path, layer: &str) -> Result<()> {
        if !path.is_file() {
            tracing::debug!(?path, layer, "No config layer found, skipping");
            return Ok(());
        }

        tracing::debug!(?path, layer, "Loading config layer");
        let content = fs::read_to_string(path)?;
        let table: Table = toml::from_str(&content)?;
        deep_merge(merged, table);
        Ok(())
    }

    /// Get the project root path
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn repo_config_path(&self) -> PathBuf {
        self.root.join(DocPath::Config.as_str())
    }

    fn local_config_path(&self) -> PathBuf {
        self.root.join(DocPath::LocalConfig.as_str())
    }

    /// Check if the project has been installed (repository config exists)
    pub fn has_config(&self) -> bool {
        self.repo_config_path().is_file()
    }

    /// Check if local overrides exist
    pub fn has_local_overrides(&self) -> bool {
        self.local_config_path().is_file()
    }
}

/// Merge `overlay` into `base`; nested tables merge recursively, everything
/// else (scalars, arrays) is replaced.
fn deep_merge(base: &mut Table, overlay: Table) {
    for (key, value) in overlay {
        let toml::Value::Table(incoming) = value else {
            base.insert(key, value);
            continue;
        };
        if let Some(toml::Value::Table(existing)) = base.get_mut(&key) {
            deep_merge(existing, incoming);
            continue;
        }
        base.insert(key, toml::Value::Table(incoming));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn resolver_for(temp: &TempDir) -> ConfigResolver {
        ConfigResolver::with_global_config_dir(temp.path(), temp.path().join("global"))
    }

    #[test]
    fn resolve_returns_defaults_when_no_config_exists() {
        let temp = TempDir::new().unwrap();
        let resolver = resolver_for(&temp);

        assert!(!resolver.has_config());
        assert!(!resolver.has_local_overrides());
        assert_eq!(resolver.resolve().unwrap(), DocConfig::default());
    }

    #[test]
    fn resolve_merges_local_overrides_on_top_of_repo_config() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join(".ultra-doc.toml"),
            "version = \"0.1.0\"\n[lint]\nmax_line_length = 100\npreview_limit = 3\n",
        )
        .unwrap();
        std::fs::write(
            temp.path().join(".ultra-doc.local.toml"),
            "[lint]\nmax_line_length = 80\n",
        )
        .unwrap();

        let config = resolver_for(&temp).resolve().unwrap();

        assert_eq!(config.version.as_deref(), Some("0.1.0"));
        assert_eq!(config.lint.max_line_length, 80);
        // Repo-only keys in the same table survive the overlay
        assert_eq!(config.lint.preview_limit, 3);
    }

    #[test]
    fn global_layer_is_lowest_priority() {
        let temp = TempDir::new().unwrap();
        let global = temp.path().join("global");
        std::fs::create_dir_all(&global).unwrap();
        std::fs::write(
            global.join("config.toml"),
            "[parity]\ntolerance_ms = 5000\n[lint]\nmax_line_length = 90\n",
        )
        .unwrap();
        std::fs::write(
            temp.path().join(".ultra-doc.toml"),
            "[lint]\nmax_line_length = 110\n",
        )
        .unwrap();

        let config = resolver_for(&temp).resolve().unwrap();
        assert_eq!(config.parity.tolerance_ms, 5000);
        assert_eq!(config.lint.max_line_length, 110);
    }

    #[test]
    fn invalid_toml_is_an_error() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join(".ultra-doc.toml"), "[lint\n").unwrap();

        assert!(resolver_for(&temp).resolve().is_err());
    }
}
