//! [`TestCorpus`] builder for documentation project scenarios.

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use tempfile::TempDir;

/// Default machine-track directory name
pub const MACHINE: &str = "context_for_llms";
/// Default human-track directory name
pub const HUMAN: &str = "context_for_humans";

/// A temporary project directory with helpers to lay out both tracks.
///
/// # Example
///
/// ```rust,no_run
/// use doc_test_utils::TestCorpus;
///
/// let mut corpus = TestCorpus::new();
/// corpus.install();
/// corpus.machine_doc("api.md", "# API\nSee `src/api.js`.\n");
/// corpus.source_file("src/api.js", "export const x = 1;\n");
/// corpus.assert_file_exists("context_for_llms/api.md");
/// ```
pub struct TestCorpus {
    temp_dir: TempDir,
    /// Whether `install` has been called.
    pub installed: bool,
}

impl Default for TestCorpus {
    fn default() -> Self {
        Self::new()
    }
}

impl TestCorpus {
    /// Create an empty temporary project.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
            installed: false,
        }
    }

    /// Root path of the project.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Absolute path of `relative`.
    pub fn path(&self, relative: &str) -> PathBuf {
        self.root().join(relative)
    }

    /// Write `.ultra-doc.toml` and create the machine track.
    pub fn install(&mut self) {
        self.install_with_config("version = \"0.1.0\"\n");
    }

    /// Like [`install`](Self::install) with explicit config content.
    pub fn install_with_config(&mut self, config: &str) {
        fs::create_dir_all(self.path(MACHINE)).unwrap();
        fs::write(self.path(".ultra-doc.toml"), config).unwrap();
        self.installed = true;
    }

    /// Write a file, creating parent directories.
    pub fn write(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    /// Write a machine-track document.
    pub fn machine_doc(&self, name: &str, content: &str) -> PathBuf {
        self.write(&format!("{MACHINE}/{name}"), content)
    }

    /// Write a human-track mirror.
    pub fn human_doc(&self, name: &str, content: &str) -> PathBuf {
        self.write(&format!("{HUMAN}/{name}"), content)
    }

    /// Write a source file of the project.
    pub fn source_file(&self, relative: &str, content: &str) -> PathBuf {
        self.write(relative, content)
    }

    /// Create an empty directory.
    pub fn dir(&self, relative: &str) -> PathBuf {
        let path = self.path(relative);
        fs::create_dir_all(&path).unwrap();
        path
    }

    /// Set the modification time of `relative`.
    pub fn set_mtime(&self, relative: &str, time: SystemTime) {
        File::options()
            .write(true)
            .open(self.path(relative))
            .and_then(|f| f.set_modified(time))
            .unwrap_or_else(|e| panic!("Could not set mtime of {}: {}", relative, e));
    }

    /// Move the modification time of `relative` `seconds` into the past.
    pub fn age(&self, relative: &str, seconds: u64) {
        let now = SystemTime::now();
        self.set_mtime(relative, now - Duration::from_secs(seconds));
    }

    /// Read a file as text.
    pub fn read(&self, relative: &str) -> String {
        fs::read_to_string(self.path(relative))
            .unwrap_or_else(|_| panic!("Could not read file: {}", relative))
    }

    /// Assert that `relative` exists.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path does not exist.
    pub fn assert_file_exists(&self, relative: &str) {
        let full_path = self.path(relative);
        assert!(
            full_path.exists(),
            "Expected file to exist: {}",
            full_path.display()
        );
    }

    /// Assert that `relative` does **not** exist.
    pub fn assert_file_not_exists(&self, relative: &str) {
        let full_path = self.path(relative);
        assert!(
            !full_path.exists(),
            "Expected file NOT to exist: {}",
            full_path.display()
        );
    }

    /// Assert that the file at `relative` contains `content`.
    pub fn assert_file_contains(&self, relative: &str, content: &str) {
        let file_content = self.read(relative);
        assert!(
            file_content.contains(content),
            "File {} does not contain expected content.\nExpected: {}\nActual: {}",
            relative,
            content,
            file_content
        );
    }
}
