//! Changelog entries (`changelog/docs-YYYY-MM-DD.md`)

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use doc_fs::{DocLayout, NormalizedPath, io};

use crate::Result;
use crate::collab::ChangeSource;

/// Append an entry listing the changed documentation files.
///
/// Changes outside both tracks are ignored. Returns `None` when nothing
/// documentation-related changed.
pub fn append_entry(
    layout: &DocLayout,
    changes: &dyn ChangeSource,
    now: DateTime<Utc>,
) -> Result<Option<NormalizedPath>> {
    let mut files: Vec<String> = changes
        .changed_documents()?
        .into_iter()
        .filter(|path| layout.is_in_tracks(path))
        .collect();
    let mut seen = HashSet::new();
    files.retain(|f| seen.insert(f.clone()));

    if files.is_empty() {
        tracing::debug!("No documentation changes for the changelog");
        return Ok(None);
    }

    let day = now.format("%Y-%m-%d").to_string();
    let path = NormalizedPath::new(layout.changelog_dir().join(format!("docs-{}.md", day)));

    let mut content = if path.to_native().is_file() {
        let mut existing = io::read_text(&path)?;
        existing.push('\n');
        existing
    } else {
        format!("# Documentation Changelog: {}\n\n", day)
    };

    content.push_str(&format!("## Update at {}\n\n", now.format("%H:%M:%S")));
    content.push_str("**Files Changed:**\n");
    for file in &files {
        content.push_str(&format!("- `{}`\n", file));
    }
    content.push_str("\n---\n");

    io::write_text(&path, &content)?;
    tracing::info!(path = %path, files = files.len(), "Appended changelog entry");
    Ok(Some(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collab::StaticChanges;
    use chrono::TimeZone;
    use tempfile::TempDir;

    #[test]
    fn appends_to_the_day_file() {
        let temp = TempDir::new().unwrap();
        let layout = DocLayout::with_defaults(temp.path());
        let changes = StaticChanges::new(["context_for_llms/a.md", "src/app.js"]);
        let first = Utc.with_ymd_and_hms(2024, 6, 2, 9, 0, 0).unwrap();
        let second = Utc.with_ymd_and_hms(2024, 6, 2, 17, 30, 0).unwrap();

        let path = append_entry(&layout, &changes, first).unwrap().unwrap();
        append_entry(&layout, &changes, second).unwrap();

        assert!(path.as_str().ends_with("changelog/docs-2024-06-02.md"));
        let text = std::fs::read_to_string(path.to_native()).unwrap();
        assert!(text.starts_with("# Documentation Changelog: 2024-06-02\n"));
        assert!(text.contains("## Update at 09:00:00"));
        assert!(text.contains("## Update at 17:30:00"));
        assert!(text.contains("- `context_for_llms/a.md`"));
        assert!(!text.contains("src/app.js"));
    }

    #[test]
    fn no_doc_changes_writes_nothing() {
        let temp = TempDir::new().unwrap();
        let layout = DocLayout::with_defaults(temp.path());
        let changes = StaticChanges::new(["src/app.js"]);

        assert!(append_entry(&layout, &changes, Utc::now()).unwrap().is_none());
        assert!(!layout.changelog_dir().exists());
    }
}
