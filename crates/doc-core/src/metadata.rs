//! Document metadata: front matter and `Last Updated` stamps

use std::sync::LazyLock;

use chrono::NaiveDate;
use doc_fs::{DocLayout, NormalizedPath, io};
use regex::Regex;

use crate::Result;
use crate::collab::ChangeSource;

static TIMESTAMP_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^(?:Last Updated|Updated):[^\n]*$").expect("Invalid timestamp regex")
});

const FRONT_MATTER_DELIMITER: &str = "---";

/// Index of the first line after a leading front matter block, 0 if none.
pub fn front_matter_end(lines: &[&str]) -> usize {
    if lines.first() != Some(&FRONT_MATTER_DELIMITER) {
        return 0;
    }
    lines
        .iter()
        .enumerate()
        .skip(1)
        .find(|(_, line)| **line == FRONT_MATTER_DELIMITER)
        .map(|(idx, _)| idx + 1)
        .unwrap_or(0)
}

/// Value of `key: value` inside the leading front matter block.
pub fn front_matter_value<'a>(text: &'a str, key: &str) -> Option<&'a str> {
    let lines: Vec<&str> = text.lines().collect();
    let end = front_matter_end(&lines);
    if end == 0 {
        return None;
    }
    lines[1..end - 1].iter().find_map(|line| {
        let (k, v) = line.split_once(':')?;
        (k.trim() == key).then(|| v.trim())
    })
}

/// Set the document's `Last Updated` line to `today`.
///
/// An existing `Last Updated:`/`Updated:` line is rewritten; otherwise one is
/// inserted after the front matter (or at the top). Returns `None` when the
/// text already carries today's stamp.
pub fn stamp_last_updated(text: &str, today: NaiveDate) -> Option<String> {
    let stamp = format!("Last Updated: {}", today.format("%Y-%m-%d"));

    if let Some(existing) = TIMESTAMP_LINE.find(text) {
        if existing.as_str() == stamp {
            return None;
        }
        let mut updated = String::with_capacity(text.len());
        updated.push_str(&text[..existing.start()]);
        updated.push_str(&stamp);
        updated.push_str(&text[existing.end()..]);
        return Some(updated);
    }

    let mut lines: Vec<&str> = text.split('\n').collect();
    let insert_at = front_matter_end(&lines);
    lines.insert(insert_at, "");
    lines.insert(insert_at, &stamp);
    Some(lines.join("\n"))
}

/// Stamp every changed machine-track document.
///
/// Change entries are paths relative to the project root; entries outside
/// the machine track are ignored. Returns the names of rewritten documents.
pub fn update_timestamps(
    layout: &DocLayout,
    changes: &dyn ChangeSource,
    today: NaiveDate,
) -> Result<Vec<String>> {
    let mut updated = Vec::new();

    for entry in changes.changed_documents()? {
        let Some(name) = layout.machine_doc_name(&entry) else {
            tracing::debug!(entry = %entry, "Change outside the machine track, not stamped");
            continue;
        };
        let path = NormalizedPath::new(layout.machine_doc(&name));
        if !path.to_native().is_file() {
            continue;
        }

        let text = io::read_text(&path)?;
        if let Some(stamped) = stamp_last_updated(&text, today) {
            io::write_text(&path, &stamped)?;
            tracing::info!(document = %name, "Updated timestamp");
            updated.push(name);
        }
    }

    Ok(updated)
}
