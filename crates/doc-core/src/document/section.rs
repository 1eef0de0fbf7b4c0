//! Splitting a document into heading-delimited sections

use super::scan::{LineKind, scan_lines};

/// A contiguous slice of a document owned by one heading
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Heading text; `None` for the implicit section before the first heading
    pub heading: Option<String>,
    /// Heading level 1-6, 0 for the implicit section
    pub level: u8,
    /// 1-based line of the heading (1 for the implicit section)
    pub start_line: usize,
    /// Body lines joined with `\n`, heading line excluded
    pub body: String,
    /// 1-based line number of the first body line
    body_start: usize,
}

impl Section {
    /// Heading text used in pointer keys (empty for the implicit section).
    pub fn key_heading(&self) -> &str {
        self.heading.as_deref().unwrap_or("")
    }

    /// Body lines paired with their 1-based line numbers in the document.
    pub fn body_lines(&self) -> impl Iterator<Item = (usize, &str)> {
        self.body
            .split('\n')
            .enumerate()
            .map(move |(offset, line)| (self.body_start + offset, line))
    }

    fn open(heading: Option<String>, level: u8, start_line: usize, body_start: usize) -> Self {
        Self {
            heading,
            level,
            start_line,
            body: String::new(),
            body_start,
        }
    }
}

/// Split `text` into sections.
///
/// Every line belongs to the most recently opened section. Lines before the
/// first heading form an implicit section, kept only when they carry content
/// or when the document has no headings at all.
pub fn extract_sections(text: &str) -> Vec<Section> {
    let mut sections = Vec::new();
    let mut current = Section::open(None, 0, 1, 1);
    let mut body_lines: Vec<&str> = Vec::new();

    for line in scan_lines(text) {
        if let LineKind::Heading(heading) = &line.kind {
            let finished = std::mem::replace(
                &mut current,
                Section::open(
                    Some(heading.text.clone()),
                    heading.level,
                    line.number,
                    line.number + 1,
                ),
            );
            // A blank preamble before the first heading carries nothing
            let blank_preamble = finished.heading.is_none()
                && body_lines.iter().all(|l| l.trim().is_empty());
            if !blank_preamble {
                push_section(&mut sections, finished, &body_lines);
            }
            body_lines.clear();
        } else {
            body_lines.push(line.text);
        }
    }
    push_section(&mut sections, current, &body_lines);

    sections
}

fn push_section(sections: &mut Vec<Section>, mut section: Section, body_lines: &[&str]) {
    section.body = body_lines.join("\n");
    sections.push(section);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_headings() {
        let text = "# Title\nintro\n## Setup\nstep one\nstep two\n## Usage\nrun it";
        let sections = extract_sections(text);

        let headings: Vec<_> = sections.iter().map(|s| s.key_heading()).collect();
        assert_eq!(headings, vec!["Title", "Setup", "Usage"]);
        assert_eq!(sections[1].level, 2);
        assert_eq!(sections[1].start_line, 3);
        assert_eq!(sections[1].body, "step one\nstep two");
    }

    #[test]
    fn no_headings_yields_single_implicit_section() {
        let sections = extract_sections("just text\nmore text");
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].heading, None);
        assert_eq!(sections[0].level, 0);
        assert_eq!(sections[0].body, "just text\nmore text");
    }

    #[test]
    fn empty_document_yields_single_implicit_section() {
        let sections = extract_sections("");
        assert_eq!(sections.len(), 1);
        assert!(sections[0].heading.is_none());
    }

    #[test]
    fn preamble_with_content_is_kept() {
        let sections = extract_sections("Last Updated: 2024-01-01\n\n# Title\nbody");
        assert_eq!(sections.len(), 2);
        assert!(sections[0].heading.is_none());
        assert_eq!(sections[1].key_heading(), "Title");
    }

    #[test]
    fn blank_preamble_is_dropped() {
        let sections = extract_sections("\n\n# Title\nbody");
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].key_heading(), "Title");
    }

    #[test]
    fn bare_marker_line_stays_in_enclosing_section() {
        let sections = extract_sections("# Title\n`a.js`\n#\n`b.js`");
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].key_heading(), "Title");
        assert_eq!(sections[0].body, "`a.js`\n#\n`b.js`");
    }

    #[test]
    fn body_lines_carry_document_line_numbers() {
        let sections = extract_sections("# A\none\n# B\ntwo\nthree");
        let lines: Vec<_> = sections[1].body_lines().collect();
        assert_eq!(lines, vec![(4, "two"), (5, "three")]);
    }
}
