//! Built-in documentation rules

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use super::rule::{LintRule, RuleContext};
use super::Finding;
use crate::document::{LineKind, extract_sections, scan_lines};

static MARKDOWN_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("Invalid link regex"));

/// Heading levels must not skip more than one step deeper.
pub struct HeadingStructure;

impl LintRule for HeadingStructure {
    fn id(&self) -> &str {
        "heading-structure"
    }

    fn description(&self) -> &str {
        "Headings should follow hierarchical structure"
    }

    fn check(&self, _ctx: &RuleContext<'_>, text: &str, _file: &str) -> Vec<Finding> {
        let mut findings = Vec::new();
        let mut previous: Option<u8> = None;

        for line in scan_lines(text) {
            let LineKind::Heading(heading) = &line.kind else {
                continue;
            };
            if heading.text.is_empty() {
                continue;
            }
            if let Some(prev) = previous
                && heading.level > prev + 1
            {
                findings.push(Finding::warning(
                    line.number,
                    format!("Heading level skipped: h{} to h{}", prev, heading.level),
                ));
            }
            previous = Some(heading.level);
        }

        findings
    }
}

/// Fenced code blocks should name their language.
pub struct CodeBlockLanguage;

impl LintRule for CodeBlockLanguage {
    fn id(&self) -> &str {
        "code-block-language"
    }

    fn description(&self) -> &str {
        "Code blocks should specify language"
    }

    fn check(&self, _ctx: &RuleContext<'_>, text: &str, _file: &str) -> Vec<Finding> {
        scan_lines(text)
            .into_iter()
            .filter(|line| line.kind == LineKind::FenceOpen { has_language: false })
            .map(|line| Finding::info(line.number, "Code block missing language identifier"))
            .collect()
    }
}

/// Relative `.md` links must point at an existing machine-track file.
pub struct BrokenInternalLinks;

impl LintRule for BrokenInternalLinks {
    fn id(&self) -> &str {
        "broken-internal-links"
    }

    fn description(&self) -> &str {
        "Check for broken internal links"
    }

    fn check(&self, ctx: &RuleContext<'_>, text: &str, _file: &str) -> Vec<Finding> {
        MARKDOWN_LINK
            .captures_iter(text)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                let url = caps.get(2)?.as_str();
                if !url.ends_with(".md") || url.starts_with("http") {
                    return None;
                }
                if ctx.machine_root.join(url).exists() {
                    return None;
                }
                let line = text[..whole.start()].matches('\n').count() + 1;
                Some(Finding::error(line, format!("Broken internal link: {}", url)))
            })
            .collect()
    }
}

/// Lines should not be excessively long.
pub struct LineLength;

impl LintRule for LineLength {
    fn id(&self) -> &str {
        "line-length"
    }

    fn description(&self) -> &str {
        "Lines should not be excessively long"
    }

    fn check(&self, ctx: &RuleContext<'_>, text: &str, _file: &str) -> Vec<Finding> {
        scan_lines(text)
            .into_iter()
            .filter(|line| !line.kind.is_fence() && !line.text.contains("](http"))
            .filter_map(|line| {
                let length = line.text.chars().count();
                (length > ctx.max_line_length).then(|| {
                    Finding::info(
                        line.number,
                        format!(
                            "Line too long: {} characters (max {})",
                            length, ctx.max_line_length
                        ),
                    )
                })
            })
            .collect()
    }
}

/// Headings must carry text.
pub struct EmptyHeadings;

impl LintRule for EmptyHeadings {
    fn id(&self) -> &str {
        "empty-headings"
    }

    fn description(&self) -> &str {
        "Headings should not be empty"
    }

    fn check(&self, _ctx: &RuleContext<'_>, text: &str, _file: &str) -> Vec<Finding> {
        scan_lines(text)
            .into_iter()
            .filter(|line| line.kind.is_empty_heading())
            .map(|line| Finding::error(line.number, "Empty heading found"))
            .collect()
    }
}

/// Heading text should be unique within a document (case-insensitive).
pub struct DuplicateHeadings;

impl LintRule for DuplicateHeadings {
    fn id(&self) -> &str {
        "duplicate-headings"
    }

    fn description(&self) -> &str {
        "Avoid duplicate headings in same file"
    }

    fn check(&self, _ctx: &RuleContext<'_>, text: &str, _file: &str) -> Vec<Finding> {
        let mut first_seen: HashMap<String, usize> = HashMap::new();
        let mut findings = Vec::new();

        for line in scan_lines(text) {
            let LineKind::Heading(heading) = &line.kind else {
                continue;
            };
            if heading.text.is_empty() {
                continue;
            }
            let key = heading.text.to_lowercase();
            match first_seen.get(&key) {
                Some(first) => findings.push(Finding::warning(
                    line.number,
                    format!(
                        "Duplicate heading: \"{}\" (first seen at line {})",
                        heading.text, first
                    ),
                )),
                None => {
                    first_seen.insert(key, line.number);
                }
            }
        }

        findings
    }
}

/// Inline file references must resolve somewhere in the project.
pub struct DanglingFileReference;

impl LintRule for DanglingFileReference {
    fn id(&self) -> &str {
        "dangling-file-reference"
    }

    fn description(&self) -> &str {
        "Referenced files should exist"
    }

    fn check(&self, ctx: &RuleContext<'_>, text: &str, _file: &str) -> Vec<Finding> {
        let mut reported: Vec<String> = Vec::new();
        let mut findings = Vec::new();

        for reference in ctx.references.find_all(&extract_sections(text)) {
            if reported.contains(&reference.raw) {
                continue;
            }
            if ctx.resolver.resolve(&reference.raw).is_missing() {
                findings.push(Finding::warning(
                    reference.line,
                    format!("Dangling file reference: {}", reference.raw),
                ));
            }
            reported.push(reference.raw);
        }

        findings.sort_by_key(|f| f.line);
        findings
    }
}

/// Every built-in rule, in registration order.
pub fn all() -> Vec<Box<dyn LintRule>> {
    vec![
        Box::new(HeadingStructure),
        Box::new(CodeBlockLanguage),
        Box::new(BrokenInternalLinks),
        Box::new(LineLength),
        Box::new(EmptyHeadings),
        Box::new(DuplicateHeadings),
        Box::new(DanglingFileReference),
    ]
}
