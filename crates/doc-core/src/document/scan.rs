//! Line classification shared by the extractor and the lint rules
//!
//! Markdown structure is recognised line by line: a line is either prose, a
//! heading, a fence delimiter or content inside a fenced code block. Headings
//! inside fences are code, not structure.

use regex::Regex;
use std::sync::LazyLock;

static HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{1,6})\s+(.*)$").expect("Invalid heading regex"));

static EMPTY_HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#{1,6}\s*$").expect("Invalid empty heading regex"));

/// A parsed ATX heading
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading {
    /// Number of leading `#` characters (1-6)
    pub level: u8,
    /// Trimmed heading text, possibly empty
    pub text: String,
}

/// Classification of a single line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    /// Ordinary markdown outside code fences
    Text,
    /// A heading line outside code fences
    Heading(Heading),
    /// Bare `#` markers with no separating space; body text, not structure
    EmptyHeading { level: u8 },
    /// Opening ```` ``` ```` fence
    FenceOpen { has_language: bool },
    /// Closing ```` ``` ```` fence
    FenceClose,
    /// Content inside a fenced code block
    Code,
}

impl LineKind {
    /// True for fence delimiter lines.
    pub fn is_fence(&self) -> bool {
        matches!(self, Self::FenceOpen { .. } | Self::FenceClose)
    }

    /// True for headings without text, whether or not they split sections.
    pub fn is_empty_heading(&self) -> bool {
        match self {
            Self::Heading(heading) => heading.text.is_empty(),
            Self::EmptyHeading { .. } => true,
            _ => false,
        }
    }
}

/// A line with its 1-based number and classification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedLine<'a> {
    pub number: usize,
    pub text: &'a str,
    pub kind: LineKind,
}

/// Parse a heading line. The markers must be followed by whitespace.
pub fn parse_heading(line: &str) -> Option<Heading> {
    let caps = HEADING.captures(line)?;
    Some(Heading {
        level: caps[1].len() as u8,
        text: caps[2].trim().to_string(),
    })
}

/// Classify every line of `text`.
pub fn scan_lines(text: &str) -> Vec<ScannedLine<'_>> {
    let mut in_fence = false;

    text.lines()
        .enumerate()
        .map(|(idx, line)| {
            let trimmed = line.trim();
            let kind = if trimmed.starts_with("```") {
                if in_fence {
                    in_fence = false;
                    LineKind::FenceClose
                } else {
                    in_fence = true;
                    LineKind::FenceOpen {
                        has_language: !trimmed.trim_start_matches('`').trim().is_empty(),
                    }
                }
            } else if in_fence {
                LineKind::Code
            } else if let Some(heading) = parse_heading(line) {
                LineKind::Heading(heading)
            } else if EMPTY_HEADING.is_match(line) {
                LineKind::EmptyHeading {
                    level: line.chars().take_while(|c| *c == '#').count() as u8,
                }
            } else {
                LineKind::Text
            };

            ScannedLine {
                number: idx + 1,
                text: line,
                kind,
            }
        })
        .collect()
}
