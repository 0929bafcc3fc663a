//! Markdown extraction: title, section headings and a plain-text excerpt.

use crate::types::Heading;
use regex::Regex;
use std::sync::LazyLock;

/// Maximum excerpt length in characters.
pub const EXCERPT_MAX_LEN: usize = 800;

/// Title used when a document has neither a heading nor any text.
pub const UNTITLED: &str = "Untitled";

/// Heading id used when nothing survives slug stripping.
pub const FALLBACK_HEADING_ID: &str = "section";

static HEADING_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*#{1,6}[ \t]+").expect("valid heading regex"));
static LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]*)\]\([^)]*\)").expect("valid link regex"));
static INLINE_MARKERS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[*_`#]").expect("valid marker regex"));
static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

/// Metadata extracted from a single markdown document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extracted {
    pub title: String,
    pub headings: Vec<Heading>,
    pub excerpt: String,
}

/// Extracts title, headings and excerpt using the default excerpt length.
pub fn extract(markdown: &str) -> Extracted {
    extract_with_limit(markdown, EXCERPT_MAX_LEN)
}

/// Extracts title, headings and excerpt, cutting the excerpt at `excerpt_max_len` characters.
///
/// Only a `# ` marker on the very first line is taken as the title and dropped from
/// the body. `## ` and `### ` lines become headings; they stay in the body so their
/// text shows up in the excerpt once the markers are stripped. If no title was found,
/// the first non-blank, non-heading line is used instead.
pub fn extract_with_limit(markdown: &str, excerpt_max_len: usize) -> Extracted {
    let mut title: Option<String> = None;
    let mut headings = Vec::new();
    let mut body: Vec<&str> = Vec::new();

    for (line_no, line) in markdown.lines().enumerate() {
        if line_no == 0
            && let Some(rest) = strip_marker(line, 1)
        {
            let text = trim_heading_text(rest);
            if !text.is_empty() {
                title = Some(text.to_string());
            }
            continue;
        }

        if let Some(rest) = strip_marker(line, 2).or_else(|| strip_marker(line, 3)) {
            let text = trim_heading_text(rest);
            headings.push(Heading {
                text: text.to_string(),
                id: heading_id(text),
            });
        } else if title.is_none() {
            let candidate = line.trim().trim_start_matches('#').trim();
            if !candidate.is_empty() {
                title = Some(candidate.to_string());
            }
        }

        body.push(line);
    }

    Extracted {
        title: title.unwrap_or_else(|| UNTITLED.to_string()),
        headings,
        excerpt: excerpt(&body.join("\n"), excerpt_max_len),
    }
}

/// Derives a stable anchor id from heading text.
///
/// Whitespace runs become `-`, then everything except ASCII alphanumerics, CJK
/// ideographs, `-` and `_` is dropped. Case is preserved.
pub fn heading_id(text: &str) -> String {
    let hyphenated = WHITESPACE.replace_all(text.trim(), "-");
    let id: String = hyphenated
        .chars()
        .filter(|&c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || is_cjk(c))
        .collect();

    if id.is_empty() {
        FALLBACK_HEADING_ID.to_string()
    } else {
        id
    }
}

fn is_cjk(c: char) -> bool {
    ('\u{4e00}'..='\u{9fa5}').contains(&c)
}

/// Returns the remainder of `line` if it opens with exactly `level` `#` markers
/// followed by whitespace.
fn strip_marker(line: &str, level: usize) -> Option<&str> {
    let rest = line.strip_prefix(&"#".repeat(level))?;
    rest.starts_with([' ', '\t']).then_some(rest)
}

fn trim_heading_text(rest: &str) -> &str {
    rest.trim().trim_end_matches('#').trim_end()
}

/// Strips markdown syntax from `body` and cuts the result to `max_len` characters.
fn excerpt(body: &str, max_len: usize) -> String {
    let text = HEADING_MARKER.replace_all(body, "");
    let text = LINK.replace_all(&text, "$1");
    let text = INLINE_MARKERS.replace_all(&text, "");
    let text = WHITESPACE.replace_all(&text, " ");
    text.trim().chars().take(max_len).collect()
}
