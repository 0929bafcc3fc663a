//! Snippet selection and highlight spans for result previews.

use regex::RegexBuilder;

/// Maximum snippet length in characters, ellipsis markers included.
pub const SNIPPET_MAX_LEN: usize = 200;

/// Characters kept on each side of a term occurrence.
pub const SNIPPET_RADIUS: usize = 60;

pub const ELLIPSIS: char = '…';

/// Limits applied when cutting a snippet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnippetOptions {
    pub max_len: usize,
    pub radius: usize,
}

impl Default for SnippetOptions {
    fn default() -> Self {
        Self {
            max_len: SNIPPET_MAX_LEN,
            radius: SNIPPET_RADIUS,
        }
    }
}

/// Splits a query into its whitespace-separated terms.
pub fn query_terms(query: &str) -> Vec<&str> {
    query.split_whitespace().collect()
}

/// Picks a preview window of `text` around the query terms, with default limits.
pub fn snippet(text: &str, query: &str) -> String {
    snippet_with(text, query, SnippetOptions::default())
}

/// Picks a preview window of `text` around the query terms.
///
/// Each term's first case-insensitive occurrence yields a window of `radius`
/// characters either side, clipped to the text. The widest window wins, with
/// earlier terms winning ties. Without a matching term the leading text is used.
pub fn snippet_with(text: &str, query: &str, options: SnippetOptions) -> String {
    if options.max_len == 0 {
        return String::new();
    }

    let terms = query_terms(query);
    if terms.is_empty() {
        let head: String = text.chars().take(options.max_len).collect();
        return head.trim().to_string();
    }

    let normalized: Vec<char> = text
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .chars()
        .collect();
    let folded: Vec<char> = normalized.iter().map(|&c| fold_char(c)).collect();

    let mut best: Option<(usize, usize)> = None;
    for term in &terms {
        let needle: Vec<char> = term.chars().map(fold_char).collect();
        let Some(pos) = find(&folded, &needle) else {
            continue;
        };

        let start = pos.saturating_sub(options.radius);
        let end = (pos + needle.len() + options.radius).min(normalized.len());
        if best.is_none_or(|(s, e)| end - start > e - s) {
            best = Some((start, end));
        }
    }

    let (start, end) = best.unwrap_or((0, normalized.len().min(options.max_len)));

    let mut out: Vec<char> = Vec::with_capacity(end - start + 2);
    if start > 0 {
        out.push(ELLIPSIS);
    }
    out.extend_from_slice(&normalized[start..end]);
    if end < normalized.len() {
        out.push(ELLIPSIS);
    }

    if out.len() > options.max_len {
        out.truncate(options.max_len.saturating_sub(1));
        out.push(ELLIPSIS);
    }

    out.into_iter().collect()
}

/// Lowercases a character while keeping a one-to-one character mapping, so
/// positions in the folded text line up with the original.
fn fold_char(c: char) -> char {
    let mut lower = c.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(l), None) => l,
        _ => c,
    }
}

fn find(haystack: &[char], needle: &[char]) -> Option<usize> {
    if needle.is_empty() || needle.len() > haystack.len() {
        return None;
    }
    haystack.windows(needle.len()).position(|window| window == needle)
}

/// A piece of display text, either plain or matching a query term.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    Plain(&'a str),
    Match(&'a str),
}

impl<'a> Segment<'a> {
    pub const fn text(&self) -> &'a str {
        match self {
            Self::Plain(text) | Self::Match(text) => text,
        }
    }

    pub const fn is_match(&self) -> bool {
        matches!(self, Self::Match(_))
    }
}

/// Splits `text` into plain and matching segments for the terms of `query`.
///
/// Matching is case-insensitive and terms are taken literally. Without terms,
/// or for empty text, the whole string comes back as a single plain segment.
pub fn highlight<'a>(text: &'a str, query: &str) -> Vec<Segment<'a>> {
    let terms = query_terms(query);
    if terms.is_empty() || text.is_empty() {
        return vec![Segment::Plain(text)];
    }

    let pattern = terms
        .iter()
        .map(|term| regex::escape(term))
        .collect::<Vec<_>>()
        .join("|");
    let regex = match RegexBuilder::new(&pattern).case_insensitive(true).build() {
        Ok(regex) => regex,
        Err(e) => {
            tracing::debug!("Highlight pattern rejected for {:?}: {}", query, e);
            return vec![Segment::Plain(text)];
        }
    };

    let mut segments = Vec::new();
    let mut last = 0;
    for m in regex.find_iter(text) {
        if m.start() > last {
            segments.push(Segment::Plain(&text[last..m.start()]));
        }
        segments.push(Segment::Match(m.as_str()));
        last = m.end();
    }
    if last < text.len() {
        segments.push(Segment::Plain(&text[last..]));
    }

    segments
}

/// Renders segments back to a string, wrapping matches in `open` and `close`.
pub fn render(segments: &[Segment<'_>], open: &str, close: &str) -> String {
    let mut out = String::new();
    for segment in segments {
        match segment {
            Segment::Plain(text) => out.push_str(text),
            Segment::Match(text) => {
                out.push_str(open);
                out.push_str(text);
                out.push_str(close);
            }
        }
    }
    out
}
