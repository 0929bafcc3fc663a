//! Plain-text rendering of search outcomes for the CLI and MCP tools.

use crate::i18n::{self, Messages};
use crate::search::snippet::render;
use crate::search::{SearchHit, SnippetOptions, highlight};
use crate::session::{SearchOutcome, SessionStatus};
use std::fmt::Write as _;

/// Marks placed around highlighted matches.
pub const MARK_OPEN: &str = "**";
pub const MARK_CLOSE: &str = "**";

/// Renders `outcome` for `query` in `lang`.
///
/// Non-result outcomes become the localized status line.
pub fn format_outcome(
    outcome: &SearchOutcome,
    query: &str,
    lang: &str,
    options: SnippetOptions,
    messages: &dyn Messages,
) -> String {
    match outcome {
        SearchOutcome::Loading => messages.lookup(lang, i18n::LOADING),
        SearchOutcome::EmptyQuery => messages.lookup(lang, i18n::EMPTY_QUERY),
        SearchOutcome::NoResults => messages.lookup(lang, i18n::NO_RESULTS),
        SearchOutcome::Results(hits) => {
            let mut output = format!(
                "{} \"{}\" ({}):\n\n",
                messages.lookup(lang, i18n::RESULTS_FOR),
                query.trim(),
                hits.len()
            );
            for (idx, hit) in hits.iter().enumerate() {
                output.push_str(&format_hit(idx + 1, hit, query, options));
                output.push('\n');
            }
            output
        }
    }
}

/// One numbered result: heading line, navigation path, highlighted snippet.
pub fn format_hit(position: usize, hit: &SearchHit, query: &str, options: SnippetOptions) -> String {
    let mut output = String::new();
    let title = render(&highlight(&hit.row.title, query), MARK_OPEN, MARK_CLOSE);

    let _ = match &hit.row.heading_text {
        Some(heading) => {
            let heading = render(&highlight(heading, query), MARK_OPEN, MARK_CLOSE);
            writeln!(output, "{}. {} › {}", position, title, heading)
        }
        None => writeln!(output, "{}. {}", position, title),
    };
    let _ = writeln!(output, "   {}", hit.path());

    let snippet = hit.snippet(query, options);
    if !snippet.is_empty() {
        let _ = writeln!(
            output,
            "   {}",
            render(&highlight(&snippet, query), MARK_OPEN, MARK_CLOSE)
        );
    }
    output
}

/// Describes a session's load state.
pub fn format_status(status: &SessionStatus) -> String {
    match status {
        SessionStatus::Loading { source } => format!("Index: loading from {}", source),
        SessionStatus::Ready {
            source,
            entries,
            languages,
        } => {
            let languages = if languages.is_empty() {
                "none".to_string()
            } else {
                languages.join(", ")
            };
            format!(
                "Index: ready\nSource: {}\nEntries: {}\nLanguages: {}",
                source, entries, languages
            )
        }
    }
}
