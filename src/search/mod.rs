//! Runtime search over a loaded index.
//!
//! The pipeline is a chain of pure stages: rows are expanded for one language,
//! a matcher is built over them, and each query is matched, ranked and cut to
//! the result limit. Snippets and highlights are computed per displayed hit.

pub mod matcher;
pub mod memo;
pub mod rank;
pub mod rows;
pub mod snippet;

pub use matcher::{FuzzyMatch, FuzzyMatcher, RowMatcher};
pub use memo::Memo;
pub use rank::{SearchHit, run_query};
pub use rows::{SearchRow, expand_rows};
pub use snippet::{Segment, SnippetOptions, highlight, snippet_with};

use crate::config::SearchSettings;
use crate::types::IndexEntry;
use std::sync::Arc;

/// Rows and matcher for one language of one loaded index.
#[derive(Debug)]
pub struct Searcher {
    matcher: RowMatcher,
    settings: SearchSettings,
}

impl Searcher {
    /// Expands `entries` for `lang` and prepares a matcher over the rows.
    pub fn new(entries: &[IndexEntry], lang: &str, settings: SearchSettings) -> Self {
        let rows: Arc<[SearchRow]> = expand_rows(entries, lang).into();
        tracing::debug!("Prepared {} rows for language {}", rows.len(), lang);

        Self {
            matcher: RowMatcher::new(rows, settings.threshold),
            settings,
        }
    }

    pub fn rows(&self) -> &[SearchRow] {
        self.matcher.rows()
    }

    /// Matches and ranks `query`, returning at most `max_results` hits.
    pub fn search(&self, query: &str) -> Vec<SearchHit> {
        run_query(&self.matcher, query, self.settings.max_results)
    }

    pub const fn snippet_options(&self) -> SnippetOptions {
        self.settings.snippet_options()
    }
}

impl SearchHit {
    /// Text the preview snippet is cut from: the row's full search text, so a
    /// heading that lies past the excerpt cut still lands in its snippet.
    pub fn preview_source(&self) -> &str {
        &self.row.search_text
    }

    pub fn snippet(&self, query: &str, options: SnippetOptions) -> String {
        snippet_with(self.preview_source(), query, options)
    }

    /// Navigation target for this hit.
    pub fn path(&self) -> String {
        crate::nav::result_path(&self.row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::extract;
    use assert2::check;

    fn entry(slug: &str, lang: &str, markdown: &str) -> IndexEntry {
        let extracted = extract(markdown);
        IndexEntry {
            slug: slug.to_string(),
            lang: lang.to_string(),
            title: extracted.title,
            headings: extracted.headings,
            excerpt: extracted.excerpt,
        }
    }

    fn corpus() -> Vec<IndexEntry> {
        vec![
            entry(
                "quickstart",
                "en",
                "# Getting Started\n\nInstall the tool.\n\n## Configuration\n\nSet your API key.",
            ),
            entry(
                "channels",
                "en",
                "# Channels\n\nConnect chat apps.\n\n## Discord\n\nCreate a bot token.",
            ),
            entry("quickstart", "zh", "# 快速开始\n\n安装工具。\n\n## 配置\n\n设置密钥。"),
        ]
    }

    #[test]
    fn test_config_query_ranks_heading_first() {
        let searcher = Searcher::new(&corpus(), "en", SearchSettings::default());
        let hits = searcher.search("config");

        check!(!hits.is_empty());
        check!(hits[0].path() == "/docs/quickstart#Configuration");

        let snippet = hits[0].snippet("config", searcher.snippet_options());
        check!(snippet.contains("Configuration Set your API key."));
        let segments = highlight(&snippet, "config");
        check!(segments.iter().any(|s| s.is_match() && s.text() == "Config"));
    }

    #[test]
    fn test_language_isolation() {
        let searcher = Searcher::new(&corpus(), "zh", SearchSettings::default());
        check!(searcher.rows().len() == 2);
        check!(searcher.search("config").is_empty());
        check!(!searcher.search("配置").is_empty());
    }

    #[test]
    fn test_blank_query() {
        let searcher = Searcher::new(&corpus(), "en", SearchSettings::default());
        check!(searcher.search("").is_empty());
        check!(searcher.search("   ").is_empty());
    }

    #[test]
    fn test_snippet_reaches_heading_past_excerpt_cut() {
        let markdown = format!(
            "# Guide\n\n{}\n\n## Deployment\n\nShip it.",
            "filler ".repeat(150)
        );
        let searcher = Searcher::new(
            &[entry("guide", "en", &markdown)],
            "en",
            SearchSettings::default(),
        );
        check!(!searcher.rows()[0].excerpt.contains("Deployment"));

        let hits = searcher.search("deployment");
        let heading_hit = hits
            .iter()
            .find(|h| h.row.is_heading())
            .expect("heading row should match");
        let snippet = heading_hit.snippet("deployment", searcher.snippet_options());
        check!(snippet.contains("Deployment"));
        let segments = highlight(&snippet, "deployment");
        check!(segments.iter().any(|s| s.is_match() && s.text() == "Deployment"));
    }

    #[test]
    fn test_preview_source_without_prose() {
        let searcher = Searcher::new(
            &[entry("empty", "en", "# Only A Title\n")],
            "en",
            SearchSettings::default(),
        );
        let hits = searcher.search("title");
        check!(hits.len() == 1);
        check!(hits[0].preview_source() == "Only A Title");
    }
}
