//! Ranking and truncation of matcher output.

use super::matcher::{FuzzyMatch, FuzzyMatcher};
use super::rows::SearchRow;

/// Maximum number of results returned for a query.
pub const MAX_RESULTS: usize = 20;

/// A ranked search result.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit {
    pub row: SearchRow,
    pub score: f64,
}

/// Runs `query` through `matcher` and ranks the output.
///
/// Empty or whitespace-only queries return nothing without consulting the matcher.
pub fn run_query(matcher: &dyn FuzzyMatcher, query: &str, limit: usize) -> Vec<SearchHit> {
    if query.trim().is_empty() {
        return Vec::new();
    }
    rank(matcher.find(query), matcher.rows(), limit)
}

/// Sorts matches by ascending score, keeping matcher order for ties, and keeps
/// the first `limit`.
pub fn rank(mut matches: Vec<FuzzyMatch>, rows: &[SearchRow], limit: usize) -> Vec<SearchHit> {
    matches.sort_by(|a, b| a.score.total_cmp(&b.score));

    matches
        .into_iter()
        .filter_map(|m| {
            rows.get(m.row).map(|row| SearchHit {
                row: row.clone(),
                score: m.score,
            })
        })
        .take(limit)
        .collect()
}
