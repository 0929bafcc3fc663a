//! Approximate matching of queries against search rows.
//!
//! Scores follow the convention "lower is better": `0.0` means every query term
//! occurs verbatim, `1.0` means nothing resembles the query. A field matches when
//! its score is within the configured threshold; a row's score combines its
//! matching fields, weighted by priority.

use super::rows::SearchRow;
use rapidfuzz::distance::levenshtein;
use std::sync::Arc;

/// Default similarity threshold. Fields scoring above it do not match.
pub const DEFAULT_THRESHOLD: f64 = 0.4;

/// Stand-in for a perfect field score so weighting still orders rows.
const PERFECT_SCORE: f64 = f64::EPSILON;

/// A searchable field of a [`SearchRow`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    SearchText,
    Title,
    HeadingText,
    Excerpt,
}

/// Fields in priority order with their relative weights.
pub const WEIGHTED_FIELDS: [(Field, f64); 4] = [
    (Field::SearchText, 0.4),
    (Field::Title, 0.3),
    (Field::HeadingText, 0.2),
    (Field::Excerpt, 0.1),
];

impl Field {
    fn value(self, row: &SearchRow) -> Option<&str> {
        match self {
            Self::SearchText => Some(&row.search_text),
            Self::Title => Some(&row.title),
            Self::HeadingText => row.heading_text.as_deref(),
            Self::Excerpt => Some(&row.excerpt),
        }
    }
}

/// A matched row, referenced by its position in the matcher's row set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FuzzyMatch {
    pub row: usize,
    pub score: f64,
}

/// Approximate string matching over a fixed set of rows.
pub trait FuzzyMatcher: Send + Sync {
    /// Returns every row matching `query` with its score, in row order.
    fn find(&self, query: &str) -> Vec<FuzzyMatch>;

    /// The rows that [`FuzzyMatch::row`] indexes into.
    fn rows(&self) -> &[SearchRow];
}

/// Lowercased field text and its words, computed once per row set.
#[derive(Debug)]
struct PreparedField {
    field: Field,
    text: String,
    words: Vec<Vec<char>>,
}

/// [`FuzzyMatcher`] backed by rapidfuzz's Levenshtein distance.
///
/// A term that occurs anywhere in a field scores zero regardless of position.
/// Otherwise the term is compared against each word and each word prefix of
/// similar length, which tolerates small misspellings of partial words.
#[derive(Debug)]
pub struct RowMatcher {
    rows: Arc<[SearchRow]>,
    prepared: Vec<Vec<PreparedField>>,
    threshold: f64,
}

impl RowMatcher {
    pub fn new(rows: Arc<[SearchRow]>, threshold: f64) -> Self {
        let prepared = rows.iter().map(prepare_row).collect();
        Self {
            rows,
            prepared,
            threshold,
        }
    }

    fn score_row(&self, fields: &[PreparedField], terms: &[Vec<char>]) -> Option<f64> {
        let mut total: Option<f64> = None;

        for prepared in fields {
            let score = field_score(prepared, terms);
            if score > self.threshold {
                continue;
            }

            let weight = WEIGHTED_FIELDS
                .iter()
                .find(|(field, _)| *field == prepared.field)
                .map_or(1.0, |(_, weight)| *weight);

            *total.get_or_insert(1.0) *= score.max(PERFECT_SCORE).powf(weight);
        }

        total
    }
}

impl FuzzyMatcher for RowMatcher {
    fn find(&self, query: &str) -> Vec<FuzzyMatch> {
        let terms: Vec<Vec<char>> = query
            .split_whitespace()
            .map(|term| term.to_lowercase().chars().collect())
            .collect();

        if terms.is_empty() {
            return Vec::new();
        }

        let matches: Vec<FuzzyMatch> = self
            .prepared
            .iter()
            .enumerate()
            .filter_map(|(row, fields)| {
                self.score_row(fields, &terms)
                    .map(|score| FuzzyMatch { row, score })
            })
            .collect();

        tracing::trace!(
            "Matched {} of {} rows for {:?}",
            matches.len(),
            self.rows.len(),
            query
        );

        matches
    }

    fn rows(&self) -> &[SearchRow] {
        &self.rows
    }
}

fn prepare_row(row: &SearchRow) -> Vec<PreparedField> {
    WEIGHTED_FIELDS
        .iter()
        .filter_map(|(field, _)| {
            let value = field.value(row)?;
            if value.is_empty() {
                return None;
            }
            let text = value.to_lowercase();
            let words = text
                .split(|c: char| !c.is_alphanumeric())
                .filter(|w| !w.is_empty())
                .map(|w| w.chars().collect())
                .collect();
            Some(PreparedField {
                field: *field,
                text,
                words,
            })
        })
        .collect()
}

/// Mean of the per-term scores for one field.
fn field_score(prepared: &PreparedField, terms: &[Vec<char>]) -> f64 {
    let sum: f64 = terms.iter().map(|term| term_score(prepared, term)).sum();
    sum / terms.len() as f64
}

fn term_score(prepared: &PreparedField, term: &[char]) -> f64 {
    let needle: String = term.iter().collect();
    if prepared.text.contains(&needle) {
        return 0.0;
    }

    prepared
        .words
        .iter()
        .map(|word| word_distance(term, word))
        .fold(1.0, f64::min)
}

/// Best normalized edit distance between `term` and `word` or a prefix of it.
fn word_distance(term: &[char], word: &[char]) -> f64 {
    let whole = levenshtein::normalized_distance(term.iter().copied(), word.iter().copied());

    let shortest = term.len().saturating_sub(1).max(1);
    let longest = (term.len() + 1).min(word.len());
    (shortest..=longest)
        .map(|len| {
            levenshtein::normalized_distance(term.iter().copied(), word[..len].iter().copied())
        })
        .fold(whole, f64::min)
}
