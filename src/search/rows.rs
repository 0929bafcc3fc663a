//! Expansion of index entries into row-level search units.

use crate::types::IndexEntry;

/// A runtime search unit: a whole document or one heading within it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRow {
    pub slug: String,
    pub lang: String,
    pub title: String,
    pub excerpt: String,
    /// Space-joined text of every field in this row's scope
    pub search_text: String,
    /// Present only on heading rows
    pub heading_id: Option<String>,
    /// Present only on heading rows
    pub heading_text: Option<String>,
}

impl SearchRow {
    pub fn is_heading(&self) -> bool {
        self.heading_id.is_some()
    }
}

/// Expands the entries for `lang` into one document row plus one row per heading.
///
/// Entries in other languages are dropped before expansion. Heading rows follow
/// their document row in heading order.
pub fn expand_rows(entries: &[IndexEntry], lang: &str) -> Vec<SearchRow> {
    entries
        .iter()
        .filter(|entry| entry.lang == lang)
        .flat_map(expand_entry)
        .collect()
}

fn expand_entry(entry: &IndexEntry) -> impl Iterator<Item = SearchRow> + '_ {
    let document = SearchRow {
        slug: entry.slug.clone(),
        lang: entry.lang.clone(),
        title: entry.title.clone(),
        excerpt: entry.excerpt.clone(),
        search_text: join_fields(
            std::iter::once(entry.title.as_str())
                .chain(entry.headings.iter().map(|h| h.text.as_str()))
                .chain(std::iter::once(entry.excerpt.as_str())),
        ),
        heading_id: None,
        heading_text: None,
    };

    let headings = entry.headings.iter().map(move |heading| SearchRow {
        slug: entry.slug.clone(),
        lang: entry.lang.clone(),
        title: entry.title.clone(),
        excerpt: entry.excerpt.clone(),
        search_text: join_fields([
            entry.title.as_str(),
            heading.text.as_str(),
            entry.excerpt.as_str(),
        ]),
        heading_id: Some(heading.id.clone()),
        heading_text: Some(heading.text.clone()),
    });

    std::iter::once(document).chain(headings)
}

fn join_fields<'a>(parts: impl IntoIterator<Item = &'a str>) -> String {
    parts
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
