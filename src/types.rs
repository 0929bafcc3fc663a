use serde::{Deserialize, Serialize};

/// A level-2 or level-3 heading extracted from a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heading {
    /// Heading text with markers trimmed
    pub text: String,
    /// Anchor id derived from `text`; not unique within a document
    pub id: String,
}

/// One document's extracted metadata for one language.
///
/// `(slug, lang)` identifies an entry. Entries are produced once per build and
/// never edited afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexEntry {
    pub slug: String,
    pub lang: String,
    pub title: String,
    pub headings: Vec<Heading>,
    pub excerpt: String,
}

impl IndexEntry {
    /// Sort key used wherever a canonical entry order is needed.
    pub fn key(&self) -> (&str, &str) {
        (&self.lang, &self.slug)
    }
}
