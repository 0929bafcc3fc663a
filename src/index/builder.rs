//! Builds the flat search index from a directory of `<slug>.<lang>.md` files.

use super::markdown::{self, EXCERPT_MAX_LEN};
use crate::error::BuildError;
use crate::fingerprint::IndexDigest;
use crate::types::IndexEntry;
use ignore::WalkBuilder;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Language tags recognized when no explicit set is configured.
pub const DEFAULT_LANGUAGES: &[&str] = &["en", "zh"];

/// What happened to the artifact on disk after a build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The artifact was created or its content changed.
    Written(IndexDigest),
    /// The existing artifact already held identical content and was left untouched.
    Unchanged(IndexDigest),
}

impl WriteOutcome {
    pub fn digest(&self) -> IndexDigest {
        match self {
            Self::Written(digest) | Self::Unchanged(digest) => *digest,
        }
    }
}

/// Scans a source directory and extracts one [`IndexEntry`] per recognized file.
#[derive(Debug, Clone)]
pub struct IndexBuilder {
    languages: Vec<String>,
    excerpt_max_len: usize,
}

impl Default for IndexBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_LANGUAGES.iter().map(ToString::to_string).collect())
    }
}

impl IndexBuilder {
    pub fn new(languages: Vec<String>) -> Self {
        Self {
            languages,
            excerpt_max_len: EXCERPT_MAX_LEN,
        }
    }

    pub fn with_excerpt_max_len(mut self, excerpt_max_len: usize) -> Self {
        self.excerpt_max_len = excerpt_max_len;
        self
    }

    /// Extracts every `<slug>.<lang>.md` file directly inside `dir`.
    ///
    /// Files with other names or unrecognized language tags are skipped. Any read
    /// failure aborts the whole build so a partial index is never produced.
    /// Entries come out in file-name order.
    pub fn build(&self, dir: &Path) -> Result<Vec<IndexEntry>, BuildError> {
        let start = Instant::now();
        let walker = WalkBuilder::new(dir)
            .max_depth(Some(1))
            .standard_filters(false)
            .sort_by_file_name(|a, b| a.cmp(b))
            .build();

        let mut entries = Vec::new();
        for result in walker {
            let dir_entry = result.map_err(|source| BuildError::ScanDir {
                path: dir.to_path_buf(),
                source,
            })?;

            if dir_entry.depth() == 0 || !dir_entry.file_type().is_some_and(|t| t.is_file()) {
                continue;
            }

            let Some(file_name) = dir_entry.file_name().to_str() else {
                continue;
            };
            let Some((slug, lang)) = parse_file_name(file_name, &self.languages) else {
                tracing::trace!("Skipping {}", file_name);
                continue;
            };

            let path = dir_entry.path();
            let source = fs::read_to_string(path).map_err(|source| BuildError::ReadFile {
                path: path.to_path_buf(),
                source,
            })?;

            let extracted = markdown::extract_with_limit(&source, self.excerpt_max_len);
            tracing::debug!(
                "Indexed {}.{}: {:?} ({} headings)",
                slug,
                lang,
                extracted.title,
                extracted.headings.len()
            );

            entries.push(IndexEntry {
                slug: slug.to_string(),
                lang: lang.to_string(),
                title: extracted.title,
                headings: extracted.headings,
                excerpt: extracted.excerpt,
            });
        }

        tracing::info!(
            "Built index from {}: {} entries in {:?}",
            dir.display(),
            entries.len(),
            start.elapsed()
        );

        Ok(entries)
    }

    /// Builds the index from `input` and writes it to `output`.
    pub fn build_to(&self, input: &Path, output: &Path) -> Result<WriteOutcome, BuildError> {
        let entries = self.build(input)?;
        write_index(&entries, output)
    }
}

/// Splits `<slug>.<lang>.md` into its slug and language parts.
///
/// Returns `None` for any other shape or a language outside `languages`.
pub fn parse_file_name<'a>(file_name: &'a str, languages: &[String]) -> Option<(&'a str, &'a str)> {
    let stem = file_name.strip_suffix(".md")?;
    let (slug, lang) = stem.rsplit_once('.')?;

    if slug.is_empty() || !languages.iter().any(|l| l == lang) {
        return None;
    }

    Some((slug, lang))
}

/// Serializes `entries` to `output` as a JSON array.
///
/// The file is replaced atomically via a sibling temp file. When the existing
/// artifact already has the same digest, nothing is written.
pub fn write_index(entries: &[IndexEntry], output: &Path) -> Result<WriteOutcome, BuildError> {
    let digest = IndexDigest::of(entries);

    if existing_digest(output) == Some(digest) {
        tracing::info!("Index unchanged ({}), leaving {}", digest, output.display());
        return Ok(WriteOutcome::Unchanged(digest));
    }

    let json = serde_json::to_string_pretty(entries)?;
    let write_err = |source| BuildError::WriteIndex {
        path: output.to_path_buf(),
        source,
    };

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(write_err)?;
    }

    let tmp = temp_path(output);
    fs::write(&tmp, json).map_err(write_err)?;
    fs::rename(&tmp, output).map_err(write_err)?;

    tracing::info!(
        "Wrote {} entries to {} (digest {})",
        entries.len(),
        output.display(),
        digest
    );

    Ok(WriteOutcome::Written(digest))
}

fn existing_digest(output: &Path) -> Option<IndexDigest> {
    let content = fs::read_to_string(output).ok()?;
    let entries: Vec<IndexEntry> = serde_json::from_str(&content).ok()?;
    Some(IndexDigest::of(&entries))
}

fn temp_path(output: &Path) -> PathBuf {
    let mut name = output.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    output.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;
    use rstest::rstest;

    fn languages() -> Vec<String> {
        vec!["en".to_string(), "zh".to_string()]
    }

    #[rstest]
    #[case("quickstart.en.md", Some(("quickstart", "en")))]
    #[case("quickstart.zh.md", Some(("quickstart", "zh")))]
    #[case("v1.2-notes.en.md", Some(("v1.2-notes", "en")))]
    #[case("quickstart.fr.md", None)]
    #[case("quickstart.md", None)]
    #[case(".en.md", None)]
    #[case("quickstart.en.txt", None)]
    #[case("README", None)]
    fn test_parse_file_name(#[case] input: &str, #[case] expected: Option<(&str, &str)>) {
        check!(parse_file_name(input, &languages()) == expected);
    }

    #[test]
    fn test_temp_path_is_sibling() {
        let tmp = temp_path(Path::new("public/search-index.json"));
        check!(tmp == Path::new("public/search-index.json.tmp"));
    }
}
