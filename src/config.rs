//! Configuration loaded from an optional `docsift.toml`.
//!
//! Every field has a default, so an absent file or a partial file is fine.
//! Command-line flags are applied on top by the binary.

use crate::error::ConfigError;
use crate::index::markdown::EXCERPT_MAX_LEN;
use crate::index::{DEFAULT_LANGUAGES, INDEX_FILE_NAME};
use crate::search::matcher::DEFAULT_THRESHOLD;
use crate::search::rank::MAX_RESULTS;
use crate::search::snippet::{SNIPPET_MAX_LEN, SNIPPET_RADIUS, SnippetOptions};
use serde::Deserialize;
use std::borrow::Cow;
use std::path::{Path, PathBuf};

/// Config file looked up in the working directory when none is given.
pub const CONFIG_FILE_NAME: &str = "docsift.toml";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Language tags recognized in source file names
    pub languages: Vec<String>,
    /// Language searched when a request does not name one
    pub default_lang: String,
    /// Where `build` writes the index and `search`/`serve` read it
    pub index_path: PathBuf,
    /// Site base path the index is served under
    pub base_path: String,
    pub search: SearchSettings,
    pub index: IndexSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            languages: DEFAULT_LANGUAGES.iter().map(ToString::to_string).collect(),
            default_lang: "en".to_string(),
            index_path: PathBuf::from("public").join(INDEX_FILE_NAME),
            base_path: "/".to_string(),
            search: SearchSettings::default(),
            index: IndexSettings::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchSettings {
    pub max_results: usize,
    pub threshold: f64,
    pub snippet_max_len: usize,
    pub snippet_radius: usize,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            max_results: MAX_RESULTS,
            threshold: DEFAULT_THRESHOLD,
            snippet_max_len: SNIPPET_MAX_LEN,
            snippet_radius: SNIPPET_RADIUS,
        }
    }
}

impl SearchSettings {
    pub const fn snippet_options(&self) -> SnippetOptions {
        SnippetOptions {
            max_len: self.snippet_max_len,
            radius: self.snippet_radius,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct IndexSettings {
    pub excerpt_max_len: usize,
}

impl Default for IndexSettings {
    fn default() -> Self {
        Self {
            excerpt_max_len: EXCERPT_MAX_LEN,
        }
    }
}

impl Settings {
    /// Loads settings from `path`, or from `docsift.toml` if it exists, or defaults.
    ///
    /// An explicitly given path must exist; the implicit file is optional.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(path) => PathBuf::from(expand_tilde(&path.to_string_lossy()).into_owned()),
            None => {
                let default = PathBuf::from(CONFIG_FILE_NAME);
                if !default.exists() {
                    tracing::debug!("No {} found, using defaults", CONFIG_FILE_NAME);
                    return Ok(Self::default());
                }
                default
            }
        };

        let content = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        let settings = Self::from_toml(&content, &path)?;
        tracing::debug!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Parses settings from TOML text. `path` is only used in error messages.
    pub fn from_toml(content: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Expands tilde (`~`) in a path to the user's home directory.
///
/// - `~/foo` becomes `/home/user/foo`
/// - `~` becomes `/home/user`
/// - Other paths are returned unchanged
pub fn expand_tilde(path: &str) -> Cow<'_, str> {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return Cow::Owned(home.join(stripped).display().to_string());
        }
    } else if path == "~"
        && let Some(home) = dirs::home_dir()
    {
        return Cow::Owned(home.display().to_string());
    }
    Cow::Borrowed(path)
}
