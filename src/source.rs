//! Where a session fetches its built index from.

use crate::error::FetchError;
use crate::index::INDEX_FILE_NAME;
use crate::types::IndexEntry;
use futures::FutureExt;
use futures::future::BoxFuture;
use std::fmt::Debug;
use std::path::PathBuf;
use std::sync::Arc;

/// A location a built index can be fetched from.
pub trait IndexSource: Send + Sync + Debug {
    /// Fetches the full entry list.
    fn fetch(&self) -> BoxFuture<'static, Result<Vec<IndexEntry>, FetchError>>;

    /// Human-readable location, for logs and status output.
    fn describe(&self) -> String;
}

/// Reads the index artifact from the local filesystem.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    /// A directory is taken to contain the artifact under its standard name.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let path = if path.is_dir() {
            path.join(INDEX_FILE_NAME)
        } else {
            path
        };
        Self { path }
    }
}

impl IndexSource for FileSource {
    fn fetch(&self) -> BoxFuture<'static, Result<Vec<IndexEntry>, FetchError>> {
        let path = self.path.clone();
        async move {
            let bytes = tokio::fs::read(&path)
                .await
                .map_err(|source| FetchError::Io { path, source })?;
            Ok(serde_json::from_slice(&bytes)?)
        }
        .boxed()
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Fetches the index artifact over HTTP.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: reqwest::Client,
    url: String,
}

impl HttpSource {
    /// Fetches exactly `url`.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }

    /// Fetches the artifact at its fixed name under `base_path` of `origin`.
    pub fn for_site(origin: &str, base_path: &str) -> Self {
        Self::new(index_url(origin, base_path))
    }
}

impl IndexSource for HttpSource {
    fn fetch(&self) -> BoxFuture<'static, Result<Vec<IndexEntry>, FetchError>> {
        let client = self.client.clone();
        let url = self.url.clone();
        async move {
            let response = client.get(&url).send().await?;
            let status = response.status();
            if !status.is_success() {
                return Err(FetchError::Status {
                    url,
                    status: status.as_u16(),
                });
            }
            let bytes = response.bytes().await?;
            Ok(serde_json::from_slice(&bytes)?)
        }
        .boxed()
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// An index already in memory.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    entries: Arc<Vec<IndexEntry>>,
}

impl StaticSource {
    pub fn new(entries: Vec<IndexEntry>) -> Self {
        Self {
            entries: Arc::new(entries),
        }
    }
}

impl IndexSource for StaticSource {
    fn fetch(&self) -> BoxFuture<'static, Result<Vec<IndexEntry>, FetchError>> {
        let entries = self.entries.as_ref().clone();
        async move { Ok(entries) }.boxed()
    }

    fn describe(&self) -> String {
        format!("in-memory ({} entries)", self.entries.len())
    }
}

/// URL of the index artifact under `base_path` of `origin`.
pub fn index_url(origin: &str, base_path: &str) -> String {
    let base = base_path.trim_matches('/');
    if base.is_empty() {
        format!("{}/{}", origin.trim_end_matches('/'), INDEX_FILE_NAME)
    } else {
        format!(
            "{}/{}/{}",
            origin.trim_end_matches('/'),
            base,
            INDEX_FILE_NAME
        )
    }
}

/// Picks a source for a user-supplied location.
///
/// `http(s)://` locations ending in `.json` are fetched as-is; other URLs are
/// treated as a site origin and combined with `base_path`. Anything else is a
/// filesystem path.
pub fn source_for(location: &str, base_path: &str) -> Arc<dyn IndexSource> {
    if location.starts_with("http://") || location.starts_with("https://") {
        if location.ends_with(".json") {
            Arc::new(HttpSource::new(location))
        } else {
            Arc::new(HttpSource::for_site(location, base_path))
        }
    } else {
        let path = crate::config::expand_tilde(location);
        Arc::new(FileSource::new(path.into_owned()))
    }
}
