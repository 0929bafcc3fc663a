//! Error handling types and utilities.

use std::path::PathBuf;

/// A specialized Result type for docsift operations.
///
/// This is an alias for `anyhow::Result` with context added via `.context()` and
/// `.with_context()` methods at the binary boundary.
pub type Result<T> = anyhow::Result<T>;

/// Error returned when building the search index fails.
///
/// Every variant is fatal: a build either produces a complete index or nothing.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// The source directory could not be listed.
    #[error("failed to scan source directory {}: {source}", path.display())]
    ScanDir {
        path: PathBuf,
        #[source]
        source: ignore::Error,
    },
    /// A recognized markdown file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The index artifact could not be written.
    #[error("failed to write index to {}: {source}", path.display())]
    WriteIndex {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The index could not be serialized to JSON.
    #[error("failed to serialize index: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Error returned when fetching a built index at runtime.
///
/// Sessions never surface this to callers; it is logged and replaced by an empty index.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("failed to read index file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("index request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("index request to {url} returned status {status}")]
    Status { url: String, status: u16 },
    #[error("malformed index payload: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Error returned when loading a configuration file fails.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
