//! Shared test fixtures and utilities for integration tests.
//!
//! # Available Fixtures
//!
//! - `docs_site`: a temp directory with a small bilingual docs tree
//! - `built_site`: the same tree with `search-index.json` already built
//!
//! [`TempWorkspace`] provides a reusable temp directory abstraction for any test
//! that needs filesystem isolation.

use docsift::error::FetchError;
use docsift::{IndexBuilder, IndexEntry, IndexSource, WriteOutcome};
use futures::FutureExt;
use futures::future::BoxFuture;
use rstest::fixture;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tempfile::TempDir;
use tokio::sync::oneshot;

pub const QUICKSTART_EN: &str =
    "# Getting Started\n\nInstall the tool.\n\n## Configuration\n\nSet your API key.\n";
pub const QUICKSTART_ZH: &str = "# 快速开始\n\n安装工具。\n\n## 配置\n\n设置密钥。\n";
pub const CHANNELS_EN: &str =
    "# Channels\n\nConnect chat apps.\n\n## Discord\n\nCreate a bot token.\n\n## Slack\n\nInstall the app.\n";

/// A temporary workspace directory for test isolation.
///
/// Provides basic filesystem operations within a temp directory that is
/// automatically cleaned up when dropped.
#[allow(dead_code)] // Methods used across different integration test crates
pub struct TempWorkspace {
    _temp: TempDir,
    root: PathBuf,
}

#[allow(dead_code)] // Methods used across different integration test crates
impl TempWorkspace {
    /// Creates a new empty temporary workspace.
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let root = temp.path().to_path_buf();
        Self { _temp: temp, root }
    }

    /// Returns the root path of this workspace.
    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Creates a directory (and all parent directories) within this workspace.
    ///
    /// # Panics
    /// Panics if directory creation fails.
    pub fn create_dir(&self, path: &str) {
        let full_path = self.root.join(path);
        std::fs::create_dir_all(&full_path)
            .unwrap_or_else(|e| panic!("Failed to create directory '{}': {}", path, e));
    }

    /// Creates a file with the given content within this workspace.
    ///
    /// Parent directories are created automatically if they don't exist.
    ///
    /// # Panics
    /// Panics if file creation fails.
    pub fn create_file(&self, path: &str, content: &str) {
        let full_path = self.root.join(path);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).unwrap_or_else(|e| {
                panic!("Failed to create parent directory for '{}': {}", path, e)
            });
        }
        std::fs::write(&full_path, content)
            .unwrap_or_else(|e| panic!("Failed to write file '{}': {}", path, e));
    }

    /// Reads a file within this workspace.
    pub fn read_file(&self, path: &str) -> String {
        std::fs::read_to_string(self.root.join(path))
            .unwrap_or_else(|e| panic!("Failed to read file '{}': {}", path, e))
    }

    /// Directory holding the markdown sources.
    pub fn docs_dir(&self) -> PathBuf {
        self.root.join("docs")
    }

    /// Where the built index is written.
    pub fn index_path(&self) -> PathBuf {
        self.root.join("public").join("search-index.json")
    }

    /// Builds the index from `docs/` into `public/search-index.json`.
    pub fn build(&self) -> WriteOutcome {
        IndexBuilder::new(vec!["en".to_string(), "zh".to_string()])
            .build_to(&self.docs_dir(), &self.index_path())
            .expect("Failed to build index")
    }
}

impl Default for TempWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

/// A workspace with a small bilingual docs tree under `docs/`.
#[fixture]
pub fn docs_site() -> TempWorkspace {
    let workspace = TempWorkspace::new();
    workspace.create_file("docs/quickstart.en.md", QUICKSTART_EN);
    workspace.create_file("docs/quickstart.zh.md", QUICKSTART_ZH);
    workspace.create_file("docs/channels.en.md", CHANNELS_EN);
    workspace
}

/// [`docs_site`] with the index already built.
#[fixture]
pub fn built_site(docs_site: TempWorkspace) -> TempWorkspace {
    docs_site.build();
    docs_site
}

/// Index source whose fetch completes only when the test releases it.
#[allow(dead_code)] // Used by the session tests only
#[derive(Debug)]
pub struct GatedSource {
    gate: Mutex<Option<oneshot::Receiver<Vec<IndexEntry>>>>,
}

#[allow(dead_code)]
impl GatedSource {
    /// Returns the source and the sender that completes its fetch.
    pub fn new() -> (Self, oneshot::Sender<Vec<IndexEntry>>) {
        let (tx, rx) = oneshot::channel();
        (
            Self {
                gate: Mutex::new(Some(rx)),
            },
            tx,
        )
    }
}

impl IndexSource for GatedSource {
    fn fetch(&self) -> BoxFuture<'static, Result<Vec<IndexEntry>, FetchError>> {
        let gate = self.gate.lock().expect("gate lock poisoned").take();
        async move {
            match gate {
                Some(rx) => Ok(rx.await.unwrap_or_default()),
                None => Ok(Vec::new()),
            }
        }
        .boxed()
    }

    fn describe(&self) -> String {
        "gated".to_string()
    }
}

/// Index source that always fails, like an unreachable server.
#[allow(dead_code)]
#[derive(Debug)]
pub struct FailingSource;

impl IndexSource for FailingSource {
    fn fetch(&self) -> BoxFuture<'static, Result<Vec<IndexEntry>, FetchError>> {
        async move {
            Err(FetchError::Status {
                url: "https://docs.example.com/search-index.json".to_string(),
                status: 503,
            })
        }
        .boxed()
    }

    fn describe(&self) -> String {
        "unreachable".to_string()
    }
}
