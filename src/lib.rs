pub mod cli;
pub mod config;
pub mod error;
pub mod fingerprint;
pub mod format;
pub mod i18n;
pub mod index;
pub mod nav;
pub mod search;
pub mod server;
pub mod session;
pub mod source;
pub mod tools;
pub mod tracing;
pub mod types;

pub use config::Settings;
pub use error::{BuildError, ConfigError, FetchError, Result};
pub use fingerprint::IndexDigest;
pub use index::{IndexBuilder, WriteOutcome};
pub use search::{SearchHit, SearchRow, Searcher};
pub use session::{SearchOutcome, SearchSession, SessionStatus};
pub use source::{FileSource, HttpSource, IndexSource, StaticSource};
pub use types::{Heading, IndexEntry};
