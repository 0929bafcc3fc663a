//! Build-time indexing of per-language markdown sources.
//!
//! [`markdown`] turns one document into a title, headings and an excerpt;
//! [`builder`] scans a directory of `<slug>.<lang>.md` files and persists the
//! resulting entries as a JSON array.

pub mod builder;
pub mod markdown;

pub use builder::{DEFAULT_LANGUAGES, IndexBuilder, WriteOutcome, parse_file_name, write_index};
pub use markdown::{Extracted, extract, heading_id};

/// File name of the persisted index artifact.
pub const INDEX_FILE_NAME: &str = "search-index.json";
