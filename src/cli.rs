use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "docsift")]
#[command(about = "Build and search a fuzzy documentation index", long_about = None)]
pub struct Cli {
    /// Settings file (default: ./docsift.toml if present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build the search index from a directory of markdown files
    Build {
        /// Directory holding <slug>.<lang>.md files
        #[arg(short, long)]
        input: PathBuf,
        /// Where to write search-index.json (default: configured index path)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Search a built index
    Search {
        query: String,
        /// Index file, directory, or http(s) URL
        #[arg(short, long, env = "DOCSIFT_INDEX")]
        index: Option<String>,
        #[arg(short, long, env = "DOCSIFT_LANG")]
        lang: Option<String>,
        #[arg(short = 'n', long)]
        limit: Option<usize>,
    },
    /// Serve documentation search over MCP on stdio
    Serve {
        /// Index file, directory, or http(s) URL
        #[arg(short, long, env = "DOCSIFT_INDEX")]
        index: Option<String>,
        #[arg(short, long, env = "DOCSIFT_LANG")]
        lang: Option<String>,
    },
}
