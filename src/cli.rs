// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// There is a single command: point it at a domain and it mirrors that
// domain's uploads tree. Everything else is an optional flag that narrows
// which files are fetched or how the walk behaves.
//
// Rust concepts:
// - Structs: the parsed arguments live in one struct
// - Enums + ValueEnum: a closed set of choices for --order
// - Derive macros: clap generates the parser from attributes
// =============================================================================

use clap::{Parser, ValueEnum};

// This struct represents our entire CLI application
//
// #[derive(Parser)] tells clap to automatically generate parsing code
#[derive(Parser, Debug, Clone)]
#[command(
    name = "uploads-mirror",
    version,
    about = "Mirror a year/month organized HTTP directory listing to a local folder",
    long_about = "uploads-mirror walks the open /wp-content/uploads/ listing of a site, \
                  keeps the files under YEAR/MONTH/ directories that pass the filters, and \
                  saves each one as YEAR_MONTH_FILENAME in the output directory."
)]
pub struct Cli {
    /// Host to mirror, optionally with a port (e.g., example.com or 127.0.0.1:8080)
    #[arg(long)]
    pub domain: String,

    /// Local directory to save downloaded files into
    #[arg(long, default_value = "downloads")]
    pub output: String,

    /// Comma-separated extensions to never download (e.g., "zip,mp4")
    #[arg(long, value_delimiter = ',', default_value = "")]
    pub skip_types: Vec<String>,

    /// Comma-separated extensions to download exclusively (empty = all)
    #[arg(long, value_delimiter = ',', default_value = "")]
    pub only_types: Vec<String>,

    /// Only download files whose name contains this text (case-insensitive)
    #[arg(long)]
    pub keyword: Option<String>,

    /// URL scheme used to reach the domain
    #[arg(long, default_value = "http")]
    pub scheme: String,

    /// Path below which the year/month tree lives
    #[arg(long, default_value = "/wp-content/uploads/")]
    pub root_prefix: String,

    /// Maximum number of listing pages and downloads in flight at once
    ///
    /// With 1 the walk is strictly sequential and depth-first, which pins
    /// which file wins when two sources map to the same local name.
    #[arg(long, default_value_t = 4)]
    pub concurrency: usize,

    /// Per-request timeout in seconds (also applied to each body chunk)
    #[arg(long, default_value_t = 10)]
    pub timeout: u64,

    /// Stop descending below this many directory levels (unbounded if absent)
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Order in which the links of one listing page are processed
    #[arg(long, value_enum, default_value_t = LinkOrder::Document)]
    pub order: LinkOrder,

    /// Leave files that already exist in the output directory untouched
    #[arg(long)]
    pub skip_existing: bool,

    /// Walk and filter, but only print what would be downloaded
    #[arg(long)]
    pub dry_run: bool,

    /// Print the run summary as JSON instead of a table
    #[arg(long)]
    pub json: bool,

    /// Enable debug logging (RUST_LOG still takes precedence)
    #[arg(short, long)]
    pub verbose: bool,
}

/// How the links found on one listing page are ordered before processing.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LinkOrder {
    /// The order the anchors appear in the HTML
    #[default]
    Document,
    /// Descending lexical order of the raw href values
    Descending,
}
