// src/lib.rs
// =============================================================================
// Library root of uploads-mirror.
//
// The binary in src/main.rs is a thin shell around this: it parses the
// command line, builds a `MirrorConfig`, and hands it to a `Mirror`.
// Keeping the engine in a library lets the integration tests in tests/ drive
// a real traversal against a local HTTP server.
// =============================================================================

pub mod cli;       // src/cli.rs - command-line parsing
pub mod config;    // src/config.rs - immutable per-run settings
pub mod crawl;     // src/crawl/ - worklist traversal of listing pages
pub mod download;  // src/download.rs - streaming a file to disk
pub mod error;     // src/error.rs - typed engine errors
pub mod filter;    // src/filter.rs - only/skip/keyword rules
pub mod layout;    // src/layout/ - YEAR/MONTH path decomposition
pub mod logging;   // src/logging.rs - tracing subscriber setup

pub use cli::{Cli, LinkOrder};
pub use config::MirrorConfig;
pub use crawl::{Mirror, RunSummary};
pub use error::MirrorError;
pub use filter::FilterConfig;
