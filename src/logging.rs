// src/logging.rs
// =============================================================================
// Logging init: human-readable lines on stderr, filtered by `RUST_LOG`.
//
// stdout is reserved for the per-file "Downloaded:" lines and the summary,
// so diagnostics never mix with output that scripts may parse.
// =============================================================================

use tracing_subscriber::EnvFilter;

/// Installs the global subscriber. `verbose` lowers the default level to
/// debug; an explicit `RUST_LOG` always wins.
pub fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "info,uploads_mirror=debug"
    } else {
        "warn,uploads_mirror=info"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    // try_init: a second call (e.g. from tests) keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(false)
        .try_init();
}
