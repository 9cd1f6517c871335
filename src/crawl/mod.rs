// src/crawl/mod.rs
// =============================================================================
// This module walks a directory listing and mirrors the files it finds.
//
// Features:
// - Depth-first walk with an explicit worklist (no recursion)
// - Bounded number of listings/downloads in flight
// - Stays below the root prefix on the root's origin
// - Every URL handled at most once per run
//
// Submodules:
// - queue:   the worklist and the `Mirror` that drives it
// - links:   anchor extraction from listing pages
// - visited: the per-run set of handled URLs
// - summary: counters and failures of one run
// =============================================================================

mod links;
mod queue;
mod summary;
mod visited;

pub use links::{extract_links, Link};
pub use queue::Mirror;
pub use summary::{Failure, FailureKind, RunSummary};
