// src/layout/mod.rs
// =============================================================================
// Knowledge about how the uploads tree is laid out.
//
// Submodules:
// - classify:  directory / file / out-of-tree decision for a resolved link
// - candidate: the YEAR/MONTH/NAME decomposition and the local file name
// =============================================================================

mod candidate;
mod classify;

pub use candidate::FileCandidate;
pub use classify::{classify, Classification, Discard, RootScope};
