// src/crawl/summary.rs
// =============================================================================
// What happened during one run.
//
// The traverser never aborts on a single failure; instead every outcome is
// counted here and the binary turns the totals into an exit code:
//   0   = everything that was attempted succeeded
//   1   = at least one listing page or download failed
//   130 = the run was interrupted
// =============================================================================

use std::path::PathBuf;

use serde::Serialize;

#[derive(Debug, Clone, Default, Serialize)]
pub struct RunSummary {
    /// Listing pages fetched and parsed
    pub pages_listed: usize,
    /// Files written (or that would be written, in a dry run)
    pub downloaded: Vec<PathBuf>,
    pub bytes_downloaded: u64,
    /// Files left alone because the destination already existed
    pub skipped_existing: usize,
    /// Candidate files rejected by the extension/keyword filter
    pub filtered_out: usize,
    /// Links outside the tree or not shaped like YEAR/MONTH/NAME
    pub discarded_links: usize,
    pub failures: Vec<Failure>,
    pub cancelled: bool,
    pub dry_run: bool,
}

/// A listing page or a file that could not be fetched.
#[derive(Debug, Clone, Serialize)]
pub struct Failure {
    pub url: String,
    pub kind: FailureKind,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    Listing,
    Download,
}

impl RunSummary {
    pub fn is_ok(&self) -> bool {
        self.failures.is_empty() && !self.cancelled
    }

    pub fn exit_code(&self) -> i32 {
        if self.cancelled {
            130
        } else if !self.failures.is_empty() {
            1
        } else {
            0
        }
    }

    pub fn failed_count(&self, kind: FailureKind) -> usize {
        self.failures.iter().filter(|f| f.kind == kind).count()
    }
}
