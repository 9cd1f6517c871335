// src/error.rs
// =============================================================================
// Typed errors for the mirror engine.
//
// Every network or filesystem failure that can happen while listing a page or
// downloading a file ends up as one of these variants. The traverser records
// them per item in the run summary instead of aborting the whole run.
// =============================================================================

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum MirrorError {
    /// Connection, DNS, TLS or body-read failure reported by reqwest
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// No response (or no next body chunk) within the per-request timeout
    #[error("request to {url} timed out after {secs}s")]
    Timeout { url: String, secs: u64 },

    /// The server answered, but not with a 2xx status
    #[error("{url} returned HTTP {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl MirrorError {
    pub(crate) fn request(url: &url::Url, source: reqwest::Error) -> Self {
        MirrorError::Request {
            url: url.to_string(),
            source,
        }
    }

    pub(crate) fn timeout(url: &url::Url, limit: std::time::Duration) -> Self {
        MirrorError::Timeout {
            url: url.to_string(),
            secs: limit.as_secs(),
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        MirrorError::Io {
            path: path.into(),
            source,
        }
    }
}
