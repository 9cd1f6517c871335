// src/crawl/queue.rs
// =============================================================================
// This module walks the directory listing with an explicit worklist.
//
// How it works:
// 1. Start with the root listing on a stack
// 2. Pop an item; skip it if its URL was already visited
// 3. Listing item: fetch the page, classify every link, push the children
//    (subdirectories and files that pass the filter) back on the stack
// 4. File item: stream it to "{output}/{year}_{month}_{filename}"
// 5. Repeat until the stack is empty and nothing is in flight
//
// Children are pushed in reverse, so the first link of a page is popped first.
// With concurrency 1 the walk is exactly depth-first in link order: a
// subdirectory is finished before the next sibling link is touched. With more
// workers, up to `concurrency` items run at once.
//
// Failures never abort the walk. A listing that cannot be fetched cuts off
// that branch only; a file that cannot be downloaded is recorded and the
// walk carries on.
// =============================================================================

use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{Context, Result};
use futures::future::{BoxFuture, FutureExt};
use futures::stream::{FuturesUnordered, StreamExt};
use reqwest::Client;
use tracing::{debug, info, warn};
use url::Url;

use super::links::{extract_links, Link};
use super::summary::{Failure, FailureKind, RunSummary};
use super::visited::VisitedSet;
use crate::config::MirrorConfig;
use crate::download::{fetch_to_file, Saved};
use crate::error::MirrorError;
use crate::layout::{classify, Classification, FileCandidate};

// One unit of work on the stack
#[derive(Debug)]
enum Task {
    Listing {
        url: Url,
        depth: usize, // 0 for the root listing
    },
    Download {
        candidate: FileCandidate,
        destination: PathBuf,
    },
}

// What a finished unit of work reports back to the coordinating loop
enum Completion {
    Listed {
        url: Url,
        result: Result<Listing, MirrorError>,
    },
    Downloaded {
        url: Url,
        destination: PathBuf,
        result: Result<Saved, MirrorError>,
    },
}

#[derive(Debug, Default)]
struct Listing {
    children: Vec<Task>,
    filtered_out: usize,
    discarded: usize,
}

/// Mirrors one uploads tree. Owns the HTTP client, the run's settings and the
/// set of URLs already handled.
pub struct Mirror {
    client: Client,
    config: Arc<MirrorConfig>,
    visited: Mutex<VisitedSet>,
}

impl Mirror {
    pub fn new(config: MirrorConfig) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(config.timeout)
            .build()
            .context("Failed to create HTTP client")?;
        Ok(Self::with_client(client, config))
    }

    pub fn with_client(client: Client, config: MirrorConfig) -> Self {
        Mirror {
            client,
            config: Arc::new(config),
            visited: Mutex::new(VisitedSet::new()),
        }
    }

    pub fn config(&self) -> &MirrorConfig {
        &self.config
    }

    pub fn visited_count(&self) -> usize {
        self.lock_visited().len()
    }

    /// Walks the tree from the configured root.
    pub async fn run<F>(&self, shutdown: F) -> RunSummary
    where
        F: Future<Output = ()>,
    {
        let root = self.config.root_url().clone();
        self.traverse(root, shutdown).await
    }

    /// Walks the listing at `url` and everything below it.
    ///
    /// URLs visited by an earlier call on the same `Mirror` are not visited
    /// again, so traversing the same root twice does nothing the second time.
    /// When `shutdown` resolves, work in flight is dropped and the summary
    /// comes back with `cancelled` set.
    pub async fn traverse<F>(&self, url: Url, shutdown: F) -> RunSummary
    where
        F: Future<Output = ()>,
    {
        info!("Mirroring {} into {}", url, self.config.output_dir.display());

        let mut summary = RunSummary {
            dry_run: self.config.dry_run,
            ..RunSummary::default()
        };
        let mut stack = vec![Task::Listing { url, depth: 0 }];
        let mut in_flight: FuturesUnordered<BoxFuture<'static, Completion>> =
            FuturesUnordered::new();

        tokio::pin!(shutdown);

        loop {
            while in_flight.len() < self.config.concurrency {
                let Some(task) = stack.pop() else { break };
                if let Some(work) = self.start(task, &mut summary) {
                    in_flight.push(work);
                }
            }

            // Nothing running and nothing left to start
            if in_flight.is_empty() {
                break;
            }

            tokio::select! {
                _ = &mut shutdown => {
                    warn!("Interrupted with {} item(s) in flight", in_flight.len());
                    summary.cancelled = true;
                    break;
                }
                Some(done) = in_flight.next() => self.finish(done, &mut stack, &mut summary),
            }
        }

        info!(
            "Finished: {} page(s) listed, {} file(s), {} failure(s)",
            summary.pages_listed,
            summary.downloaded.len(),
            summary.failures.len()
        );
        summary
    }

    // Turns a task into a future, or None when there is nothing to do for it
    fn start(&self, task: Task, summary: &mut RunSummary) -> Option<BoxFuture<'static, Completion>> {
        match task {
            Task::Listing { url, depth } => {
                if !self.mark_visited(&url) {
                    debug!("Already visited {}", url);
                    return None;
                }

                let client = self.client.clone();
                let config = Arc::clone(&self.config);
                Some(
                    async move {
                        let result = list_page(&client, &config, &url, depth).await;
                        Completion::Listed { url, result }
                    }
                    .boxed(),
                )
            }

            Task::Download {
                candidate,
                destination,
            } => {
                if !self.mark_visited(&candidate.url) {
                    debug!("Already queued {}", candidate.url);
                    return None;
                }

                if self.config.dry_run {
                    if self.config.echo_downloads {
                        println!("Would download: {}", destination.display());
                    }
                    summary.downloaded.push(destination);
                    return None;
                }

                let client = self.client.clone();
                let config = Arc::clone(&self.config);
                let url = candidate.url;
                Some(
                    async move {
                        let result = download(&client, &config, &url, &destination).await;
                        Completion::Downloaded {
                            url,
                            destination,
                            result,
                        }
                    }
                    .boxed(),
                )
            }
        }
    }

    fn finish(&self, done: Completion, stack: &mut Vec<Task>, summary: &mut RunSummary) {
        match done {
            Completion::Listed {
                url,
                result: Ok(listing),
            } => {
                debug!("{} yielded {} item(s)", url, listing.children.len());
                summary.pages_listed += 1;
                summary.filtered_out += listing.filtered_out;
                summary.discarded_links += listing.discarded;
                stack.extend(listing.children.into_iter().rev());
            }

            Completion::Listed {
                url,
                result: Err(e),
            } => {
                warn!("Skipping listing {}: {}", url, e);
                summary.failures.push(Failure {
                    url: url.to_string(),
                    kind: FailureKind::Listing,
                    message: e.to_string(),
                });
            }

            Completion::Downloaded {
                destination,
                result: Ok(Saved::Written(bytes)),
                ..
            } => {
                if self.config.echo_downloads {
                    println!("Downloaded: {}", destination.display());
                }
                summary.bytes_downloaded += bytes;
                summary.downloaded.push(destination);
            }

            Completion::Downloaded {
                destination,
                result: Ok(Saved::AlreadyExists),
                ..
            } => {
                info!("Already present, skipping {}", destination.display());
                summary.skipped_existing += 1;
            }

            Completion::Downloaded {
                url,
                result: Err(e),
                ..
            } => {
                warn!("Failed to download {}: {}", url, e);
                summary.failures.push(Failure {
                    url: url.to_string(),
                    kind: FailureKind::Download,
                    message: e.to_string(),
                });
            }
        }
    }

    // Check-and-insert under one lock, so two workers that discover the same
    // URL cannot both process it
    fn mark_visited(&self, url: &Url) -> bool {
        self.lock_visited().insert(url)
    }

    fn lock_visited(&self) -> std::sync::MutexGuard<'_, VisitedSet> {
        // A panic while holding the lock cannot leave the set half-updated
        self.visited.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

async fn list_page(
    client: &Client,
    config: &MirrorConfig,
    url: &Url,
    depth: usize,
) -> Result<Listing, MirrorError> {
    info!("Listing [depth {}]: {}", depth, url);
    let html = fetch_page(client, url, config.timeout).await?;
    let links = extract_links(&html, url, config.order);
    Ok(plan_children(config, links, depth))
}

// Fetches a listing page and returns its HTML
async fn fetch_page(client: &Client, url: &Url, timeout: Duration) -> Result<String, MirrorError> {
    let response = client
        .get(url.clone())
        .timeout(timeout)
        .send()
        .await
        .map_err(|e| classify_request_error(url, timeout, e))?;

    if !response.status().is_success() {
        return Err(MirrorError::Status {
            url: url.to_string(),
            status: response.status(),
        });
    }

    response
        .text()
        .await
        .map_err(|e| classify_request_error(url, timeout, e))
}

fn classify_request_error(url: &Url, timeout: Duration, error: reqwest::Error) -> MirrorError {
    if error.is_timeout() {
        MirrorError::timeout(url, timeout)
    } else {
        MirrorError::request(url, error)
    }
}

// Sorts the links of one page into new work and rejects
fn plan_children(config: &MirrorConfig, links: Vec<Link>, depth: usize) -> Listing {
    let mut listing = Listing::default();

    for link in links {
        match classify(&link.url, &config.scope, config.current_year) {
            Classification::OutsideRoot => {
                debug!("Outside the tree: {}", link.url);
                listing.discarded += 1;
            }

            Classification::Directory => {
                let next = depth + 1;
                if config.max_depth.is_some_and(|max| next > max) {
                    debug!("Not descending into {} (depth {})", link.url, next);
                    continue;
                }
                listing.children.push(Task::Listing {
                    url: link.url,
                    depth: next,
                });
            }

            Classification::File(candidate) => {
                match config.filter.check(&candidate.filename, &candidate.extension) {
                    Ok(()) => {
                        let destination = candidate.destination(&config.output_dir);
                        listing.children.push(Task::Download {
                            candidate,
                            destination,
                        });
                    }
                    Err(reason) => {
                        debug!("Filtered out {} ({:?})", candidate.url, reason);
                        listing.filtered_out += 1;
                    }
                }
            }

            Classification::Discarded(reason) => {
                debug!("Discarded {} ({:?})", link.url, reason);
                listing.discarded += 1;
            }
        }
    }

    listing
}

async fn download(
    client: &Client,
    config: &MirrorConfig,
    url: &Url,
    destination: &Path,
) -> Result<Saved, MirrorError> {
    if config.skip_existing {
        let exists = tokio::fs::try_exists(destination)
            .await
            .map_err(|e| MirrorError::io(destination, e))?;
        if exists {
            return Ok(Saved::AlreadyExists);
        }
    }

    // With skip-existing the move into place also refuses to replace a file
    // that another worker finished in the meantime
    fetch_to_file(client, url, destination, config.timeout, !config.skip_existing).await
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why a stack instead of recursion?
//    - An async fn cannot call itself without boxing every level
//    - A Vec on the heap grows as deep as the tree needs; the call stack
//      does not
//    - pop() from the end = depth-first; pushing children in reverse keeps
//      them in link order
//
// 2. What is FuturesUnordered?
//    - A set of futures polled together; next() yields whichever finishes first
//    - We never let it hold more than `concurrency` futures
//    - Like buffer_unordered(), but we can keep adding work as results arrive
//
// 3. Why BoxFuture?
//    - Listing futures and download futures are different types
//    - FuturesUnordered needs one type, so both are boxed into
//      Pin<Box<dyn Future + Send>>
//
// 4. Why std::sync::Mutex and not tokio::sync::Mutex?
//    - The lock is taken for one HashSet insert and released immediately
//    - It is never held across an .await, so the std mutex is enough
//
// 5. What does tokio::select! do here?
//    - Waits for whichever comes first: the shutdown signal or a finished task
//    - On shutdown we break out; dropping the remaining futures cancels them
// -----------------------------------------------------------------------------
