// src/download.rs
// =============================================================================
// Streams a single file to disk.
//
// - The parent directory is created first
// - The body is written chunk by chunk, so memory use does not depend on the
//   file size
// - Bytes go to a temporary ".<name>.XXXXXX.part" file next to the
//   destination, unique per transfer, and are moved over the destination at
//   the end. Two transfers that map to the same name never share a partial
//   file, and an interrupted transfer never leaves a truncated file under the
//   final name (the partial file is removed when the transfer is dropped)
// - The timeout covers the request and each individual chunk, not the whole
//   transfer, so large files on slow links still complete
// =============================================================================

use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::Path;
use std::time::Duration;

use futures::StreamExt;
use reqwest::Client;
use tempfile::NamedTempFile;
use tokio::io::AsyncWriteExt;
use tracing::debug;
use url::Url;

use crate::error::MirrorError;

/// What happened to the destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Saved {
    /// The body was written under the destination name
    Written(u64),
    /// `overwrite` was off and the destination appeared before the move
    AlreadyExists,
}

/// Downloads `url` into `destination`.
///
/// With `overwrite` set an existing file is replaced. Without it the finished
/// transfer is only moved into place if nothing is there yet, which also
/// settles two concurrent transfers to the same name: the first one wins.
pub async fn fetch_to_file(
    client: &Client,
    url: &Url,
    destination: &Path,
    timeout: Duration,
    overwrite: bool,
) -> Result<Saved, MirrorError> {
    let directory = match destination.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    tokio::fs::create_dir_all(directory)
        .await
        .map_err(|e| MirrorError::io(directory, e))?;

    let response = tokio::time::timeout(timeout, client.get(url.clone()).send())
        .await
        .map_err(|_| MirrorError::timeout(url, timeout))?
        .map_err(|e| MirrorError::request(url, e))?;

    if !response.status().is_success() {
        return Err(MirrorError::Status {
            url: url.to_string(),
            status: response.status(),
        });
    }

    // The TempPath deletes the partial file on every early return
    let (file, partial) = partial_file(directory, destination)?.into_parts();
    let mut file = tokio::fs::File::from_std(file);
    let written = write_body(response, url, &mut file, &partial, timeout).await?;
    drop(file);

    let moved = if overwrite {
        partial.persist(destination)
    } else {
        partial.persist_noclobber(destination)
    };

    match moved {
        Ok(()) => {
            debug!("Wrote {} bytes to {}", written, destination.display());
            Ok(Saved::Written(written))
        }
        Err(e) if !overwrite && e.error.kind() == ErrorKind::AlreadyExists => {
            debug!("{} appeared meanwhile, keeping it", destination.display());
            Ok(Saved::AlreadyExists)
        }
        Err(e) => Err(MirrorError::io(destination, e.error)),
    }
}

async fn write_body(
    response: reqwest::Response,
    url: &Url,
    file: &mut tokio::fs::File,
    partial: &Path,
    timeout: Duration,
) -> Result<u64, MirrorError> {
    let mut stream = response.bytes_stream();
    let mut written: u64 = 0;

    loop {
        let next = tokio::time::timeout(timeout, stream.next())
            .await
            .map_err(|_| MirrorError::timeout(url, timeout))?;

        let Some(chunk) = next else { break };
        let chunk = chunk.map_err(|e| MirrorError::request(url, e))?;

        file.write_all(&chunk)
            .await
            .map_err(|e| MirrorError::io(partial, e))?;
        written += chunk.len() as u64;
    }

    file.flush().await.map_err(|e| MirrorError::io(partial, e))?;
    Ok(written)
}

// "downloads/2023_01_doc.pdf" -> "downloads/.2023_01_doc.pdf.Ab12Cd.part"
fn partial_file(directory: &Path, destination: &Path) -> Result<NamedTempFile, MirrorError> {
    let mut prefix = OsString::from(".");
    prefix.push(destination.file_name().unwrap_or_default());
    prefix.push(".");

    tempfile::Builder::new()
        .prefix(&prefix)
        .suffix(".part")
        .tempfile_in(directory)
        .map_err(|e| MirrorError::io(directory, e))
}
