// src/layout/classify.rs
// =============================================================================
// Decides what a resolved link points at.
//
// Every link found on a listing page ends up in exactly one bucket:
// - OutsideRoot: another origin, or a path that is not below the root prefix
//   (parent-directory links, absolute links to other parts of the site)
// - Directory:   path ends in '/', so it is another listing page to walk
// - File:        a YEAR/MONTH/.../NAME path that can be named locally
// - Discarded:   below the root but not shaped like a dated upload
// =============================================================================

use url::Url;

use super::candidate::{extension_of, parse_year, FileCandidate};

/// The origin and path prefix that bound the walk.
#[derive(Debug, Clone)]
pub struct RootScope {
    root: Url,
}

impl RootScope {
    pub fn new(root: Url) -> Self {
        RootScope { root }
    }

    pub fn url(&self) -> &Url {
        &self.root
    }

    pub fn prefix(&self) -> &str {
        self.root.path()
    }

    /// The part of `url`'s path below the root prefix, or None when `url`
    /// lives outside the tree.
    pub fn relative_path<'a>(&self, url: &'a Url) -> Option<&'a str> {
        if url.origin() != self.root.origin() {
            return None;
        }
        url.path().strip_prefix(self.prefix())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    OutsideRoot,
    Directory,
    File(FileCandidate),
    Discarded(Discard),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Discard {
    /// Fewer than two segments below the root
    NotNested,
    /// First segment is not a plausible year
    NotAYear,
    EmptyMonth,
    /// File name does not decode to a single safe path component
    UnsafeFilename,
}

pub fn classify(url: &Url, scope: &RootScope, current_year: i32) -> Classification {
    let Some(relative) = scope.relative_path(url) else {
        return Classification::OutsideRoot;
    };

    if url.path().ends_with('/') {
        return Classification::Directory;
    }

    match classify_file(url, relative, current_year) {
        Ok(candidate) => Classification::File(candidate),
        Err(discard) => Classification::Discarded(discard),
    }
}

fn classify_file(url: &Url, relative: &str, current_year: i32) -> Result<FileCandidate, Discard> {
    let segments: Vec<&str> = relative.split('/').collect();
    if segments.len() < 2 {
        return Err(Discard::NotNested);
    }

    let year = parse_year(segments[0], current_year).ok_or(Discard::NotAYear)?;

    let month = segments[1];
    if month.is_empty() {
        return Err(Discard::EmptyMonth);
    }

    let raw_name = segments[segments.len() - 1];
    let filename = decode_filename(raw_name).ok_or(Discard::UnsafeFilename)?;
    let extension = extension_of(&filename).to_string();

    Ok(FileCandidate {
        url: url.clone(),
        year,
        month: month.to_string(),
        filename,
        extension,
    })
}

// "annual%20report.pdf" -> "annual report.pdf"; rejects anything that would
// escape the output directory once decoded ("..%2Fetc", "a%5Cb", ...)
fn decode_filename(raw: &str) -> Option<String> {
    let decoded = urlencoding::decode(raw).ok()?;
    let unsafe_name = decoded.is_empty()
        || decoded == "."
        || decoded == ".."
        || decoded.contains(['/', '\\', '\0']);
    if unsafe_name {
        return None;
    }
    Some(decoded.into_owned())
}
