// src/layout/candidate.rs
// =============================================================================
// A file found in the listing that sits below a YEAR/MONTH pair.
//
// The local name is built from the path segments below the root prefix:
//   /wp-content/uploads/2023/01/doc.pdf  ->  2023_01_doc.pdf
// Two sources that share year, month and file name map to the same local
// path; whichever is written last wins.
// =============================================================================

use std::path::{Path, PathBuf};

use url::Url;

/// Oldest accepted year directory.
pub(crate) const FIRST_YEAR: i32 = 2000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileCandidate {
    pub url: Url,
    pub year: i32,
    /// Taken verbatim from the second segment, e.g. "03"
    pub month: String,
    /// Percent-decoded last path segment
    pub filename: String,
    pub extension: String,
}

impl FileCandidate {
    /// `{year}_{month}_{filename}`
    pub fn local_name(&self) -> String {
        format!("{}_{}_{}", self.year, self.month, self.filename)
    }

    pub fn destination(&self, output_dir: &Path) -> PathBuf {
        output_dir.join(self.local_name())
    }
}

/// Substring after the last '.', or "" when there is none.
///
/// "archive.tar.gz" -> "gz", "photo.jpg" -> "jpg", "README" -> ""
pub(crate) fn extension_of(filename: &str) -> &str {
    match filename.rfind('.') {
        Some(dot) => &filename[dot + 1..],
        None => "",
    }
}

/// Parses a year directory name. It must be exactly four ASCII digits and
/// fall within `FIRST_YEAR..=current_year`; plugin folders such as
/// "elementor" or "2020-backup" are refused.
pub(crate) fn parse_year(segment: &str, current_year: i32) -> Option<i32> {
    if segment.len() != 4 || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let year: i32 = segment.parse().ok()?;
    (FIRST_YEAR..=current_year).contains(&year).then_some(year)
}
