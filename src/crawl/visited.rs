// src/crawl/visited.rs
// =============================================================================
// The set of URLs already handled in this run.
//
// It only ever grows. A URL is inserted before its page is fetched, so a
// listing that links to itself (or a cycle of listings) is fetched once.
//
// Normalization:
// - the fragment is always dropped
// - listing URLs (path ends in '/') also drop the query, because
//   "2023/?C=M;O=A" is the same listing as "2023/" in another sort order
// =============================================================================

use std::collections::HashSet;

use url::Url;

#[derive(Debug, Default)]
pub(crate) struct VisitedSet {
    seen: HashSet<String>,
}

impl VisitedSet {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Records `url` and returns true if it had not been seen before.
    pub(crate) fn insert(&mut self, url: &Url) -> bool {
        self.seen.insert(normalize(url))
    }

    #[cfg(test)]
    fn contains(&self, url: &Url) -> bool {
        self.seen.contains(&normalize(url))
    }

    pub(crate) fn len(&self) -> usize {
        self.seen.len()
    }

}

fn normalize(url: &Url) -> String {
    let mut url = url.clone();
    url.set_fragment(None);
    if url.path().ends_with('/') {
        url.set_query(None);
    }
    url.into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_insert_is_idempotent() {
        let mut visited = VisitedSet::new();
        assert!(visited.insert(&url("http://example.com/wp-content/uploads/")));
        assert!(!visited.insert(&url("http://example.com/wp-content/uploads/")));
        assert_eq!(visited.len(), 1);
    }

    #[test]
    fn test_fragment_and_listing_query_are_ignored() {
        let mut visited = VisitedSet::new();
        visited.insert(&url("http://example.com/wp-content/uploads/2023/"));
        assert!(visited.contains(&url("http://example.com/wp-content/uploads/2023/#top")));
        assert!(visited.contains(&url("http://example.com/wp-content/uploads/2023/?C=M;O=A")));
    }

    #[test]
    fn test_file_query_is_kept() {
        let mut visited = VisitedSet::new();
        visited.insert(&url("http://example.com/wp-content/uploads/2023/01/a.pdf?v=1"));
        assert!(!visited.contains(&url("http://example.com/wp-content/uploads/2023/01/a.pdf?v=2")));
    }
}
