// src/filter.rs
// =============================================================================
// The per-run file filter.
//
// A candidate file is downloaded only if ALL of these hold:
//   1. the only-types list is empty, or contains the file's extension
//   2. the skip-types list does not contain the file's extension
//   3. no keyword is set, or the keyword appears in the file name
//
// Extensions and the keyword are compared case-insensitively. The filter is
// built once at startup and never changes afterwards.
// =============================================================================

use std::collections::BTreeSet;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterConfig {
    only_extensions: BTreeSet<String>,
    skip_extensions: BTreeSet<String>,
    keyword: Option<String>,
}

/// Why a candidate did not pass the filter. Only used for debug logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterRejection {
    NotInOnlyTypes,
    InSkipTypes,
    KeywordMissing,
}

impl FilterConfig {
    pub fn new<I, J>(only: I, skip: J, keyword: Option<&str>) -> Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
        J: IntoIterator,
        J::Item: AsRef<str>,
    {
        let keyword = keyword
            .map(|k| k.to_lowercase())
            .filter(|k| !k.is_empty());

        FilterConfig {
            only_extensions: normalize_extensions(only),
            skip_extensions: normalize_extensions(skip),
            keyword,
        }
    }

    pub fn only_extensions(&self) -> &BTreeSet<String> {
        &self.only_extensions
    }

    pub fn skip_extensions(&self) -> &BTreeSet<String> {
        &self.skip_extensions
    }

    pub fn keyword(&self) -> Option<&str> {
        self.keyword.as_deref()
    }

    /// Applies the three rules in order and reports the first one that fails.
    pub fn check(&self, filename: &str, extension: &str) -> Result<(), FilterRejection> {
        let extension = extension.to_lowercase();

        if !self.only_extensions.is_empty() && !self.only_extensions.contains(&extension) {
            return Err(FilterRejection::NotInOnlyTypes);
        }
        if self.skip_extensions.contains(&extension) {
            return Err(FilterRejection::InSkipTypes);
        }
        if let Some(keyword) = &self.keyword {
            if !filename.to_lowercase().contains(keyword.as_str()) {
                return Err(FilterRejection::KeywordMissing);
            }
        }
        Ok(())
    }

    #[cfg(test)]
    fn accepts(&self, filename: &str, extension: &str) -> bool {
        self.check(filename, extension).is_ok()
    }
}

// "PDF", ".pdf" and " pdf " all mean the same extension
fn normalize_extensions<I>(items: I) -> BTreeSet<String>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    items
        .into_iter()
        .map(|item| item.as_ref().trim().trim_start_matches('.').to_lowercase())
        .filter(|item| !item.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const NONE: [&str; 0] = [];

    #[test]
    fn test_empty_filter_accepts_everything() {
        let filter = FilterConfig::default();
        assert!(filter.accepts("photo.jpg", "jpg"));
        assert!(filter.accepts("README", ""));
    }

    #[test]
    fn test_only_types() {
        let filter = FilterConfig::new(["pdf"], NONE, None);
        assert!(filter.accepts("doc.pdf", "pdf"));
        assert_eq!(
            filter.check("photo.jpg", "jpg"),
            Err(FilterRejection::NotInOnlyTypes)
        );
        assert!(!filter.accepts("README", ""));
    }

    #[test]
    fn test_skip_types() {
        let filter = FilterConfig::new(NONE, ["zip", "mp4"], None);
        assert!(filter.accepts("doc.pdf", "pdf"));
        assert_eq!(
            filter.check("backup.zip", "zip"),
            Err(FilterRejection::InSkipTypes)
        );
    }

    #[test]
    fn test_skip_wins_over_only() {
        let filter = FilterConfig::new(["pdf"], ["pdf"], None);
        assert_eq!(filter.check("doc.pdf", "pdf"), Err(FilterRejection::InSkipTypes));
    }

    #[test]
    fn test_keyword_is_case_insensitive() {
        let filter = FilterConfig::new(NONE, NONE, Some("Report"));
        assert!(filter.accepts("annual-REPORT-2023.pdf", "pdf"));
        assert_eq!(
            filter.check("invoice.pdf", "pdf"),
            Err(FilterRejection::KeywordMissing)
        );
    }

    #[test]
    fn test_all_rules_are_conjunctive() {
        let filter = FilterConfig::new(["pdf", "docx"], ["docx"], Some("report"));
        assert!(filter.accepts("report.pdf", "pdf"));
        assert!(!filter.accepts("report.docx", "docx"));
        assert!(!filter.accepts("summary.pdf", "pdf"));
        assert!(!filter.accepts("report.jpg", "jpg"));
    }

    #[test]
    fn test_extension_lists_are_normalized() {
        let filter = FilterConfig::new([" .PDF ", "", "Jpg"], NONE, Some(""));
        assert_eq!(filter.only_extensions().len(), 2);
        assert!(filter.accepts("a.PDF", "PDF"));
        assert!(filter.accepts("b.jpg", "jpg"));
        assert!(filter.keyword().is_none());
    }

    #[test]
    fn test_keyword_keeps_surrounding_spaces() {
        let filter = FilterConfig::new(NONE, NONE, Some(" 2023"));
        assert_eq!(filter.keyword(), Some(" 2023"));
        assert!(filter.accepts("report 2023.pdf", "pdf"));
        assert_eq!(
            filter.check("report-2023.pdf", "pdf"),
            Err(FilterRejection::KeywordMissing)
        );
    }
}
