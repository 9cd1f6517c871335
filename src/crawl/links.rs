// src/crawl/links.rs
// =============================================================================
// This module extracts links from a directory listing page.
//
// We use the `scraper` crate which:
// - Parses HTML into a DOM (tolerates the sloppy markup some servers emit)
// - Supports CSS selectors for finding elements
//
// Listing pages carry a few links that are not content:
// - "?C=N;O=D" style links that only re-sort the listing
// - "#..." in-page anchors
// Both are dropped here, before resolution.
// =============================================================================

use scraper::{Html, Selector};
use url::Url;

use crate::cli::LinkOrder;

/// One anchor from a listing page: the raw href and where it resolves to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub href: String,
    pub url: Url,
}

/// Extracts every followable `<a href>` of `html`, resolved against `page_url`.
pub fn extract_links(html: &str, page_url: &Url, order: LinkOrder) -> Vec<Link> {
    let document = Html::parse_document(html);

    // The selector is a constant, it always parses
    let selector = Selector::parse("a[href]").unwrap();

    let mut links: Vec<Link> = document
        .select(&selector)
        .filter_map(|element| element.value().attr("href"))
        .filter_map(|href| resolve_link(page_url, href))
        .collect();

    if order == LinkOrder::Descending {
        links.sort_by(|a, b| b.href.cmp(&a.href));
    }

    links
}

// Resolves a link (possibly relative) to an absolute http(s) URL
fn resolve_link(base: &Url, href: &str) -> Option<Link> {
    let href = href.trim();
    if href.is_empty() || href.starts_with('?') || href.starts_with('#') {
        return None;
    }

    let url = base.join(href).ok()?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return None;
    }

    Some(Link {
        href: href.to_string(),
        url,
    })
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. What does Url::join do?
//    - Resolves a relative reference the way a browser does (RFC 3986)
//    - "01/" against ".../2023/"  -> ".../2023/01/"
//    - "../" against ".../2023/"  -> ".../"
//    - "/x"  against anything     -> "<origin>/x"
//
// 2. Why keep the raw href next to the resolved URL?
//    - The descending order sorts on what the page actually says, not on
//      the resolved form
//
// 3. Why filter_map?
//    - It maps and drops the None results in one pass
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("http://example.com/wp-content/uploads/2023/").unwrap()
    }

    fn urls(links: &[Link]) -> Vec<String> {
        links.iter().map(|l| l.url.to_string()).collect()
    }

    #[test]
    fn test_resolve_relative_links() {
        let html = r#"<a href="01/">01/</a> <a href="02/file.pdf">file</a>"#;
        let links = extract_links(html, &base(), LinkOrder::Document);
        assert_eq!(
            urls(&links),
            vec![
                "http://example.com/wp-content/uploads/2023/01/",
                "http://example.com/wp-content/uploads/2023/02/file.pdf",
            ]
        );
    }

    #[test]
    fn test_resolve_parent_and_absolute_links() {
        let html = r#"
            <a href="../">Parent Directory</a>
            <a href="/wp-content/uploads/2024/">2024</a>
            <a href="https://other.example.org/x.pdf">elsewhere</a>
        "#;
        let links = extract_links(html, &base(), LinkOrder::Document);
        assert_eq!(
            urls(&links),
            vec![
                "http://example.com/wp-content/uploads/",
                "http://example.com/wp-content/uploads/2024/",
                "https://other.example.org/x.pdf",
            ]
        );
    }

    #[test]
    fn test_skip_sort_and_anchor_links() {
        let html = r##"
            <a href="?C=N;O=D">Name</a>
            <a href="?C=M;O=A">Last modified</a>
            <a href="#top">Top</a>
            <a href="01/">01/</a>
        "##;
        let links = extract_links(html, &base(), LinkOrder::Document);
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].href, "01/");
    }

    #[test]
    fn test_skip_non_http_schemes() {
        let html = r#"
            <a href="mailto:admin@example.com">mail</a>
            <a href="javascript:void(0)">js</a>
            <a href="">empty</a>
        "#;
        assert!(extract_links(html, &base(), LinkOrder::Document).is_empty());
    }

    #[test]
    fn test_descending_order() {
        let html = r#"<a href="01/">01</a><a href="03/">03</a><a href="02/">02</a>"#;
        let document = extract_links(html, &base(), LinkOrder::Document);
        let descending = extract_links(html, &base(), LinkOrder::Descending);
        let hrefs = |links: &[Link]| links.iter().map(|l| l.href.clone()).collect::<Vec<_>>();
        assert_eq!(hrefs(&document[..]), vec!["01/", "03/", "02/"]);
        assert_eq!(hrefs(&descending[..]), vec!["03/", "02/", "01/"]);
    }

    #[test]
    fn test_malformed_html_is_tolerated() {
        let html = r#"<html><body><table><tr><td><a href="01/">01/</td></tr><a href="02/""#;
        let links = extract_links(html, &base(), LinkOrder::Document);
        assert!(links.iter().any(|l| l.href == "01/"));
    }
}
