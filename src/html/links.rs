//! Discussion link scanning for listing pages
//!
//! Listing pages are the fallback when the structured topic list is
//! unavailable; every anchor pointing at a discussion is collected.

use crate::url::{canonicalize, ensure_absolute};
use scraper::{Html, Selector};
use std::collections::HashSet;
use std::sync::LazyLock;
use url::Url;

static ANCHORS: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a[href]").unwrap());

/// Path fragments that mark an href as a discussion link
const DISCUSSION_MARKERS: &[&str] = &["/discussion/", "/discussions/"];

/// Extracts discussion links from a rendered listing page
///
/// # Rules
///
/// - Only `<a href>` values containing a discussion path marker are kept
/// - Each href is resolved against `base` and canonicalized
/// - Duplicates are dropped, first-seen order is preserved
///
/// # Example
///
/// ```
/// use forum_scribe::html::extract_discussion_links;
///
/// let html = br#"<a href="/discussion/123/test">A</a><a href="/discussions/456">B</a><a href="/about">C</a>"#;
/// let links = extract_discussion_links(html, "https://www.kaggle.com/discussions");
/// assert_eq!(links, vec![
///     "https://www.kaggle.com/discussion/123/test".to_string(),
///     "https://www.kaggle.com/discussions/456".to_string(),
/// ]);
/// ```
pub fn extract_discussion_links(body: &[u8], base: &str) -> Vec<String> {
    let base_url = match Url::parse(&ensure_absolute(base)) {
        Ok(url) => url,
        Err(e) => {
            tracing::debug!("Unusable listing base {}: {}", base, e);
            return Vec::new();
        }
    };

    let document = Html::parse_document(&String::from_utf8_lossy(body));
    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for element in document.select(&ANCHORS) {
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        if !is_discussion_href(href) {
            continue;
        }
        let Ok(absolute) = base_url.join(href.trim()) else {
            continue;
        };
        let link = canonicalize(absolute.as_str());
        if seen.insert(link.clone()) {
            links.push(link);
        }
    }

    links
}

fn is_discussion_href(href: &str) -> bool {
    DISCUSSION_MARKERS.iter().any(|marker| href.contains(marker))
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://www.kaggle.com/discussions";

    #[test]
    fn test_extracts_both_markers() {
        let html = br#"<a href="/discussion/123/test">A</a><a href="/discussions/456">B</a>"#;
        let links = extract_discussion_links(html, BASE);
        assert_eq!(links.len(), 2);
    }

    #[test]
    fn test_skips_non_discussion_links() {
        let html = br#"<a href="/competitions">C</a><a href="/discussions?sort=hotness">L</a><a href="mailto:a@b.c">M</a>"#;
        assert!(extract_discussion_links(html, BASE).is_empty());
    }

    #[test]
    fn test_dedupes_preserving_order() {
        let html = br##"
            <a href="/discussion/2">two</a>
            <a href="/discussion/1?page=2">one</a>
            <a href="https://www.kaggle.com/discussion/2#comments">two again</a>
            <a href="/discussion/1">one again</a>
        "##;
        let links = extract_discussion_links(html, BASE);
        assert_eq!(
            links,
            vec![
                "https://www.kaggle.com/discussion/2".to_string(),
                "https://www.kaggle.com/discussion/1".to_string(),
            ]
        );
    }

    #[test]
    fn test_relative_to_competition_base() {
        let html = br#"<a href="./discussion/77">rel</a>"#;
        let links = extract_discussion_links(html, "https://www.kaggle.com/competitions/titanic/");
        assert_eq!(
            links,
            vec!["https://www.kaggle.com/competitions/titanic/discussion/77".to_string()]
        );
    }

    #[test]
    fn test_base_query_is_ignored_for_resolution() {
        let html = br#"<a href="/discussion/5">x</a>"#;
        let links =
            extract_discussion_links(html, "https://www.kaggle.com/discussions?sort=hotness");
        assert_eq!(links, vec!["https://www.kaggle.com/discussion/5".to_string()]);
    }
}
