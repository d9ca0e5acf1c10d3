use crate::html::markdown::{decode_entities, strip_tags};
use regex::Regex;
use std::sync::LazyLock;

/// Title used when neither the page nor the API yields one
pub const UNTITLED: &str = "untitled_discussion";

static FIRST_H1: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<h1\b[^>]*>(.*?)</h1\s*>").unwrap());

static OG_TITLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+property\s*=\s*["']og:title["'][^>]+content\s*=\s*["']([^"']+)["']"#)
        .unwrap()
});

/// Picks a best-effort title from raw HTML
///
/// Prefers the text of the first `<h1>`, then the `og:title` meta tag, then
/// [`UNTITLED`]. Entities are decoded the same way as in the body.
pub fn extract_title(body: &[u8]) -> String {
    let html = String::from_utf8_lossy(body);

    let from_h1 = FIRST_H1
        .captures(&html)
        .map(|caps| decode_entities(&strip_tags(&caps[1])).trim().to_string())
        .filter(|t| !t.is_empty());
    if let Some(title) = from_h1 {
        return title;
    }

    OG_TITLE
        .captures(&html)
        .map(|caps| decode_entities(&caps[1]).trim().to_string())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| UNTITLED.to_string())
}
