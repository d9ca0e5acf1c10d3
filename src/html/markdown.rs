//! Approximate HTML → Markdown conversion
//!
//! This is a textual pipeline over the raw markup, not a DOM walk. Each rule
//! assumes the earlier ones already ran, so the order below is load-bearing.

use regex::Regex;
use std::sync::LazyLock;

static NOISE_BLOCKS: LazyLock<[Regex; 3]> = LazyLock::new(|| {
    ["script", "style", "noscript"]
        .map(|tag| Regex::new(&format!(r"(?is)<{tag}\b[^>]*>.*?</{tag}\s*>")).unwrap())
});

// Index 0 is <h1>.
static HEADINGS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    (1..=6)
        .map(|level| Regex::new(&format!(r"(?is)<h{level}\b[^>]*>(.*?)</h{level}\s*>")).unwrap())
        .collect()
});

static BLOCK_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<br\s*/?>|</p\s*>|</div\s*>|</li\s*>").unwrap());

static ANCHOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)<a\s[^>]*?href\s*=\s*["']([^"']+)["'][^>]*>(.*?)</a\s*>"#).unwrap()
});

static BOLD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<(?:strong|b)(?:\s[^>]*)?>(.*?)</(?:strong|b)\s*>").unwrap()
});

static ITALIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<(?:em|i)(?:\s[^>]*)?>(.*?)</(?:em|i)\s*>").unwrap());

static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").unwrap());

static EXCESS_NEWLINES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").unwrap());

/// Removes every tag, keeping the text between them
pub fn strip_tags(s: &str) -> String {
    TAG.replace_all(s, "").into_owned()
}

/// Converts raw HTML into readable Markdown-ish text
///
/// Headings, line-level blocks, links and emphasis survive; everything else is
/// reduced to its text. Malformed or deeply nested markup yields imperfect
/// output rather than an error.
///
/// # Example
///
/// ```
/// use forum_scribe::html::html_to_markdown;
///
/// let md = html_to_markdown(b"<h1>Title</h1><p>Hello <strong>World</strong></p>");
/// assert_eq!(md, "# Title\n\nHello **World**");
/// ```
pub fn html_to_markdown(body: &[u8]) -> String {
    let mut s = String::from_utf8_lossy(body).into_owned();

    for block in NOISE_BLOCKS.iter() {
        s = block.replace_all(&s, "").into_owned();
    }

    for level in (1..=6).rev() {
        let hashes = "#".repeat(level);
        s = HEADINGS[level - 1]
            .replace_all(&s, |caps: &regex::Captures| {
                format!("\n\n{} {}\n\n", hashes, strip_tags(&caps[1]).trim())
            })
            .into_owned();
    }

    s = BLOCK_BREAK.replace_all(&s, "\n").into_owned();
    s = ANCHOR.replace_all(&s, "[${2}](${1})").into_owned();
    s = BOLD.replace_all(&s, "**${1}**").into_owned();
    s = ITALIC.replace_all(&s, "_${1}_").into_owned();
    s = strip_tags(&s);
    s = decode_entities(&s);
    s = EXCESS_NEWLINES.replace_all(&s, "\n\n").into_owned();

    s.trim().to_string()
}

/// Decodes the handful of named entities that routinely show up in post bodies
pub(crate) fn decode_entities(s: &str) -> String {
    if !s.contains('&') {
        return s.to_string();
    }
    // &amp; last so "&amp;lt;" stays "&lt;"
    s.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#x27;", "'")
        .replace("&amp;", "&")
}
