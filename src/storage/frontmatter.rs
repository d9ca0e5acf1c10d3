//! The metadata block at the top of every stored document
//!
//! ```text
//! ---
//! title: "Feature ideas: round 2"
//! link: "https://www.kaggle.com/discussion/42"
//! author: jdoe
//! comments: 12
//! published_date: 2024-03-01T10:00:00Z
//! ---
//!
//! body...
//! ```

use crate::discussion::DiscussionRecord;
use std::collections::HashMap;

/// Delimiter line opening and closing the block
pub const DELIMITER: &str = "---";

/// Key order of the block; always all five, always in this order
pub const KEYS: [&str; 5] = ["title", "link", "author", "comments", "published_date"];

const STRUCTURAL: &[char] = &[':', '#', '\n', '\r', '\t', '"'];

/// Quotes a value when it would otherwise break the `key: value` line
pub fn quote_value(value: &str) -> String {
    let needs_quotes = value.contains(STRUCTURAL) || value.starts_with(' ') || value.ends_with(' ');
    if !needs_quotes {
        return value.to_string();
    }

    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        match c {
            '\\' => quoted.push_str("\\\\"),
            '"' => quoted.push_str("\\\""),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            c => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}

/// Reverses [`quote_value`] on the text between the quotes
fn unescape(inner: &str) -> String {
    let mut out = String::with_capacity(inner.len());
    let mut chars = inner.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('t') => out.push('\t'),
            Some('\\') => out.push('\\'),
            Some('"') => out.push('"'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

/// Renders the metadata block, trailing blank line included
pub fn build_front_matter(record: &DiscussionRecord) -> String {
    let values = [
        &record.title,
        &record.link,
        &record.author,
        &record.comment_count,
        &record.published_date,
    ];

    let mut block = format!("{}\n", DELIMITER);
    for (key, value) in KEYS.iter().zip(values) {
        block.push_str(&format!("{}: {}\n", key, quote_value(value)));
    }
    block.push_str(&format!("{}\n\n", DELIMITER));
    block
}

/// Renders a full document: metadata block, trimmed body, one trailing newline
pub fn render_document(record: &DiscussionRecord) -> String {
    format!("{}{}\n", build_front_matter(record), record.body_markup.trim())
}

/// Reads the metadata block at the start of a document
///
/// Returns `None` when the first line is not the delimiter. Lines without a
/// colon are ignored; each remaining line is split on its first colon. A block
/// missing its closing delimiter yields whatever keys were read.
pub fn parse_front_matter(text: &str) -> Option<HashMap<String, String>> {
    let mut lines = text.lines();
    if lines.next()?.trim() != DELIMITER {
        return None;
    }

    let mut meta = HashMap::new();
    for line in lines {
        let line = line.trim();
        if line == DELIMITER {
            break;
        }
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        meta.insert(key.trim().to_string(), parse_value(value.trim()));
    }
    Some(meta)
}

fn parse_value(raw: &str) -> String {
    match raw.strip_prefix('"').and_then(|s| s.strip_suffix('"')) {
        Some(inner) => unescape(inner),
        None => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> DiscussionRecord {
        DiscussionRecord {
            title: "Ideas: \"round\" 2".to_string(),
            link: "https://www.kaggle.com/discussion/42".to_string(),
            author: "jdoe".to_string(),
            comment_count: "12".to_string(),
            published_date: "2024-03-01".to_string(),
            body_markup: "\n  Body text\n\n".to_string(),
        }
    }

    #[test]
    fn test_quote_value_plain() {
        assert_eq!(quote_value("plain title"), "plain title");
        assert_eq!(quote_value(""), "");
    }

    #[test]
    fn test_quote_value_structural() {
        assert_eq!(quote_value("a: b"), "\"a: b\"");
        assert_eq!(quote_value("#1"), "\"#1\"");
        assert_eq!(quote_value(" padded"), "\" padded\"");
        assert_eq!(quote_value("say \"hi\""), "\"say \\\"hi\\\"\"");
        assert_eq!(quote_value("C:\\dir"), "\"C:\\\\dir\"");
        assert_eq!(quote_value("two\nlines"), "\"two\\nlines\"");
    }

    #[test]
    fn test_build_front_matter_layout() {
        let block = build_front_matter(&record());
        assert_eq!(
            block,
            "---\ntitle: \"Ideas: \\\"round\\\" 2\"\nlink: \"https://www.kaggle.com/discussion/42\"\nauthor: jdoe\ncomments: 12\npublished_date: 2024-03-01\n---\n\n"
        );
    }

    #[test]
    fn test_render_document_trims_body() {
        let doc = render_document(&record());
        assert!(doc.ends_with("---\n\nBody text\n"));
    }

    #[test]
    fn test_parse_front_matter_reverses_quoting() {
        let mut rec = record();
        rec.author = "tab\there".to_string();
        let meta = parse_front_matter(&render_document(&rec)).unwrap();
        assert_eq!(meta["title"], "Ideas: \"round\" 2");
        assert_eq!(meta["link"], "https://www.kaggle.com/discussion/42");
        assert_eq!(meta["author"], "tab\there");
        assert_eq!(meta["comments"], "12");
    }

    #[test]
    fn test_parse_front_matter_requires_opening_delimiter() {
        assert!(parse_front_matter("title: x\n").is_none());
        assert!(parse_front_matter("").is_none());
    }

    #[test]
    fn test_parse_front_matter_stops_at_closing_delimiter() {
        let meta = parse_front_matter("---\nlink: a\n---\n\nlink: b\n").unwrap();
        assert_eq!(meta["link"], "a");
    }
}
