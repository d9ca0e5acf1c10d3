use regex::Regex;
use std::sync::LazyLock;

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static UNSAFE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^a-z0-9_\-]+").unwrap());

/// File stem used when a title leaves nothing behind
pub const DEFAULT_SLUG: &str = "discussion";

/// Derives a filesystem-safe file stem from a title
///
/// # Examples
///
/// ```
/// use forum_scribe::storage::slugify_title;
///
/// assert_eq!(slugify_title("Hello, World!!"), "hello_world");
/// assert_eq!(slugify_title("???"), "discussion");
/// ```
pub fn slugify_title(title: &str) -> String {
    let lowered = title.trim().to_lowercase();
    let joined = WHITESPACE.replace_all(&lowered, "_");
    let cleaned = UNSAFE.replace_all(&joined, "");
    let slug = cleaned.trim_matches(|c: char| c == '_' || c == '-');
    if slug.is_empty() {
        DEFAULT_SLUG.to_string()
    } else {
        slug.to_string()
    }
}
