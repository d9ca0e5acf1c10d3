use regex::Regex;
use std::sync::LazyLock;
use url::Url;

static TOPIC_ID: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"/discussion/(\d+)").unwrap());

/// Prefixes `https://` onto a link that carries no scheme
///
/// Leading slashes are stripped first, so `//host/path` and `host/path` both
/// become `https://host/path`. Links that already start with `http://` or
/// `https://` are returned unchanged.
///
/// # Examples
///
/// ```
/// use forum_scribe::url::ensure_absolute;
///
/// assert_eq!(ensure_absolute("kaggle.com/discussion/1"), "https://kaggle.com/discussion/1");
/// ```
pub fn ensure_absolute(raw: &str) -> String {
    if raw.starts_with("http://") || raw.starts_with("https://") {
        raw.to_string()
    } else {
        format!("https://{}", raw.trim_start_matches('/'))
    }
}

/// Reduces a link to scheme, host and path
///
/// Query string and fragment are dropped. When the absolute form cannot be
/// parsed the original string comes back untouched, so identity comparisons
/// degrade to plain string equality instead of failing.
///
/// # Examples
///
/// ```
/// use forum_scribe::url::canonicalize;
///
/// let link = canonicalize("https://kaggle.com/discussion/123?foo=bar#section");
/// assert_eq!(link, "https://kaggle.com/discussion/123");
/// ```
pub fn canonicalize(raw: &str) -> String {
    match Url::parse(&ensure_absolute(raw)) {
        Ok(mut url) => {
            url.set_query(None);
            url.set_fragment(None);
            url.to_string()
        }
        Err(_) => raw.to_string(),
    }
}

/// Extracts the numeric topic id from a `/discussion/<digits>` path segment
///
/// Returns `None` for listing pages, slug-only links, and digit runs too large
/// to be an id.
pub fn extract_id(url: &str) -> Option<u64> {
    TOPIC_ID
        .captures(url)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Joins a possibly relative link onto `base` and canonicalizes the result
pub fn resolve_against(base: &Url, raw: &str) -> String {
    match base.join(raw.trim()) {
        Ok(joined) => canonicalize(joined.as_str()),
        Err(_) => canonicalize(raw),
    }
}

/// Normalizes a user-supplied option string for table lookup
///
/// Lower-cases and trims, then maps spaces and hyphens to underscores.
pub fn normalize_choice(s: &str) -> String {
    s.trim().to_lowercase().replace([' ', '-'], "_")
}

/// Returns the first non-empty value, or an empty string
pub fn first_non_empty<'a>(values: &[&'a str]) -> &'a str {
    values.iter().copied().find(|v| !v.is_empty()).unwrap_or("")
}
