use std::fmt;

/// Which resolution tier produced a record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Source {
    /// Structured topic and message endpoints
    Api,
    /// Scraped from the rendered discussion page
    Html,
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Api => write!(f, "api"),
            Source::Html => write!(f, "html"),
        }
    }
}

/// One discussion, normalized
///
/// Built once per link by the resolver and handed to the store unchanged.
/// Optional metadata is carried as empty strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscussionRecord {
    /// Never empty; falls back to a placeholder
    pub title: String,

    /// Canonical link: scheme, host and path
    pub link: String,

    pub author: String,

    /// Message count as text, empty when unknown
    pub comment_count: String,

    /// Passed through as the source formats it
    pub published_date: String,

    /// Trimmed Markdown body, possibly empty
    pub body_markup: String,
}

impl DiscussionRecord {
    pub fn has_body(&self) -> bool {
        !self.body_markup.is_empty()
    }
}
