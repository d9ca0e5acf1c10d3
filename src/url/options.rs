use crate::url::canonical::normalize_choice;
use crate::{ConfigError, ConfigResult};
use url::Url;

/// Listing sort orders accepted by the remote platform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Hotness,
    RecentComments,
    RecentlyPosted,
    MostVotes,
    MostComments,
}

impl SortOrder {
    const TABLE: [(&'static str, SortOrder); 5] = [
        ("hotness", SortOrder::Hotness),
        ("recent_comments", SortOrder::RecentComments),
        ("recently_posted", SortOrder::RecentlyPosted),
        ("most_votes", SortOrder::MostVotes),
        ("most_comments", SortOrder::MostComments),
    ];

    /// Looks up an already-normalized key
    pub fn from_key(key: &str) -> Option<Self> {
        Self::TABLE
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, sort)| *sort)
    }

    /// Parses a user-supplied option string
    ///
    /// Blank input means "not supplied" and yields `Ok(None)`; anything else
    /// that is not in the table is a configuration error.
    pub fn parse_choice(raw: &str) -> ConfigResult<Option<Self>> {
        parse_with(raw, "sort", Self::from_key)
    }

    /// Value sent to the remote `sort` parameter
    pub fn as_param(&self) -> &'static str {
        match self {
            Self::Hotness => "hotness",
            Self::RecentComments => "recent-comments",
            Self::RecentlyPosted => "recently-posted",
            Self::MostVotes => "most-votes",
            Self::MostComments => "most-comments",
        }
    }
}

/// Listing time windows accepted by the remote platform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeFilter {
    Last30Days,
    Last7Days,
    Today,
}

impl TimeFilter {
    const TABLE: [(&'static str, TimeFilter); 3] = [
        ("last_30_days", TimeFilter::Last30Days),
        ("last_7_days", TimeFilter::Last7Days),
        ("today", TimeFilter::Today),
    ];

    /// Looks up an already-normalized key
    pub fn from_key(key: &str) -> Option<Self> {
        Self::TABLE
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, filter)| *filter)
    }

    /// Parses a user-supplied option string; see [`SortOrder::parse_choice`]
    pub fn parse_choice(raw: &str) -> ConfigResult<Option<Self>> {
        parse_with(raw, "time filter", Self::from_key)
    }

    /// Value sent to the remote `time` parameter
    pub fn as_param(&self) -> &'static str {
        match self {
            Self::Last30Days => "last-30-days",
            Self::Last7Days => "last-7-days",
            Self::Today => "today",
        }
    }
}

fn parse_with<T>(
    raw: &str,
    kind: &'static str,
    lookup: impl Fn(&str) -> Option<T>,
) -> ConfigResult<Option<T>> {
    let key = normalize_choice(raw);
    if key.is_empty() {
        return Ok(None);
    }
    lookup(&key).map(Some).ok_or_else(|| ConfigError::UnknownOption {
        kind,
        value: raw.to_string(),
    })
}

/// Query pairs for the optional sort and time parameters, in that order
pub fn listing_params(
    sort: Option<SortOrder>,
    time: Option<TimeFilter>,
) -> Vec<(&'static str, String)> {
    let mut params = Vec::new();
    if let Some(sort) = sort {
        params.push(("sort", sort.as_param().to_string()));
    }
    if let Some(time) = time {
        params.push(("time", time.as_param().to_string()));
    }
    params
}

/// Builds the site-wide discussion listing URL
pub fn listing_url(root: &Url, sort: Option<SortOrder>, time: Option<TimeFilter>) -> String {
    with_params(join_path(root, "discussions"), sort, time)
}

/// Builds the discussion listing URL of one competition
pub fn competition_listing_url(
    root: &Url,
    competition: &str,
    sort: Option<SortOrder>,
    time: Option<TimeFilter>,
) -> String {
    let path = format!("competitions/{}/discussion", competition.trim());
    with_params(join_path(root, &path), sort, time)
}

fn join_path(root: &Url, path: &str) -> Url {
    let mut url = root.clone();
    let base = root.path().trim_end_matches('/');
    url.set_path(&format!("{}/{}", base, path));
    url.set_query(None);
    url.set_fragment(None);
    url
}

fn with_params(mut url: Url, sort: Option<SortOrder>, time: Option<TimeFilter>) -> String {
    let params = listing_params(sort, time);
    if !params.is_empty() {
        url.query_pairs_mut().extend_pairs(params.iter().map(|(k, v)| (*k, v.as_str())));
    }
    url.to_string()
}
