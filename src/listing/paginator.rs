//! Forum topic-list pagination
//!
//! Pages are requested strictly one after another; each page decides whether
//! the next one is needed.

use crate::api::{fetch_topic_list_page, Endpoints};
use crate::http::Session;
use crate::url::{resolve_against, SortOrder, TimeFilter};
use crate::FetchError;

/// Which forum to walk and how the remote should order it
#[derive(Debug, Clone)]
pub struct ListingQuery {
    pub forum_id: u64,
    pub sort: Option<SortOrder>,
    pub time: Option<TimeFilter>,
    /// Hard stop for remotes that never return an empty page
    pub max_pages: u32,
}

/// Outcome of a pagination walk
///
/// A failed page ends the walk, but the links gathered before it are kept.
#[derive(Debug, Default)]
pub struct Pagination {
    /// Canonical discussion links in listing order
    pub urls: Vec<String>,

    /// Number of page requests issued, failed ones included
    pub pages_fetched: u32,

    /// The error that aborted the walk, if any
    pub error: Option<FetchError>,
}

impl Pagination {
    pub fn is_complete(&self) -> bool {
        self.error.is_none()
    }
}

/// Walks a forum's topic list page by page
///
/// # Termination
///
/// | Condition | Action |
/// |-----------|--------|
/// | Page has zero items | Stop |
/// | Collected links ≥ count hint of the first page | Stop |
/// | Page fetch fails | Stop, keep what was collected |
/// | `max_pages` pages requested | Stop |
///
/// Later pages never override the first page's count hint. Items with
/// neither link field are skipped.
pub async fn paginate_forum(
    session: &mut Session,
    endpoints: &Endpoints,
    query: &ListingQuery,
) -> Pagination {
    let mut result = Pagination::default();
    let mut total_hint: Option<u64> = None;

    for page in 1..=query.max_pages {
        result.pages_fetched += 1;

        let resp = match fetch_topic_list_page(
            session,
            endpoints,
            query.forum_id,
            page,
            query.sort,
            query.time,
        )
        .await
        {
            Ok(resp) => resp,
            Err(e) => {
                tracing::warn!(
                    "Topic list page {} of forum {} failed: {}",
                    page,
                    query.forum_id,
                    e
                );
                result.error = Some(e);
                break;
            }
        };

        if page == 1 {
            total_hint = resp.count;
        }

        if resp.topics.is_empty() {
            break;
        }

        for item in &resp.topics {
            match item.link() {
                Some(link) => result.urls.push(resolve_against(endpoints.root(), link)),
                None => tracing::debug!("Skipping topic list item without a link"),
            }
        }

        if total_hint.is_some_and(|total| result.urls.len() as u64 >= total) {
            break;
        }

        if page == query.max_pages {
            tracing::warn!(
                "Stopped forum {} at page cap {} with {} links",
                query.forum_id,
                query.max_pages,
                result.urls.len()
            );
        }
    }

    tracing::info!(
        "Collected {} discussion links from forum {} over {} pages",
        result.urls.len(),
        query.forum_id,
        result.pages_fetched
    );

    result
}
