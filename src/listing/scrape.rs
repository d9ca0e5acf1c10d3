//! Rendered listing pages, used when no forum id is available

use crate::html::extract_discussion_links;
use crate::http::Session;
use crate::FetchResult;

/// Fetches a rendered listing page and scans it for discussion links
///
/// Links are resolved against the listing URL itself, canonicalized, and
/// deduplicated in first-seen order.
pub async fn scrape_listing(session: &mut Session, url: &str) -> FetchResult<Vec<String>> {
    let body = session.fetch_bytes(url, &[]).await?;
    let links = extract_discussion_links(&body, url);
    tracing::info!("Scraped {} discussion links from {}", links.len(), url);
    Ok(links)
}
