//! Harvest coordinator - main run orchestration logic
//!
//! This module ties the pieces of a run together:
//! - Collecting discussion links (single link, forum API, or listing pages)
//! - Opening the document store and its index
//! - Driving the resolution stream and saving every record
//! - Counting outcomes into a [`RunSummary`]

use crate::api::{fetch_competition_forum_id, Endpoints};
use crate::config::Config;
use crate::discussion::ResolutionStream;
use crate::http::Session;
use crate::listing::{paginate_forum, scrape_listing, ListingQuery};
use crate::output::{LinkOrigin, RunSummary};
use crate::storage::DocumentStore;
use crate::url::{canonicalize, competition_listing_url, listing_url, SortOrder, TimeFilter};
use std::time::Duration;

/// What a single run should harvest
#[derive(Debug, Clone, Default)]
pub struct HarvestRequest {
    /// Harvest exactly this discussion and nothing else
    pub link: Option<String>,

    pub sort: Option<SortOrder>,

    pub time: Option<TimeFilter>,

    /// Competition whose forum should be walked
    pub competition: Option<String>,
}

impl HarvestRequest {
    fn competition(&self) -> Option<&str> {
        self.competition
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
    }
}

/// Main harvest coordinator structure
pub struct Coordinator {
    config: Config,
    session: Session,
    endpoints: Endpoints,
}

impl Coordinator {
    /// Creates a coordinator with a fresh session
    ///
    /// # Arguments
    ///
    /// * `config` - The validated run configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Ready to run
    /// * `Err(ScribeError)` - The site root or HTTP client could not be set up
    pub fn new(config: Config) -> crate::Result<Self> {
        let endpoints = Endpoints::from_root(&config.site.root)?;
        let session = Session::new(&config.client)?;
        Ok(Self {
            config,
            session,
            endpoints,
        })
    }

    /// Collects the links a run should resolve
    ///
    /// Sources are tried in order until one yields links:
    /// 1. The explicit link of the request
    /// 2. The competition forum's topic list
    /// 3. The site-wide listing page
    /// 4. The competition listing page
    ///
    /// Failures of any source are logged and the next source is tried.
    pub async fn collect_links(&mut self, request: &HarvestRequest) -> (Vec<String>, LinkOrigin) {
        if let Some(link) = request.link.as_deref().filter(|l| !l.trim().is_empty()) {
            return (vec![canonicalize(link.trim())], LinkOrigin::SingleLink);
        }

        if let Some(competition) = request.competition() {
            let urls = self.collect_from_forum(competition, request).await;
            if !urls.is_empty() {
                return (urls, LinkOrigin::ForumApi);
            }
        }

        let url = listing_url(self.endpoints.root(), request.sort, request.time);
        let urls = self.scrape(&url).await;
        if !urls.is_empty() {
            return (urls, LinkOrigin::Listing);
        }

        if let Some(competition) = request.competition() {
            let url = competition_listing_url(
                self.endpoints.root(),
                competition,
                request.sort,
                request.time,
            );
            let urls = self.scrape(&url).await;
            if !urls.is_empty() {
                return (urls, LinkOrigin::CompetitionListing);
            }
        }

        (Vec::new(), LinkOrigin::Nothing)
    }

    /// Runs the harvest to completion
    ///
    /// A record that fails to save is counted and logged; the run goes on.
    /// Only a failure to open the output directory ends the run early.
    pub async fn run(mut self, request: &HarvestRequest) -> crate::Result<RunSummary> {
        let (urls, origin) = self.collect_links(request).await;
        tracing::info!("Collected {} discussion links from {}", urls.len(), origin);

        let mut summary = RunSummary::new(origin, urls.len());
        if urls.is_empty() {
            tracing::warn!("No discussion links found; nothing to do");
            return Ok(summary);
        }

        let mut store = DocumentStore::open(&self.config.run.output_dir)?;
        tracing::info!(
            "Writing documents to {} ({} already indexed)",
            store.dir().display(),
            store.index().len()
        );
        let pacing = Duration::from_millis(self.config.run.delay_ms);
        let mut stream = ResolutionStream::new(self.session, self.endpoints, urls, pacing);

        while let Some(resolved) = stream.next().await {
            match store.save(&resolved.record) {
                Ok(saved) => {
                    tracing::info!(
                        "Saved {} ({}) via {}",
                        saved.path.display(),
                        if saved.created { "new" } else { "updated" },
                        resolved.source
                    );
                    if saved.created {
                        summary.created += 1;
                    } else {
                        summary.updated += 1;
                    }
                    summary.saved_paths.push(saved.path);
                }
                Err(e) => {
                    tracing::error!("Failed to save {}: {}", resolved.record.link, e);
                    summary.save_failures += 1;
                }
            }

            if stream.remaining() > 0 && summary.saved() % 10 == 0 && summary.saved() > 0 {
                tracing::info!(
                    "Progress: {} saved, {} links remaining",
                    summary.saved(),
                    stream.remaining()
                );
            }
        }

        let (_session, report) = stream.finish();
        summary.stream = report;

        tracing::info!(
            "Harvest completed: {} created, {} updated, {} skipped",
            summary.created,
            summary.updated,
            summary.stream.skipped
        );

        Ok(summary)
    }

    async fn collect_from_forum(
        &mut self,
        competition: &str,
        request: &HarvestRequest,
    ) -> Vec<String> {
        let lookup = fetch_competition_forum_id(&mut self.session, &self.endpoints, competition);
        let forum_id = match lookup.await {
            Ok(id) => id,
            Err(e) => {
                tracing::warn!(
                    "Could not resolve forum of competition {}: {}",
                    competition,
                    e
                );
                return Vec::new();
            }
        };

        let query = ListingQuery {
            forum_id,
            sort: request.sort,
            time: request.time,
            max_pages: self.config.run.max_pages,
        };
        let pagination = paginate_forum(&mut self.session, &self.endpoints, &query).await;
        if let Some(e) = &pagination.error {
            tracing::warn!(
                "Topic list of forum {} ended early after {} pages: {}",
                forum_id,
                pagination.pages_fetched,
                e
            );
        }
        pagination.urls
    }

    async fn scrape(&mut self, url: &str) -> Vec<String> {
        match scrape_listing(&mut self.session, url).await {
            Ok(urls) => urls,
            Err(e) => {
                tracing::warn!("Listing page {} failed: {}", url, e);
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ScribeError;

    #[test]
    fn test_request_competition_blank_is_none() {
        let request = HarvestRequest {
            competition: Some("   ".to_string()),
            ..HarvestRequest::default()
        };
        assert_eq!(request.competition(), None);

        let request = HarvestRequest {
            competition: Some(" titanic ".to_string()),
            ..HarvestRequest::default()
        };
        assert_eq!(request.competition(), Some("titanic"));
    }

    #[test]
    fn test_coordinator_rejects_bad_root() {
        let mut config = Config::default();
        config.site.root = "::nope::".to_string();
        assert!(matches!(Coordinator::new(config), Err(ScribeError::Config(_))));
    }

    #[tokio::test]
    async fn test_single_link_short_circuits() {
        let mut coordinator = Coordinator::new(Config::default()).unwrap();
        let request = HarvestRequest {
            link: Some("https://www.kaggle.com/discussion/5?x=1".to_string()),
            competition: Some("titanic".to_string()),
            ..HarvestRequest::default()
        };
        let (urls, origin) = coordinator.collect_links(&request).await;
        assert_eq!(urls, vec!["https://www.kaggle.com/discussion/5"]);
        assert_eq!(origin, LinkOrigin::SingleLink);
    }
}
