//! Typed access to the platform's structured API
//!
//! This module knows the endpoint paths and payload shapes of:
//! - Topic metadata by id
//! - Messages of a topic
//! - Competition → forum id lookup
//! - Paged topic lists of a forum

mod models;

pub use models::{
    CompetitionResponse, ForumMessage, ForumTopic, MessagesRequest, MessagesResponse,
    TopicListItem, TopicListResponse, TopicResponse,
};

use crate::http::Session;
use crate::url::{listing_params, SortOrder, TimeFilter};
use crate::{ConfigError, ConfigResult, FetchError, FetchResult};
use url::Url;

const TOPIC_PATH: &str = "api/i/discussions.DiscussionsService/GetForumTopicById";
const MESSAGES_PATH: &str = "api/i/discussions.DiscussionsService/GetForumMessagesInTopic";
const COMPETITION_PATH: &str = "api/i/competitions.CompetitionService/GetCompetition";
const TOPIC_LIST_PATH: &str = "api/i/discussions.DiscussionsService/GetTopicListByForumId";

/// Endpoint addresses derived from one site root
#[derive(Debug, Clone)]
pub struct Endpoints {
    root: Url,
    topic: String,
    messages: String,
    competition: String,
    topic_list: String,
}

impl Endpoints {
    /// Derives every endpoint from the site root
    pub fn new(root: Url) -> Self {
        let join = |path: &str| {
            let base = root.as_str().trim_end_matches('/');
            format!("{}/{}", base, path)
        };
        Self {
            topic: join(TOPIC_PATH),
            messages: join(MESSAGES_PATH),
            competition: join(COMPETITION_PATH),
            topic_list: join(TOPIC_LIST_PATH),
            root,
        }
    }

    /// Parses a configured site root
    pub fn from_root(root: &str) -> ConfigResult<Self> {
        let url = Url::parse(root)
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid site root '{}': {}", root, e)))?;
        Ok(Self::new(url))
    }

    /// The site root relative links are resolved against
    pub fn root(&self) -> &Url {
        &self.root
    }
}

/// Fetches topic metadata by numeric id
pub async fn fetch_topic(
    session: &mut Session,
    endpoints: &Endpoints,
    topic_id: u64,
) -> FetchResult<ForumTopic> {
    let params = [("forumTopicId", topic_id.to_string())];
    let resp: TopicResponse = session.fetch_json(&endpoints.topic, &params).await?;
    tracing::debug!("Topic API ok topic_id={}", topic_id);
    Ok(resp.forum_topic)
}

/// Fetches the messages of a topic, first message included
pub async fn fetch_messages(
    session: &mut Session,
    endpoints: &Endpoints,
    topic_id: u64,
) -> FetchResult<Vec<ForumMessage>> {
    let body = MessagesRequest {
        topic_id,
        include_first_forum_message: true,
    };
    let resp: MessagesResponse = session.post_json(&endpoints.messages, &body).await?;
    tracing::debug!(
        "Messages API ok topic_id={} count={}",
        topic_id,
        resp.comments.len()
    );
    Ok(resp.comments)
}

/// Looks up the forum id that holds a competition's discussions
pub async fn fetch_competition_forum_id(
    session: &mut Session,
    endpoints: &Endpoints,
    competition: &str,
) -> FetchResult<u64> {
    let params = [("competitionName", competition.to_string())];
    let resp: CompetitionResponse = session.fetch_json(&endpoints.competition, &params).await?;
    let forum_id = resp.forum_id.ok_or_else(|| FetchError::MissingData {
        url: endpoints.competition.clone(),
        message: format!("forumId missing for competition={}", competition),
    })?;
    tracing::debug!(
        "Competition API ok competition={} forum_id={}",
        competition,
        forum_id
    );
    Ok(forum_id)
}

/// Fetches one page of a forum's topic list
pub async fn fetch_topic_list_page(
    session: &mut Session,
    endpoints: &Endpoints,
    forum_id: u64,
    page: u32,
    sort: Option<SortOrder>,
    time: Option<TimeFilter>,
) -> FetchResult<TopicListResponse> {
    let mut params = vec![("forumId", forum_id.to_string()), ("page", page.to_string())];
    params.extend(listing_params(sort, time));
    let resp: TopicListResponse = session.fetch_json(&endpoints.topic_list, &params).await?;
    tracing::debug!(
        "Topic list API ok forum_id={} page={} items={} count={:?}",
        forum_id,
        page,
        resp.topics.len(),
        resp.count
    );
    Ok(resp)
}
