use serde::{Deserialize, Deserializer, Serialize};

/// Treats an explicit JSON `null` like an absent field
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Response of the topic-by-id endpoint
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TopicResponse {
    #[serde(deserialize_with = "nullable")]
    pub forum_topic: ForumTopic,
}

/// Topic metadata
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ForumTopic {
    #[serde(deserialize_with = "nullable")]
    pub name: String,
    #[serde(deserialize_with = "nullable")]
    pub url: String,
    #[serde(deserialize_with = "nullable")]
    pub author_user_display_name: String,
    #[serde(deserialize_with = "nullable")]
    pub author_user_name: String,
    pub total_messages: Option<u64>,
    #[serde(deserialize_with = "nullable")]
    pub post_date: String,
    #[serde(deserialize_with = "nullable")]
    pub first_message_id: u64,
}

/// Response of the messages-in-topic endpoint
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MessagesResponse {
    #[serde(deserialize_with = "nullable")]
    pub comments: Vec<ForumMessage>,
}

/// A single message of a topic
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ForumMessage {
    #[serde(deserialize_with = "nullable")]
    pub id: u64,
    #[serde(deserialize_with = "nullable")]
    pub raw_markdown: String,
    #[serde(deserialize_with = "nullable")]
    pub content: String,
}

impl ForumMessage {
    /// Message text, preferring the raw Markdown over rendered content
    pub fn text(&self) -> &str {
        if self.raw_markdown.is_empty() {
            &self.content
        } else {
            &self.raw_markdown
        }
    }
}

/// Request body of the messages-in-topic endpoint
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessagesRequest {
    pub topic_id: u64,
    pub include_first_forum_message: bool,
}

/// Response of the competition endpoint
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CompetitionResponse {
    pub forum_id: Option<u64>,
}

/// One page of the topic-list endpoint
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TopicListResponse {
    pub count: Option<u64>,
    #[serde(deserialize_with = "nullable")]
    pub topics: Vec<TopicListItem>,
}

/// A topic-list entry; the link may live in either field
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TopicListItem {
    #[serde(deserialize_with = "nullable")]
    pub topic_url: String,
    #[serde(deserialize_with = "nullable")]
    pub url: String,
}

impl TopicListItem {
    /// The entry's link: `topicUrl`, else `url`, else nothing
    pub fn link(&self) -> Option<&str> {
        [self.topic_url.as_str(), self.url.as_str()]
            .into_iter()
            .find(|s| !s.is_empty())
    }
}
