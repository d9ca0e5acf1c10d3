//! Two-tier discussion resolver
//!
//! The structured API is tried first whenever the link carries a topic id.
//! Anything that goes wrong there sends the link to the HTML tier, which
//! starts over from the rendered page.

use crate::api::{fetch_messages, fetch_topic, Endpoints, ForumMessage, ForumTopic};
use crate::discussion::{DiscussionRecord, ResolveError, Source};
use crate::html::{extract_title, html_to_markdown, UNTITLED};
use crate::http::Session;
use crate::url::{canonicalize, extract_id, first_non_empty, resolve_against};

/// Outcome of a single resolution tier
#[derive(Debug)]
pub enum Resolution {
    /// The tier produced a record
    Resolved(DiscussionRecord),
    /// The tier gave up; the next tier should try
    NeedsFallback(String),
    /// The tier gave up and there is nothing left to try
    Failed(String),
}

/// A record together with how it was obtained
#[derive(Debug, Clone)]
pub struct ResolvedDiscussion {
    pub record: DiscussionRecord,
    pub source: Source,
    /// Why the API tier was abandoned, when it was attempted and failed
    pub api_failure: Option<String>,
}

/// Resolves one discussion link, API first, HTML second
///
/// Links without a `/discussion/<digits>` segment go straight to the HTML tier.
pub async fn resolve(
    session: &mut Session,
    endpoints: &Endpoints,
    url: &str,
) -> Result<ResolvedDiscussion, ResolveError> {
    let mut api_failure = None;

    if let Some(topic_id) = extract_id(url) {
        match resolve_via_api(session, endpoints, url, topic_id).await {
            Resolution::Resolved(record) => {
                return Ok(ResolvedDiscussion {
                    record,
                    source: Source::Api,
                    api_failure: None,
                });
            }
            Resolution::NeedsFallback(reason) | Resolution::Failed(reason) => {
                tracing::warn!("API failed for {}: {}; falling back to HTML", url, reason);
                api_failure = Some(reason);
            }
        }
    } else {
        tracing::debug!("No topic id in {}; using HTML parser", url);
    }

    match resolve_via_html(session, url).await {
        Resolution::Resolved(record) => Ok(ResolvedDiscussion {
            record,
            source: Source::Html,
            api_failure,
        }),
        Resolution::NeedsFallback(reason) | Resolution::Failed(reason) => Err(ResolveError {
            url: url.to_string(),
            reason,
        }),
    }
}

/// Structured tier: topic metadata plus its messages
///
/// Never returns [`Resolution::Failed`]; every failure here can still be
/// recovered by the HTML tier.
pub async fn resolve_via_api(
    session: &mut Session,
    endpoints: &Endpoints,
    url: &str,
    topic_id: u64,
) -> Resolution {
    // Warm-up: the page visit hands out the session cookies the API expects.
    if let Err(e) = session.fetch_bytes(url, &[]).await {
        tracing::debug!("Warm-up fetch of {} failed: {}", url, e);
    }

    let topic = match fetch_topic(session, endpoints, topic_id).await {
        Ok(topic) => topic,
        Err(e) => return Resolution::NeedsFallback(e.to_string()),
    };
    if topic.name.is_empty() {
        let reason = format!("empty forumTopic for topic_id={}", topic_id);
        return Resolution::NeedsFallback(reason);
    }

    let messages = match fetch_messages(session, endpoints, topic_id).await {
        Ok(messages) => messages,
        Err(e) => return Resolution::NeedsFallback(e.to_string()),
    };

    let body = select_message(&messages, topic.first_message_id)
        .map(ForumMessage::text)
        .unwrap_or_default();

    Resolution::Resolved(record_from_topic(&topic, body, url, endpoints))
}

/// HTML tier: title and body scraped from the rendered page
///
/// Author, comment count and date are not recoverable here and stay empty.
pub async fn resolve_via_html(session: &mut Session, url: &str) -> Resolution {
    let body = match session.fetch_bytes(url, &[]).await {
        Ok(body) => body,
        Err(e) => return Resolution::Failed(e.to_string()),
    };

    Resolution::Resolved(DiscussionRecord {
        title: extract_title(&body),
        link: canonicalize(url),
        author: String::new(),
        comment_count: String::new(),
        published_date: String::new(),
        body_markup: html_to_markdown(&body),
    })
}

/// Picks the message that carries the topic's body
///
/// The message whose id equals `first_message_id` wins. Without a match, the
/// first message in list order with any text is used.
pub fn select_message(messages: &[ForumMessage], first_message_id: u64) -> Option<&ForumMessage> {
    messages
        .iter()
        .find(|m| m.id == first_message_id)
        .or_else(|| messages.iter().find(|m| !m.text().is_empty()))
        .or_else(|| messages.first())
}

fn record_from_topic(
    topic: &ForumTopic,
    body: &str,
    url: &str,
    endpoints: &Endpoints,
) -> DiscussionRecord {
    let link = first_non_empty(&[topic.url.as_str(), url]);
    let link = if link.starts_with("http") {
        canonicalize(link)
    } else {
        resolve_against(endpoints.root(), link)
    };

    DiscussionRecord {
        title: first_non_empty(&[topic.name.as_str(), UNTITLED]).to_string(),
        link,
        author: first_non_empty(&[
            topic.author_user_display_name.as_str(),
            topic.author_user_name.as_str(),
        ])
        .to_string(),
        comment_count: topic
            .total_messages
            .map(|n| n.to_string())
            .unwrap_or_default(),
        published_date: topic.post_date.clone(),
        body_markup: body.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(id: u64, raw: &str, content: &str) -> ForumMessage {
        ForumMessage {
            id,
            raw_markdown: raw.to_string(),
            content: content.to_string(),
        }
    }

    #[test]
    fn test_select_message_prefers_first_message_id() {
        let messages = vec![message(1, "reply", ""), message(7, "opening", "")];
        assert_eq!(select_message(&messages, 7).map(|m| m.id), Some(7));
    }

    #[test]
    fn test_select_message_falls_back_to_list_order() {
        let messages = vec![
            message(1, "", ""),
            message(2, "", "<p>second</p>"),
            message(3, "third", ""),
        ];
        assert_eq!(select_message(&messages, 99).map(|m| m.id), Some(2));
    }

    #[test]
    fn test_select_message_empty_list() {
        assert!(select_message(&[], 1).is_none());
    }

    #[test]
    fn test_record_from_topic_fields() {
        let endpoints = Endpoints::from_root("https://www.kaggle.com").unwrap();
        let topic = ForumTopic {
            name: "Feature ideas".to_string(),
            url: "/competitions/x/discussion/42?sort=votes".to_string(),
            author_user_display_name: String::new(),
            author_user_name: "jdoe".to_string(),
            total_messages: Some(12),
            post_date: "2024-03-01T10:00:00Z".to_string(),
            first_message_id: 5,
        };

        let record = record_from_topic(&topic, "  body  \n", "https://ignored", &endpoints);
        assert_eq!(record.title, "Feature ideas");
        assert_eq!(record.link, "https://www.kaggle.com/competitions/x/discussion/42");
        assert_eq!(record.author, "jdoe");
        assert_eq!(record.comment_count, "12");
        assert_eq!(record.published_date, "2024-03-01T10:00:00Z");
        assert_eq!(record.body_markup, "body");
    }

    #[test]
    fn test_record_from_topic_uses_input_link_when_missing() {
        let endpoints = Endpoints::from_root("https://www.kaggle.com").unwrap();
        let topic = ForumTopic {
            name: "T".to_string(),
            total_messages: None,
            ..ForumTopic::default()
        };

        let record = record_from_topic(
            &topic,
            "",
            "https://www.kaggle.com/discussion/9#c1",
            &endpoints,
        );
        assert_eq!(record.link, "https://www.kaggle.com/discussion/9");
        assert_eq!(record.comment_count, "");
        assert_eq!(record.author, "");
    }
}
