//! Integration tests for discussion resolution
//!
//! These tests use wiremock to stand in for the discussion pages and the
//! topic and message endpoints.

use forum_scribe::api::Endpoints;
use forum_scribe::config::ClientConfig;
use forum_scribe::discussion::{resolve, DiagnosticKind, ResolutionStream, Source};
use forum_scribe::http::Session;
use serde_json::json;
use std::time::{Duration, Instant};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOPIC: &str = "/api/i/discussions.DiscussionsService/GetForumTopicById";
const MESSAGES: &str = "/api/i/discussions.DiscussionsService/GetForumMessagesInTopic";

fn session() -> Session {
    Session::new(&ClientConfig::default()).unwrap()
}

async fn mount_page(server: &MockServer, page_path: &str, html: &str) {
    Mock::given(method("GET"))
        .and(path(page_path))
        .respond_with(ResponseTemplate::new(200).set_body_string(html.to_string()))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_api_path_with_session_token() {
    let server = MockServer::start().await;
    let endpoints = Endpoints::from_root(&server.uri()).unwrap();

    // Warm-up page hands out the token
    Mock::given(method("GET"))
        .and(path("/competitions/titanic/discussion/42"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", "XSRF-TOKEN=tok123; Path=/; Secure")
                .set_body_string("<html></html>"),
        )
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(TOPIC))
        .and(query_param("forumTopicId", "42"))
        .and(header("X-XSRF-TOKEN", "tok123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "forumTopic": {
                "name": "Feature ideas",
                "url": "/competitions/titanic/discussion/42",
                "authorUserDisplayName": "Jane Doe",
                "authorUserName": "jdoe",
                "totalMessages": 7,
                "postDate": "2024-03-01T10:00:00Z",
                "firstMessageId": 10
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path(MESSAGES))
        .and(header("X-XSRF-TOKEN", "tok123"))
        .and(body_json(json!({ "topicId": 42, "includeFirstForumMessage": true })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "comments": [
                { "id": 3, "rawMarkdown": "a reply", "content": "" },
                { "id": 10, "rawMarkdown": "  # Opening\n\nHello  ", "content": "<p>Hello</p>" }
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let url = format!("{}/competitions/titanic/discussion/42?tab=all", server.uri());
    let mut session = session();
    let resolved = resolve(&mut session, &endpoints, &url).await.unwrap();

    assert_eq!(resolved.source, Source::Api);
    assert!(resolved.api_failure.is_none());
    let record = resolved.record;
    assert_eq!(record.title, "Feature ideas");
    assert_eq!(
        record.link,
        format!("{}/competitions/titanic/discussion/42", server.uri())
    );
    assert_eq!(record.author, "Jane Doe");
    assert_eq!(record.comment_count, "7");
    assert_eq!(record.published_date, "2024-03-01T10:00:00Z");
    assert_eq!(record.body_markup, "# Opening\n\nHello");
    assert_eq!(session.cookie("XSRF-TOKEN"), Some("tok123"));
}

#[tokio::test]
async fn test_empty_title_falls_back_to_html() {
    let server = MockServer::start().await;
    let endpoints = Endpoints::from_root(&server.uri()).unwrap();

    mount_page(
        &server,
        "/discussion/7",
        "<html><body><h1>Scraped Title</h1><p>Body <strong>text</strong></p></body></html>",
    )
    .await;

    Mock::given(method("GET"))
        .and(path(TOPIC))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "forumTopic": { "name": "", "authorUserName": "ignored", "totalMessages": 3 }
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path(MESSAGES))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "comments": [] })))
        .expect(0)
        .mount(&server)
        .await;

    let url = format!("{}/discussion/7#c2", server.uri());
    let resolved = resolve(&mut session(), &endpoints, &url).await.unwrap();

    assert_eq!(resolved.source, Source::Html);
    assert!(resolved.api_failure.is_some());
    let record = resolved.record;
    assert_eq!(record.title, "Scraped Title");
    assert_eq!(record.link, format!("{}/discussion/7", server.uri()));
    assert_eq!(record.author, "");
    assert_eq!(record.comment_count, "");
    assert_eq!(record.published_date, "");
    assert!(record.body_markup.contains("Body **text**"));
}

#[tokio::test]
async fn test_link_without_id_skips_api() {
    let server = MockServer::start().await;
    let endpoints = Endpoints::from_root(&server.uri()).unwrap();

    mount_page(&server, "/discussions/general-chat", "<h1>General</h1><p>hi</p>").await;
    Mock::given(method("GET"))
        .and(path(TOPIC))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let url = format!("{}/discussions/general-chat", server.uri());
    let resolved = resolve(&mut session(), &endpoints, &url).await.unwrap();

    assert_eq!(resolved.source, Source::Html);
    assert!(resolved.api_failure.is_none());
    assert_eq!(resolved.record.title, "General");
    assert_eq!(resolved.record.body_markup, "# General\n\nhi");
}

#[tokio::test]
async fn test_both_tiers_failing_is_an_error() {
    let server = MockServer::start().await;
    let endpoints = Endpoints::from_root(&server.uri()).unwrap();

    let url = format!("{}/discussion/404", server.uri());
    let err = resolve(&mut session(), &endpoints, &url).await.unwrap_err();

    assert_eq!(err.url, url);
    assert!(err.reason.contains("404"));
}

#[tokio::test]
async fn test_stream_skips_failures_and_keeps_order() {
    let server = MockServer::start().await;
    let endpoints = Endpoints::from_root(&server.uri()).unwrap();

    mount_page(&server, "/discussion/first", "<h1>First</h1><p>one</p>").await;
    mount_page(
        &server,
        "/discussion/third",
        r#"<html><head><meta property="og:title" content="Third"></head><body></body></html>"#,
    )
    .await;
    mount_page(&server, "/discussion/fourth", "<h1>Fourth</h1><p>four</p>").await;

    let urls = vec![
        format!("{}/discussion/first", server.uri()),
        format!("{}/discussion/missing", server.uri()),
        format!("{}/discussion/third", server.uri()),
        format!("{}/discussion/fourth", server.uri()),
    ];
    let mut stream = ResolutionStream::new(session(), endpoints, urls, Duration::ZERO);

    let mut titles = Vec::new();
    while let Some(resolved) = stream.next().await {
        titles.push(resolved.record.title);
    }
    let (_session, report) = stream.finish();

    assert_eq!(titles, vec!["First", "Third", "Fourth"]);
    assert_eq!(report.attempted, 4);
    assert_eq!(report.via_html, 3);
    assert_eq!(report.skipped, 1);
    assert_eq!(report.empty_bodies, 1);
    assert_eq!(report.of_kind(DiagnosticKind::NoTopicId).count(), 4);

    let skipped: Vec<_> = report.of_kind(DiagnosticKind::Skipped).collect();
    assert_eq!(skipped.len(), 1);
    assert!(skipped[0].url.ends_with("/discussion/missing"));

    let empty: Vec<_> = report.of_kind(DiagnosticKind::EmptyBody).collect();
    assert!(empty[0].url.ends_with("/discussion/third"));
}

#[tokio::test]
async fn test_stream_records_api_fallback() {
    let server = MockServer::start().await;
    let endpoints = Endpoints::from_root(&server.uri()).unwrap();

    mount_page(&server, "/discussion/5", "<h1>Five</h1><p>five</p>").await;

    let urls = vec![format!("{}/discussion/5", server.uri())];
    let mut stream = ResolutionStream::new(session(), endpoints, urls, Duration::ZERO);
    let resolved = stream.next().await.unwrap();
    assert!(stream.next().await.is_none());
    let (_session, report) = stream.finish();

    assert_eq!(resolved.source, Source::Html);
    assert_eq!(report.of_kind(DiagnosticKind::ApiFallback).count(), 1);
    assert_eq!(report.of_kind(DiagnosticKind::NoTopicId).count(), 0);
}

#[tokio::test]
async fn test_stream_paces_between_records_only() {
    let server = MockServer::start().await;
    let endpoints = Endpoints::from_root(&server.uri()).unwrap();

    mount_page(&server, "/discussion/a", "<h1>A</h1><p>a</p>").await;
    mount_page(&server, "/discussion/b", "<h1>B</h1><p>b</p>").await;

    let urls = vec![
        format!("{}/discussion/a", server.uri()),
        format!("{}/discussion/b", server.uri()),
    ];
    let pacing = Duration::from_millis(300);
    let mut stream = ResolutionStream::new(session(), endpoints, urls, pacing);

    let start = Instant::now();
    assert!(stream.next().await.is_some());
    let first = start.elapsed();
    assert!(stream.next().await.is_some());
    let second = start.elapsed();
    let before_end = Instant::now();
    assert!(stream.next().await.is_none());

    assert!(first < pacing);
    assert!(second >= pacing);
    // No pause after the last link
    assert!(before_end.elapsed() < pacing);
}
