//! Session cookie handling against a live mock server

use forum_scribe::config::ClientConfig;
use forum_scribe::http::Session;
use forum_scribe::FetchError;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_cookies_survive_error_responses_and_are_replayed() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/first"))
        .respond_with(ResponseTemplate::new(404).insert_header("set-cookie", "sid=s1; Path=/"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/second"))
        .respond_with(
            ResponseTemplate::new(404).insert_header("set-cookie", "XSRF-TOKEN=one; Path=/"),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/third"))
        .respond_with(
            ResponseTemplate::new(200).insert_header("set-cookie", "XSRF-TOKEN=two; Path=/"),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/fourth"))
        .and(header("x-xsrf-token", "two"))
        .and(header("cookie", "XSRF-TOKEN=two; sid=s1"))
        .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
        .expect(1)
        .mount(&server)
        .await;

    let mut session = Session::new(&ClientConfig::default()).unwrap();

    for page in ["first", "second"] {
        let url = format!("{}/{}", server.uri(), page);
        match session.fetch_bytes(&url, &[]).await {
            Err(FetchError::Status { status, .. }) => assert_eq!(status, 404),
            other => panic!("expected a 404 for {}, got {:?}", page, other),
        }
    }
    assert_eq!(session.cookie("sid"), Some("s1"));
    assert_eq!(session.cookie("XSRF-TOKEN"), Some("one"));

    session
        .fetch_bytes(&format!("{}/third", server.uri()), &[])
        .await
        .unwrap();
    assert_eq!(session.cookie("XSRF-TOKEN"), Some("two"));
    assert_eq!(session.cookie_count(), 2);

    let body = session
        .fetch_bytes(&format!("{}/fourth", server.uri()), &[])
        .await
        .unwrap();
    assert_eq!(body, b"ok");
}
