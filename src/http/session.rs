//! Session-carrying HTTP access
//!
//! A [`Session`] is the single owner of a run's cookies. Every request goes
//! through it, so cookies set by the warm-up fetch of a discussion page are
//! replayed on the API calls that follow.

use crate::config::ClientConfig;
use crate::{FetchError, FetchResult};
use reqwest::header::{HeaderValue, COOKIE, SET_COOKIE};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;
use std::time::Duration;

/// Cookie whose value is echoed back as an anti-forgery header
pub const XSRF_COOKIE: &str = "XSRF-TOKEN";

/// Header carrying the anti-forgery token
pub const XSRF_HEADER: &str = "X-XSRF-TOKEN";

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The HTTP client configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
pub fn build_http_client(config: &ClientConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// One run's HTTP session: a client plus the cookies it has been handed
///
/// Cookies are keyed by name only and are not scoped by host, path or expiry;
/// every request of the run carries all of them, whatever its destination.
#[derive(Debug)]
pub struct Session {
    client: Client,
    cookies: BTreeMap<String, String>,
}

impl Session {
    /// Creates a session with a freshly built client
    pub fn new(config: &ClientConfig) -> FetchResult<Self> {
        let client = build_http_client(config).map_err(FetchError::Client)?;
        Ok(Self::with_client(client))
    }

    /// Creates a session around an existing client
    pub fn with_client(client: Client) -> Self {
        Self {
            client,
            cookies: BTreeMap::new(),
        }
    }

    /// Returns the current value of a cookie
    pub fn cookie(&self, name: &str) -> Option<&str> {
        self.cookies.get(name).map(String::as_str)
    }

    /// Number of distinct cookies collected so far
    pub fn cookie_count(&self) -> usize {
        self.cookies.len()
    }

    /// Records a cookie; a later value for the same name replaces the earlier one
    pub fn set_cookie(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.cookies.insert(name.into(), value.into());
    }

    /// Fetches a URL and returns the raw body
    pub async fn fetch_bytes(
        &mut self,
        url: &str,
        query: &[(&str, String)],
    ) -> FetchResult<Vec<u8>> {
        let request = self.client.get(url).query(query);
        let response = self.send(request, url).await?;
        read_body(response, url).await
    }

    /// Fetches a URL and decodes the body as JSON
    pub async fn fetch_json<T: DeserializeOwned>(
        &mut self,
        url: &str,
        query: &[(&str, String)],
    ) -> FetchResult<T> {
        let body = self.fetch_bytes(url, query).await?;
        decode(&body, url)
    }

    /// Posts a JSON body and decodes the JSON response
    pub async fn post_json<B, T>(&mut self, url: &str, body: &B) -> FetchResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.client.post(url).json(body);
        let response = self.send(request, url).await?;
        let body = read_body(response, url).await?;
        decode(&body, url)
    }

    /// Attaches session headers, sends, records cookies, and rejects error statuses
    async fn send(&mut self, request: RequestBuilder, url: &str) -> FetchResult<Response> {
        let request = self.decorate(request);

        tracing::debug!("Requesting {}", url);
        let response = request.send().await.map_err(|source| FetchError::Request {
            url: url.to_string(),
            source,
        })?;

        self.absorb_cookies(&response);

        let status = response.status();
        if status.as_u16() >= 400 {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response)
    }

    fn decorate(&self, mut request: RequestBuilder) -> RequestBuilder {
        if !self.cookies.is_empty() {
            let header = self
                .cookies
                .iter()
                .map(|(name, value)| format!("{}={}", name, value))
                .collect::<Vec<_>>()
                .join("; ");
            if let Ok(value) = HeaderValue::from_str(&header) {
                request = request.header(COOKIE, value);
            }
        }

        if let Some(token) = self.cookie(XSRF_COOKIE).filter(|t| !t.is_empty()) {
            if let Ok(value) = HeaderValue::from_str(token) {
                request = request.header(XSRF_HEADER, value);
            }
        }

        request
    }

    fn absorb_cookies(&mut self, response: &Response) {
        for value in response.headers().get_all(SET_COOKIE) {
            let Ok(raw) = value.to_str() else {
                continue;
            };
            if let Some((name, value)) = parse_set_cookie(raw) {
                tracing::debug!("Session cookie set: {}", name);
                self.cookies.insert(name, value);
            }
        }
    }
}

/// Extracts the `name=value` pair from a `Set-Cookie` header value
fn parse_set_cookie(raw: &str) -> Option<(String, String)> {
    let pair = raw.split(';').next()?;
    let (name, value) = pair.split_once('=')?;
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    Some((name.to_string(), value.trim().trim_matches('"').to_string()))
}

async fn read_body(response: Response, url: &str) -> FetchResult<Vec<u8>> {
    response
        .bytes()
        .await
        .map(|bytes| bytes.to_vec())
        .map_err(|source| FetchError::Request {
            url: url.to_string(),
            source,
        })
}

fn decode<T: DeserializeOwned>(body: &[u8], url: &str) -> FetchResult<T> {
    serde_json::from_slice(body).map_err(|source| FetchError::Decode {
        url: url.to_string(),
        source,
    })
}
