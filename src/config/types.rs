use serde::Deserialize;

pub const DEFAULT_SITE_ROOT: &str = "https://www.kaggle.com";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (compatible; ForumScribe/1.0)";

/// Main configuration structure for Forum-Scribe
///
/// Every section and key is optional; an absent config file behaves exactly
/// like an empty one.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub site: SiteConfig,
    pub client: ClientConfig,
    pub run: RunConfig,
}

/// Remote platform addressing
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Root every API endpoint and relative link is resolved against
    pub root: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            root: DEFAULT_SITE_ROOT.to_string(),
        }
    }
}

/// HTTP client configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Client identifier sent on every request
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    /// Whole-request timeout (seconds)
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: 30,
        }
    }
}

/// Run behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Directory the Markdown documents are written to
    #[serde(rename = "output-dir")]
    pub output_dir: String,

    /// Pause between successive discussion resolutions (milliseconds)
    #[serde(rename = "delay-ms")]
    pub delay_ms: u64,

    /// Upper bound on topic-list pages requested per forum
    #[serde(rename = "max-pages")]
    pub max_pages: u32,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            output_dir: "discussion".to_string(),
            delay_ms: 500,
            max_pages: 500,
        }
    }
}
