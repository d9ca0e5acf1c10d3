//! Forum-Scribe: a polite discussion archiver
//!
//! This crate retrieves discussion threads from a forum-style web platform and
//! persists them as self-contained Markdown documents, deduplicated against
//! earlier runs by canonical link.

pub mod api;
pub mod config;
pub mod discussion;
pub mod harvest;
pub mod html;
pub mod http;
pub mod listing;
pub mod output;
pub mod storage;
pub mod url;

use thiserror::Error;

/// Main error type for Forum-Scribe operations
#[derive(Debug, Error)]
pub enum ScribeError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Unknown {kind} option: {value}")]
    UnknownOption { kind: &'static str, value: String },
}

/// Errors raised by the HTTP session
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("HTTP error for {url}: {source}")]
    Request { url: String, source: reqwest::Error },

    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Malformed response from {url}: {source}")]
    Decode {
        url: String,
        source: serde_json::Error,
    },

    #[error("Missing data from {url}: {message}")]
    MissingData { url: String, message: String },
}

/// Result type alias for Forum-Scribe operations
pub type Result<T> = std::result::Result<T, ScribeError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for HTTP operations
pub type FetchResult<T> = std::result::Result<T, FetchError>;

// Re-export commonly used types
pub use config::Config;
pub use discussion::{DiscussionRecord, ResolutionStream, Source};
pub use storage::{DocumentStore, ExistingIndex, SavedDocument};
pub use crate::url::{canonicalize, ensure_absolute, extract_id, normalize_choice};
