//! Discussion resolution
//!
//! This module turns discussion links into [`DiscussionRecord`]s:
//! - [`resolve`] runs the two-tier resolver for a single link
//! - [`ResolutionStream`] drives the resolver over many links, in order and paced

mod record;
mod resolver;
mod stream;

pub use record::{DiscussionRecord, Source};
pub use resolver::{
    resolve, resolve_via_api, resolve_via_html, select_message, Resolution, ResolvedDiscussion,
};
pub use stream::{Diagnostic, DiagnosticKind, ResolutionStream, StreamReport};

use thiserror::Error;

/// A link that neither resolution tier could turn into a record
#[derive(Debug, Error)]
#[error("Failed to resolve {url}: {reason}")]
pub struct ResolveError {
    pub url: String,
    pub reason: String,
}
