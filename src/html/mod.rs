//! HTML text extraction
//!
//! This module turns raw page bytes into the pieces the resolver needs:
//! - An approximate Markdown rendering of the body
//! - A best-effort title
//! - Discussion links found on listing pages

mod links;
mod markdown;
mod title;

pub use links::extract_discussion_links;
pub use markdown::{html_to_markdown, strip_tags};
pub use title::{extract_title, UNTITLED};
