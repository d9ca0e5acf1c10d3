//! URL handling module for Forum-Scribe
//!
//! This module provides link canonicalization, topic id extraction, and the
//! fixed option tables used to build listing requests.

mod canonical;
mod options;

// Re-export main functions
pub use canonical::{
    canonicalize, ensure_absolute, extract_id, first_non_empty, normalize_choice, resolve_against,
};
pub use options::{competition_listing_url, listing_params, listing_url, SortOrder, TimeFilter};
