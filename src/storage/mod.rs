//! Document store for resolved discussions
//!
//! Each discussion is one Markdown file in the output directory, headed by a
//! metadata block. The `link` entry of that block is the document's identity:
//! - [`load_existing_index`] maps links to files already on disk
//! - [`DocumentStore::save`] overwrites a known link in place, or picks a new
//!   file name from the title

mod frontmatter;
mod index;
mod slug;
mod store;

pub use frontmatter::{build_front_matter, parse_front_matter, quote_value, render_document};
pub use index::{load_existing_index, ExistingIndex};
pub use slug::{slugify_title, DEFAULT_SLUG};
pub use store::{ensure_unique_path, save_discussion, DocumentStore, SavedDocument};

use std::path::PathBuf;
use thiserror::Error;

/// Filesystem failures of the document store
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to create output directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to read output directory {}: {source}", .path.display())]
    ReadDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Result type alias for storage operations
pub type StorageResult<T> = Result<T, StorageError>;
