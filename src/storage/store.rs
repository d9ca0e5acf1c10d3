//! Writing discussion documents

use crate::discussion::DiscussionRecord;
use crate::storage::frontmatter::render_document;
use crate::storage::index::{load_existing_index, ExistingIndex};
use crate::storage::slug::slugify_title;
use crate::storage::{StorageError, StorageResult};
use std::path::{Path, PathBuf};

/// Where a record was written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedDocument {
    pub path: PathBuf,
    /// `false` when an existing document for the same link was overwritten
    pub created: bool,
}

/// Finds a document path for `base` that is neither claimed nor on disk
///
/// Tries `base.md`, then `base_2.md`, `base_3.md`, and so on.
pub fn ensure_unique_path(dir: &Path, base: &str, index: &ExistingIndex) -> PathBuf {
    let is_free = |path: &Path| !index.is_claimed(path) && !path.exists();

    let candidate = dir.join(format!("{}.md", base));
    if is_free(candidate.as_path()) {
        return candidate;
    }

    (2u64..)
        .map(|n| dir.join(format!("{}_{}.md", base, n)))
        .find(|path| is_free(path.as_path()))
        .unwrap_or(candidate)
}

/// Writes `record` into `dir`, reusing the document already holding its link
///
/// A new link gets a fresh path derived from the title, which is recorded in
/// `index` before the file is written.
pub fn save_discussion(
    record: &DiscussionRecord,
    dir: &Path,
    index: &mut ExistingIndex,
) -> StorageResult<SavedDocument> {
    std::fs::create_dir_all(dir).map_err(|source| StorageError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;

    let (path, created) = match index.get(&record.link) {
        Some(path) => (path.to_path_buf(), false),
        None => {
            let path = ensure_unique_path(dir, &slugify_title(&record.title), index);
            index.insert(&record.link, path.clone());
            (path, true)
        }
    };

    std::fs::write(&path, render_document(record)).map_err(|source| StorageError::Write {
        path: path.clone(),
        source,
    })?;

    Ok(SavedDocument { path, created })
}

/// An output directory together with its link index
///
/// The index is loaded once when the store is opened and then kept current
/// by [`DocumentStore::save`].
#[derive(Debug)]
pub struct DocumentStore {
    dir: PathBuf,
    index: ExistingIndex,
}

impl DocumentStore {
    /// Opens `dir`, indexing the documents already in it
    ///
    /// The directory itself is created on the first save.
    pub fn open(dir: impl Into<PathBuf>) -> StorageResult<Self> {
        let dir = dir.into();
        let index = load_existing_index(&dir)?;
        Ok(Self { dir, index })
    }

    pub fn save(&mut self, record: &DiscussionRecord) -> StorageResult<SavedDocument> {
        save_discussion(record, &self.dir, &mut self.index)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn index(&self) -> &ExistingIndex {
        &self.index
    }
}
