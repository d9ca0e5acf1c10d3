//! Link → document index of an output directory

use crate::storage::frontmatter::parse_front_matter;
use crate::storage::{StorageError, StorageResult};
use crate::url::canonicalize;
use std::collections::{HashMap, HashSet};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Canonical link → document path, plus every path claimed so far
///
/// Entries are only ever added. A link keeps the first path it was given, and
/// a claimed path is never handed to another link.
#[derive(Debug, Clone, Default)]
pub struct ExistingIndex {
    by_link: HashMap<String, PathBuf>,
    claimed: HashSet<PathBuf>,
}

impl ExistingIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Path of the document holding `link`, compared in canonical form
    pub fn get(&self, link: &str) -> Option<&Path> {
        self.by_link.get(&canonicalize(link)).map(PathBuf::as_path)
    }

    /// Records `link` at `path`; returns `false` if the link was already known
    pub fn insert(&mut self, link: &str, path: PathBuf) -> bool {
        let key = canonicalize(link);
        if self.by_link.contains_key(&key) {
            return false;
        }
        self.claimed.insert(path.clone());
        self.by_link.insert(key, path);
        true
    }

    pub fn is_claimed(&self, path: &Path) -> bool {
        self.claimed.contains(path)
    }

    pub fn len(&self) -> usize {
        self.by_link.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_link.is_empty()
    }
}

/// Builds the index from the `.md` documents already in `dir`
///
/// Files are visited in sorted path order and the first document claiming a
/// link keeps it. Documents without a readable metadata block or a `link`
/// entry are skipped. A missing directory yields an empty index.
pub fn load_existing_index(dir: &Path) -> StorageResult<ExistingIndex> {
    let mut index = ExistingIndex::new();

    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(index),
        Err(source) => {
            return Err(StorageError::ReadDir {
                path: dir.to_path_buf(),
                source,
            })
        }
    };

    let mut paths: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "md"))
        .collect();
    paths.sort();

    for path in paths {
        let text = match std::fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) => {
                tracing::debug!("Skipping unreadable document {}: {}", path.display(), e);
                continue;
            }
        };

        let Some(link) = parse_front_matter(&text)
            .and_then(|mut meta| meta.remove("link"))
            .filter(|link| !link.is_empty())
        else {
            continue;
        };

        if !index.insert(&link, path.clone()) {
            tracing::warn!(
                "Duplicate link {} in {}; keeping the earlier document",
                link,
                path.display()
            );
        }
    }

    tracing::info!("Indexed {} existing documents in {}", index.len(), dir.display());
    Ok(index)
}
