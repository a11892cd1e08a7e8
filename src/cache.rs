//! Read-through cache for definitions files.
//!
//! Entries are keyed by path and revalidated against the file's modification
//! time and length on every `open`, so an edited `.env` is picked up on the
//! next request without an explicit invalidation.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use parking_lot::RwLock;
use tracing::debug;

use crate::core::Position;

/// File contents as last read from disk.
#[derive(Debug)]
pub struct CachedFile {
    path: PathBuf,
    content: String,
    modified: Option<SystemTime>,
    len: u64,
}

impl CachedFile {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Position just past the last byte of the file.
    pub fn end_position(&self) -> Position {
        Position::end_of(&self.content)
    }

    fn is_fresh(&self, modified: Option<SystemTime>, len: u64) -> bool {
        self.modified.is_some() && self.modified == modified && self.len == len
    }
}

#[derive(Debug, Default)]
pub struct FileCache {
    files: RwLock<HashMap<PathBuf, Arc<CachedFile>>>,
}

impl FileCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the current contents of `path`, reading from disk when the
    /// cached copy is missing or stale.
    pub fn open(&self, path: &Path) -> io::Result<Arc<CachedFile>> {
        let metadata = fs::metadata(path)?;
        let modified = metadata.modified().ok();
        let len = metadata.len();

        if let Some(cached) = self.files.read().get(path)
            && cached.is_fresh(modified, len)
        {
            return Ok(Arc::clone(cached));
        }

        debug!(path = %path.display(), "reading file");
        let content = fs::read_to_string(path)?;
        let file = Arc::new(CachedFile {
            path: path.to_path_buf(),
            content,
            modified,
            len,
        });
        self.files
            .write()
            .insert(path.to_path_buf(), Arc::clone(&file));
        Ok(file)
    }

    /// The cached copy of `path`, if it was opened before.
    pub fn get(&self, path: &Path) -> Option<Arc<CachedFile>> {
        self.files.read().get(path).cloned()
    }

    pub fn invalidate(&self, path: &Path) {
        self.files.write().remove(path);
    }
}
