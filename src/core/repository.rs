//! In-memory store of definitions parsed from one file.
//!
//! The store is a sequence of immutable snapshots. `load` parses the new
//! content without holding any lock and then swaps the snapshot in under the
//! write lock, so a reader always sees one complete snapshot.

use std::collections::BTreeMap;
use std::ops::Bound;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use super::dotenv::{self, Entry, SkippedLine};

/// One immutable generation of a [`Repository`].
#[derive(Debug, Default)]
pub struct Snapshot {
    entries: BTreeMap<String, Entry>,
}

impl Snapshot {
    pub fn from_content(content: &str) -> (Self, Vec<SkippedLine>) {
        let parsed = dotenv::parse(content);
        (
            Self {
                entries: parsed.entries,
            },
            parsed.skipped,
        )
    }

    pub fn get(&self, key: &str) -> Option<&Entry> {
        self.entries.get(key)
    }

    pub fn exists(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Entries whose key starts with `prefix`, in ascending key order.
    pub fn find<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = &'a Entry> + 'a {
        self.entries
            .range::<str, _>((Bound::Included(prefix), Bound::Unbounded))
            .take_while(move |(key, _)| key.starts_with(prefix))
            .map(|(_, entry)| entry)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Outcome of [`Repository::load`].
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    /// Number of distinct keys in the installed snapshot.
    pub entries: usize,
    /// Lines that were ignored while parsing.
    pub skipped: Vec<SkippedLine>,
}

/// Thread-safe holder of the current [`Snapshot`].
#[derive(Debug, Default)]
pub struct Repository {
    current: RwLock<Arc<Snapshot>>,
}

impl Repository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `content` and install it as the current snapshot.
    pub fn load(&self, content: &str) -> LoadReport {
        let (snapshot, skipped) = Snapshot::from_content(content);
        for line in &skipped {
            debug!(line = line.line + 1, reason = %line.reason, "skipped definition line");
        }
        let report = LoadReport {
            entries: snapshot.len(),
            skipped,
        };
        self.install(Arc::new(snapshot));
        report
    }

    /// Replace the current snapshot wholesale.
    pub fn install(&self, snapshot: Arc<Snapshot>) {
        *self.current.write() = snapshot;
    }

    /// The current snapshot. Later loads do not affect the returned value.
    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.current.read().clone()
    }

    pub fn get(&self, key: &str) -> Option<Entry> {
        self.snapshot().get(key).cloned()
    }

    pub fn exists(&self, key: &str) -> bool {
        self.snapshot().exists(key)
    }

    /// All `(key, entry)` pairs whose key starts with `prefix`, sorted by key.
    ///
    /// An empty prefix returns every entry.
    pub fn find(&self, prefix: &str) -> Vec<(String, Entry)> {
        self.snapshot()
            .find(prefix)
            .map(|entry| (entry.key.clone(), entry.clone()))
            .collect()
    }

    pub fn keys(&self) -> Vec<String> {
        self.snapshot().keys().map(str::to_string).collect()
    }

    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot().is_empty()
    }
}
