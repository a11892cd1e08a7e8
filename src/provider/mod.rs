//! Resolution of `env()` calls against the project's definitions files.
//!
//! Every feature follows the same steps: find the accessor call(s) the
//! request is about, refresh the primary and example repositories through
//! the file cache, then answer from the primary repository. When no call is
//! found, or the primary file cannot be read, nothing is published.
//!
//! ## Module Structure
//!
//! - `publish`: request/response boundary ([`Request`], [`Response`], [`Publisher`])
//! - `refresh`: policy combining the required and optional file reads
//! - `types`: published payloads (hover, location, completion, diagnostic, code action)

pub mod publish;
pub mod refresh;
pub mod types;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::cache::FileCache;
use crate::core::{Position, Range, Repository, insertion_row};
use crate::error::{EnvError, Result};
use crate::php::{AccessorCall, AccessorQuery, SourceFile};

pub use publish::{Publisher, Request, Response};
pub use refresh::{Reconciled, reconcile};
pub use types::{
    CodeAction, CompletionItem, CompletionItemKind, Diagnostic, EMPTY_HOVER, Hover, Location,
    QuickFix, Severity, UNDEFINED_HOVER, UNDEFINED_MESSAGE,
};

/// File names and accessor functions a provider works with.
#[derive(Debug, Clone)]
pub struct ProviderOptions {
    pub env_file: String,
    pub example_file: String,
    pub functions: Vec<String>,
}

impl Default for ProviderOptions {
    fn default() -> Self {
        Self {
            env_file: ".env".to_string(),
            example_file: ".env.example".to_string(),
            functions: vec!["env".to_string()],
        }
    }
}

/// Answers editor requests about `env()` calls for one project root.
#[derive(Debug)]
pub struct EnvProvider {
    root: PathBuf,
    env_path: PathBuf,
    example_path: PathBuf,
    env_file: String,
    example_file: String,
    query: AccessorQuery,
    cache: Arc<FileCache>,
    repo: Repository,
    example_repo: Repository,
}

impl EnvProvider {
    pub fn new(root: impl Into<PathBuf>, options: ProviderOptions, cache: Arc<FileCache>) -> Self {
        let root = root.into();
        Self {
            env_path: root.join(&options.env_file),
            example_path: root.join(&options.example_file),
            root,
            env_file: options.env_file,
            example_file: options.example_file,
            query: AccessorQuery::new(options.functions),
            cache,
            repo: Repository::new(),
            example_repo: Repository::new(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn env_path(&self) -> &Path {
        &self.env_path
    }

    pub fn example_path(&self) -> &Path {
        &self.example_path
    }

    pub fn query(&self) -> &AccessorQuery {
        &self.query
    }

    /// Definitions from the primary file, as of the last refresh.
    pub fn repository(&self) -> &Repository {
        &self.repo
    }

    /// Definitions from the example file, as of the last successful read.
    pub fn example_repository(&self) -> &Repository {
        &self.example_repo
    }

    /// Re-read both definitions files and install fresh snapshots.
    ///
    /// Fails only when the primary file cannot be read.
    pub fn refresh(&self) -> Result<()> {
        let example = self
            .cache
            .open(&self.example_path)
            .map_err(|e| EnvError::file_unreadable(&self.example_path, e));
        let primary = self
            .cache
            .open(&self.env_path)
            .map_err(|e| EnvError::file_unreadable(&self.env_path, e));

        let Reconciled { primary, example } = reconcile(primary, example)?;

        if let Some(example) = example {
            self.example_repo.load(example.content());
        }
        let report = self.repo.load(primary.content());
        debug!(
            path = %self.env_path.display(),
            entries = report.entries,
            skipped = report.skipped.len(),
            "refreshed env definitions"
        );
        Ok(())
    }

    /// Dispatch `request` to its feature and publish the answer, if any.
    pub fn handle(
        &self,
        file: &SourceFile,
        request: Request,
        cancel: &CancellationToken,
        publisher: &mut dyn Publisher,
    ) {
        let response = match request {
            Request::Hover { position } => self.hover(file, position, cancel).map(Response::Hover),
            Request::Definition { position } => self
                .definition(file, position, cancel)
                .map(Response::Definition),
            Request::Completion { position } => self
                .completion(file, position, cancel)
                .map(Response::Completion),
            Request::Diagnostics => self.diagnostics(file, cancel).map(Response::Diagnostics),
            Request::CodeActions { range } => self
                .code_actions(file, range, cancel)
                .map(Response::CodeActions),
        };

        if let Some(response) = response
            && !cancel.is_cancelled()
        {
            publisher.publish(response);
        }
    }

    /// Value of the key under the cursor.
    pub fn hover(
        &self,
        file: &SourceFile,
        position: Position,
        cancel: &CancellationToken,
    ) -> Option<Hover> {
        let call = self.query.accessor_call_at_position(file, position)?;
        self.prepare(cancel)?;

        let key = non_empty_key(&call, file)?;
        let content = match self.repo.get(&key) {
            None => UNDEFINED_HOVER.to_string(),
            Some(entry) if entry.value.is_empty() => EMPTY_HOVER.to_string(),
            Some(entry) => entry.value,
        };
        Some(Hover { content })
    }

    /// Where the key under the cursor is defined.
    pub fn definition(
        &self,
        file: &SourceFile,
        position: Position,
        cancel: &CancellationToken,
    ) -> Option<Location> {
        let call = self.query.accessor_call_at_position(file, position)?;
        self.prepare(cancel)?;

        let key = non_empty_key(&call, file)?;
        let entry = self.repo.get(&key)?;
        Some(Location {
            path: self.env_path.clone(),
            position: entry.position,
        })
    }

    /// Defined keys starting with the text typed before the cursor.
    pub fn completion(
        &self,
        file: &SourceFile,
        position: Position,
        cancel: &CancellationToken,
    ) -> Option<Vec<CompletionItem>> {
        let call = self.query.accessor_call_at_position(file, position)?;
        self.prepare(cancel)?;

        // An empty literal (`env('')`) is a valid prefix matching every key.
        let prefix = call.key_prefix(file.src(), position)?;
        let items = self
            .repo
            .find(&prefix)
            .into_iter()
            .map(|(key, entry)| CompletionItem {
                label: key,
                detail: entry.value,
                kind: CompletionItemKind::Constant,
            })
            .collect();
        Some(items)
    }

    /// Undefined keys used without a default, for the whole file.
    pub fn diagnostics(
        &self,
        file: &SourceFile,
        cancel: &CancellationToken,
    ) -> Option<Vec<Diagnostic>> {
        let calls = self.query.all_accessor_calls(file);
        if calls.is_empty() {
            return None;
        }
        self.prepare(cancel)?;

        let snapshot = self.repo.snapshot();
        let mut diagnostics = Vec::new();
        for call in calls {
            if cancel.is_cancelled() {
                return None;
            }
            let Some(key) = non_empty_key(&call, file) else {
                continue;
            };
            if !snapshot.exists(&key) && !call.has_default() {
                diagnostics.push(Diagnostic {
                    range: call.range(),
                    severity: Severity::Error,
                    message: UNDEFINED_MESSAGE.to_string(),
                    key,
                });
            }
        }
        Some(diagnostics)
    }

    /// Quick fixes adding undefined keys in `range` to the primary file.
    pub fn code_actions(
        &self,
        file: &SourceFile,
        range: Range,
        cancel: &CancellationToken,
    ) -> Option<Vec<CodeAction>> {
        let calls = self.query.accessor_calls_in_range(file, range);
        if calls.is_empty() {
            return None;
        }
        self.prepare(cancel)?;

        let snapshot = self.repo.snapshot();
        let example = self.example_repo.snapshot();
        let uri = format!("file://{}", self.env_path.display());
        let mut actions = Vec::new();

        for call in calls {
            if cancel.is_cancelled() {
                return None;
            }
            // An empty or dynamic key ends the scan; earlier actions stand.
            let Some(key) = non_empty_key(&call, file) else {
                break;
            };
            if snapshot.exists(&key) {
                continue;
            }

            let Some(env_file) = self.cache.get(&self.env_path) else {
                warn!(path = %self.env_path.display(), "env file missing from cache");
                return None;
            };
            let line = insertion_row(env_file.end_position());

            if let Some(entry) = example.get(&key) {
                actions.push(CodeAction {
                    title: format!("Copy value from {}", self.example_file),
                    fix: QuickFix::CopyFromExample,
                    uri: uri.clone(),
                    line,
                    text: format!("{}={}", key, entry.value),
                    key: key.clone(),
                });
            }
            actions.push(CodeAction {
                title: format!("Add value to {} file", self.env_file),
                fix: QuickFix::AddEmpty,
                uri: uri.clone(),
                line,
                text: format!("{}=", key),
                key,
            });
        }
        Some(actions)
    }

    /// Shared preamble once a call was found: bail out on cancellation,
    /// otherwise refresh the repositories.
    fn prepare(&self, cancel: &CancellationToken) -> Option<()> {
        if cancel.is_cancelled() {
            return None;
        }
        self.refresh().ok()?;
        if cancel.is_cancelled() {
            return None;
        }
        Some(())
    }
}

fn non_empty_key(call: &AccessorCall<'_>, file: &SourceFile) -> Option<String> {
    let key = call.key(file.src());
    (!key.is_empty()).then_some(key)
}
