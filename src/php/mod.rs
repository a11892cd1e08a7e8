//! PHP source parsing and `env()` call lookup.
//!
//! Sources are parsed with tree-sitter-php. An accessor call is a plain
//! function call (`function_call_expression`) whose callee name, ignoring any
//! namespace qualifier, is one of the configured accessor functions.
//!
//! ## Module Structure
//!
//! - `accessor`: [`AccessorCall`] view over a call node (key, default, range)
//! - `query`: [`AccessorQuery`] lookups by range, position, or whole file

mod accessor;
mod query;

use std::path::{Path, PathBuf};

use tree_sitter::{Parser, Tree};

use crate::error::{EnvError, Result};

pub use accessor::AccessorCall;
pub use query::AccessorQuery;

/// A parsed PHP file.
pub struct SourceFile {
    path: PathBuf,
    src: String,
    tree: Tree,
}

impl SourceFile {
    pub fn parse(path: impl Into<PathBuf>, src: impl Into<String>) -> Result<Self> {
        let path = path.into();
        let src = src.into();

        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_php::LANGUAGE_PHP.into())
            .map_err(|e| EnvError::source_parse(&path, format!("failed to set language: {e}")))?;
        let tree = parser
            .parse(&src, None)
            .ok_or_else(|| EnvError::source_parse(&path, "parser returned no tree"))?;

        Ok(Self { path, src, tree })
    }

    /// Read and parse a file from disk.
    pub fn read(path: &Path) -> Result<Self> {
        let src =
            std::fs::read_to_string(path).map_err(|e| EnvError::source_unreadable(path, e))?;
        Self::parse(path, src)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn src(&self) -> &str {
        &self.src
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    /// The source text of line `line` (0-indexed) without its terminator.
    pub fn line_text(&self, line: u32) -> Option<&str> {
        self.src
            .split('\n')
            .nth(line as usize)
            .map(|l| l.strip_suffix('\r').unwrap_or(l))
    }
}

impl std::fmt::Debug for SourceFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceFile")
            .field("path", &self.path)
            .field("len", &self.src.len())
            .finish()
    }
}
