use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

use crate::core::{Position, Range};

/// Hover text shown for an undefined key.
pub const UNDEFINED_HOVER: &str = "[undefined]";

/// Hover text shown for a key defined with an empty value.
pub const EMPTY_HOVER: &str = "[empty]";

/// Message of the undefined-variable diagnostic.
pub const UNDEFINED_MESSAGE: &str = "Environment variable is not defined";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Hover {
    pub content: String,
}

/// Point location inside a definitions file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub path: PathBuf,
    pub position: Position,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CompletionItemKind {
    Constant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompletionItem {
    pub label: String,
    pub detail: String,
    pub kind: CompletionItemKind,
}

/// Severity level of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Range of the whole accessor call.
    pub range: Range,
    pub severity: Severity,
    pub message: String,
    /// The undefined key.
    pub key: String,
}

/// Which quick fix a [`CodeAction`] applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum QuickFix {
    /// Insert the key with the value found in the example file.
    CopyFromExample,
    /// Insert the key with an empty value.
    AddEmpty,
}

/// Quick fix inserting one `KEY=value` line into the primary definitions file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeAction {
    pub title: String,
    pub fix: QuickFix,
    /// `file://` URI of the primary definitions file.
    pub uri: String,
    /// Row at which the new line is inserted.
    pub line: u32,
    /// The inserted definition, without line terminator.
    pub text: String,
    /// The undefined key the action defines.
    pub key: String,
}

impl CodeAction {
    /// Text of the edit, inserted at column 0 of `line`.
    pub fn edit_text(&self) -> String {
        format!("{}\n", self.text)
    }
}
