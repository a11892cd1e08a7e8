use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::core::{Position, Range};
use crate::provider::{CodeAction, CompletionItem, Diagnostic, Hover, Location};

// ============================================================
// Parameters
// ============================================================

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectParams {
    /// Absolute path to the project root (the directory holding the .env file)
    pub project_root_path: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FileParams {
    /// Absolute path to the project root (the directory holding the .env file)
    pub project_root_path: String,
    /// PHP file path, absolute or relative to the project root
    pub file_path: String,
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PositionParams {
    /// Absolute path to the project root (the directory holding the .env file)
    pub project_root_path: String,
    /// PHP file path, absolute or relative to the project root
    pub file_path: String,
    /// 0-based line
    pub line: u32,
    /// 0-based byte column
    pub column: u32,
}

impl PositionParams {
    pub fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct RangeParams {
    /// Absolute path to the project root (the directory holding the .env file)
    pub project_root_path: String,
    /// PHP file path, absolute or relative to the project root
    pub file_path: String,
    /// 0-based start line
    pub start_line: u32,
    /// 0-based start byte column
    pub start_column: u32,
    /// 0-based end line
    pub end_line: u32,
    /// 0-based end byte column
    pub end_column: u32,
}

impl RangeParams {
    pub fn range(&self) -> Range {
        Range::new(
            Position::new(self.start_line, self.start_column),
            Position::new(self.end_line, self.end_column),
        )
    }
}

// ============================================================
// Results
// ============================================================

#[derive(Debug, Serialize)]
pub struct HoverResult {
    /// `None` when the position is not inside an accessor call with a literal key.
    pub hover: Option<Hover>,
}

#[derive(Debug, Serialize)]
pub struct DefinitionResult {
    pub definition: Option<Location>,
}

#[derive(Debug, Serialize)]
pub struct CompletionResult {
    pub items: Vec<CompletionItem>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticsResult {
    pub total_count: usize,
    pub diagnostics: Vec<Diagnostic>,
}

#[derive(Debug, Serialize)]
pub struct CodeActionsResult {
    pub actions: Vec<CodeAction>,
}

#[derive(Debug, Serialize)]
pub struct KeyInfo {
    pub key: String,
    pub value: String,
    pub position: Position,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeysResult {
    pub env_file: String,
    pub total_count: usize,
    pub keys: Vec<KeyInfo>,
    /// Keys the example file defines that the env file does not.
    pub missing_from_env: Vec<String>,
}
