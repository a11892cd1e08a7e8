use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde_json::Value;
use tempfile::TempDir;

mod tools;

/// Accessor calls used by most tool tests. 0-based lines:
///
/// - 3: `APP_NAME` (defined)
/// - 4: `APP_DEBUG` (defined)
/// - 5: `APP_KEY` (only in the example file)
/// - 6: `MISSING_KEY` (nowhere)
/// - 7: `APP_URL` with a default
/// - 8: partial key `APP_`
pub const APP_CONFIG: &str = r#"<?php

return [
    'name' => env('APP_NAME'),
    'debug' => env('APP_DEBUG'),
    'key' => env('APP_KEY'),
    'missing' => env('MISSING_KEY'),
    'url' => env('APP_URL', 'http://localhost'),
    'partial' => env('APP_'),
];
"#;

/// Test fixture for MCP integration tests
///
/// Manages a temporary Laravel-like project with `.env` and `.env.example`.
pub struct McpTestFixture {
    _temp_dir: TempDir,
    project_root: PathBuf,
}

impl McpTestFixture {
    /// Create an empty test project
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let project_root = temp_dir.path().canonicalize()?;
        fs::create_dir(project_root.join(".git"))?;

        Ok(Self {
            _temp_dir: temp_dir,
            project_root,
        })
    }

    /// Project with `config/app.php` and both definitions files.
    pub fn laravel() -> Result<Self> {
        let fixture = Self::new()?;
        fixture.write_file("config/app.php", APP_CONFIG)?;
        fixture.write_file(".env", "APP_NAME=Laravel\nAPP_DEBUG=true\n")?;
        fixture.write_file(
            ".env.example",
            "APP_NAME=\nAPP_KEY=base64:secret\nMAIL_HOST=smtp\n",
        )?;
        Ok(fixture)
    }

    pub fn write_file(&self, relative_path: &str, content: &str) -> Result<()> {
        let path = self.project_root.join(relative_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, content)
            .with_context(|| format!("Failed to write file: {}", path.display()))?;
        Ok(())
    }

    /// Get the project root path as a string (for MCP parameters)
    pub fn root(&self) -> String {
        self.project_root.to_string_lossy().to_string()
    }

    /// Get the project root path as a Path reference
    pub fn root_path(&self) -> &Path {
        &self.project_root
    }
}

/// Extract JSON value from a successful CallToolResult
///
/// Panics if the result indicates an error or cannot be parsed
pub fn extract_tool_result_json(result: &rmcp::model::CallToolResult) -> Value {
    if let Some(true) = result.is_error {
        panic!("Tool call returned an error: {:?}", result);
    }

    assert!(
        !result.content.is_empty(),
        "Tool result should have content"
    );

    let content_item = &result.content[0];
    let text_content = content_item
        .as_text()
        .expect("Tool result content should be text");

    serde_json::from_str(&text_content.text).expect("Tool result should be valid JSON")
}
