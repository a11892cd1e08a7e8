use std::{
    fs,
    path::{Path, PathBuf},
    process::Command,
};

use anyhow::{Context, Ok, Result};
use insta_cmd::get_cargo_bin;
use tempfile::TempDir;

mod check;

const BIN_NAME: &str = "envlens";

/// A small Laravel-like project: `APP_KEY` and `MISSING_KEY` are undefined.
pub const APP_CONFIG: &str = r#"<?php

return [
    'name' => env('APP_NAME'),
    'key' => env('APP_KEY'),
    'missing' => env('MISSING_KEY'),
    'debug' => env('APP_DEBUG', false),
];
"#;

pub struct CliTest {
    _temp_dir: TempDir,
    project_dir: PathBuf,
    root_pattern: String,
}

impl CliTest {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let project_dir = temp_dir.path().canonicalize()?;
        // Stop config discovery at the project root.
        fs::create_dir(project_dir.join(".git"))?;
        let root_pattern = escape_regex(&project_dir.to_string_lossy());
        Ok(Self {
            _temp_dir: temp_dir,
            project_dir,
            root_pattern,
        })
    }

    /// Project with `config/app.php`, `.env` and `.env.example`.
    pub fn laravel() -> Result<Self> {
        let test = Self::new()?;
        test.write_file("config/app.php", APP_CONFIG)?;
        test.write_file(".env", "APP_NAME=Laravel\n")?;
        test.write_file(".env.example", "APP_NAME=\nAPP_KEY=base64:secret\n")?;
        Ok(test)
    }

    pub fn write_file(&self, path: &str, content: &str) -> Result<()> {
        let file_path = self.project_dir.join(path);

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory:{}", parent.display()))?;
        }

        fs::write(&file_path, content)
            .with_context(|| format!("Failed to write file: {}", file_path.display()))?;

        Ok(())
    }

    pub fn root(&self) -> &Path {
        &self.project_dir
    }

    /// Snapshot filters replacing the temporary project path with `[ROOT]`.
    pub fn filters(&self) -> Vec<(&str, &str)> {
        vec![(self.root_pattern.as_str(), "[ROOT]")]
    }

    pub fn command(&self) -> Command {
        let mut cmd = Command::new(get_cargo_bin(BIN_NAME));
        cmd.current_dir(&self.project_dir);
        cmd.env_clear();
        cmd.env("NO_COLOR", "1"); // Disable colors for consistent test output
        cmd.env("ENVLENS_LOG", "off"); // Keep log lines out of stderr snapshots
        cmd
    }

    pub fn check_command(&self) -> Command {
        let mut cmd = self.command();
        cmd.arg("check");
        cmd
    }

    pub fn fix_command(&self) -> Command {
        let mut cmd = self.command();
        cmd.arg("fix");
        cmd
    }

    pub fn read_file(&self, path: &str) -> Result<String> {
        let file_path = self.project_dir.join(path);
        fs::read_to_string(&file_path)
            .with_context(|| format!("Failed to read file: {}", file_path.display()))
    }
}

fn escape_regex(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if "\\.+*?()|[]{}^$#&-~".contains(c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
