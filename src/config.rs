use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result, bail};
use glob::Pattern;
use serde::{Deserialize, Serialize};

use crate::provider::ProviderOptions;

pub const CONFIG_FILE_NAME: &str = ".envlensrc.json";

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_env_file")]
    pub env_file: String,
    #[serde(default = "default_example_file")]
    pub example_file: String,
    #[serde(default = "default_functions")]
    pub functions: Vec<String>,
    #[serde(default = "default_includes")]
    pub includes: Vec<String>,
    #[serde(default = "default_ignores")]
    pub ignores: Vec<String>,
}

fn default_env_file() -> String {
    ".env".to_string()
}

fn default_example_file() -> String {
    ".env.example".to_string()
}

fn default_functions() -> Vec<String> {
    vec!["env".to_string()]
}

fn default_includes() -> Vec<String> {
    ["app", "config", "routes", "database", "resources"]
        .map(String::from)
        .to_vec()
}

fn default_ignores() -> Vec<String> {
    ["**/vendor/**", "**/node_modules/**"]
        .map(String::from)
        .to_vec()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            env_file: default_env_file(),
            example_file: default_example_file(),
            functions: default_functions(),
            includes: default_includes(),
            ignores: default_ignores(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error for invalid glob patterns in `ignores` or `includes`,
    /// an empty accessor function list, or empty file names.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.ignores {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
        }

        // Includes without wildcards are literal directories.
        for pattern in &self.includes {
            if pattern.contains('*') || pattern.contains('?') {
                Pattern::new(pattern).with_context(|| {
                    format!("Invalid glob pattern in 'includes': \"{}\"", pattern)
                })?;
            }
        }

        if self.functions.iter().all(|f| f.trim().is_empty()) {
            bail!("'functions' must name at least one accessor function");
        }
        if self.env_file.trim().is_empty() {
            bail!("'envFile' must not be empty");
        }
        if self.example_file.trim().is_empty() {
            bail!("'exampleFile' must not be empty");
        }

        Ok(())
    }

    pub fn provider_options(&self) -> ProviderOptions {
        ProviderOptions {
            env_file: self.env_file.clone(),
            example_file: self.example_file.clone(),
            functions: self
                .functions
                .iter()
                .map(|f| f.trim().to_string())
                .filter(|f| !f.is_empty())
                .collect(),
        }
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
        }),
    }
}
