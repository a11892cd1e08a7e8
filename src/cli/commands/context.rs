use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use anyhow::{Context, Result};
use rayon::prelude::*;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use super::super::args::CommonArgs;
use crate::{
    cache::FileCache,
    config::{Config, ConfigLoadResult, load_config},
    php::SourceFile,
    provider::{Diagnostic, EnvProvider},
    scanner::scan_files,
};

/// Project state shared by `check` and `fix`.
pub struct CheckContext {
    pub root: PathBuf,
    pub config: Config,
    pub provider: EnvProvider,
    pub files: Vec<PathBuf>,
}

/// An undefined key usage, located for display.
#[derive(Debug, Clone)]
pub struct Finding {
    /// Path relative to the project root.
    pub file_path: String,
    /// 1-based line.
    pub line: usize,
    /// 1-based column, in characters.
    pub col: usize,
    pub source_line: String,
    pub diagnostic: Diagnostic,
}

#[derive(Debug, Default)]
pub struct Findings {
    pub findings: Vec<Finding>,
    pub parse_error_count: usize,
}

impl CheckContext {
    pub fn new(common: &CommonArgs) -> Result<Self> {
        let root = common
            .path
            .canonicalize()
            .with_context(|| format!("Project root not found: {}", common.path.display()))?;

        let ConfigLoadResult {
            mut config,
            from_file,
        } = load_config(&root)?;
        if let Some(env_file) = &common.env_file {
            config.env_file = env_file.clone();
        }
        if let Some(example_file) = &common.example_file {
            config.example_file = example_file.clone();
        }
        config.validate()?;
        debug!(root = %root.display(), from_file, "loaded configuration");

        let provider = EnvProvider::new(
            &root,
            config.provider_options(),
            Arc::new(FileCache::new()),
        );
        provider.refresh()?;

        let scan = scan_files(&root, &config.includes, &config.ignores);
        debug!(
            files = scan.files.len(),
            skipped = scan.skipped_count,
            "scanned sources"
        );

        Ok(Self {
            root,
            config,
            provider,
            files: scan.files,
        })
    }

    /// Run diagnostics over every scanned file in parallel.
    pub fn collect_findings(&self) -> Findings {
        let cancel = CancellationToken::new();
        let results: Vec<Option<Vec<Finding>>> = self
            .files
            .par_iter()
            .map(|path| match SourceFile::read(path) {
                Ok(file) => Some(
                    self.provider
                        .diagnostics(&file, &cancel)
                        .unwrap_or_default()
                        .into_iter()
                        .map(|diagnostic| self.locate(&file, diagnostic))
                        .collect(),
                ),
                Err(e) => {
                    warn!(error = %e, "skipping source file");
                    None
                }
            })
            .collect();

        let mut out = Findings::default();
        for result in results {
            match result {
                Some(findings) => out.findings.extend(findings),
                None => out.parse_error_count += 1,
            }
        }
        out.findings.sort_by(|a, b| {
            a.file_path
                .cmp(&b.file_path)
                .then_with(|| a.line.cmp(&b.line))
                .then_with(|| a.col.cmp(&b.col))
        });
        out
    }

    pub fn relative_path(&self, path: &Path) -> String {
        path.strip_prefix(&self.root)
            .unwrap_or(path)
            .to_string_lossy()
            .replace('\\', "/")
    }

    fn locate(&self, file: &SourceFile, diagnostic: Diagnostic) -> Finding {
        let start = diagnostic.range.start;
        let source_line = file.line_text(start.line).unwrap_or_default().to_string();
        let byte_col = start.column as usize;
        let col = source_line
            .get(..byte_col)
            .map_or(byte_col, |prefix| prefix.chars().count())
            + 1;

        Finding {
            file_path: self.relative_path(file.path()),
            line: start.line as usize + 1,
            col,
            source_line,
            diagnostic,
        }
    }
}
