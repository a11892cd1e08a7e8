//! Discovery of PHP source files under a project root.

use std::{
    collections::BTreeSet,
    path::{Path, PathBuf},
};

use glob::{Pattern, glob};
use tracing::{debug, warn};
use walkdir::WalkDir;

const PHP_EXTENSION: &str = "php";

/// Patterns without wildcards are treated as literal paths.
fn is_glob_pattern(pattern: &str) -> bool {
    pattern.contains('*') || pattern.contains('?')
}

/// Result of scanning files.
#[derive(Debug, Default)]
pub struct ScanResult {
    /// Sorted, deduplicated PHP files.
    pub files: Vec<PathBuf>,
    /// Entries that could not be accessed during the walk.
    pub skipped_count: usize,
}

pub fn scan_files(root: &Path, includes: &[String], ignores: &[String]) -> ScanResult {
    let mut files = BTreeSet::new();
    let mut skipped_count = 0;

    let mut literal_ignores: Vec<PathBuf> = Vec::new();
    let mut ignore_patterns: Vec<Pattern> = Vec::new();
    for p in ignores {
        if is_glob_pattern(p) {
            match Pattern::new(p) {
                Ok(pattern) => ignore_patterns.push(pattern),
                Err(e) => warn!(pattern = %p, error = %e, "invalid ignore pattern"),
            }
        } else {
            literal_ignores.push(root.join(p));
        }
    }

    for dir in include_dirs(root, includes) {
        for entry in WalkDir::new(&dir).sort_by_file_name() {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    skipped_count += 1;
                    debug!(error = %e, "cannot access path");
                    continue;
                }
            };
            let path = entry.path();

            if literal_ignores.iter().any(|ignore| path.starts_with(ignore)) {
                continue;
            }
            let path_str = path.to_string_lossy();
            if ignore_patterns.iter().any(|p| p.matches(&path_str)) {
                continue;
            }

            if entry.file_type().is_file() && is_php_file(path) {
                files.insert(path.to_path_buf());
            }
        }
    }

    ScanResult {
        files: files.into_iter().collect(),
        skipped_count,
    }
}

/// Directories to walk. An empty include list walks the whole root.
fn include_dirs(root: &Path, includes: &[String]) -> Vec<PathBuf> {
    if includes.is_empty() {
        return vec![root.to_path_buf()];
    }

    let mut dirs = Vec::new();
    for inc in includes {
        if is_glob_pattern(inc) {
            let pattern = root.join(inc);
            match glob(&pattern.to_string_lossy()) {
                Ok(entries) => dirs.extend(entries.flatten().filter(|p| p.is_dir())),
                Err(e) => warn!(pattern = %inc, error = %e, "invalid include pattern"),
            }
        } else {
            let path = root.join(inc);
            if path.exists() {
                dirs.push(path);
            } else {
                debug!(path = %path.display(), "include path does not exist");
            }
        }
    }
    dirs
}

fn is_php_file(path: &Path) -> bool {
    path.extension().and_then(|s| s.to_str()) == Some(PHP_EXTENSION)
}
