use std::path::PathBuf;

use thiserror::Error;

/// Result type for provider operations
pub type Result<T> = std::result::Result<T, EnvError>;

/// Errors raised while resolving environment variables
#[derive(Error, Debug)]
pub enum EnvError {
    /// A definitions file could not be opened or read
    #[error("failed to read env file {}: {source}", path.display())]
    FileUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A PHP source file could not be read
    #[error("failed to read source file {}: {source}", path.display())]
    SourceUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// tree-sitter could not produce a syntax tree
    #[error("failed to parse source file {}: {message}", path.display())]
    SourceParse { path: PathBuf, message: String },
}

impl EnvError {
    pub fn file_unreadable(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileUnreadable {
            path: path.into(),
            source,
        }
    }

    pub fn source_unreadable(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::SourceUnreadable {
            path: path.into(),
            source,
        }
    }

    pub fn source_parse(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::SourceParse {
            path: path.into(),
            message: message.into(),
        }
    }
}
