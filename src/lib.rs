//! envlens - `env()` key resolution for PHP projects
//!
//! envlens reads a project's `.env` file (and its `.env.example` companion)
//! and answers editor-style questions about `env('KEY')` calls in PHP
//! sources: the key's value, where it is defined, which keys complete a
//! partial key, which keys are undefined, and what line would define them.
//!
//! ## Module Structure
//!
//! - `cache`: Read-through cache of definitions files
//! - `cli`: Command-line interface layer (`check`, `fix`, `init`)
//! - `config`: Configuration file loading and parsing
//! - `core`: Definitions parser, snapshot repository, positions
//! - `error`: Library error type
//! - `mcp`: Model Context Protocol server implementation
//! - `php`: tree-sitter parsing and accessor-call lookup
//! - `provider`: Hover, definition, completion, diagnostics and code actions
//! - `scanner`: PHP source discovery

pub mod cache;
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod mcp;
pub mod php;
pub mod provider;
pub mod scanner;
