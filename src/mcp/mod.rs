//! Model Context Protocol (MCP) server implementation.
//!
//! Exposes the provider's hover, definition, completion, diagnostics and
//! code-action features as MCP tools over stdio.
//!
//! ## Module Structure
//!
//! - `server`: tool router and stdio entry point
//! - `types`: tool parameters and JSON results

mod server;
pub mod types;

pub use server::{EnvLensMcpServer, run_server};
