//! Definition-file model shared by every request.
//!
//! ## Module Structure
//!
//! - `dotenv`: line parser for `KEY=VALUE` files
//! - `insertion`: where quick-fix lines are appended
//! - `position`: 0-indexed positions and ranges
//! - `repository`: snapshot store built from one definitions file

pub mod dotenv;
pub mod insertion;
pub mod position;
pub mod repository;

pub use dotenv::{Entry, ParsedDefinitions, SkipReason, SkippedLine};
pub use insertion::insertion_row;
pub use position::{Position, Range};
pub use repository::{LoadReport, Repository, Snapshot};
