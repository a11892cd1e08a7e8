//! Request and response boundary of the provider.
//!
//! A request produces at most one [`Response`]. Internal failures are logged
//! and result in nothing being published.

use super::types::{CodeAction, CompletionItem, Diagnostic, Hover, Location};
use crate::core::{Position, Range};

/// A feature request against one source file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Request {
    Hover { position: Position },
    Definition { position: Position },
    Completion { position: Position },
    Diagnostics,
    CodeActions { range: Range },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    Hover(Hover),
    Definition(Location),
    Completion(Vec<CompletionItem>),
    Diagnostics(Vec<Diagnostic>),
    CodeActions(Vec<CodeAction>),
}

/// Per-request sink for the provider's answer.
pub trait Publisher {
    fn publish(&mut self, response: Response);
}

impl Publisher for Option<Response> {
    fn publish(&mut self, response: Response) {
        *self = Some(response);
    }
}

impl Publisher for Vec<Response> {
    fn publish(&mut self, response: Response) {
        self.push(response);
    }
}
