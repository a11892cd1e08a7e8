use tree_sitter::Node;

use super::{AccessorCall, SourceFile};
use crate::core::{Position, Range};

/// Default accessor function names.
pub const DEFAULT_FUNCTIONS: &[&str] = &["env"];

/// Finds accessor calls in PHP syntax trees.
#[derive(Debug, Clone)]
pub struct AccessorQuery {
    functions: Vec<String>,
}

impl Default for AccessorQuery {
    fn default() -> Self {
        Self::new(DEFAULT_FUNCTIONS.iter().map(|f| f.to_string()))
    }
}

impl AccessorQuery {
    pub fn new(functions: impl IntoIterator<Item = String>) -> Self {
        Self {
            functions: functions.into_iter().collect(),
        }
    }

    pub fn functions(&self) -> &[String] {
        &self.functions
    }

    /// Every accessor call in the file, in document order.
    pub fn all_accessor_calls<'t>(&self, file: &'t SourceFile) -> Vec<AccessorCall<'t>> {
        self.collect(file, None)
    }

    /// Accessor calls whose range intersects `range`, in document order.
    pub fn accessor_calls_in_range<'t>(
        &self,
        file: &'t SourceFile,
        range: Range,
    ) -> Vec<AccessorCall<'t>> {
        self.collect(file, Some(range))
    }

    /// The innermost accessor call containing `position`.
    pub fn accessor_call_at_position<'t>(
        &self,
        file: &'t SourceFile,
        position: Position,
    ) -> Option<AccessorCall<'t>> {
        self.collect(file, Some(Range::point(position)))
            .into_iter()
            .filter(|call| call.range().contains(position))
            .min_by_key(|call| call.node().byte_range().len())
    }

    fn collect<'t>(&self, file: &'t SourceFile, within: Option<Range>) -> Vec<AccessorCall<'t>> {
        let src = file.src();
        let mut calls = Vec::new();
        let mut stack = vec![file.tree().root_node()];

        while let Some(node) = stack.pop() {
            if let Some(range) = within
                && !node_range(node).intersects(&range)
            {
                continue;
            }

            if node.kind() == "function_call_expression" && self.is_accessor(node, src) {
                calls.push(AccessorCall::new(node));
            }

            // Push in reverse so children are visited in document order.
            let mut cursor = node.walk();
            let children: Vec<Node<'t>> = node.named_children(&mut cursor).collect();
            stack.extend(children.into_iter().rev());
        }

        calls
    }

    fn is_accessor(&self, call: Node<'_>, src: &str) -> bool {
        let Some(function) = call.child_by_field_name("function") else {
            return false;
        };
        let Some(text) = src.get(function.byte_range()) else {
            return false;
        };

        // `\env` and `Illuminate\Support\env` both resolve to `env`.
        let name = text.rsplit('\\').next().unwrap_or(text).trim();
        self.functions.iter().any(|f| f == name)
    }
}

fn node_range(node: Node<'_>) -> Range {
    Range::new(node.start_position().into(), node.end_position().into())
}
