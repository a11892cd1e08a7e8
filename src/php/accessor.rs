use tree_sitter::Node;

use crate::core::{Position, Range};

/// String node kinds that may hold a literal key.
const STRING_KINDS: &[&str] = &["string", "encapsed_string"];

/// Children of a string node that keep it a plain literal.
const LITERAL_PARTS: &[&str] = &["string_content", "string_value", "escape_sequence"];

/// One `env(...)` call in a parsed source file.
#[derive(Debug, Clone, Copy)]
pub struct AccessorCall<'tree> {
    node: Node<'tree>,
}

impl<'tree> AccessorCall<'tree> {
    pub(crate) fn new(node: Node<'tree>) -> Self {
        Self { node }
    }

    pub fn node(&self) -> Node<'tree> {
        self.node
    }

    /// Full range of the call expression.
    pub fn range(&self) -> Range {
        Range::new(
            self.node.start_position().into(),
            self.node.end_position().into(),
        )
    }

    /// Literal key passed as first argument.
    ///
    /// Returns an empty string when there is no first argument or it is not a
    /// plain string literal (variables, concatenation, interpolation).
    pub fn key(&self, src: &str) -> String {
        self.key_literal(src)
            .map(|(key, _)| key.to_string())
            .unwrap_or_default()
    }

    /// Part of the key literal typed before `position`.
    ///
    /// Outside of the literal this is the whole key. `None` when the first
    /// argument is not a plain string literal.
    pub fn key_prefix(&self, src: &str, position: Position) -> Option<String> {
        let (key, start) = self.key_literal(src)?;

        if position.line != start.line || position.column < start.column {
            return Some(key.to_string());
        }

        let typed = (position.column - start.column) as usize;
        if typed >= key.len() || !key.is_char_boundary(typed) {
            return Some(key.to_string());
        }
        Some(key[..typed].to_string())
    }

    /// True when the call passes a fallback value after the key.
    pub fn has_default(&self) -> bool {
        self.argument_values().len() > 1
    }

    /// Key text and the position where it starts, after the opening quote.
    fn key_literal<'s>(&self, src: &'s str) -> Option<(&'s str, Position)> {
        let first = *self.argument_values().first()?;
        if !STRING_KINDS.contains(&first.kind()) || first.has_error() {
            return None;
        }

        let mut cursor = first.walk();
        let dynamic = first
            .named_children(&mut cursor)
            .any(|child| !LITERAL_PARTS.contains(&child.kind()));
        if dynamic {
            return None;
        }

        let text = src.get(first.byte_range())?;
        let quote = text.chars().find(|c| *c == '\'' || *c == '"')?;
        let open = text.find(quote)?;
        let inner = &text[open + 1..];
        let inner = inner.strip_suffix(quote).unwrap_or(inner);

        let mut start: Position = first.start_position().into();
        start.column += open as u32 + 1;
        Some((inner, start))
    }

    /// Value expressions of each argument, in call order.
    fn argument_values(&self) -> Vec<Node<'tree>> {
        let Some(arguments) = self.node.child_by_field_name("arguments") else {
            return Vec::new();
        };

        let mut cursor = arguments.walk();
        arguments
            .named_children(&mut cursor)
            .filter(|child| child.kind() == "argument")
            .filter_map(|argument| {
                let count = argument.named_child_count();
                // Named arguments (`key: 'X'`) put the value last.
                count.checked_sub(1).and_then(|last| argument.named_child(last))
            })
            .collect()
    }
}
