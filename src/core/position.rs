use std::fmt;

use serde::Serialize;

/// A location inside a text file.
///
/// Both fields are 0-indexed. Columns count bytes from the start of the line,
/// which is what tree-sitter reports for PHP sources as well.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }

    /// Position reached after reading all of `content`.
    ///
    /// A file ending with a line terminator ends at column 0 of the
    /// following (empty) line.
    pub fn end_of(content: &str) -> Self {
        let line = content.matches('\n').count();
        let column = match content.rfind('\n') {
            Some(idx) => content.len() - idx - 1,
            None => content.len(),
        };
        Self::new(line as u32, column as u32)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line + 1, self.column + 1)
    }
}

impl From<tree_sitter::Point> for Position {
    fn from(point: tree_sitter::Point) -> Self {
        Self::new(point.row as u32, point.column as u32)
    }
}

impl From<Position> for tree_sitter::Point {
    fn from(position: Position) -> Self {
        tree_sitter::Point::new(position.line as usize, position.column as usize)
    }
}

/// A half-open span between two positions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// Zero-width range at `position`.
    pub fn point(position: Position) -> Self {
        Self::new(position, position)
    }

    pub fn contains(&self, position: Position) -> bool {
        self.start <= position && position <= self.end
    }

    /// True when the two ranges share at least one position.
    ///
    /// Touching ranges count as intersecting so that a cursor placed right
    /// after a call still selects it.
    pub fn intersects(&self, other: &Range) -> bool {
        self.start <= other.end && other.start <= self.end
    }
}
