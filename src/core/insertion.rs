use super::position::Position;

/// Row at which a new `KEY=value` line should be inserted into a file that
/// ends at `end`.
///
/// A file whose last line is already terminated ends at column 0, so the new
/// line goes on that (empty) row. Otherwise it goes on the next row so it is
/// never glued onto existing content.
pub fn insertion_row(end: Position) -> u32 {
    if end.column == 0 {
        end.line
    } else {
        end.line + 1
    }
}
