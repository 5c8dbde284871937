//! Logical positions and selections.
//!
//! Positions are `(line, column)` pairs in **characters** (Unicode scalar values), both 0-based.
//! A [`Selection`] keeps the anchor/head orientation it was created with; helpers in this module
//! give the ordered `(min, max)` view used when a selection is resolved for editing.

use std::cmp::Ordering;

/// Position coordinates (line and column numbers)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    /// Zero-based logical line index.
    pub line: usize,
    /// Zero-based column in characters within the logical line.
    pub column: usize,
}

impl Position {
    /// Create a new logical position.
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> Ordering {
        self.line
            .cmp(&other.line)
            .then_with(|| self.column.cmp(&other.column))
    }
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A span marked for editing.
///
/// `anchor == head` is a caret.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    /// Where the selection started.
    pub anchor: Position,
    /// Where the selection ends (the moving side).
    pub head: Position,
}

impl Selection {
    /// Create a selection from anchor to head.
    pub fn new(anchor: Position, head: Position) -> Self {
        Self { anchor, head }
    }

    /// Create an empty selection (caret) at `pos`.
    pub fn caret(pos: Position) -> Self {
        Self {
            anchor: pos,
            head: pos,
        }
    }

    /// Returns `true` if the selection covers no text.
    pub fn is_caret(&self) -> bool {
        self.anchor == self.head
    }

    /// The selection's endpoints in document order.
    pub fn min_max(&self) -> (Position, Position) {
        if self.anchor <= self.head {
            (self.anchor, self.head)
        } else {
            (self.head, self.anchor)
        }
    }
}
