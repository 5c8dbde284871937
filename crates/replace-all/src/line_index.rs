//! Logical line index
//!
//! Provides line structure over a document using a Rope, supporting O(log N) offset/line
//! conversion and editing. All offsets are **character** offsets.

use crate::position::Position;
use ropey::Rope;

/// Logical line index - implemented using Rope data structure
///
/// Line breaks are `\n`, `\r\n` and a lone `\r`; other Unicode separators stay inside their
/// line. A text ending in a line break has a trailing empty line.
#[derive(Debug, Clone, Default)]
pub struct LineIndex {
    rope: Rope,
}

impl LineIndex {
    /// Create an empty line index
    pub fn new() -> Self {
        Self { rope: Rope::new() }
    }

    /// Build line index from text
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
        }
    }

    /// Get total line count (an empty document has 1 line)
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Get total character count
    pub fn char_count(&self) -> usize {
        self.rope.len_chars()
    }

    /// Get total byte count
    pub fn byte_count(&self) -> usize {
        self.rope.len_bytes()
    }

    /// Get line number and offset within line from character offset.
    ///
    /// Returns `None` if `char_offset` is past the end of the document.
    pub fn offset_to_position(&self, char_offset: usize) -> Option<Position> {
        if char_offset > self.rope.len_chars() {
            return None;
        }

        let line_idx = self.rope.char_to_line(char_offset);
        let line_start_char = self.rope.line_to_char(line_idx);
        Some(Position::new(line_idx, char_offset - line_start_char))
    }

    /// Get character offset from a logical position.
    ///
    /// Lines past the end clamp to the document end. Columns clamp to the last offset that still
    /// belongs to the line (its final line-break character, or the document end on the last line).
    pub fn position_to_offset(&self, pos: Position) -> usize {
        let len = self.rope.len_chars();
        if pos.line >= self.rope.len_lines() {
            return len;
        }

        let line_start_char = self.rope.line_to_char(pos.line);
        let last_in_line = if pos.line + 1 < self.rope.len_lines() {
            self.rope.line_to_char(pos.line + 1) - 1
        } else {
            len
        };

        line_start_char.saturating_add(pos.column).min(last_in_line)
    }

    /// Text in the character range `[start, end)`, clamped to the document.
    pub fn slice(&self, start: usize, end: usize) -> String {
        let len = self.rope.len_chars();
        let end = end.min(len);
        let start = start.min(end);
        self.rope.slice(start..end).to_string()
    }

    /// Insert text (at specified character offset)
    pub fn insert(&mut self, char_offset: usize, text: &str) {
        let char_offset = char_offset.min(self.rope.len_chars());
        self.rope.insert(char_offset, text);
    }

    /// Delete text range (character offset)
    pub fn delete(&mut self, start_char: usize, len_chars: usize) {
        let start_char = start_char.min(self.rope.len_chars());
        let end_char = start_char
            .saturating_add(len_chars)
            .min(self.rope.len_chars());

        if start_char < end_char {
            self.rope.remove(start_char..end_char);
        }
    }

    /// Get complete text
    pub fn get_text(&self) -> String {
        self.rope.to_string()
    }

    /// Get text of the specified line (excluding line break)
    pub fn get_line_text(&self, line_number: usize) -> Option<String> {
        if line_number >= self.rope.len_lines() {
            return None;
        }

        let mut text = self.rope.line(line_number).to_string();
        if text.ends_with('\n') {
            text.pop();
        }
        if text.ends_with('\r') {
            text.pop();
        }

        Some(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_line_index() {
        let index = LineIndex::new();
        assert_eq!(index.line_count(), 1); // Rope empty document has 1 line
        assert_eq!(index.byte_count(), 0);
        assert_eq!(index.char_count(), 0);
        assert_eq!(index.offset_to_position(0), Some(Position::new(0, 0)));
    }

    #[test]
    fn test_offset_to_position() {
        let index = LineIndex::from_text("ABC\nDEF\nGHI");

        assert_eq!(index.offset_to_position(0), Some(Position::new(0, 0))); // A
        assert_eq!(index.offset_to_position(2), Some(Position::new(0, 2))); // C
        assert_eq!(index.offset_to_position(3), Some(Position::new(0, 3))); // \n
        assert_eq!(index.offset_to_position(4), Some(Position::new(1, 0))); // D
        assert_eq!(index.offset_to_position(8), Some(Position::new(2, 0))); // G
        assert_eq!(index.offset_to_position(11), Some(Position::new(2, 3))); // end
        assert_eq!(index.offset_to_position(12), None);
    }

    #[test]
    fn test_trailing_newline_has_empty_last_line() {
        let index = LineIndex::from_text("ab\n");
        assert_eq!(index.line_count(), 2);
        assert_eq!(index.offset_to_position(3), Some(Position::new(1, 0)));
    }

    #[test]
    fn test_position_to_offset_clamps() {
        let index = LineIndex::from_text("ABC\nDEF\nGHI");

        assert_eq!(index.position_to_offset(Position::new(1, 0)), 4);
        assert_eq!(index.position_to_offset(Position::new(0, 99)), 3);
        assert_eq!(index.position_to_offset(Position::new(2, 99)), 11);
        assert_eq!(index.position_to_offset(Position::new(7, 0)), 11);
    }

    #[test]
    fn test_crlf() {
        let index = LineIndex::from_text("ab\r\ncd");
        assert_eq!(index.line_count(), 2);
        assert_eq!(index.offset_to_position(3), Some(Position::new(0, 3)));
        assert_eq!(index.offset_to_position(4), Some(Position::new(1, 0)));
        assert_eq!(index.position_to_offset(Position::new(0, 3)), 3);
        assert_eq!(index.get_line_text(0).as_deref(), Some("ab"));
    }

    #[test]
    fn test_utf8_cjk() {
        let text = "你好\n世界";
        let index = LineIndex::from_text(text);

        assert_eq!(index.line_count(), 2);
        assert_eq!(index.byte_count(), text.len());
        assert_eq!(index.char_count(), 5);
        assert_eq!(index.offset_to_position(1), Some(Position::new(0, 1)));
        assert_eq!(index.offset_to_position(3), Some(Position::new(1, 0)));
        assert_eq!(index.slice(3, 5), "世界");
    }

    #[test]
    fn test_insert_delete_text() {
        let mut index = LineIndex::from_text("Hello World");

        index.insert(6, "Beautiful ");
        assert_eq!(index.get_text(), "Hello Beautiful World");

        index.delete(6, 10);
        assert_eq!(index.get_text(), "Hello World");

        // Out-of-range deletes are clamped.
        index.delete(8, 100);
        assert_eq!(index.get_text(), "Hello Wo");
    }

    #[test]
    fn test_only_cr_and_lf_break_lines() {
        let index = LineIndex::from_text("a\u{2028}b\u{85}c\rd");
        assert_eq!(index.line_count(), 2);
        assert_eq!(index.offset_to_position(5), Some(Position::new(0, 5)));
        assert_eq!(index.offset_to_position(6), Some(Position::new(1, 0)));
        assert_eq!(index.get_line_text(0).as_deref(), Some("a\u{2028}b\u{85}c"));
    }
}
