//! In-memory editable text with a multi-selection model.

use crate::delta::{TextDelta, TextDeltaEdit};
use crate::host::SelectionEditor;
use crate::line_index::LineIndex;
use crate::position::{Position, Selection};

/// Rope-backed text plus the active selection set.
///
/// Every mutation bumps [`EditBuffer::version`] and records the resulting [`TextDelta`].
#[derive(Debug, Clone, Default)]
pub struct EditBuffer {
    index: LineIndex,
    selections: Vec<Selection>,
    version: u64,
    last_text_delta: Option<TextDelta>,
}

impl EditBuffer {
    /// Create a buffer holding `text`, with a caret at the start.
    pub fn new(text: &str) -> Self {
        Self {
            index: LineIndex::from_text(text),
            selections: vec![Selection::caret(Position::new(0, 0))],
            version: 0,
            last_text_delta: None,
        }
    }

    /// Full current text.
    pub fn text(&self) -> String {
        self.index.get_text()
    }

    /// Character count.
    pub fn char_count(&self) -> usize {
        self.index.char_count()
    }

    /// Active selections, in the order they were set.
    pub fn selections(&self) -> &[Selection] {
        &self.selections
    }

    /// Number of mutations applied since creation.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Delta produced by the most recent mutation.
    pub fn last_text_delta(&self) -> Option<&TextDelta> {
        self.last_text_delta.as_ref()
    }

    /// Overwrite the whole text. Selections collapse to a caret at the start.
    pub fn set_text(&mut self, text: &str) -> TextDelta {
        let before_char_count = self.index.char_count();
        let deleted_text = self.index.get_text();
        self.index = LineIndex::from_text(text);
        self.selections = vec![Selection::caret(Position::new(0, 0))];

        let delta = TextDelta {
            before_char_count,
            after_char_count: self.index.char_count(),
            edits: vec![TextDeltaEdit {
                start: 0,
                deleted_text,
                inserted_text: text.to_string(),
            }],
        };
        self.commit(delta)
    }

    fn commit(&mut self, delta: TextDelta) -> TextDelta {
        self.version = self.version.saturating_add(1);
        self.last_text_delta = Some(delta.clone());
        delta
    }

    fn clamped_position(&self, offset: usize) -> Position {
        let offset = offset.min(self.index.char_count());
        self.index
            .offset_to_position(offset)
            .unwrap_or(Position::new(0, 0))
    }
}

impl SelectionEditor for EditBuffer {
    fn line_index(&self) -> &LineIndex {
        &self.index
    }

    fn set_selections(&mut self, selections: Vec<Selection>) {
        self.selections = selections;
    }

    fn replace_selection(&mut self, text: &str) -> TextDelta {
        if self.selections.is_empty() {
            return TextDelta {
                before_char_count: self.index.char_count(),
                after_char_count: self.index.char_count(),
                edits: Vec::new(),
            };
        }

        let before_char_count = self.index.char_count();
        let mut spans: Vec<(usize, usize)> = self
            .selections
            .iter()
            .map(|sel| {
                let (min, max) = sel.min_max();
                (
                    self.index.position_to_offset(min),
                    self.index.position_to_offset(max),
                )
            })
            .collect();

        // Back to front: a replacement never moves an offset that is still pending.
        spans.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| b.1.cmp(&a.1)));

        let mut edits = Vec::with_capacity(spans.len());
        for &(start, end) in &spans {
            let deleted_text = self.index.slice(start, end);
            self.index.delete(start, end.saturating_sub(start));
            self.index.insert(start, text);
            edits.push(TextDeltaEdit {
                start,
                deleted_text,
                inserted_text: text.to_string(),
            });
        }

        // Collapse each selection to a caret after its inserted text, in document order.
        let inserted_len = text.chars().count();
        let mut inserted_before = 0usize;
        let mut deleted_before = 0usize;
        let mut carets = Vec::with_capacity(spans.len());
        for &(start, end) in spans.iter().rev() {
            let start_after = start
                .saturating_add(inserted_before)
                .saturating_sub(deleted_before);
            carets.push(Selection::caret(
                self.clamped_position(start_after + inserted_len),
            ));
            inserted_before += inserted_len;
            deleted_before += end.saturating_sub(start);
        }
        self.selections = carets;

        let delta = TextDelta {
            before_char_count,
            after_char_count: self.index.char_count(),
            edits,
        };
        self.commit(delta)
    }
}
