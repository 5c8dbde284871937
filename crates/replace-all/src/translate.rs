//! Offset translation.
//!
//! Search indexes report matches as flat character offsets; editors select by `(line, column)`.
//! Everything here is a pure function of the current [`LineIndex`].

use crate::document::MatchRange;
use crate::error::ReplaceError;
use crate::line_index::LineIndex;
use crate::position::{Position, Selection};

/// Convert a character offset into a logical position.
///
/// `0 <= offset <= char_count` is required; anything past the end fails with
/// [`ReplaceError::OffsetOutOfBounds`].
pub fn translate(index: &LineIndex, offset: usize) -> Result<Position, ReplaceError> {
    index
        .offset_to_position(offset)
        .ok_or(ReplaceError::OffsetOutOfBounds {
            offset,
            len: index.char_count(),
        })
}

/// Inverse of [`translate`].
pub fn position_to_offset(index: &LineIndex, pos: Position) -> usize {
    index.position_to_offset(pos)
}

/// Selection covering `range`: anchor at `start`, head at `end`.
pub fn selection_for_range(
    index: &LineIndex,
    range: MatchRange,
) -> Result<Selection, ReplaceError> {
    Ok(Selection::new(
        translate(index, range.start)?,
        translate(index, range.end)?,
    ))
}

/// Translate every range against the same (pre-edit) index.
///
/// Fails on the first out-of-bounds offset; nothing is partially returned.
pub fn selections_for_ranges(
    index: &LineIndex,
    ranges: &[MatchRange],
) -> Result<Vec<Selection>, ReplaceError> {
    ranges
        .iter()
        .map(|range| selection_for_range(index, *range))
        .collect()
}
