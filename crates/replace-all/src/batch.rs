//! Batched multi-selection replace within one document.

use crate::document::{DocumentId, MatchRange};
use crate::error::ReplaceError;
use crate::host::EditingContext;
use crate::translate::selections_for_ranges;
use tracing::debug;

/// Replace every range in `ranges` with `replacement`, as one edit on `document`.
///
/// The document is opened in `context` and must then be the active document. All endpoints are
/// translated against the pre-edit text before anything changes, so range order does not matter
/// and earlier replacements never shift later ones. Returns the number of ranges replaced.
///
/// An empty `ranges` is a no-op returning `Ok(0)`. When the document cannot be made the active
/// editing target this fails with [`ReplaceError::EditingContextMismatch`]; an offset past the end
/// fails with [`ReplaceError::OffsetOutOfBounds`]. In both cases the document is untouched.
pub fn apply_batch<C>(
    context: &mut C,
    document: &DocumentId,
    ranges: &[MatchRange],
    replacement: &str,
) -> Result<usize, ReplaceError>
where
    C: EditingContext + ?Sized,
{
    if ranges.is_empty() {
        return Ok(0);
    }

    let mismatch = |reason: String| ReplaceError::EditingContextMismatch {
        document: document.clone(),
        reason,
    };

    context
        .open_for_editing(document)
        .map_err(|err| mismatch(err.to_string()))?;

    match context.active_document() {
        Some(active) if active == document => {}
        Some(active) => return Err(mismatch(format!("active document is {active}"))),
        None => return Err(mismatch("no active document".to_string())),
    }

    let editor = context
        .active_editor()
        .ok_or_else(|| mismatch("no editor for document".to_string()))?;

    let selections = selections_for_ranges(editor.line_index(), ranges)?;
    editor.set_selections(selections);
    let delta = editor.replace_selection(replacement);

    debug!(
        %document,
        ranges = ranges.len(),
        before = delta.before_char_count,
        after = delta.after_char_count,
        "apply_batch"
    );

    Ok(ranges.len())
}
