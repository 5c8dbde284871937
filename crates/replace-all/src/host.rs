//! Seams to the host application.
//!
//! The replace-all algorithm never touches text storage directly. It reads and writes whole
//! documents through a [`DocumentStore`], edits through the [`SelectionEditor`] exposed by an
//! [`EditingContext`], gets its work list from a [`MatchSource`] and reports to a [`Notifier`].
//! [`crate::Workspace`] implements the storage and editing traits in memory.

use crate::delta::TextDelta;
use crate::document::{DocumentId, MatchesByDocument};
use crate::error::StoreError;
use crate::line_index::LineIndex;
use crate::position::Selection;

/// Whole-document read/write access.
pub trait DocumentStore {
    /// Read the full current content of `document`.
    fn read(&self, document: &DocumentId) -> Result<String, StoreError>;

    /// Overwrite the full content of `document`.
    fn write(&mut self, document: &DocumentId, text: &str) -> Result<(), StoreError>;
}

/// Editor primitive with multi-cursor replace semantics.
pub trait SelectionEditor {
    /// Line structure of the current (pre-edit) text.
    fn line_index(&self) -> &LineIndex;

    /// Replace the active selection set with exactly `selections`.
    fn set_selections(&mut self, selections: Vec<Selection>);

    /// Replace the text under **every** active selection with `text`.
    ///
    /// All selections are resolved against the pre-edit document before any text changes.
    fn replace_selection(&mut self, text: &str) -> TextDelta;
}

/// Tracks which document is currently open for editing.
pub trait EditingContext {
    /// Make `document` the active editing target.
    fn open_for_editing(&mut self, document: &DocumentId) -> Result<(), StoreError>;

    /// The document currently active, if any.
    fn active_document(&self) -> Option<&DocumentId>;

    /// Editor for the active document.
    fn active_editor(&mut self) -> Option<&mut dyn SelectionEditor>;
}

/// Supplies the located matches a replace-all run works on.
///
/// Offsets must describe the documents as they are when the run starts. `H` is the host the
/// source searches; [`MatchSource::refresh`] is called right before every run so a source can
/// re-locate its matches after documents changed.
pub trait MatchSource<H: ?Sized> {
    /// Current matches, keyed by document in result order.
    fn matches(&self) -> MatchesByDocument;

    /// Bring the matches up to date with `host`. A fixed list has nothing to do.
    fn refresh(&mut self, _host: &H) {}
}

impl<H: ?Sized> MatchSource<H> for MatchesByDocument {
    fn matches(&self) -> MatchesByDocument {
        self.clone()
    }
}

/// Fire-and-forget user-visible messages.
pub trait Notifier {
    /// Show `message` to the user.
    fn notify(&mut self, message: &str);
}
