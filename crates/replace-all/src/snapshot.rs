//! Per-run record of original document contents.

use crate::document::DocumentId;
use crate::error::ReplaceError;
use crate::host::DocumentStore;
use std::collections::HashSet;
use tracing::trace;

/// One document's content as it was before the run touched it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotEntry {
    /// The document.
    pub document: DocumentId,
    /// Full pre-edit text.
    pub original: String,
}

/// Originals captured during one replace-all run, at most one per document, in capture order.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    entries: Vec<SnapshotEntry>,
    recorded: HashSet<DocumentId>,
}

impl Snapshot {
    /// Create an empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Capture `document`'s current content unless it is already recorded.
    ///
    /// Must complete before the document is first mutated in the run. Returns `Ok(true)` when a
    /// new entry was captured.
    pub fn record_if_absent<S>(
        &mut self,
        store: &S,
        document: &DocumentId,
    ) -> Result<bool, ReplaceError>
    where
        S: DocumentStore + ?Sized,
    {
        if self.recorded.contains(document) {
            return Ok(false);
        }

        let original = store
            .read(document)
            .map_err(|source| ReplaceError::DocumentUnreadable {
                document: document.clone(),
                source,
            })?;

        trace!(%document, chars = original.chars().count(), "snapshot_recorded");
        self.push(SnapshotEntry {
            document: document.clone(),
            original,
        });
        Ok(true)
    }

    /// Add an entry. An existing entry for the same document is kept.
    pub fn push(&mut self, entry: SnapshotEntry) {
        if self.recorded.insert(entry.document.clone()) {
            self.entries.push(entry);
        }
    }

    /// Returns `true` if `document` has an entry.
    pub fn contains(&self, document: &DocumentId) -> bool {
        self.recorded.contains(document)
    }

    /// Recorded original for `document`.
    pub fn original(&self, document: &DocumentId) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.document == *document)
            .map(|entry| entry.original.as_str())
    }

    /// All entries in capture order.
    pub fn entries(&self) -> &[SnapshotEntry] {
        &self.entries
    }

    /// Number of documents recorded.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl IntoIterator for Snapshot {
    type Item = SnapshotEntry;
    type IntoIter = std::vec::IntoIter<SnapshotEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
