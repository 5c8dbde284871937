//! Workspace of open documents.
//!
//! A [`Workspace`] is a small in-memory host: it owns one [`EditBuffer`] per open document,
//! keyed by [`DocumentId`], and tracks which one is active. It implements both
//! [`DocumentStore`] (whole-text read/write) and [`EditingContext`] (open + active editor), so a
//! replace-all run and its undo can be driven entirely against it.
//!
//! [`SearchPane`] keeps the results of the last workspace-wide search and serves them as a
//! [`MatchSource`].

use crate::buffer::EditBuffer;
use crate::document::{DocumentId, MatchesByDocument};
use crate::error::StoreError;
use crate::host::{DocumentStore, EditingContext, MatchSource, SelectionEditor};
use crate::search::{SearchError, SearchOptions, find_all};
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, warn};

/// Opaque identifier for an open buffer in a [`Workspace`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BufferId(u64);

impl BufferId {
    /// Get the underlying numeric id.
    pub fn get(self) -> u64 {
        self.0
    }
}

struct BufferEntry {
    document: DocumentId,
    buffer: EditBuffer,
    read_only: bool,
}

/// A collection of open documents.
#[derive(Default)]
pub struct Workspace {
    next_buffer_id: u64,
    buffers: BTreeMap<BufferId, BufferEntry>,
    by_document: HashMap<DocumentId, BufferId>,
    active: Option<BufferId>,
}

impl std::fmt::Debug for Workspace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Workspace")
            .field("buffer_count", &self.buffers.len())
            .field("active", &self.active_document())
            .finish()
    }
}

impl Workspace {
    /// Create an empty workspace.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of open buffers.
    pub fn len(&self) -> usize {
        self.buffers.len()
    }

    /// Returns `true` if there are no open buffers.
    pub fn is_empty(&self) -> bool {
        self.buffers.is_empty()
    }

    /// Open `document` with initial contents `text`.
    ///
    /// The first buffer opened becomes active.
    pub fn open_buffer(
        &mut self,
        document: impl Into<DocumentId>,
        text: &str,
    ) -> Result<BufferId, StoreError> {
        let document = document.into();
        if self.by_document.contains_key(&document) {
            return Err(StoreError::AlreadyOpen(document));
        }

        let id = BufferId(self.next_buffer_id);
        self.next_buffer_id = self.next_buffer_id.saturating_add(1);

        self.by_document.insert(document.clone(), id);
        self.buffers.insert(
            id,
            BufferEntry {
                document,
                buffer: EditBuffer::new(text),
                read_only: false,
            },
        );

        if self.active.is_none() {
            self.active = Some(id);
        }

        Ok(id)
    }

    /// Close a document. If it was active, the lowest remaining buffer becomes active.
    pub fn close_buffer(&mut self, document: &DocumentId) -> Result<(), StoreError> {
        let Some(id) = self.by_document.remove(document) else {
            return Err(StoreError::NotFound(document.clone()));
        };
        self.buffers.remove(&id);

        if self.active == Some(id) {
            self.active = self.buffers.keys().next().copied();
        }

        Ok(())
    }

    /// Buffer id for `document`.
    pub fn buffer_id(&self, document: &DocumentId) -> Option<BufferId> {
        self.by_document.get(document).copied()
    }

    /// Buffer backing `document`.
    pub fn buffer(&self, document: &DocumentId) -> Option<&EditBuffer> {
        let id = self.by_document.get(document)?;
        self.buffers.get(id).map(|entry| &entry.buffer)
    }

    /// Current text of `document`.
    pub fn buffer_text(&self, document: &DocumentId) -> Option<String> {
        self.buffer(document).map(EditBuffer::text)
    }

    /// Open documents in the order they were opened.
    pub fn documents(&self) -> impl Iterator<Item = &DocumentId> {
        self.buffers.values().map(|entry| &entry.document)
    }

    /// Mark `document` as read-only; writes to it then fail with [`StoreError::ReadOnly`].
    pub fn set_read_only(
        &mut self,
        document: &DocumentId,
        read_only: bool,
    ) -> Result<(), StoreError> {
        let entry = self.entry_mut(document)?;
        entry.read_only = read_only;
        Ok(())
    }

    /// Search every open buffer, in open order.
    ///
    /// Documents without matches are left out.
    pub fn search_all_open_buffers(
        &self,
        query: &str,
        options: SearchOptions,
    ) -> Result<MatchesByDocument, SearchError> {
        let mut out = MatchesByDocument::new();
        for entry in self.buffers.values() {
            let matches = find_all(&entry.buffer.text(), query, options)?;
            if !matches.is_empty() {
                out.insert(entry.document.clone(), matches);
            }
        }
        Ok(out)
    }

    fn entry(&self, document: &DocumentId) -> Result<&BufferEntry, StoreError> {
        self.by_document
            .get(document)
            .and_then(|id| self.buffers.get(id))
            .ok_or_else(|| StoreError::NotFound(document.clone()))
    }

    fn entry_mut(&mut self, document: &DocumentId) -> Result<&mut BufferEntry, StoreError> {
        self.by_document
            .get(document)
            .and_then(|id| self.buffers.get_mut(id))
            .ok_or_else(|| StoreError::NotFound(document.clone()))
    }
}

impl DocumentStore for Workspace {
    fn read(&self, document: &DocumentId) -> Result<String, StoreError> {
        Ok(self.entry(document)?.buffer.text())
    }

    fn write(&mut self, document: &DocumentId, text: &str) -> Result<(), StoreError> {
        let entry = self.entry_mut(document)?;
        if entry.read_only {
            return Err(StoreError::ReadOnly(document.clone()));
        }
        entry.buffer.set_text(text);
        Ok(())
    }
}

impl EditingContext for Workspace {
    fn open_for_editing(&mut self, document: &DocumentId) -> Result<(), StoreError> {
        let id = self
            .buffer_id(document)
            .ok_or_else(|| StoreError::NotFound(document.clone()))?;
        debug!(%document, buffer = id.get(), "open_for_editing");
        self.active = Some(id);
        Ok(())
    }

    fn active_document(&self) -> Option<&DocumentId> {
        let id = self.active?;
        self.buffers.get(&id).map(|entry| &entry.document)
    }

    fn active_editor(&mut self) -> Option<&mut dyn SelectionEditor> {
        let id = self.active?;
        let entry = self.buffers.get_mut(&id)?;
        if entry.read_only {
            return None;
        }
        let editor: &mut dyn SelectionEditor = &mut entry.buffer;
        Some(editor)
    }
}

/// Results of the most recent workspace-wide search.
#[derive(Debug, Clone, Default)]
pub struct SearchPane {
    query: String,
    options: SearchOptions,
    results: MatchesByDocument,
}

impl SearchPane {
    /// Create a pane with no results.
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `query` over `workspace` and keep the results.
    pub fn search(
        &mut self,
        workspace: &Workspace,
        query: &str,
        options: SearchOptions,
    ) -> Result<&MatchesByDocument, SearchError> {
        self.results = workspace.search_all_open_buffers(query, options)?;
        self.query = query.to_string();
        self.options = options;
        Ok(&self.results)
    }

    /// Re-run the last query, e.g. after the documents changed.
    pub fn refresh(&mut self, workspace: &Workspace) -> Result<&MatchesByDocument, SearchError> {
        let query = self.query.clone();
        self.search(workspace, &query, self.options)
    }

    /// The last query.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// The last results.
    pub fn results(&self) -> &MatchesByDocument {
        &self.results
    }
}

impl MatchSource<Workspace> for SearchPane {
    fn matches(&self) -> MatchesByDocument {
        self.results.clone()
    }

    fn refresh(&mut self, host: &Workspace) {
        let refreshed = SearchPane::refresh(self, host).map(|_| ());
        if let Err(err) = refreshed {
            warn!(query = %self.query, error = %err, "search refresh failed, dropping results");
            self.results = MatchesByDocument::new();
        }
    }
}
