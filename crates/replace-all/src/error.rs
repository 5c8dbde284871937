//! Error types shared across the crate.

use crate::document::DocumentId;
use thiserror::Error;

/// Failures reported by a [`crate::DocumentStore`] or [`crate::EditingContext`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// No document with this id is known to the host.
    #[error("document not found: {0}")]
    NotFound(DocumentId),
    /// A document with this id is already open.
    #[error("document already open: {0}")]
    AlreadyOpen(DocumentId),
    /// The document rejects writes.
    #[error("document is read-only: {0}")]
    ReadOnly(DocumentId),
    /// The document exists but its content could not be read.
    #[error("document could not be read: {document}: {message}")]
    Unreadable {
        /// Target document.
        document: DocumentId,
        /// Host-provided detail.
        message: String,
    },
}

/// Errors produced by replace-all runs, undo and initialization.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReplaceError {
    /// Undo was requested but no replace-all run is pending.
    #[error("no replace all history to undo")]
    NoHistory,
    /// Capturing a document's original content failed.
    #[error("could not snapshot {document}")]
    DocumentUnreadable {
        /// Target document.
        document: DocumentId,
        /// Underlying store failure.
        #[source]
        source: StoreError,
    },
    /// The document could not be made (or confirmed as) the active editing target.
    #[error("could not edit {document}: {reason}")]
    EditingContextMismatch {
        /// Target document.
        document: DocumentId,
        /// What went wrong.
        reason: String,
    },
    /// A match offset lies past the end of the document.
    #[error("offset {offset} is out of bounds (document length {len})")]
    OffsetOutOfBounds {
        /// Offending character offset.
        offset: usize,
        /// Document length in characters.
        len: usize,
    },
    /// Writing an original back during undo failed.
    #[error("could not restore {document}")]
    RestoreFailed {
        /// Target document.
        document: DocumentId,
        /// Underlying store failure.
        #[source]
        source: StoreError,
    },
    /// The match source never became available.
    #[error("match source unavailable after {attempts} attempts")]
    InitializationTimeout {
        /// Number of probes performed.
        attempts: u32,
    },
    /// A command that needs the match source ran before initialization succeeded.
    #[error("replace all is not initialized")]
    NotReady,
}

/// Errors from loading or saving [`crate::Settings`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Filesystem failure.
    #[error("settings I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Malformed settings file.
    #[error("invalid settings: {0}")]
    Json(#[from] serde_json::Error),
}
