#![warn(missing_docs)]
//! Replace All - Multi-Document Batched Replace With Undo
//!
//! # Overview
//!
//! `replace-all` takes matches that a search index already located (flat character offsets,
//! grouped per document), replaces all of them with a literal string, one multi-selection edit
//! per document, and keeps enough state to undo the whole batch.
//!
//! It does not render anything and does not own real files: the host plugs in through the
//! traits in [`host`]. [`Workspace`] is an in-memory host used by the tests and demos.
//!
//! # Core Features
//!
//! - **Offset Translation**: character offset ⇄ `(line, column)` over a rope line index
//! - **Batched Edits**: every match in a document resolved against the pre-edit text and replaced
//!   in one transaction
//! - **Snapshots**: each document's original captured before its first mutation in a run
//! - **Single-Level Undo**: the latest run can be restored; a new run forfeits the older one
//! - **Bounded Initialization**: fixed-interval polling for the match source with an injectable
//!   sleeper
//!
//! # Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  Commands (ReplaceAll / Undo / Toggle)      │  ← Public API
//! ├─────────────────────────────────────────────┤
//! │  Session (run orchestration + undo)         │  ← Snapshot slot
//! ├─────────────────────────────────────────────┤
//! │  Batch Edit + Snapshot Recorder             │  ← Per document
//! ├─────────────────────────────────────────────┤
//! │  Offset Translator                          │  ← Offsets → Positions
//! ├─────────────────────────────────────────────┤
//! │  Line Index (Rope-based)                    │  ← Line Access
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use replace_all::{
//!     DocumentId, ReplaceAllSession, SearchOptions, Workspace,
//! };
//!
//! let mut ws = Workspace::new();
//! ws.open_buffer("a.md", "teh cat\nteh dog").unwrap();
//! ws.open_buffer("b.md", "see teh").unwrap();
//!
//! let matches = ws.search_all_open_buffers("teh", SearchOptions::default()).unwrap();
//!
//! let mut session = ReplaceAllSession::new();
//! let report = session.run_replace_all(&mut ws, &matches, "the");
//! assert_eq!(report.replaced, 3);
//! assert_eq!(ws.buffer_text(&DocumentId::new("a.md")).unwrap(), "the cat\nthe dog");
//!
//! session.undo(&mut ws).unwrap();
//! assert_eq!(ws.buffer_text(&DocumentId::new("b.md")).unwrap(), "see teh");
//! ```
//!
//! # Module Description
//!
//! - [`line_index`] - Rope based line index
//! - [`translate`] - offset ⇄ position translation
//! - [`batch`] - multi-selection replace within one document
//! - [`snapshot`] - per-run record of originals
//! - [`session`] - run orchestration and undo
//! - [`commands`] - command interface
//! - [`workspace`] - in-memory host and search pane
//! - [`init`] - bounded-retry initialization
//! - [`config`] - persisted settings

pub mod batch;
mod buffer;
pub mod commands;
pub mod config;
pub mod delta;
pub mod document;
pub mod error;
pub mod host;
pub mod init;
pub mod line_index;
pub mod notify;
pub mod position;
pub mod search;
pub mod session;
pub mod snapshot;
pub mod translate;
pub mod workspace;

pub use batch::apply_batch;
pub use buffer::EditBuffer;
pub use commands::{Command, CommandResult, ReplaceAllExecutor};
pub use config::Settings;
pub use delta::{TextDelta, TextDeltaEdit};
pub use document::{DocumentId, MatchRange, MatchSet, MatchesByDocument};
pub use error::{ConfigError, ReplaceError, StoreError};
pub use host::{DocumentStore, EditingContext, MatchSource, Notifier, SelectionEditor};
pub use init::{RetryPolicy, Sleeper, ThreadSleeper, wait_until_ready};
pub use line_index::LineIndex;
pub use notify::{LogNotifier, RecordingNotifier};
pub use position::{Position, Selection};
pub use search::{SearchError, SearchOptions, find_all};
pub use session::{ReplaceAllSession, RestoreFailure, RunReport, SkippedDocument, UndoReport};
pub use snapshot::{Snapshot, SnapshotEntry};
pub use translate::{position_to_offset, selection_for_range, selections_for_ranges, translate};
pub use workspace::{BufferId, SearchPane, Workspace};
