//! Replace-all runs and their single-level undo.
//!
//! # Overview
//!
//! A [`ReplaceAllSession`] owns the one piece of state that outlives a run: the snapshot of
//! every document the last run touched. Each [`ReplaceAllSession::run_replace_all`] discards the
//! previous snapshot and starts a fresh one, so only the latest run can be undone.
//!
//! Per run, for every document in match order:
//!
//! 1. the document's original content is recorded (before anything mutates it),
//! 2. all of its matches are replaced in one multi-selection edit.
//!
//! Failures are isolated per document: the run reports them in [`RunReport::skipped`] and moves
//! on.
//!
//! # Example
//!
//! ```rust
//! use replace_all::{DocumentId, MatchSet, MatchesByDocument, ReplaceAllSession, Workspace};
//!
//! let mut ws = Workspace::new();
//! ws.open_buffer("notes.md", "abcabc").unwrap();
//!
//! let mut matches = MatchesByDocument::new();
//! matches.insert(DocumentId::new("notes.md"), MatchSet::from_pairs(&[[0, 1], [3, 4]]));
//!
//! let mut session = ReplaceAllSession::new();
//! let report = session.run_replace_all(&mut ws, &matches, "X");
//! assert_eq!(report.replaced, 2);
//! assert_eq!(ws.buffer_text(&DocumentId::new("notes.md")).unwrap(), "XbcXbc");
//!
//! let undo = session.undo(&mut ws).unwrap();
//! assert_eq!(undo.restored, 1);
//! assert_eq!(ws.buffer_text(&DocumentId::new("notes.md")).unwrap(), "abcabc");
//! ```

use crate::batch::apply_batch;
use crate::document::{DocumentId, MatchesByDocument};
use crate::error::ReplaceError;
use crate::host::{DocumentStore, EditingContext};
use crate::snapshot::Snapshot;
use tracing::{debug, info, warn};

/// A document a run did not edit, and why.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedDocument {
    /// The document.
    pub document: DocumentId,
    /// What prevented the edit.
    pub error: ReplaceError,
}

/// Outcome of one replace-all run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Ranges replaced across all documents.
    pub replaced: usize,
    /// Documents that received at least one replacement.
    pub documents: usize,
    /// Documents skipped because of a per-document failure.
    pub skipped: Vec<SkippedDocument>,
}

/// A document undo could not restore.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestoreFailure {
    /// The document.
    pub document: DocumentId,
    /// Why the write failed.
    pub error: ReplaceError,
}

/// Outcome of an undo.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UndoReport {
    /// Documents written back to their original content.
    pub restored: usize,
    /// Documents whose restore failed; they stay pending for the next undo.
    pub failures: Vec<RestoreFailure>,
}

/// Holds the snapshot of the most recent run.
#[derive(Debug, Default)]
pub struct ReplaceAllSession {
    last_run: Option<Snapshot>,
}

impl ReplaceAllSession {
    /// Create a session with no history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot held for undo, if any.
    pub fn snapshot(&self) -> Option<&Snapshot> {
        self.last_run.as_ref()
    }

    /// Replace the held snapshot.
    pub fn set_snapshot(&mut self, snapshot: Snapshot) {
        self.last_run = Some(snapshot);
    }

    /// Drop the held snapshot, returning it.
    pub fn clear_snapshot(&mut self) -> Option<Snapshot> {
        self.last_run.take()
    }

    /// Returns `true` if [`ReplaceAllSession::undo`] has anything to restore.
    ///
    /// An empty snapshot (a run that recorded nothing) does not count.
    pub fn has_history(&self) -> bool {
        self.last_run.as_ref().is_some_and(|s| !s.is_empty())
    }

    /// Replace every match in `matches` with `replacement`.
    ///
    /// Documents are processed in `matches` order, one at a time. Documents with an empty match
    /// set are neither recorded nor opened.
    pub fn run_replace_all<H>(
        &mut self,
        host: &mut H,
        matches: &MatchesByDocument,
        replacement: &str,
    ) -> RunReport
    where
        H: DocumentStore + EditingContext + ?Sized,
    {
        let snapshot = self.last_run.insert(Snapshot::new());
        let mut report = RunReport::default();

        debug!(
            documents = matches.len(),
            ranges = matches.total_matches(),
            "replace_all_start"
        );

        for (document, set) in matches.iter() {
            if set.is_empty() {
                continue;
            }

            if let Err(error) = snapshot.record_if_absent(&*host, document) {
                warn!(%document, %error, "snapshot failed, skipping document");
                report.skipped.push(SkippedDocument {
                    document: document.clone(),
                    error,
                });
                continue;
            }

            match apply_batch(host, document, set.ranges(), replacement) {
                Ok(count) => {
                    report.replaced += count;
                    report.documents += 1;
                }
                Err(error) => {
                    debug!(%document, %error, "document skipped");
                    report.skipped.push(SkippedDocument {
                        document: document.clone(),
                        error,
                    });
                }
            }
        }

        info!(
            replaced = report.replaced,
            documents = report.documents,
            skipped = report.skipped.len(),
            "replace_all_done"
        );
        report
    }

    /// Restore every document recorded by the last run.
    ///
    /// Fails with [`ReplaceError::NoHistory`] when nothing is pending. Every document is
    /// attempted; the ones that fail stay in the snapshot so a later undo can retry them, the rest
    /// are forgotten.
    pub fn undo<S>(&mut self, store: &mut S) -> Result<UndoReport, ReplaceError>
    where
        S: DocumentStore + ?Sized,
    {
        let Some(snapshot) = self.last_run.take().filter(|s| !s.is_empty()) else {
            return Err(ReplaceError::NoHistory);
        };

        let mut report = UndoReport::default();
        let mut pending = Snapshot::new();
        for entry in snapshot {
            match store.write(&entry.document, &entry.original) {
                Ok(()) => report.restored += 1,
                Err(source) => {
                    warn!(document = %entry.document, error = %source, "restore failed");
                    report.failures.push(RestoreFailure {
                        document: entry.document.clone(),
                        error: ReplaceError::RestoreFailed {
                            document: entry.document.clone(),
                            source,
                        },
                    });
                    pending.push(entry);
                }
            }
        }

        if !pending.is_empty() {
            self.last_run = Some(pending);
        }

        info!(
            restored = report.restored,
            failed = report.failures.len(),
            "undo_replace_all"
        );
        Ok(report)
    }
}
