//! Command Interface Layer
//!
//! The user-invocable surface of replace-all, wrapped in a command pattern.
//!
//! # Overview
//!
//! [`ReplaceAllExecutor`] owns the host, the notifier, the settings and the
//! [`ReplaceAllSession`]. Once [`ReplaceAllExecutor::initialize`] has located the match source it
//! accepts:
//!
//! - [`Command::ReplaceAll`] - refresh the match source, replace every match, notify
//!   "Replaced N matches."
//! - [`Command::UndoReplaceAll`] - restore the last run (works even without a match source)
//! - [`Command::ToggleReplaceRow`] - flip the replace row's visibility
//!
//! # Example
//!
//! ```rust
//! use replace_all::{
//!     Command, CommandResult, RecordingNotifier, ReplaceAllExecutor, SearchOptions, SearchPane,
//!     Settings, Workspace,
//! };
//!
//! let mut ws = Workspace::new();
//! ws.open_buffer("a.md", "red fish, red fox").unwrap();
//! let mut pane = SearchPane::new();
//! pane.search(&ws, "red", SearchOptions::default()).unwrap();
//!
//! let mut executor = ReplaceAllExecutor::new(ws, RecordingNotifier::new(), Settings::default());
//! executor.attach_match_source(pane);
//!
//! let result = executor
//!     .execute(Command::ReplaceAll { replacement: "blue".to_string() })
//!     .unwrap();
//! assert_eq!(result, CommandResult::Replaced { replaced: 2, skipped: 0 });
//! assert_eq!(executor.notifier().last(), Some("Replaced 2 matches."));
//! ```

use crate::config::Settings;
use crate::error::ReplaceError;
use crate::host::{DocumentStore, EditingContext, MatchSource, Notifier};
use crate::init::{Sleeper, wait_until_ready};
use crate::session::ReplaceAllSession;
use tracing::{debug, warn};

/// User-invocable actions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Replace every current match with a literal string.
    ReplaceAll {
        /// Replacement text (inserted verbatim).
        replacement: String,
    },
    /// Restore every document touched by the last replace-all.
    UndoReplaceAll,
    /// Show or hide the replace input row.
    ToggleReplaceRow,
}

/// What a command did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandResult {
    /// Replace-all finished.
    Replaced {
        /// Matches replaced.
        replaced: usize,
        /// Documents skipped because of a failure.
        skipped: usize,
    },
    /// Undo finished.
    Restored {
        /// Documents restored.
        documents: usize,
        /// Documents that could not be restored (still pending).
        failed: usize,
    },
    /// Undo had nothing to restore.
    NothingToUndo,
    /// The replace row visibility after toggling.
    ReplaceRow {
        /// `true` when the row is now shown.
        expanded: bool,
    },
}

enum SourceState<M> {
    Pending,
    Ready(M),
    Failed,
}

/// Executes [`Command`]s against a host, reporting through a [`Notifier`].
pub struct ReplaceAllExecutor<H, M, N> {
    host: H,
    notifier: N,
    settings: Settings,
    session: ReplaceAllSession,
    source: SourceState<M>,
    replace_row_expanded: bool,
}

impl<H, M, N> ReplaceAllExecutor<H, M, N>
where
    H: DocumentStore + EditingContext,
    M: MatchSource<H>,
    N: Notifier,
{
    /// Create an executor. Replace-all stays unavailable until a match source is attached.
    pub fn new(host: H, notifier: N, settings: Settings) -> Self {
        let replace_row_expanded = settings.replace_row_expanded;
        Self {
            host,
            notifier,
            settings,
            session: ReplaceAllSession::new(),
            source: SourceState::Pending,
            replace_row_expanded,
        }
    }

    /// Wait for the match source using the configured retry policy.
    ///
    /// On timeout the user is notified and replace-all stays disabled; undo keeps working.
    pub fn initialize<S, P>(&mut self, sleeper: &mut S, probe: P) -> Result<(), ReplaceError>
    where
        S: Sleeper + ?Sized,
        P: FnMut() -> Option<M>,
    {
        match wait_until_ready(self.settings.init_retry, sleeper, probe) {
            Ok(source) => {
                self.source = SourceState::Ready(source);
                Ok(())
            }
            Err(err) => {
                self.source = SourceState::Failed;
                self.notifier.notify("Failed to initialize replace all.");
                Err(err)
            }
        }
    }

    /// Use `source` directly, skipping the wait.
    pub fn attach_match_source(&mut self, source: M) {
        self.source = SourceState::Ready(source);
    }

    /// Returns `true` once a match source is available.
    pub fn is_ready(&self) -> bool {
        matches!(self.source, SourceState::Ready(_))
    }

    /// Returns `true` if initialization gave up.
    pub fn initialization_failed(&self) -> bool {
        matches!(self.source, SourceState::Failed)
    }

    /// The match source, once available.
    pub fn match_source(&self) -> Option<&M> {
        match &self.source {
            SourceState::Ready(source) => Some(source),
            _ => None,
        }
    }

    /// The host.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable access to the host.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// The notifier.
    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// The session holding undo history.
    pub fn session(&self) -> &ReplaceAllSession {
        &self.session
    }

    /// Active settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Whether the replace row is currently shown.
    pub fn replace_row_expanded(&self) -> bool {
        self.replace_row_expanded
    }

    /// Execute a command.
    ///
    /// Only [`ReplaceError::NotReady`] is returned as an error; everything else is reported
    /// through the notifier and the [`CommandResult`].
    pub fn execute(&mut self, command: Command) -> Result<CommandResult, ReplaceError> {
        debug!(?command, "execute");
        match command {
            Command::ReplaceAll { replacement } => self.execute_replace_all(&replacement),
            Command::UndoReplaceAll => Ok(self.execute_undo()),
            Command::ToggleReplaceRow => {
                if !self.is_ready() {
                    return Err(ReplaceError::NotReady);
                }
                self.replace_row_expanded = !self.replace_row_expanded;
                Ok(CommandResult::ReplaceRow {
                    expanded: self.replace_row_expanded,
                })
            }
        }
    }

    fn execute_replace_all(&mut self, replacement: &str) -> Result<CommandResult, ReplaceError> {
        let SourceState::Ready(source) = &mut self.source else {
            return Err(ReplaceError::NotReady);
        };

        source.refresh(&self.host);
        let matches = source.matches();
        let report = self
            .session
            .run_replace_all(&mut self.host, &matches, replacement);

        self.notifier
            .notify(&format!("Replaced {} matches.", report.replaced));
        // Context mismatches only show up as a lower count.
        let names: Vec<String> = report
            .skipped
            .iter()
            .filter(|skipped| {
                !matches!(skipped.error, ReplaceError::EditingContextMismatch { .. })
            })
            .map(|skipped| skipped.document.to_string())
            .collect();
        if !names.is_empty() {
            self.notifier.notify(&format!(
                "Skipped {} files: {}",
                names.len(),
                names.join(", ")
            ));
        }

        Ok(CommandResult::Replaced {
            replaced: report.replaced,
            skipped: report.skipped.len(),
        })
    }

    fn execute_undo(&mut self) -> CommandResult {
        match self.session.undo(&mut self.host) {
            Ok(report) => {
                self.notifier
                    .notify(&format!("Changes in {} files undone.", report.restored));
                if !report.failures.is_empty() {
                    self.notifier.notify(&format!(
                        "Failed to undo changes in {} files.",
                        report.failures.len()
                    ));
                }
                CommandResult::Restored {
                    documents: report.restored,
                    failed: report.failures.len(),
                }
            }
            Err(err) => {
                if err != ReplaceError::NoHistory {
                    warn!(error = %err, "undo failed");
                }
                self.notifier.notify("No replace all history to undo.");
                CommandResult::NothingToUndo
            }
        }
    }
}
