use replace_all::{
    Command, CommandResult, DocumentId, DocumentStore, MatchSet, MatchesByDocument,
    RecordingNotifier, ReplaceAllExecutor, ReplaceError, RetryPolicy, SearchOptions, SearchPane,
    Settings, Workspace,
};
use std::time::Duration;

type Executor = ReplaceAllExecutor<Workspace, SearchPane, RecordingNotifier>;

fn executor_with(docs: &[(&str, &str)], settings: Settings) -> Executor {
    let mut ws = Workspace::new();
    for (path, text) in docs {
        ws.open_buffer(*path, text).unwrap();
    }
    ReplaceAllExecutor::new(ws, RecordingNotifier::new(), settings)
}

fn search(executor: &mut Executor, query: &str) {
    let mut pane = SearchPane::new();
    pane.search(executor.host(), query, SearchOptions::default())
        .unwrap();
    executor.attach_match_source(pane);
}

#[test]
fn test_replace_and_undo_notifications() {
    let mut executor = executor_with(
        &[("a.md", "old old"), ("b.md", "old")],
        Settings::default(),
    );
    search(&mut executor, "old");

    let result = executor
        .execute(Command::ReplaceAll {
            replacement: "new".to_string(),
        })
        .unwrap();
    assert_eq!(
        result,
        CommandResult::Replaced {
            replaced: 3,
            skipped: 0
        }
    );
    assert_eq!(executor.notifier().last(), Some("Replaced 3 matches."));

    let result = executor.execute(Command::UndoReplaceAll).unwrap();
    assert_eq!(
        result,
        CommandResult::Restored {
            documents: 2,
            failed: 0
        }
    );
    assert_eq!(executor.notifier().last(), Some("Changes in 2 files undone."));
    assert_eq!(
        executor.host().buffer_text(&DocumentId::new("a.md")).unwrap(),
        "old old"
    );

    let result = executor.execute(Command::UndoReplaceAll).unwrap();
    assert_eq!(result, CommandResult::NothingToUndo);
    assert_eq!(
        executor.notifier().last(),
        Some("No replace all history to undo.")
    );
}

fn replace(executor: &mut Executor, replacement: &str) -> CommandResult {
    executor
        .execute(Command::ReplaceAll {
            replacement: replacement.to_string(),
        })
        .unwrap()
}

#[test]
fn test_consecutive_replace_all_uses_current_offsets() {
    let mut executor = executor_with(&[("a.md", "red fish, red fox")], Settings::default());
    search(&mut executor, "red");

    replace(&mut executor, "reddish");
    let result = replace(&mut executor, "reddish");

    assert_eq!(
        result,
        CommandResult::Replaced {
            replaced: 2,
            skipped: 0
        }
    );
    assert_eq!(
        executor.host().buffer_text(&DocumentId::new("a.md")).unwrap(),
        "reddishdish fish, reddishdish fox"
    );
}

#[test]
fn test_second_replace_all_finds_nothing_after_matches_are_gone() {
    let mut executor = executor_with(&[("a.md", "red fish, red fox")], Settings::default());
    search(&mut executor, "red");

    replace(&mut executor, "blue");
    let result = replace(&mut executor, "green");

    assert_eq!(
        result,
        CommandResult::Replaced {
            replaced: 0,
            skipped: 0
        }
    );
    assert_eq!(
        executor.host().buffer_text(&DocumentId::new("a.md")).unwrap(),
        "blue fish, blue fox"
    );
    assert_eq!(
        executor.notifier().messages().to_vec(),
        vec!["Replaced 2 matches.", "Replaced 0 matches."]
    );
}

#[test]
fn test_edits_after_search_are_picked_up() {
    let mut executor = executor_with(&[("a.md", "abc"), ("b.md", "abc")], Settings::default());
    search(&mut executor, "abc");
    executor
        .host_mut()
        .write(&DocumentId::new("a.md"), "xx abc")
        .unwrap();
    executor
        .host_mut()
        .close_buffer(&DocumentId::new("b.md"))
        .unwrap();

    let result = replace(&mut executor, "y");

    assert_eq!(
        result,
        CommandResult::Replaced {
            replaced: 1,
            skipped: 0
        }
    );
    assert_eq!(
        executor.host().buffer_text(&DocumentId::new("a.md")).unwrap(),
        "xx y"
    );
    assert_eq!(executor.notifier().messages().to_vec(), vec!["Replaced 1 matches."]);
}

#[test]
fn test_context_mismatch_is_not_announced() {
    let mut executor = executor_with(&[("a.md", "abc"), ("b.md", "abc")], Settings::default());
    executor
        .host_mut()
        .set_read_only(&DocumentId::new("a.md"), true)
        .unwrap();
    search(&mut executor, "abc");

    let result = replace(&mut executor, "x");

    assert_eq!(
        result,
        CommandResult::Replaced {
            replaced: 1,
            skipped: 1
        }
    );
    assert_eq!(executor.notifier().messages().to_vec(), vec!["Replaced 1 matches."]);
    assert_eq!(
        executor.host().buffer_text(&DocumentId::new("a.md")).unwrap(),
        "abc"
    );
}

#[test]
fn test_unreadable_and_out_of_bounds_documents_are_announced() {
    let mut matches = MatchesByDocument::new();
    matches.insert(DocumentId::new("missing.md"), MatchSet::from_pairs(&[[0, 1]]));
    matches.insert(DocumentId::new("a.md"), MatchSet::from_pairs(&[[0, 99]]));
    matches.insert(DocumentId::new("b.md"), MatchSet::from_pairs(&[[0, 1]]));

    let mut ws = Workspace::new();
    ws.open_buffer("a.md", "abc").unwrap();
    ws.open_buffer("b.md", "abc").unwrap();
    let mut executor = ReplaceAllExecutor::new(ws, RecordingNotifier::new(), Settings::default());
    executor.attach_match_source(matches);

    let result = executor
        .execute(Command::ReplaceAll {
            replacement: "x".to_string(),
        })
        .unwrap();

    assert_eq!(
        result,
        CommandResult::Replaced {
            replaced: 1,
            skipped: 2
        }
    );
    assert_eq!(
        executor.notifier().messages().to_vec(),
        vec!["Replaced 1 matches.", "Skipped 2 files: missing.md, a.md"]
    );
    assert_eq!(
        executor.host().buffer_text(&DocumentId::new("b.md")).unwrap(),
        "xbc"
    );
}

#[test]
fn test_replace_requires_initialization() {
    let mut executor = executor_with(&[("a.md", "abc")], Settings::default());

    assert_eq!(
        executor.execute(Command::ReplaceAll {
            replacement: "x".to_string()
        }),
        Err(ReplaceError::NotReady)
    );
    assert_eq!(
        executor.execute(Command::ToggleReplaceRow),
        Err(ReplaceError::NotReady)
    );
    assert!(executor.notifier().messages().is_empty());
}

#[test]
fn test_initialize_polls_until_ready() {
    let mut executor = executor_with(&[("a.md", "abc")], Settings::default());
    let mut sleeps = Vec::new();
    let mut sleeper = |d: Duration| sleeps.push(d);
    let mut probes = 0;

    executor
        .initialize(&mut sleeper, || {
            probes += 1;
            (probes == 4).then(SearchPane::new)
        })
        .unwrap();

    assert!(executor.is_ready());
    assert_eq!(probes, 4);
    assert_eq!(sleeps.len(), 3);
}

#[test]
fn test_initialization_timeout_keeps_undo_available() {
    let settings = Settings {
        init_retry: RetryPolicy {
            interval_ms: 10,
            max_retries: 2,
        },
        ..Settings::default()
    };
    let mut executor: ReplaceAllExecutor<Workspace, MatchesByDocument, RecordingNotifier> = {
        let mut ws = Workspace::new();
        ws.open_buffer("a.md", "abc").unwrap();
        ReplaceAllExecutor::new(ws, RecordingNotifier::new(), settings)
    };

    let mut sleeper = |_: Duration| {};
    let err = executor.initialize(&mut sleeper, || None).unwrap_err();

    assert_eq!(err, ReplaceError::InitializationTimeout { attempts: 3 });
    assert!(executor.initialization_failed());
    assert_eq!(
        executor.notifier().last(),
        Some("Failed to initialize replace all.")
    );

    assert_eq!(
        executor.execute(Command::UndoReplaceAll),
        Ok(CommandResult::NothingToUndo)
    );
}

#[test]
fn test_static_match_source() {
    let mut matches = MatchesByDocument::new();
    matches.insert(DocumentId::new("a.md"), MatchSet::from_pairs(&[[1, 2]]));

    let mut ws = Workspace::new();
    ws.open_buffer("a.md", "abc").unwrap();
    let mut executor = ReplaceAllExecutor::new(ws, RecordingNotifier::new(), Settings::default());
    executor.attach_match_source(matches);

    executor
        .execute(Command::ReplaceAll {
            replacement: String::new(),
        })
        .unwrap();

    assert_eq!(
        executor.host().buffer_text(&DocumentId::new("a.md")).unwrap(),
        "ac"
    );
}

#[test]
fn test_toggle_replace_row_starts_from_setting() {
    let settings = Settings {
        replace_row_expanded: false,
        ..Settings::default()
    };
    let mut executor = executor_with(&[("a.md", "abc")], settings);
    search(&mut executor, "a");
    assert!(!executor.replace_row_expanded());

    assert_eq!(
        executor.execute(Command::ToggleReplaceRow),
        Ok(CommandResult::ReplaceRow { expanded: true })
    );
    assert_eq!(
        executor.execute(Command::ToggleReplaceRow),
        Ok(CommandResult::ReplaceRow { expanded: false })
    );
}
