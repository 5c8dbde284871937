//! Replace across several open documents, then undo.
//!
//! Run with `RUST_LOG=replace_all=debug` to see the per-document trace.

use replace_all::{
    Command, LogNotifier, ReplaceAllExecutor, SearchOptions, SearchPane, Settings, ThreadSleeper,
    Workspace,
};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut ws = Workspace::new();
    ws.open_buffer("notes/today.md", "- [ ] call Bob\n- [ ] email Bob")
        .unwrap();
    ws.open_buffer("notes/later.md", "ask Bob about the release")
        .unwrap();
    ws.open_buffer("README.md", "nothing to see").unwrap();

    let mut pane = SearchPane::new();
    pane.search(&ws, "Bob", SearchOptions::default()).unwrap();
    println!(
        "found {} matches in {} documents",
        pane.results().total_matches(),
        pane.results().len()
    );

    let mut executor = ReplaceAllExecutor::new(ws, LogNotifier, Settings::default());
    let mut pane = Some(pane);
    if executor
        .initialize(&mut ThreadSleeper, || pane.take())
        .is_err()
    {
        return;
    }

    let result = executor.execute(Command::ReplaceAll {
        replacement: "Alice".to_string(),
    });
    println!("{result:?}");
    for doc in executor.host().documents() {
        println!("--- {doc}\n{}", executor.host().buffer_text(doc).unwrap_or_default());
    }

    let result = executor.execute(Command::UndoReplaceAll);
    println!("{result:?}");
    for doc in executor.host().documents() {
        println!("--- {doc}\n{}", executor.host().buffer_text(doc).unwrap_or_default());
    }
}
