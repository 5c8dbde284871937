use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use replace_all::{
    DocumentId, LineIndex, ReplaceAllSession, SearchOptions, Workspace, apply_batch, find_all,
    translate,
};

fn large_text(line_count: usize) -> String {
    let mut out = String::with_capacity(line_count * 64);
    for i in 0..line_count {
        out.push_str(&format!(
            "{i:06} the quick brown fox jumps over the lazy dog (replace-all benchmark line)\n"
        ));
    }
    out.pop();
    out
}

fn bench_translate(c: &mut Criterion) {
    let text = large_text(50_000);
    let index = LineIndex::from_text(&text);
    let len = index.char_count();
    c.bench_function("translate/1000_offsets", |b| {
        b.iter(|| {
            for i in 0..1000 {
                black_box(translate(&index, (i * 3571) % len).unwrap());
            }
        })
    });
}

fn bench_apply_batch(c: &mut Criterion) {
    let text = large_text(10_000);
    let matches = find_all(&text, "fox", SearchOptions::default()).unwrap();
    let doc = DocumentId::new("bench.md");
    c.bench_function("apply_batch/10k_matches", |b| {
        b.iter_batched(
            || {
                let mut ws = Workspace::new();
                ws.open_buffer(doc.clone(), &text).unwrap();
                ws
            },
            |mut ws| {
                let count = apply_batch(&mut ws, &doc, matches.ranges(), "wolf").unwrap();
                black_box(count);
            },
            BatchSize::LargeInput,
        )
    });
}

fn bench_run_and_undo(c: &mut Criterion) {
    let text = large_text(2_000);
    c.bench_function("run_replace_all/20_docs_with_undo", |b| {
        b.iter_batched(
            || {
                let mut ws = Workspace::new();
                for i in 0..20 {
                    ws.open_buffer(format!("doc{i}.md"), &text).unwrap();
                }
                ws
            },
            |mut ws| {
                let matches = ws
                    .search_all_open_buffers("lazy", SearchOptions::default())
                    .unwrap();
                let mut session = ReplaceAllSession::new();
                let report = session.run_replace_all(&mut ws, &matches, "sleepy");
                black_box(report.replaced);
                black_box(session.undo(&mut ws).unwrap());
            },
            BatchSize::LargeInput,
        )
    });
}

criterion_group!(benches, bench_translate, bench_apply_batch, bench_run_and_undo);
criterion_main!(benches);
