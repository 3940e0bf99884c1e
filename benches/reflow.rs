//! Reflow and editing performance benchmarks.

#![allow(clippy::semicolon_if_nothing_returned)]

use criterion::{Criterion, criterion_group, criterion_main};
use flowtext::text::{CellContent, CharacterStore, LayoutParams, reflow};
use flowtext::{Command, EditorConfig, EditorSession, FontSpec, MemoryStore, MonospaceMetrics};
use std::hint::black_box;

const PARAGRAPH: &str = "The quick brown fox jumps over the lazy dog. ";

fn document(paragraphs: usize) -> String {
    let mut text = String::new();
    for i in 0..paragraphs {
        text.push_str(&PARAGRAPH.repeat(8));
        if i % 4 == 3 {
            text.push('\n');
        }
    }
    text
}

fn store_with(text: &str) -> CharacterStore {
    let mut store = CharacterStore::new();
    for ch in text.chars() {
        store.insert_after_cursor(CellContent::from_char(ch));
    }
    store
}

fn reflow_full(c: &mut Criterion) {
    let metrics = MonospaceMetrics::default();
    let font = FontSpec::default();

    for paragraphs in [10, 100] {
        let mut store = store_with(&document(paragraphs));
        let name = format!("reflow_{}_cells", store.len());
        c.bench_function(&name, |b| {
            b.iter(|| {
                reflow(
                    black_box(&mut store),
                    LayoutParams::new(5.0, black_box(490.0)),
                    &metrics,
                    &font,
                )
            })
        });
    }

    let mut store = store_with(&"x".repeat(10_000));
    c.bench_function("reflow_10k_forced_breaks", |b| {
        b.iter(|| {
            reflow(
                black_box(&mut store),
                LayoutParams::new(5.0, 490.0),
                &metrics,
                &font,
            )
        })
    });
}

fn session_typing(c: &mut Criterion) {
    let text = document(20);
    c.bench_function("session_insert_char_mid_document", |b| {
        let mut session = EditorSession::open(
            EditorConfig::default(),
            MonospaceMetrics::default(),
            MemoryStore::with_contents(text.clone()),
        )
        .unwrap();
        session.execute(Command::ClickAt { x: 200.0, y: 40.0 }).unwrap();
        b.iter(|| {
            session.execute(black_box(Command::InsertChar('a'))).unwrap();
            session.execute(Command::DeleteBackward).unwrap();
        })
    });

    c.bench_function("session_undo_redo", |b| {
        let mut session = EditorSession::new(EditorConfig::default(), MonospaceMetrics::default());
        for ch in PARAGRAPH.chars() {
            session.execute(Command::InsertChar(ch)).unwrap();
        }
        b.iter(|| {
            session.execute(Command::Undo).unwrap();
            session.execute(Command::Redo).unwrap();
        })
    });
}

criterion_group!(benches, reflow_full, session_typing);
criterion_main!(benches);
