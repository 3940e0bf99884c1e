//! Property-based tests for word wrap and the line index.

mod common;

use common::{CELL, ORIGIN_X, font, metrics};
use flowtext::text::{CellContent, CharacterStore, LayoutParams, LineIndex, reflow};
use proptest::prelude::*;

fn document() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            6 => prop::sample::select(vec!["a", "b", "c", "d"]),
            2 => Just(" "),
            1 => Just("\n"),
            1 => Just("中"),
        ],
        0..120,
    )
    .prop_map(|parts| parts.concat())
}

fn store_with(text: &str) -> CharacterStore {
    let mut store = CharacterStore::new();
    for ch in text.chars() {
        store.insert_after_cursor(CellContent::from_char(ch));
    }
    store
}

fn layout(store: &mut CharacterStore, columns: usize) -> LineIndex {
    reflow(
        store,
        LayoutParams::new(ORIGIN_X, columns as f64 * CELL),
        &metrics(),
        &font(),
    )
}

fn is_word_cell(content: &CellContent) -> bool {
    !content.is_space() && !content.is_hard_newline()
}

proptest! {
    /// Reflowing twice with the same width gives the same layout.
    #[test]
    fn reflow_is_idempotent(text in document(), columns in 1usize..30) {
        let mut store = store_with(&text);
        let first_index = layout(&mut store, columns);
        let first: Vec<_> = store
            .iter()
            .map(|(_, c)| (c.x(), c.line(), c.is_soft_break()))
            .collect();

        let second_index = layout(&mut store, columns);
        let second: Vec<_> = store
            .iter()
            .map(|(_, c)| (c.x(), c.line(), c.is_soft_break()))
            .collect();

        prop_assert_eq!(first, second);
        prop_assert_eq!(first_index, second_index);
    }

    /// Every indexed line starts at the origin with the first cell carrying
    /// that line number, and no cell sits on an unindexed line.
    #[test]
    fn line_index_matches_cells(text in document(), columns in 1usize..30) {
        let mut store = store_with(&text);
        let index = layout(&mut store, columns);

        for (line, start) in index.starts().enumerate() {
            let cell = store.get(start).unwrap();
            prop_assert_eq!(cell.line(), line);
            prop_assert!((cell.x() - ORIGIN_X).abs() < f64::EPSILON);
            if let Some(prev) = store.get(store.prev(start)) {
                prop_assert!(prev.line() < line);
            }
        }
        for (_, cell) in store.iter() {
            prop_assert!(cell.line() < index.line_count());
        }
    }

    /// Non-space cells stay inside the width unless they open their line.
    #[test]
    fn word_cells_fit_unless_first(text in document(), columns in 2usize..30) {
        let mut store = store_with(&text);
        let index = layout(&mut store, columns);
        let starts: Vec<_> = index.starts().collect();
        let limit = ORIGIN_X + columns as f64 * CELL;

        for (id, cell) in store.iter() {
            if is_word_cell(cell.content()) && !starts.contains(&id) {
                prop_assert!(cell.right() <= limit + f64::EPSILON);
            }
        }
    }

    /// A word is split across lines only when its line had no space to
    /// wrap at.
    #[test]
    fn words_split_only_without_wrap_point(text in document(), columns in 1usize..30) {
        let mut store = store_with(&text);
        layout(&mut store, columns);
        let cells: Vec<_> = store.iter().map(|(_, c)| c.clone()).collect();

        for pair in cells.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            if is_word_cell(a.content()) && is_word_cell(b.content()) && a.line() != b.line() {
                let line_start = cells.iter().position(|c| c.line() == a.line()).unwrap();
                let has_wrap_point = cells
                    .iter()
                    .skip(line_start + 1)
                    .take_while(|c| c.line() == a.line())
                    .any(|c| c.content().is_space());
                prop_assert!(!has_wrap_point, "word split on a line with a space");
            }
        }
    }
}
