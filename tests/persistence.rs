//! Loading and saving documents through `FileStore`.

mod common;

use std::fs;

use common::{config, metrics, setup_test_logging, type_text};
use flowtext::{Command, EditorSession, Error, FileStore, SaveOutcome};

#[test]
fn missing_file_opens_empty_and_saves() {
    setup_test_logging();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.txt");

    let mut s = EditorSession::open(config(40), metrics(), FileStore::new(&path)).unwrap();
    assert_eq!(s.text(), "");
    type_text(&mut s, "hi\nyo");

    let outcome = s.execute(Command::Save).unwrap();
    assert_eq!(outcome.save, Some(SaveOutcome::Written { bytes: 5 }));
    assert_eq!(fs::read_to_string(&path).unwrap(), "hi\nyo");
}

#[test]
fn reopened_document_matches_and_has_no_history() {
    setup_test_logging();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("doc.txt");
    fs::write(&path, "first line\nsecond").unwrap();

    let s = EditorSession::open(config(40), metrics(), FileStore::new(&path)).unwrap();
    assert_eq!(s.text(), "first line\nsecond");
    assert_eq!(s.line_index().line_count(), 2);
    assert!(s.store().is_at_end());
    assert!(!s.history().can_undo());
}

#[test]
fn crlf_loads_as_newlines_and_saves_as_lf() {
    setup_test_logging();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dos.txt");
    fs::write(&path, "a\r\nb\rc").unwrap();

    let mut s = EditorSession::open(config(40), metrics(), FileStore::new(&path)).unwrap();
    assert_eq!(s.line_index().line_count(), 3);
    s.execute(Command::Save).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "a\nb\nc");
}

#[test]
fn empty_document_is_not_written() {
    setup_test_logging();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.txt");

    let mut s = EditorSession::open(config(40), metrics(), FileStore::new(&path)).unwrap();
    let outcome = s.execute(Command::Save).unwrap();
    assert_eq!(outcome.save, Some(SaveOutcome::NothingToWrite));
    assert!(!path.exists());
}

#[test]
fn failed_save_leaves_document_alone() {
    setup_test_logging();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing-dir").join("doc.txt");

    let mut s = EditorSession::open(config(40), metrics(), FileStore::new(&path)).unwrap();
    type_text(&mut s, "keep me");
    let undo_depth = s.history().undo_len();

    assert!(matches!(s.execute(Command::Save), Err(Error::Io(_))));
    assert_eq!(s.text(), "keep me");
    assert_eq!(s.history().undo_len(), undo_depth);
}

#[test]
fn unreadable_document_fails_to_open() {
    setup_test_logging();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("binary.bin");
    fs::write(&path, [0xff, 0xfe, 0x00, 0x9f]).unwrap();

    let result = EditorSession::open(config(40), metrics(), FileStore::new(&path));
    assert!(matches!(result, Err(Error::Io(_))));
}
