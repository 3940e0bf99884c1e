//! Fuzz target for loading arbitrary text.
//!
//! Loaded text must survive a save unchanged apart from line terminators.

#![no_main]

use flowtext::{Command, EditorConfig, EditorSession, MemoryStore, MonospaceMetrics};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    let Ok(mut session) = EditorSession::open(
        EditorConfig::default(),
        MonospaceMetrics::default(),
        MemoryStore::with_contents(data),
    ) else {
        return;
    };

    let expected = data.replace("\r\n", "\n").replace('\r', "\n");
    assert_eq!(session.text(), expected);
    assert!(session.store().is_at_end());
    let _ = session.execute(Command::Save);
});
